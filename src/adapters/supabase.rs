use crate::domain::model::{ContactRequest, Partner, PartnerApplication, SubmissionReceipt};
use crate::domain::ports::{ConfigProvider, LeadSink, PartnerRepository};
use crate::utils::error::{DirectoryError, Result};
use crate::config::toml_config::DEFAULT_TIMEOUT_SECONDS;
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::time::Duration;

const PARTNERS_TABLE: &str = "gtm_partners";
const CONTACT_REQUESTS_TABLE: &str = "contact_requests";
const PARTNER_APPLICATIONS_TABLE: &str = "partner_applications";

/// PostgREST client for the hosted backend.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    client: Client,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self> {
        Self::with_timeout(base_url, anon_key, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(base_url: &str, anon_key: &str, timeout: Duration) -> Result<Self> {
        validate_url("backend.url", base_url)?;
        if anon_key.trim().is_empty() {
            return Err(DirectoryError::MissingConfigError {
                field: "backend.anon_key".to_string(),
            });
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            client,
        })
    }

    /// Fails with `BackendUnavailable` when url or key are not configured.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        match (config.backend_url(), config.anon_key()) {
            (Some(url), Some(key)) => Self::with_timeout(url, key, config.timeout()),
            _ => Err(DirectoryError::BackendUnavailable {
                message: "backend url and anon key are required".to_string(),
            }),
        }
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn select_partners(&self, filters: &[(&str, String)]) -> Result<Vec<Partner>> {
        let url = self.rest_url(PARTNERS_TABLE);
        tracing::debug!("Fetching partners from {} with {:?}", url, filters);

        let request = self
            .authorized(self.client.get(&url))
            .query(&[("select", "*"), ("active", "eq.true")])
            .query(filters);
        let response = check_status(request.send().await?).await?;
        let partners: Vec<Partner> = response.json().await?;

        tracing::debug!("Backend returned {} partners", partners.len());
        Ok(partners)
    }

    async fn insert<T: Serialize + Sync>(&self, table: &str, row: &T) -> Result<SubmissionReceipt> {
        let url = self.rest_url(table);
        tracing::debug!("Inserting into {}", url);

        let request = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(row);
        let response = check_status(request.send().await?).await?;
        let rows: Vec<serde_json::Value> = response.json().await?;

        let id = rows
            .first()
            .and_then(|row| row.get("id"))
            .map(|id| match id {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        tracing::info!("Saved row in {} (id: {:?})", table, id);
        Ok(SubmissionReceipt { id })
    }
}

/// Turns a non-2xx response into `BackendError`, keeping PostgREST's message.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.to_string()
            } else {
                body
            }
        });

    tracing::error!("Backend request failed with {}: {}", status, message);
    Err(DirectoryError::BackendError {
        status: status.as_u16(),
        message,
    })
}

/// PostgREST array literal, e.g. `{"Central America"}`.
fn array_literal(value: &str) -> String {
    format!("{{\"{}\"}}", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[async_trait]
impl PartnerRepository for SupabaseClient {
    async fn fetch_partners(&self) -> Result<Vec<Partner>> {
        self.select_partners(&[("order", "hires.desc".to_string())])
            .await
    }

    async fn fetch_partners_by_market(&self, market: &str) -> Result<Vec<Partner>> {
        self.select_partners(&[
            ("markets", format!("cs.{}", array_literal(market))),
            ("order", "hires.desc".to_string()),
        ])
        .await
    }

    async fn fetch_partners_by_rate(&self, min_rate: f64, max_rate: f64) -> Result<Vec<Partner>> {
        self.select_partners(&[
            ("rate", format!("gte.{}", min_rate)),
            ("rate", format!("lte.{}", max_rate)),
            ("order", "rate.asc".to_string()),
        ])
        .await
    }

    async fn increment_hires(&self, partner_id: &str) -> Result<()> {
        let url = self.rest_url("rpc/increment_hires");
        tracing::debug!("Incrementing hires for partner {}", partner_id);

        let request = self
            .authorized(self.client.post(&url))
            .json(&serde_json::json!({ "partner_id": partner_id }));
        check_status(request.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl LeadSink for SupabaseClient {
    async fn submit_contact_request(&self, request: &ContactRequest) -> Result<SubmissionReceipt> {
        self.insert(CONTACT_REQUESTS_TABLE, request).await
    }

    async fn submit_partner_application(
        &self,
        application: &PartnerApplication,
    ) -> Result<SubmissionReceipt> {
        self.insert(PARTNER_APPLICATIONS_TABLE, application).await
    }
}
