use crate::domain::model::{ContactRequest, Partner, PartnerApplication, SubmissionReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn backend_url(&self) -> Option<&str>;
    fn anon_key(&self) -> Option<&str>;
    fn page_size(&self) -> usize;
    /// Per-request timeout for backend calls.
    fn timeout(&self) -> Duration;
}

/// Read side of the hosted partner table.
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn fetch_partners(&self) -> Result<Vec<Partner>>;
    async fn fetch_partners_by_market(&self, market: &str) -> Result<Vec<Partner>>;
    async fn fetch_partners_by_rate(&self, min_rate: f64, max_rate: f64) -> Result<Vec<Partner>>;
    async fn increment_hires(&self, partner_id: &str) -> Result<()>;
}

/// Write endpoint for the lead-capture forms.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn submit_contact_request(&self, request: &ContactRequest) -> Result<SubmissionReceipt>;
    async fn submit_partner_application(
        &self,
        application: &PartnerApplication,
    ) -> Result<SubmissionReceipt>;
}
