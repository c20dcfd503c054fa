use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single selectable region or country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub value: String,
    pub label: String,
}

impl Region {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A named group of countries plus the aggregate entry standing for all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionGroup {
    pub name: String,
    pub aggregate: Region,
    pub countries: Vec<Region>,
}

/// A directory record as stored in the `gtm_partners` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub rate: f64,
    #[serde(default)]
    pub markets: Vec<String>,
    #[serde(default)]
    pub hires: u32,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, alias = "skills")]
    pub expertise: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Partner {
    pub fn serves_any<'a, I>(&self, markets: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        markets
            .into_iter()
            .any(|wanted| self.markets.iter().any(|m| m == wanted))
    }

    /// Uppercase initials used for avatar fallbacks.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Introduction request left by a company looking for a partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub email: String,
    pub target_region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,
}

/// Application from a sales professional who wants to be listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub linkedin: String,
    pub country: String,
    pub experience: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: Option<String>,
}
