use crate::core::region::{RegionCatalog, Selection};
use crate::domain::model::{ContactRequest, PartnerApplication};
use crate::utils::error::Result;
use crate::utils::validation::{validate_email, validate_non_empty_string, validate_url, Validate};

/// Renders a selection as the single `target_region` string the sink stores.
///
/// Labels follow catalog order. A fully selected group collapses to its
/// aggregate label so "LATAM (Full Region)" is not followed by 19 countries.
pub fn format_selection(selection: &Selection, catalog: &RegionCatalog) -> String {
    selection
        .keys()
        .filter(|key| key.is_aggregate() || !catalog.is_fully_selected(selection, key.group_index()))
        .filter_map(|key| catalog.region(key))
        .map(|region| region.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Validate for ContactRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("first_name", &self.first_name)?;
        validate_non_empty_string("last_name", &self.last_name)?;
        validate_non_empty_string("company_name", &self.company_name)?;
        validate_email("email", &self.email)?;
        validate_non_empty_string("target_region", &self.target_region)?;
        Ok(())
    }
}

impl Validate for PartnerApplication {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("first_name", &self.first_name)?;
        validate_non_empty_string("last_name", &self.last_name)?;
        validate_email("email", &self.email)?;
        validate_url("linkedin", &self.linkedin)?;
        validate_non_empty_string("country", &self.country)?;
        Ok(())
    }
}
