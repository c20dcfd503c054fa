use crate::core::fallback::sample_partners;
use crate::domain::model::Partner;
use crate::domain::ports::PartnerRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartnerSource {
    Backend,
    Fallback,
}

/// Fetches the directory once. A failed or empty fetch is replaced by the
/// sample partners so the directory always has something to show.
pub async fn load_partners<R>(repository: &R) -> (Vec<Partner>, PartnerSource)
where
    R: PartnerRepository + ?Sized,
{
    match repository.fetch_partners().await {
        Ok(partners) if !partners.is_empty() => {
            tracing::info!("Loaded {} partners from backend", partners.len());
            (partners, PartnerSource::Backend)
        }
        Ok(_) => {
            tracing::warn!("Backend returned no partners, using sample data");
            (sample_partners(), PartnerSource::Fallback)
        }
        Err(e) => {
            tracing::warn!("Error fetching partners: {}, using sample data", e);
            (sample_partners(), PartnerSource::Fallback)
        }
    }
}
