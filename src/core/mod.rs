pub mod directory;
pub mod fallback;
pub mod lead;
pub mod loader;
pub mod pagination;
pub mod region;

pub use crate::domain::model::{ContactRequest, Partner, PartnerApplication, Region, RegionGroup};
pub use crate::domain::ports::{ConfigProvider, LeadSink, PartnerRepository};
pub use crate::utils::error::Result;
