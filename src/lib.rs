pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{Settings, TomlConfig};

pub use crate::adapters::SupabaseClient;
pub use crate::core::directory::{
    build_page, DirectoryPage, DirectoryView, FilterState, PageState, SortKey,
};
pub use crate::core::loader::{load_partners, PartnerSource};
pub use crate::core::pagination::{page_numbers, PageItem};
pub use crate::core::region::{RegionCatalog, RegionKey, Selection};
pub use crate::utils::error::{DirectoryError, Result};
