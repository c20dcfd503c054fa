#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::directory::SortKey;
use crate::core::region::RegionCatalog;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use std::time::Duration;

/// Effective settings: command line over config file over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend_url: Option<String>,
    pub anon_key: Option<String>,
    pub timeout: Duration,
    pub page_size: usize,
    pub default_sort: SortKey,
    pub catalog: RegionCatalog,
}

impl Settings {
    pub fn from_toml(file: &TomlConfig) -> Result<Self> {
        file.validate_fields()?;
        let catalog = file.region_catalog()?;
        Ok(Self {
            backend_url: file.backend_url().map(str::to_string),
            anon_key: file.anon_key().map(str::to_string),
            timeout: ConfigProvider::timeout(file),
            page_size: file.page_size(),
            default_sort: file.default_sort(),
            catalog,
        })
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut settings = Self::from_toml(&file)?;
        if let Some(url) = cli.backend_url.as_ref().filter(|u| !u.is_empty()) {
            settings.backend_url = Some(url.clone());
        }
        if let Some(key) = cli.anon_key.as_ref().filter(|k| !k.is_empty()) {
            settings.anon_key = Some(key.clone());
        }
        if let Some(size) = cli.page_size {
            settings.page_size = size;
        }
        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn backend_url(&self) -> Option<&str> {
        self.backend_url.as_deref()
    }

    fn anon_key(&self) -> Option<&str> {
        self.anon_key.as_deref()
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.backend_url {
            validate_url("backend_url", url)?;
        }
        validate_positive_number("page_size", self.page_size, 1)
    }
}
