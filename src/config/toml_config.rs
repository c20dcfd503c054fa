use crate::core::directory::{SortKey, DEFAULT_PAGE_SIZE};
use crate::core::region::RegionCatalog;
use crate::domain::model::RegionGroup;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub backend: Option<BackendConfig>,
    pub directory: Option<DirectoryConfig>,
    pub regions: Option<Vec<RegionGroup>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub page_size: Option<usize>,
    pub default_sort: Option<SortKey>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"))
}

/// A value still holding an unresolved `${VAR}` counts as unset.
fn resolved(value: Option<&String>) -> Option<&str> {
    value
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty() && !env_var_pattern().is_match(v))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn backend_url(&self) -> Option<&str> {
        resolved(self.backend.as_ref().and_then(|b| b.url.as_ref()))
    }

    pub fn anon_key(&self) -> Option<&str> {
        resolved(self.backend.as_ref().and_then(|b| b.anon_key.as_ref()))
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.backend.as_ref().and_then(|b| b.timeout_seconds)
    }

    pub fn page_size(&self) -> usize {
        self.directory
            .as_ref()
            .and_then(|d| d.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn default_sort(&self) -> SortKey {
        self.directory
            .as_ref()
            .and_then(|d| d.default_sort)
            .unwrap_or_default()
    }

    /// Configured region groups, or the built-in LATAM/Europe catalog.
    pub fn region_catalog(&self) -> Result<RegionCatalog> {
        match &self.regions {
            Some(groups) => RegionCatalog::new(groups.clone()),
            None => Ok(RegionCatalog::builtin()),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn backend_url(&self) -> Option<&str> {
        self.backend_url()
    }

    fn anon_key(&self) -> Option<&str> {
        self.anon_key()
    }

    fn page_size(&self) -> usize {
        self.page_size()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds().unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl TomlConfig {
    /// Scalar checks only; the region catalog validates itself on build.
    pub(crate) fn validate_fields(&self) -> Result<()> {
        if let Some(url) = self.backend_url() {
            validate_url("backend.url", url)?;
        }
        validate_positive_number("directory.page_size", self.page_size(), 1)?;
        if let Some(timeout) = self.timeout_seconds() {
            validate_positive_number("backend.timeout_seconds", timeout as usize, 1)?;
        }
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_fields()?;
        self.region_catalog()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.page_size(), 15);
        assert_eq!(config.default_sort(), SortKey::MostHired);
        assert!(config.backend_url().is_none());
        assert_eq!(ConfigProvider::timeout(&config), Duration::from_secs(10));
        assert_eq!(config.region_catalog().unwrap().groups().len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[backend]
url = "https://demo.supabase.co"
anon_key = "public-anon-key"
timeout_seconds = 5

[directory]
page_size = 9
default_sort = "rate-asc"

[[regions]]
name = "DACH"
aggregate = { value = "dach", label = "DACH (Full Region)" }
countries = [
    { value = "germany", label = "Germany" },
    { value = "austria", label = "Austria" },
    { value = "switzerland", label = "Switzerland" },
]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.backend_url(), Some("https://demo.supabase.co"));
        assert_eq!(config.anon_key(), Some("public-anon-key"));
        assert_eq!(ConfigProvider::timeout(&config), Duration::from_secs(5));
        assert_eq!(config.page_size(), 9);
        assert_eq!(config.default_sort(), SortKey::RateAsc);

        let catalog = config.region_catalog().unwrap();
        assert!(catalog.lookup("austria").is_some());
        assert!(catalog.lookup("latam").is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GTM_TEST_BACKEND_URL", "https://test.supabase.co");

        let toml_content = r#"
[backend]
url = "${GTM_TEST_BACKEND_URL}"
anon_key = "${GTM_TEST_UNSET_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.backend_url(), Some("https://test.supabase.co"));
        assert_eq!(config.anon_key(), None);

        std::env::remove_var("GTM_TEST_BACKEND_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[backend]\nurl = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let zero_page = TomlConfig::from_toml_str("[directory]\npage_size = 0\n").unwrap();
        assert!(zero_page.validate().is_err());

        let broken_regions = r#"
[[regions]]
name = "Empty"
aggregate = { value = "empty", label = "Empty" }
countries = []
"#;
        let config = TomlConfig::from_toml_str(broken_regions).unwrap();
        assert!(matches!(
            config.validate(),
            Err(DirectoryError::InvalidCatalog { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[directory]\npage_size = 30\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.page_size(), 30);
    }
}
