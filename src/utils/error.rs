use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Backend rejected request ({status}): {message}")]
    BackendError { status: u16, message: String },

    #[error("Backend is not configured: {message}")]
    BackendUnavailable { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid region catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("Unknown region identifier: {identifier}")]
    UnknownRegion { identifier: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DirectoryError::ApiError(_)
            | DirectoryError::BackendError { .. }
            | DirectoryError::BackendUnavailable { .. } => ErrorCategory::Network,
            DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. }
            | DirectoryError::InvalidCatalog { .. } => ErrorCategory::Configuration,
            DirectoryError::UnknownRegion { .. } | DirectoryError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            DirectoryError::IoError(_)
            | DirectoryError::SerializationError(_)
            | DirectoryError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DirectoryError::ApiError(_) | DirectoryError::BackendError { .. } => {
                ErrorSeverity::Medium
            }
            DirectoryError::BackendUnavailable { .. }
            | DirectoryError::UnknownRegion { .. }
            | DirectoryError::ValidationError { .. }
            | DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. } => ErrorSeverity::High,
            DirectoryError::InvalidCatalog { .. }
            | DirectoryError::IoError(_)
            | DirectoryError::SerializationError(_)
            | DirectoryError::CsvError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DirectoryError::ApiError(_) => "Check network connectivity and the backend URL",
            DirectoryError::BackendError { .. } => {
                "Check the anon key and that the table exists and accepts inserts"
            }
            DirectoryError::BackendUnavailable { .. } => {
                "Set SUPABASE_URL and SUPABASE_ANON_KEY or pass --backend-url/--anon-key"
            }
            DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. } => {
                "Review the configuration file and command line options"
            }
            DirectoryError::InvalidCatalog { .. } => {
                "Each region group needs one aggregate entry, at least one country, and unique identifiers"
            }
            DirectoryError::UnknownRegion { .. } => {
                "Run `gtm-directory regions` to list the known region identifiers"
            }
            DirectoryError::ValidationError { .. } => "Correct the highlighted field and try again",
            DirectoryError::IoError(_) => "Check file paths and permissions",
            DirectoryError::SerializationError(_) | DirectoryError::CsvError(_) => {
                "The data could not be encoded; report this as a bug"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::ApiError(_) => "Could not reach the partner backend".to_string(),
            DirectoryError::BackendError { message, .. } => {
                format!("Could not save request: {}", message)
            }
            DirectoryError::BackendUnavailable { .. } => {
                "The partner backend is not configured".to_string()
            }
            DirectoryError::UnknownRegion { identifier } => {
                format!("'{}' is not a known region or country", identifier)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_is_retryable() {
        let err = DirectoryError::BackendError {
            status: 409,
            message: "duplicate key".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "Could not save request: duplicate key");
    }

    #[test]
    fn test_unknown_region_message() {
        let err = DirectoryError::UnknownRegion {
            identifier: "atlantis".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.user_friendly_message().contains("atlantis"));
    }
}
