use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to persist snapshot to {}: {source}", path.display())]
    PersistenceError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// Why a single plate lookup produced no record. Recovered by the harvester.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("response body is not valid JSON (status {status}): {source}")]
    Parse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HarvestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarvestError::HttpError(_) => ErrorCategory::Network,
            HarvestError::CsvError(_) | HarvestError::SerializationError(_) => ErrorCategory::Data,
            HarvestError::IoError(_) | HarvestError::PersistenceError { .. } => {
                ErrorCategory::Storage
            }
            HarvestError::ConfigError { .. }
            | HarvestError::InvalidConfigValueError { .. }
            | HarvestError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HarvestError::HttpError(_) => ErrorSeverity::Medium,
            HarvestError::PersistenceError { .. } | HarvestError::IoError(_) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HarvestError::HttpError(_) => {
                "Could not build the HTTP client for the lookup service".to_string()
            }
            HarvestError::CsvError(e) => format!("Could not read the plate list: {}", e),
            HarvestError::IoError(e) => format!("File system error: {}", e),
            HarvestError::SerializationError(e) => {
                format!("Could not serialize the snapshot: {}", e)
            }
            HarvestError::PersistenceError { path, .. } => {
                format!("Could not save the snapshot to {}", path.display())
            }
            HarvestError::ConfigError { message } => format!("Configuration problem: {}", message),
            HarvestError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            HarvestError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the --base-url value",
            ErrorCategory::Data => "Check that the plate list file is a valid CSV or text file",
            ErrorCategory::Storage => {
                "Make sure the output directory exists and is writable, then run again"
            }
            ErrorCategory::Configuration => {
                "Review the command line flags or the TOML file; the API key can also be set with BOOSTR_API_KEY"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
