use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request to {endpoint} failed with status {status}")]
    ApiStatusError { endpoint: String, status: u16 },

    #[error("User listing stopped at {offset} of {total} records: server returned an empty page")]
    IncompleteListing { offset: usize, total: usize },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Auth,
    Api,
    Serialization,
    Io,
    Config,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::AuthError { .. } => ErrorCategory::Auth,
            ExportError::ApiError(_)
            | ExportError::ApiStatusError { .. }
            | ExportError::IncompleteListing { .. } => ErrorCategory::Api,
            ExportError::CsvError(_) | ExportError::SerializationError(_) => {
                ErrorCategory::Serialization
            }
            ExportError::IoError(_) => ErrorCategory::Io,
            ExportError::ConfigError { .. }
            | ExportError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Auth => format!("Could not log in to the chat server ({})", self),
            ErrorCategory::Api => format!("Fetching the user list failed ({})", self),
            ErrorCategory::Serialization => format!("Could not convert users for export ({})", self),
            ErrorCategory::Io => format!("Could not write the export file ({})", self),
            ErrorCategory::Config => format!("Invalid configuration ({})", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Auth => "Check username and password; the account needs permission to list users",
            ErrorCategory::Api => "Check host, port and scheme, and that the server is reachable",
            ErrorCategory::Serialization => "Re-run with --verbose to see which records were fetched",
            ErrorCategory::Io => "Make sure the directory of 'exportfile' exists and is writable",
            ErrorCategory::Config => "Fix the configuration file and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
