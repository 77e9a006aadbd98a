use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} ({url})")]
    RequestFailed { status: u16, url: String },

    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Data,
    Configuration,
    System,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::Transport(_) => ErrorCategory::Network,
            CatalogError::RequestFailed { .. } => ErrorCategory::Api,
            CatalogError::Decode(_) | CatalogError::Csv(_) => ErrorCategory::Data,
            CatalogError::ConfigError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CatalogError::Io(_) => ErrorCategory::System,
        }
    }

    /// Status code of a failed HTTP exchange, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::RequestFailed { status, .. } => Some(*status),
            CatalogError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Could not reach the catalog service. Check your connection and try again.".into()
            }
            ErrorCategory::Api => match self.status() {
                Some(401) | Some(403) => "The catalog service rejected the credentials.".into(),
                Some(status) => format!("The catalog service answered with status {}.", status),
                None => "The catalog service returned an error.".into(),
            },
            ErrorCategory::Data => format!("Received data could not be processed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Api => 2,
            ErrorCategory::Data => 1,
            ErrorCategory::Configuration => 3,
            ErrorCategory::System => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
