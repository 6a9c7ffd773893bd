use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Listing request to {url} returned HTTP {status}")]
    FetchError { url: String, status: u16 },

    #[error("Listing structure error: {message}")]
    StructureError { message: String },

    #[error("History file {path} is malformed: {source}")]
    HistoryError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
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

impl WatchError {
    pub fn structure(message: impl Into<String>) -> Self {
        WatchError::StructureError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            WatchError::RequestError(_) | WatchError::FetchError { .. } => ErrorCategory::Network,
            WatchError::StructureError { .. } | WatchError::SerializationError(_) => {
                ErrorCategory::Parsing
            }
            WatchError::HistoryError { .. } | WatchError::IoError(_) => ErrorCategory::Storage,
            WatchError::ConfigError { .. }
            | WatchError::InvalidConfigValueError { .. }
            | WatchError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Medium errors are expected to clear up by the next scheduled run.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parsing | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WatchError::RequestError(_) => {
                "Check network connectivity; the next scheduled run will try again"
            }
            WatchError::FetchError { status, .. } if *status == 403 || *status == 429 => {
                "The listing site is refusing requests; lower the run frequency"
            }
            WatchError::FetchError { .. } => "The listing site returned an error; retry later",
            WatchError::StructureError { .. } => {
                "The listing page layout has probably changed; update the offer selector"
            }
            WatchError::HistoryError { .. } => {
                "Fix or delete the history file (deleting it re-sends every current offer)"
            }
            WatchError::IoError(_) => "Check permissions and free space in the data directory",
            WatchError::SerializationError(_) => "Report this as a bug",
            WatchError::ConfigError { .. }
            | WatchError::InvalidConfigValueError { .. }
            | WatchError::MissingConfigError { .. } => "Check command line flags and environment",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download the listing page: {}", self),
            ErrorCategory::Parsing => format!("Could not read the listing page: {}", self),
            ErrorCategory::Storage => format!("Could not access offer history: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
