use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Store returned {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Request failed: {message}")]
    ClientError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Storage,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::ApiError(_) => ErrorCategory::Network,
            IntakeError::RemoteError { .. } | IntakeError::ClientError { .. } => {
                ErrorCategory::Remote
            }
            IntakeError::IoError(_) => ErrorCategory::Storage,
            IntakeError::CsvError(_) | IntakeError::SerializationError(_) => ErrorCategory::Data,
            IntakeError::ConfigError { .. }
            | IntakeError::ConfigValidationError { .. }
            | IntakeError::InvalidConfigValueError { .. }
            | IntakeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            IntakeError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Data | ErrorCategory::Storage => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::ApiError(_) => "Could not reach the submission store".to_string(),
            IntakeError::RemoteError { status, .. } => {
                format!("The submission store rejected the request (HTTP {})", status)
            }
            IntakeError::IoError(e) => format!("Local file access failed: {}", e),
            IntakeError::CsvError(_) | IntakeError::SerializationError(_) => {
                "Submission data could not be encoded or decoded".to_string()
            }
            IntakeError::ClientError { message } | IntakeError::ValidationError { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the store URL and your network connection, then try again"
            }
            ErrorCategory::Remote => "Check the API key and table name, then try again",
            ErrorCategory::Storage => "Check that the state directory and output path are writable",
            ErrorCategory::Data => "Check that the table columns match the submission fields",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Validation => "Correct the input and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
