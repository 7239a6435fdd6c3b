use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZuoraError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP {status} from SOAP endpoint: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("SOAP fault {code}: {message}")]
    FaultError { code: String, message: String },

    #[error("XML error: {message}")]
    XmlError { message: String },

    #[error("Unexpected response: {message}")]
    ResponseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Unknown attribute '{field}' on {object}")]
    UnknownAttributeError { object: String, field: String },

    #[error("Attribute '{field}' on {object} is read-only")]
    ReadOnlyAttributeError { object: String, field: String },

    #[error("Subscribe request is incomplete: {field} must be provided")]
    IncompleteRequestError { field: String },

    #[error("{object} '{id}' not found")]
    NotFoundError { object: String, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ZuoraError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        ZuoraError::XmlError {
            message: err.to_string(),
        }
    }

    pub(crate) fn response(message: impl Into<String>) -> Self {
        ZuoraError::ResponseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ZuoraError::ApiError(_) | ZuoraError::HttpStatusError { .. } => ErrorCategory::Network,
            ZuoraError::FaultError { .. }
            | ZuoraError::ResponseError { .. }
            | ZuoraError::NotFoundError { .. } => ErrorCategory::Remote,
            ZuoraError::ConfigError { .. }
            | ZuoraError::MissingConfigError { .. }
            | ZuoraError::InvalidConfigValueError { .. }
            | ZuoraError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ZuoraError::SerializationError(_)
            | ZuoraError::XmlError { .. }
            | ZuoraError::UnknownAttributeError { .. }
            | ZuoraError::ReadOnlyAttributeError { .. }
            | ZuoraError::IncompleteRequestError { .. } => ErrorCategory::Data,
            ZuoraError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Remote | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ZuoraError::ApiError(_) => "Check network connectivity and the SOAP endpoint URL",
            ZuoraError::HttpStatusError { .. } => "Check the endpoint URL and API version",
            ZuoraError::FaultError { .. } => "Check the session id; it may have expired",
            ZuoraError::NotFoundError { .. } => "Verify the object id exists in this tenant",
            ZuoraError::IncompleteRequestError { .. } => {
                "Run validation before submitting the subscribe request"
            }
            ZuoraError::UnknownAttributeError { .. } | ZuoraError::ReadOnlyAttributeError { .. } => {
                "Check the attribute names in the request file"
            }
            ZuoraError::ConfigError { .. }
            | ZuoraError::MissingConfigError { .. }
            | ZuoraError::InvalidConfigValueError { .. }
            | ZuoraError::ConfigValidationError { .. } => "Fix the configuration and retry",
            _ => "Re-run with --verbose to inspect the raw SOAP exchange",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the billing API: {}", self),
            ErrorCategory::Remote => format!("The billing API rejected the call: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Invalid request data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ZuoraError>;
