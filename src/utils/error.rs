use thiserror::Error;

#[derive(Error, Debug)]
pub enum TarotError {
    #[error("Method Not Allowed")]
    MethodNotAllowed { method: String },

    #[error("Missing {field} in request body")]
    MissingField { field: String },

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Invalid body encoding: {message}")]
    InvalidEncoding { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Received an empty response from the AI.")]
    EmptyResponse,

    #[error("Upstream provider failure: {message}")]
    UpstreamFailure { message: String },

    #[error("Reading proxy returned {status}: {message}")]
    ProxyError { status: u16, message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ClientInput,
    Configuration,
    Upstream,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TarotError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamFailure {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MethodNotAllowed { .. }
            | Self::MissingField { .. }
            | Self::InvalidBody(_)
            | Self::InvalidEncoding { .. } => ErrorCategory::ClientInput,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::EmptyResponse
            | Self::UpstreamFailure { .. }
            | Self::ProxyError { .. }
            | Self::ApiError(_) => ErrorCategory::Upstream,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::ClientInput => ErrorSeverity::Low,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// HTTP status the proxy answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed { .. } => 405,
            Self::MissingField { .. } | Self::InvalidBody(_) | Self::InvalidEncoding { .. } => 400,
            _ => 500,
        }
    }

    /// Message placed in the proxy's `{"error": ...}` body. Provider details
    /// stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::MethodNotAllowed { .. } => "Method Not Allowed".to_string(),
            Self::MissingField { field } => format!("Missing {} in request body", field),
            Self::InvalidBody(_) => "Request body must be a JSON object".to_string(),
            Self::InvalidEncoding { .. } => "Request body is not valid base64 text".to_string(),
            Self::MissingConfigError { field } if field == "API_KEY" => {
                "API_KEY environment variable not set on the server".to_string()
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "The reading service is not configured correctly".to_string()
            }
            Self::EmptyResponse => "Received an empty response from the AI.".to_string(),
            _ => "Failed to get a reading from the AI.".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::ClientInput => format!("The request was rejected: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Upstream => {
                "The ethereal connection was lost. Please try again.".to_string()
            }
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingConfigError { .. } => {
                "Set the API_KEY environment variable or add api_key to the [provider] section"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the configuration file and environment variables"
            }
            Self::MethodNotAllowed { .. } => "Send the reading request with POST",
            Self::MissingField { .. } | Self::InvalidBody(_) => {
                "Send a JSON body with cardName, isReversed and question"
            }
            Self::InvalidEncoding { .. } => "Send the body as plain JSON or valid base64",
            Self::ProxyError { .. } => "Check that the reading proxy is deployed and reachable",
            Self::EmptyResponse | Self::UpstreamFailure { .. } | Self::ApiError(_) => {
                "Wait a moment and draw again"
            }
            Self::IoError(_) => "Check terminal input and file permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, TarotError>;
