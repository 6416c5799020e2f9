/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for configuration, request building and NVP calls
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid purchase or subscription details
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid or missing configuration setting
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A flow step was attempted before a value it depends on was known
    #[error("Missing {0}")]
    Missing(&'static str),

    /// Transport failure talking to the NVP endpoint
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Endpoint answered with a non-success HTTP status
    #[error("HTTP {status} from PayPal: {body}")]
    Http { status: u16, body: String },

    /// Response body was empty or carried no ACK field
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// PayPal acknowledged the call as failed
    #[error("PayPal {operation} failed with error {code}: {message}")]
    Api {
        operation: String,
        ack: String,
        code: String,
        short_message: String,
        message: String,
        correlation_id: Option<String>,
    },
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Error::InvalidResponse(msg.into())
    }

    /// PayPal's error code, when the failure came from an ACK
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Error::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Correlation ID PayPal support asks for when investigating a failed call
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            Error::Api { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }
}
