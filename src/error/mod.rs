use std::fmt;

use thiserror::Error;

/// Classification of a failed provider call.
///
/// Built from the HTTP status of a non-success response, or from the shape of
/// a success response that did not contain a usable completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401 or 403: key missing, invalid or lacking access
    AuthenticationFailed,
    /// 429
    RateLimited { details: String },
    /// 404: usually an unknown model identifier
    ModelNotFound { details: String },
    /// 400 or 422
    BadRequest { details: String },
    /// 5xx
    ServerError { status: u16, details: String },
    /// 2xx response without a usable completion
    UnexpectedResponse { details: String },
    /// Any other non-success status
    Other { status: u16, details: String },
}

impl ApiErrorKind {
    /// Classify a non-success HTTP status together with the response body.
    pub fn from_status(status: u16, details: impl Into<String>) -> Self {
        let details = details.into();
        match status {
            401 | 403 => ApiErrorKind::AuthenticationFailed,
            429 => ApiErrorKind::RateLimited { details },
            404 => ApiErrorKind::ModelNotFound { details },
            400 | 422 => ApiErrorKind::BadRequest { details },
            500..=599 => ApiErrorKind::ServerError { status, details },
            _ => ApiErrorKind::Other { status, details },
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::AuthenticationFailed => {
                write!(f, "authentication failed, check GROQ_API_KEY")
            }
            ApiErrorKind::RateLimited { details } => write!(f, "rate limited: {details}"),
            ApiErrorKind::ModelNotFound { details } => write!(f, "model not found: {details}"),
            ApiErrorKind::BadRequest { details } => write!(f, "bad request: {details}"),
            ApiErrorKind::ServerError { status, details } => {
                write!(f, "server error ({status}): {details}")
            }
            ApiErrorKind::UnexpectedResponse { details } => {
                write!(f, "unexpected response: {details}")
            }
            ApiErrorKind::Other { status, details } => write!(f, "status {status}: {details}"),
        }
    }
}

/// Error types for the product assistant.
///
/// Every failure during an invocation ends up as one of these variants and is
/// shown to the user through its `Display` text. Missing form input is not an
/// error; the bridge reports it as a warning outcome instead.
///
/// # Examples
///
/// ```
/// use product_assistant::{AssistantError, Result};
///
/// fn check_rating(rating: f64) -> Result<()> {
///     if !(0.0..=5.0).contains(&rating) {
///         return Err(AssistantError::ValidationError(format!(
///             "rating must be between 0 and 5, got {rating}"
///         )));
///     }
///     Ok(())
/// }
///
/// assert!(check_rating(4.5).is_ok());
/// assert!(matches!(check_rating(7.0), Err(AssistantError::ValidationError(_))));
/// ```
#[derive(Error, Debug)]
pub enum AssistantError {
    /// The provider answered with an error or an unusable completion
    #[error("{provider} API error: {kind}")]
    ApiError {
        provider: String,
        kind: ApiErrorKind,
    },

    /// Model output could not be coerced into the target type, or failed field validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A prompt template slot had no value
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Operation timed out
    #[error("Timeout error")]
    Timeout,

    /// HTTP client error (from reqwest)
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error (from serde_json)
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Socket or server I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssistantError {
    pub fn api_error(provider: impl Into<String>, kind: ApiErrorKind) -> Self {
        AssistantError::ApiError {
            provider: provider.into(),
            kind,
        }
    }
}

// HttpError, JsonError and Io never compare equal: their sources don't implement PartialEq.
impl PartialEq for AssistantError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::ApiError {
                    provider: p1,
                    kind: k1,
                },
                Self::ApiError {
                    provider: p2,
                    kind: k2,
                },
            ) => p1 == p2 && k1 == k2,
            (Self::ValidationError(a), Self::ValidationError(b)) => a == b,
            (Self::TemplateError(a), Self::TemplateError(b)) => a == b,
            (Self::ConfigError(a), Self::ConfigError(b)) => a == b,
            (Self::Timeout, Self::Timeout) => true,
            _ => false,
        }
    }
}

/// A specialized Result type for product assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
