//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaasError {
    #[error("VALIDATE/{0}")]
    Validation(String),

    #[error("RATE/{0}")]
    RateLimited(String),

    #[error("QUOTA/{0}")]
    QuotaExceeded(String),

    #[error("TRIGGER/{0}")]
    Trigger(String),

    #[error("STORE/{0}")]
    Store(String),

    #[error("CONFIG/{0}")]
    Config(String),
}

impl VaasError {
    /// Whether this error is allowed to change the HTTP status of a
    /// validation request. Everything else degrades to a partial response.
    pub fn is_request_fatal(&self) -> bool {
        matches!(self, VaasError::Validation(_) | VaasError::RateLimited(_))
    }

    /// The human-readable message without the category prefix, for wire
    /// bodies. Logs keep the prefixed `Display` form.
    pub fn message(&self) -> &str {
        match self {
            VaasError::Validation(msg)
            | VaasError::RateLimited(msg)
            | VaasError::QuotaExceeded(msg)
            | VaasError::Trigger(msg)
            | VaasError::Store(msg)
            | VaasError::Config(msg) => msg,
        }
    }
}
