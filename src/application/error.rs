//! Application-level errors

use thiserror::Error;

/// Application errors: the single channel every API and config failure flows through.
#[derive(Error, Debug)]
pub enum ApplicationError {
    /// The remote service answered with a structured error message.
    #[error("API Error: {message}")]
    Api { message: String },

    /// Transport failure, non-success status without a message, or an unparsable body.
    #[error("Request failed: {message}")]
    Request { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
