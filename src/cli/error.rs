//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Every failure a command can hit is reported the same way to scripts.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Infra(_) | CliError::InvalidArgs(_) => crate::exitcode::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_api_error_when_converted_then_message_kept_and_exit_one() {
        let err: CliError = ApplicationError::api("Invalid Bitcoin Address").into();
        assert_eq!(err.to_string(), "API Error: Invalid Bitcoin Address");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn given_request_error_when_converted_then_exit_one() {
        let err: CliError = ApplicationError::request("timeout").into();
        assert_eq!(err.to_string(), "Request failed: timeout");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn given_invalid_args_when_reported_then_exit_one() {
        assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), 1);
    }
}
