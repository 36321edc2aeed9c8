//! CLI error types.

use thiserror::Error;

/// Errors that abort an `appctl` invocation.
///
/// Every variant is fatal: the binary reports it on stderr and exits non-zero.
#[derive(Debug, Error)]
pub enum CliError {
    /// Wrong number or shape of positional arguments.
    #[error("usage: {0}")]
    Usage(String),

    /// Invalid client configuration (endpoint, credentials, TLS).
    #[error("configuration error: {0}")]
    Config(String),

    /// Request could not be built or sent, or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a status code the operation does not accept.
    #[error("{reason}: status {code}")]
    Status {
        /// Observed HTTP status code.
        code: u16,
        /// Operation-specific description of the rejection.
        reason: String,
    },

    /// Response body did not match the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Output could not be rendered.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Creates a status error carrying the observed code.
    #[must_use]
    pub fn status(code: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            code,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_error_display_usage() {
        let err = CliError::Usage("must provide id and version".into());
        assert_eq!(err.to_string(), "usage: must provide id and version");
    }

    #[test]
    fn cli_error_display_status_carries_code() {
        let err = CliError::status(409, "app already exists");
        assert_eq!(err.to_string(), "app already exists: status 409");
    }

    #[test]
    fn cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err = CliError::from(io_err);
        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn cli_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        let cli_err = CliError::from(json_err);
        assert!(matches!(cli_err, CliError::Decode(_)));
        assert!(cli_err.to_string().starts_with("failed to decode response"));
    }
}
