//! Common error types for the casting catalog

use thiserror::Error;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the library and the catalog service
///
/// Normalization itself never produces one of these; only configuration
/// loading and the calls to the external sheets endpoint do.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error (e.g. endpoint URL missing)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to the sheets endpoint
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The sheets endpoint answered with a non-success status
    #[error("Endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The sheets endpoint reported an error in its JSON payload
    #[error("Endpoint error: {0}")]
    Remote(String),

    /// Response payload could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Text shown to the user in place of the failed operation's result
    ///
    /// Save failures surface the endpoint's raw response body, so that
    /// case skips the status prefix.
    pub fn user_message(&self) -> String {
        match self {
            Error::Status { body, .. } if !body.trim().is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_raw_body() {
        let err = Error::Status {
            status: 403,
            body: "Clave incorrecta".to_string(),
        };
        assert_eq!(err.user_message(), "Clave incorrecta");
    }

    #[test]
    fn test_user_message_empty_body_falls_back_to_display() {
        let err = Error::Status {
            status: 500,
            body: "  ".to_string(),
        };
        assert_eq!(err.user_message(), "Endpoint returned 500:   ");
    }

    #[test]
    fn test_config_message() {
        let err = Error::Config("endpoint URL not set".to_string());
        assert_eq!(err.user_message(), "Configuration error: endpoint URL not set");
    }
}
