//! Error types for cf-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for cf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cf-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The container does not exist, or the service refused a container-level request
    #[error("No such container: {0}")]
    NoSuchContainer(String),

    /// The object does not exist
    #[error("No such object: {0}")]
    NoSuchObject(String),

    /// The service answered with a status code the operation does not accept
    #[error("Invalid response code {status}: {message}")]
    InvalidResponse { status: u16, message: String },

    /// Container or object name rejected before sending a request
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid path format
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account already exists
    #[error("Account already exists: {0}")]
    AccountExists(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure: the request never produced a status code
    #[error("Network error: {0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Build an [`Error::InvalidResponse`] for an unexpected status code
    pub fn invalid_response(status: u16, message: impl Into<String>) -> Self {
        Error::InvalidResponse {
            status,
            message: message.into(),
        }
    }

    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_) | Error::InvalidName(_) => 2, // UsageError
            Error::Config(_) => 2,                              // UsageError
            Error::Network(_) => 3,                             // NetworkError
            Error::NoSuchContainer(_) | Error::NoSuchObject(_) | Error::AccountNotFound(_) => 5, // NotFound
            Error::AccountExists(_) => 6, // Conflict
            _ => 1,                       // GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::InvalidPath("test".into()).exit_code(), 2);
        assert_eq!(Error::InvalidName("a/b".into()).exit_code(), 2);
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::NoSuchContainer("test".into()).exit_code(), 5);
        assert_eq!(Error::NoSuchObject("test".into()).exit_code(), 5);
        assert_eq!(Error::AccountNotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::AccountExists("test".into()).exit_code(), 6);
        assert_eq!(Error::invalid_response(999, "boom").exit_code(), 1);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = Error::AccountNotFound("prod".into());
        assert_eq!(err.to_string(), "Account not found: prod");

        let err = Error::invalid_response(999, "listing photos");
        assert_eq!(err.to_string(), "Invalid response code 999: listing photos");

        let err = Error::NoSuchContainer("photos".into());
        assert_eq!(err.to_string(), "No such container: photos");
    }
}
