//! Error types for dbcc.

use thiserror::Error;

/// The main error type for dbcc operations.
///
/// Schema differences are never errors here; they are collected into a
/// [`DiffReport`](crate::diff::DiffReport). These variants cover failures
/// that happen before a diff can be computed.
#[derive(Debug, Error)]
pub enum DbccError {
    /// Failed to open a connection to the database.
    #[error("Connection error ({url}): {message}")]
    Connection { url: String, message: String },

    /// Connected, but reading the structural metadata failed.
    #[error("Introspection error: {0}")]
    Introspection(String),

    /// The connection URL uses a scheme we cannot introspect.
    #[error("Unsupported database scheme: '{0}'. Expected: postgres, postgresql or sqlite")]
    UnsupportedScheme(String),

    /// The connection URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A snapshot file could not be decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DbccError {
    /// Create a connection error for the given (already redacted) URL.
    pub fn connection(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Connection {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Wrap a sqlx failure that happened while reading metadata.
    pub fn introspection(err: sqlx::Error) -> Self {
        Self::Introspection(err.to_string())
    }
}

/// Result type alias for dbcc operations.
pub type DbccResult<T> = Result<T, DbccError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DbccError::connection("postgres://app:***@db/app", "refused");
        assert_eq!(
            err.to_string(),
            "Connection error (postgres://app:***@db/app): refused"
        );
    }

    #[test]
    fn test_unsupported_scheme_display() {
        let err = DbccError::UnsupportedScheme("oracle".into());
        assert!(err.to_string().starts_with("Unsupported database scheme: 'oracle'"));
    }
}
