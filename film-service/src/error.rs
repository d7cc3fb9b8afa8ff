//! Service-level error types
//!
//! [`Error`] covers startup and infrastructure failures (configuration,
//! database connection, binding the listener). Request-level failures are
//! [`crate::handlers::ApiError`] values instead.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Sanitize a database URL for safe logging (remove the password)
pub(crate) fn sanitize_connection_url(url: &str) -> String {
    if let (Some(at_pos), Some(scheme_end)) = (url.find('@'), url.find("://")) {
        let credentials = &url[scheme_end + 3..at_pos];
        if let Some(colon_pos) = credentials.find(':') {
            let scheme = &url[..scheme_end + 3];
            let username = &credentials[..colon_pos];
            return format!("{}{}:***{}", scheme, username, &url[at_pos..]);
        }
    }
    url.to_string()
}

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Structured store error with operation context
    #[error("{0}")]
    Database(RepositoryError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        Error::Database(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Database(RepositoryError::from(err))
    }
}
