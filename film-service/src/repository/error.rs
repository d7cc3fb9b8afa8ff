//! Film store error types
//!
//! # Example
//!
//! ```rust
//! use film_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::database_error(RepositoryOperation::Insert, "disk I/O error")
//!     .with_entity("Film", "12");
//! assert!(matches!(error.kind, RepositoryErrorKind::DatabaseError));
//! assert!(!error.is_retriable());
//! ```

use std::fmt;

/// Store operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Loading a single film by id
    FindById,
    /// Loading every film
    FindAll,
    /// Running a search predicate
    Search,
    /// Inserting a new film
    Insert,
    /// Updating a film
    Update,
    /// Deleting a film
    Delete,
    /// Creating the schema
    Migrate,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindById => write!(f, "find_by_id"),
            Self::FindAll => write!(f, "find_all"),
            Self::Search => write!(f, "search"),
            Self::Insert => write!(f, "insert"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Migrate => write!(f, "migrate"),
        }
    }
}

/// Category of store error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Database constraint violation
    ConstraintViolation,
    /// Failed to reach the database
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Underlying database error
    DatabaseError,
    /// A row could not be mapped onto a film
    SerializationError,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DatabaseError => write!(f, "database_error"),
            Self::SerializationError => write!(f, "serialization_error"),
        }
    }
}

/// Structured store error with operation context
///
/// The message may contain driver details and is never sent to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Driver or store message
    pub message: String,
    /// The type of entity involved
    pub entity_type: Option<String>,
    /// The id of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a database error
    pub fn database_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::DatabaseError, message)
    }

    /// Map a driver error, keeping the failed operation
    pub fn from_sqlx(operation: RepositoryOperation, err: sqlx::Error) -> Self {
        RepositoryError::from(err).with_operation(operation)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Transient errors that may succeed if the request is repeated
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error;

        let kind = match &err {
            Error::PoolTimedOut => RepositoryErrorKind::Timeout,
            Error::Io(_) | Error::Tls(_) | Error::PoolClosed | Error::WorkerCrashed => {
                RepositoryErrorKind::ConnectionFailed
            }
            Error::Database(db) if db.constraint().is_some() || db.is_unique_violation() => {
                RepositoryErrorKind::ConstraintViolation
            }
            Error::ColumnDecode { .. } | Error::ColumnNotFound(_) | Error::Decode(_) => {
                RepositoryErrorKind::SerializationError
            }
            _ => RepositoryErrorKind::DatabaseError,
        };

        Self::new(RepositoryOperation::Search, kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(format!("{}", RepositoryOperation::FindById), "find_by_id");
        assert_eq!(format!("{}", RepositoryOperation::Insert), "insert");
        assert_eq!(format!("{}", RepositoryOperation::Migrate), "migrate");
    }

    #[test]
    fn test_display_with_entity() {
        let error = RepositoryError::database_error(RepositoryOperation::Delete, "locked")
            .with_entity("Film", "7");
        let display = format!("{}", error);
        assert!(display.contains("database_error"));
        assert!(display.contains("delete"));
        assert!(display.contains("[Film: 7]"));
    }

    #[test]
    fn test_display_without_entity() {
        let error = RepositoryError::new(
            RepositoryOperation::FindAll,
            RepositoryErrorKind::Timeout,
            "slow",
        );
        assert!(!format!("{}", error).contains('['));
    }

    #[test]
    fn test_is_retriable() {
        let refused = RepositoryError::new(
            RepositoryOperation::Insert,
            RepositoryErrorKind::ConnectionFailed,
            "refused",
        );
        assert!(refused.is_retriable());
        let slow = RepositoryError::new(RepositoryOperation::Search, RepositoryErrorKind::Timeout, "slow");
        assert!(slow.is_retriable());
        assert!(!RepositoryError::database_error(RepositoryOperation::Insert, "syntax").is_retriable());
    }

    #[test]
    fn test_from_sqlx_pool_errors() {
        let error = RepositoryError::from_sqlx(RepositoryOperation::Update, sqlx::Error::PoolTimedOut);
        assert_eq!(error.kind, RepositoryErrorKind::Timeout);
        assert_eq!(error.operation, RepositoryOperation::Update);

        let error = RepositoryError::from(sqlx::Error::PoolClosed);
        assert_eq!(error.kind, RepositoryErrorKind::ConnectionFailed);

        let error = RepositoryError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.kind, RepositoryErrorKind::DatabaseError);
    }
}
