//! API error types for film operations
//!
//! Every failed request ends as an [`ApiError`], rendered as a JSON body with
//! the mapped status code regardless of the negotiated response format.
//!
//! # Example
//!
//! ```rust
//! use film_service::handlers::{ApiError, ApiErrorKind, ApiOperation};
//!
//! let error = ApiError::not_found(ApiOperation::Delete, "42");
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.entity_id, Some("42".to_string()));
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::codec::CodecError;
use crate::repository::{RepositoryError, RepositoryErrorKind};
use crate::search::SearchError;

/// Film operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// `GET /films`
    List,
    /// `GET /films/{id}`
    Get,
    /// `GET /search`
    Search,
    /// `POST /films`
    Create,
    /// `PUT /films/{id}`
    Update,
    /// `DELETE /films/{id}`
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Search => write!(f, "search"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No film matched
    NotFound,
    /// Malformed or unsupported request input
    BadRequest,
    /// A decoded film failed validation
    ValidationFailed,
    /// The store rejected the change
    Conflict,
    /// Unexpected server-side failure
    InternalError,
    /// The store is temporarily unreachable
    ServiceUnavailable,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::Conflict => write!(f, "conflict"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

impl ApiErrorKind {
    /// HTTP status for this kind
    ///
    /// Validation failures are client errors reported as `400`.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest | Self::ValidationFailed => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Machine-readable code, e.g. `NOT_FOUND`
    #[must_use]
    pub fn error_code(&self) -> String {
        format!("{}", self).to_uppercase()
    }
}

/// Structured API error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// User-facing message
    pub message: String,
    /// The type of entity involved
    pub entity_type: Option<String>,
    /// The id of the entity involved
    pub entity_id: Option<String>,
    /// Underlying cause; logged, never sent to the client
    pub detail: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
            detail: None,
        }
    }

    /// No film with the given id
    pub fn not_found(operation: ApiOperation, film_id: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::NotFound, "Film not found").with_entity("Film", film_id)
    }

    /// A search matched nothing
    pub fn no_films_found() -> Self {
        Self::new(ApiOperation::Search, ApiErrorKind::NotFound, "No films found.")
    }

    /// Malformed request input
    pub fn bad_request(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::BadRequest, message)
    }

    /// A path id that is not an integer
    pub fn invalid_id(operation: ApiOperation, raw: impl Into<String>) -> Self {
        Self::bad_request(operation, "Invalid film ID format").with_entity("Film", raw)
    }

    /// A decoded film failed validation
    pub fn validation_failed(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::ValidationFailed, message)
    }

    /// Unexpected failure; the message is shown to clients
    pub fn internal(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::InternalError, message)
    }

    /// Map a codec failure (only fatal decodes reach this)
    pub fn from_codec(operation: ApiOperation, err: &CodecError) -> Self {
        tracing::error!(error = %err, %operation, "request body could not be decoded");
        Self::internal(operation, format!("Could not read {} request body", err.format()))
    }

    /// Map invalid search input
    pub fn from_search(operation: ApiOperation, err: &SearchError) -> Self {
        Self::bad_request(operation, err.to_string())
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
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether repeating the request may succeed
    pub fn is_retriable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::ServiceUnavailable)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// User-facing message
    pub error: String,
    /// Machine-readable code
    pub code: String,
    /// HTTP status
    pub status: u16,
    /// Operation that failed
    pub operation: String,
    /// Entity type, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Entity id, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if status.is_server_error() {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_id = ?self.entity_id,
                detail = ?self.detail,
                retriable = self.is_retriable(),
                "API error: {}", self.message
            );
        } else {
            tracing::info!(
                operation = %self.operation,
                kind = %self.kind,
                entity_id = ?self.entity_id,
                "request rejected: {}", self.message
            );
        }

        let response = ApiErrorResponse {
            error: self.message,
            code: self.kind.error_code(),
            status: status.as_u16(),
            operation: self.operation.to_string(),
            entity_type: self.entity_type,
            entity_id: self.entity_id,
        };

        (status, Json(response)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let kind = match err.kind {
            RepositoryErrorKind::ConstraintViolation => ApiErrorKind::Conflict,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout => {
                ApiErrorKind::ServiceUnavailable
            }
            RepositoryErrorKind::DatabaseError | RepositoryErrorKind::SerializationError => {
                ApiErrorKind::InternalError
            }
        };

        // Driver messages stay in the logs
        let message = match kind {
            ApiErrorKind::ServiceUnavailable => "Service temporarily unavailable",
            ApiErrorKind::Conflict => "Film could not be stored",
            _ => "An internal error occurred",
        };

        Self {
            operation: ApiOperation::List,
            kind,
            message: message.to_string(),
            detail: Some(err.to_string()),
            entity_type: err.entity_type,
            entity_id: err.entity_id,
        }
    }
}
