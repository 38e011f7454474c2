//! Error types for repository operations.
//!
//! Every error carries an [`ErrorContext`] describing the operation and the
//! entity involved, so callers (the HTTP layer in particular) can map errors
//! by variant and still log useful detail.

use std::fmt;

use crate::models::ValidationErrors;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "find_by_id", "insert")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "beer")
    pub entity: Option<String>,
    /// The entity ID or key if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
    /// Whether this error is retryable
    pub retryable: bool,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Mark this error as retryable.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none()
            && self.entity.is_none()
            && self.entity_id.is_none()
            && self.details.is_none()
            && !self.retryable
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, " [{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store is unreachable or unhealthy.
    #[error("Connection error: {message}{context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// Requested entity was not found.
    #[error("Not found: {message}{context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Submitted data failed validation.
    #[error("Data validation error: {message}{context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// A unique key (the UPC) is already taken.
    #[error("Duplicate key: {message}{context}")]
    DuplicateKey {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message}{context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Create a connection error; connection errors are retryable.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a not found error with context.
    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a duplicate key error with context.
    pub fn duplicate_key_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::DuplicateKey {
            message: message.into(),
            context,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// The message without the context suffix.
    pub fn message(&self) -> &str {
        match self {
            Self::ConnectionError { message, .. }
            | Self::NotFound { message, .. }
            | Self::ValidationError { message, .. }
            | Self::DuplicateKey { message, .. }
            | Self::InternalError { message, .. } => message,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::DuplicateKey { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::ConnectionError { context, .. }
            | Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::DuplicateKey { context, .. }
            | Self::InternalError { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}

impl From<ValidationErrors> for RepositoryError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .errors()
            .iter()
            .map(|e| e.field.as_str())
            .collect::<Vec<_>>()
            .join(",");
        Self::ValidationError {
            message: errors.to_string(),
            context: ErrorContext::default()
                .with_entity("beer")
                .with_details(format!("fields={}", details)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldError;

    #[test]
    fn test_display_without_context() {
        let err = RepositoryError::not_found("Beer 7 not found");
        assert_eq!(err.to_string(), "Not found: Beer 7 not found");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_display_with_context() {
        let err = RepositoryError::not_found_with_context(
            "Beer 7 not found",
            ErrorContext::new("find_by_id").with_entity("beer").with_entity_id(7),
        );
        assert_eq!(
            err.to_string(),
            "Not found: Beer 7 not found [operation=find_by_id, entity=beer, id=7]"
        );
        assert_eq!(err.message(), "Beer 7 not found");
    }

    #[test]
    fn test_connection_errors_are_retryable() {
        let err = RepositoryError::connection("Database is not healthy");
        assert!(err.is_retryable());
        assert!(err.to_string().contains("retryable=true"));
    }

    #[test]
    fn test_with_operation_overrides_context() {
        let err = RepositoryError::internal("boom").with_operation("delete");
        assert_eq!(err.context().operation.as_deref(), Some("delete"));
    }

    #[test]
    fn test_from_validation_errors() {
        let err: RepositoryError = ValidationErrors(vec![
            FieldError {
                field: "beerName".into(),
                message: "must not be blank".into(),
            },
            FieldError {
                field: "upc".into(),
                message: "must not be blank".into(),
            },
        ])
        .into();

        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert_eq!(err.context().details.as_deref(), Some("fields=beerName,upc"));
        assert!(err.message().contains("beerName: must not be blank"));
    }
}
