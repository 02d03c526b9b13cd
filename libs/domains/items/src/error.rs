use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

/// A value object or entity mutator rejected its input.
///
/// This is the only error the domain layer itself raises. It carries the
/// offending field and the violated rule so callers can build a user-facing
/// message without re-deriving context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct InvalidValue {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidValue {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Application-level error for item use cases.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The requested id has no corresponding record.
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    /// Wrapper for [`InvalidValue`]; field and reason are preserved across
    /// the application boundary.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Opaque failure from a port adapter. Propagated unmodified, never
    /// retried or masked by the service.
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<InvalidValue> for ItemError {
    fn from(err: InvalidValue) -> Self {
        ItemError::Validation {
            field: err.field,
            reason: err.reason,
        }
    }
}

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::Validation { field, reason } => {
                AppError::BadRequest(format!("{}: {}", field, reason))
            }
            ItemError::Storage(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_wrapper_preserves_field_and_reason() {
        let domain_err = InvalidValue::new("price", "cannot be negative");
        let app_err: ItemError = domain_err.into();
        match app_err {
            ItemError::Validation { field, reason } => {
                assert_eq!(field, "price");
                assert_eq!(reason, "cannot be negative");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_maps_to_app_not_found() {
        let id = Uuid::now_v7();
        let app: AppError = ItemError::NotFound(id).into();
        assert!(matches!(app, AppError::NotFound(msg) if msg.contains(&id.to_string())));
    }
}
