use crate::types::LockId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: LockId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// An unknown zone, skin, or media type was supplied.
    #[error("Invalid {field}: {value}")]
    InvalidOption { field: &'static str, value: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
