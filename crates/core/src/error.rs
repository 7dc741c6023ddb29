use crate::types::DbId;

/// Domain-level failures, independent of the transport that reports them.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The record does not exist or is not owned by the caller.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credentials were rejected (sign-in / sign-up flows only).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
