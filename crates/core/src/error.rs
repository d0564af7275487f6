use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] on the given entity kind.
    pub fn not_found(entity: &'static str, id: impl Into<DbId>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
