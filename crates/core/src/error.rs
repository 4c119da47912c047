use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Every violated precondition of a single request, in check order.
    #[error("Validation failed: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Locked: {0}")]
    Locked(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Turn a list of collected violations into a result.
///
/// An empty list is success; anything else becomes
/// [`CoreError::InvalidInput`] carrying the full list.
pub fn ensure_valid(errors: Vec<String>) -> Result<(), CoreError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(errors))
    }
}

/// Flatten `validator` field errors into human-readable messages.
///
/// Uses the rule's custom message when present. Output is sorted so the
/// order does not depend on hash iteration.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages
}
