use thiserror::Error;

use crate::rules::ValidationError;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(i32),

    #[error("Invalid event: {} violation(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    /// Violations carried by [`EventError::Invalid`], empty otherwise
    pub fn violations(&self) -> &[ValidationError] {
        match self {
            EventError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}
