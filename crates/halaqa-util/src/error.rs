//! Error types for halaqa

use thiserror::Error;

use crate::SessionId;

/// Core error type for halaqa operations
#[derive(Debug, Error)]
pub enum HalaqaError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl HalaqaError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, HalaqaError>;
