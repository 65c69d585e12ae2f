//! Console error types

use ims_client::ClientError;
use thiserror::Error;

use crate::forms::FieldErrors;
use crate::scanner::{CameraError, DecodeError};

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Backend or transport failure
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Local form validation failed; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Action not valid in the current page/modal state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ConsoleError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ConsoleError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
