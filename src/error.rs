//! # Checkpoint Error Types
//!
//! Structured error handling for the checkpoint persistence component using
//! thiserror for typed errors instead of `Box<dyn Error>` patterns.
//!
//! Expected outcomes never appear here: a version conflict on save is reported
//! as `Ok(false)`, and a missing remote object on load or delete is ordinary
//! control flow. Only caller mistakes and operational store failures cross
//! this boundary as errors.

use crate::store::StoreError;
use thiserror::Error;

/// Errors surfaced by the checkpoint persistence component
#[derive(Error, Debug)]
pub enum CheckpointError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Operational store failure, propagated unchanged. This layer performs
    /// no retry or suppression.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CheckpointError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Result type alias for checkpoint operations
pub type Result<T> = std::result::Result<T, CheckpointError>;
