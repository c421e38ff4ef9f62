//! # Object Store Error Types
//!
//! Error taxonomy for the object-store boundary. `VersionConflict` is the one
//! expected, recoverable outcome; callers translate it into their own
//! conflict signal. Every other variant is an operational failure the
//! checkpoint layer propagates unchanged.

use thiserror::Error;

/// Errors reported by an object store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Version conflict on {key}: expected tag no longer matches the stored revision")]
    VersionConflict { key: String },

    #[error("Store unavailable: {operation} on {key}: {message}")]
    Unavailable {
        operation: String,
        key: String,
        message: String,
    },

    #[error("Permission denied: {operation} on {key}: {message}")]
    PermissionDenied {
        operation: String,
        key: String,
        message: String,
    },

    #[error("Storage quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("Invalid object key: {key}: {reason}")]
    InvalidKey { key: String, reason: String },
}

impl StoreError {
    /// Create a version conflict error
    pub fn version_conflict(key: impl Into<String>) -> Self {
        Self::VersionConflict { key: key.into() }
    }

    /// Create a store unavailable error
    pub fn unavailable(
        operation: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Unavailable {
            operation: operation.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(
        operation: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::PermissionDenied {
            operation: operation.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a quota exceeded error
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
        }
    }

    /// Create an invalid key error
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is the expected concurrent-writer conflict signal
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}
