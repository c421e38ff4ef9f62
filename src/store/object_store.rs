//! # Object Store Trait
//!
//! The async seam between the checkpoint component and whatever holds the
//! bytes. Implementations exist per backend (cloud blob storage, a local
//! directory, the in-memory store in [`crate::store::memory`]); the
//! checkpoint layer depends only on this trait.

use super::errors::StoreError;
use async_trait::async_trait;
use std::fmt;

/// Opaque token identifying one revision of a stored object.
///
/// Compared only for equality as the precondition of a conditional write,
/// never interpreted. Backends map their native revision identifier (an ETag,
/// a generation number) into this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTag(String);

impl VersionTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fetched object revision: the payload plus the tag identifying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub version: VersionTag,
}

/// Key-addressed blob storage with compare-and-swap writes.
///
/// All operations reach the network and must be awaited; none of them retry.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object and its current version tag.
    ///
    /// `Ok(None)` is the one and only not-found signal. Implementations must
    /// not fold transient failures into it; an outage is an error, not an
    /// absence.
    async fn fetch(&self, key: &str) -> Result<Option<StoredObject>, StoreError>;

    /// Write an object, conditional on its current revision.
    ///
    /// With `expected = Some(tag)` the write succeeds only while the stored
    /// revision still carries that tag; a mismatch (including an object that
    /// no longer exists) fails with [`StoreError::VersionConflict`] and
    /// leaves the stored object untouched. With `expected = None` the caller
    /// has never observed a revision and the write is unconditional.
    ///
    /// Returns the tag of the newly written revision.
    async fn conditional_write(
        &self,
        key: &str,
        bytes: &[u8],
        expected: Option<&VersionTag>,
    ) -> Result<VersionTag, StoreError>;

    /// Remove an object. `Ok(false)` means it was already absent; both
    /// outcomes are success.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// List all keys under a prefix.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
