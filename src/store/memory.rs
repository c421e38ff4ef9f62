//! # In-Memory Object Store
//!
//! A complete in-process [`ObjectStore`] with the same conditional-write
//! semantics as a remote backend. Used by the test suite and available for
//! embedding where durable storage is not required.

use super::errors::StoreError;
use super::object_store::{ObjectStore, StoredObject, VersionTag};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Hash-map backed object store with a monotonic revision counter.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    objects: HashMap<String, StoredObject>,
    next_revision: u64,
}

impl Inner {
    fn mint_tag(&mut self) -> VersionTag {
        self.next_revision += 1;
        VersionTag::new(format!("rev-{}", self.next_revision))
    }
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn fetch(&self, key: &str) -> Result<Option<StoredObject>, StoreError> {
        Ok(self.inner.lock().objects.get(key).cloned())
    }

    async fn conditional_write(
        &self,
        key: &str,
        bytes: &[u8],
        expected: Option<&VersionTag>,
    ) -> Result<VersionTag, StoreError> {
        let mut inner = self.inner.lock();
        if let Some(expected) = expected {
            match inner.objects.get(key) {
                Some(existing) if existing.version == *expected => {}
                _ => return Err(StoreError::version_conflict(key)),
            }
        }
        let version = inner.mint_tag();
        inner.objects.insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                version: version.clone(),
            },
        );
        Ok(version)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.inner.lock().objects.remove(key).is_some())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.lock();
        let mut keys: Vec<String> = inner
            .objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}
