//! # Checkpoint Persistence
//!
//! A [`Checkpoint`] is one named progress marker for an indexing process: it
//! owns the current [`BlockLocator`], knows which object-store key backs it,
//! and reconciles the two.
//!
//! ## Load
//!
//! Loading fetches the stored payload by the key derived from the network
//! prefix and the name. A missing object or a payload that fails to decode
//! both produce a genesis-only locator; indexing always starts, and a corrupt
//! checkpoint only costs the progress that was lost. Any other store failure
//! propagates unchanged.
//!
//! ## Save
//!
//! [`Checkpoint::save_progress`] is a compare-and-swap over the remote
//! object: the write carries the last version tag this instance observed, and
//! the store rejects it if another writer has moved the object since. A
//! rejected save returns `Ok(false)` and leaves both the remote object and
//! the in-memory state untouched; the caller reloads and decides whether to
//! re-derive and retry. The version tag is a lease, not a lock: writers in
//! other processes share no memory with this one, and the store's
//! precondition is the sole serialization mechanism.
//!
//! ## Delete
//!
//! Deletion makes the remote object gone and is idempotent. The in-memory
//! instance keeps its state but is logically stale afterwards; a subsequent
//! conditional save races against a nonexistent object and reports a
//! conflict.

use crate::error::{CheckpointError, Result};
use crate::locator::{BlockHash, BlockLocator};
use crate::network::{checkpoint_name_from_key, Network};
use crate::store::{ObjectStore, StoreError, VersionTag};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A named, persisted chain locator tracking indexing progress.
pub struct Checkpoint {
    name: String,
    key: String,
    locator: BlockLocator,
    version: Option<VersionTag>,
    store: Arc<dyn ObjectStore>,
}

impl Checkpoint {
    /// Construct a checkpoint from optionally present stored bytes.
    ///
    /// The locator is the decoded payload, or the single-entry genesis
    /// locator when `data` is absent or fails to decode for any reason.
    /// Fails only on an invalid name; never on payload content.
    pub fn from_bytes(
        name: impl Into<String>,
        network: &Network,
        data: Option<&[u8]>,
        store: Arc<dyn ObjectStore>,
    ) -> Result<Self> {
        Self::assemble(name.into(), network, data, None, store)
    }

    /// Materialize a checkpoint by name from the store.
    ///
    /// A missing remote object is the first-run path, not an error; the
    /// checkpoint starts at genesis. Any other store failure propagates.
    pub async fn load(
        name: impl Into<String>,
        network: &Network,
        store: Arc<dyn ObjectStore>,
    ) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;
        let key = network.checkpoint_key(&name);
        let fetched = store.fetch(&key).await?;
        debug!(
            checkpoint = %name,
            key = %key,
            found = fetched.is_some(),
            "📥 Checkpoint fetched from store"
        );
        match fetched {
            Some(object) => {
                let version = object.version;
                Self::assemble(name, network, Some(object.bytes.as_slice()), Some(version), store)
            }
            None => Self::assemble(name, network, None, None, store),
        }
    }

    /// Materialize a checkpoint from a full store key, recovering the name by
    /// stripping the leading prefix segment. Used when enumerating existing
    /// checkpoints without knowing their names in advance.
    pub async fn load_from_key(
        key: &str,
        network: &Network,
        store: Arc<dyn ObjectStore>,
    ) -> Result<Self> {
        let name = checkpoint_name_from_key(key).ok_or_else(|| {
            CheckpointError::invalid_argument(format!(
                "store key {key:?} does not contain a checkpoint name"
            ))
        })?;
        Self::load(name.to_string(), network, store).await
    }

    /// Load every checkpoint stored under the network's prefix.
    pub async fn load_all(network: &Network, store: Arc<dyn ObjectStore>) -> Result<Vec<Self>> {
        let keys = store.list(&network.checkpoint_prefix()).await?;
        let mut checkpoints = Vec::with_capacity(keys.len());
        for key in keys {
            checkpoints.push(Self::load_from_key(&key, network, Arc::clone(&store)).await?);
        }
        Ok(checkpoints)
    }

    /// Atomically persist a new locator value.
    ///
    /// Returns `Ok(true)` on success, with the in-memory locator and version
    /// tag updated to the new revision. Returns `Ok(false)` when another
    /// writer has modified the backing object since this instance last
    /// observed it; nothing is retried and nothing is mutated. The caller
    /// reloads and decides. Operational store failures propagate as errors.
    pub async fn save_progress(&mut self, locator: BlockLocator) -> Result<bool> {
        let bytes = locator.to_bytes();
        match self
            .store
            .conditional_write(&self.key, &bytes, self.version.as_ref())
            .await
        {
            Ok(version) => {
                debug!(
                    checkpoint = %self.name,
                    entries = locator.len(),
                    version = %version,
                    "💾 Checkpoint progress saved"
                );
                self.locator = locator;
                self.version = Some(version);
                Ok(true)
            }
            Err(StoreError::VersionConflict { .. }) => {
                debug!(
                    checkpoint = %self.name,
                    "Checkpoint save lost a concurrent write race"
                );
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Remove the backing remote object.
    ///
    /// Idempotent: an already-absent object is success. In-memory state is
    /// untouched, so the instance must not be used for further conditional
    /// saves without a fresh load.
    pub async fn delete(&self) -> Result<()> {
        let removed = self.store.delete(&self.key).await?;
        debug!(
            checkpoint = %self.name,
            removed,
            "🗑️ Checkpoint delete completed"
        );
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locator(&self) -> &BlockLocator {
        &self.locator
    }

    /// The oldest hash the locator reaches, genesis for a well-formed one.
    pub fn genesis(&self) -> BlockHash {
        self.locator.genesis()
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(CheckpointError::invalid_argument(
                "checkpoint name must not be empty",
            ));
        }
        Ok(())
    }

    fn assemble(
        name: String,
        network: &Network,
        data: Option<&[u8]>,
        version: Option<VersionTag>,
        store: Arc<dyn ObjectStore>,
    ) -> Result<Self> {
        Self::validate_name(&name)?;
        let locator = match data {
            Some(bytes) => match BlockLocator::from_bytes(bytes) {
                Ok(locator) => locator,
                Err(err) => {
                    warn!(
                        checkpoint = %name,
                        payload_len = bytes.len(),
                        error = %err,
                        "Stored checkpoint failed to decode, falling back to genesis"
                    );
                    BlockLocator::genesis_only(network.genesis())
                }
            },
            None => BlockLocator::genesis_only(network.genesis()),
        };
        Ok(Self {
            key: network.checkpoint_key(&name),
            name,
            locator,
            version,
            store,
        })
    }
}

impl fmt::Debug for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkpoint")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("locator", &self.locator)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryObjectStore;
    use proptest::prelude::*;

    fn test_network() -> Network {
        Network::new("test", BlockHash::new([0xAA; 32]))
    }

    fn test_store() -> Arc<dyn ObjectStore> {
        Arc::new(InMemoryObjectStore::new())
    }

    #[test]
    fn test_empty_name_is_invalid_argument() {
        let result = Checkpoint::from_bytes("", &test_network(), None, test_store());
        assert!(matches!(
            result,
            Err(CheckpointError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_no_data_falls_back_to_genesis() {
        let network = test_network();
        let checkpoint = Checkpoint::from_bytes("scan", &network, None, test_store()).unwrap();
        assert_eq!(
            checkpoint.locator(),
            &BlockLocator::genesis_only(network.genesis())
        );
        assert_eq!(checkpoint.genesis(), network.genesis());
    }

    #[test]
    fn test_corrupt_data_falls_back_to_genesis() {
        let network = test_network();
        let checkpoint =
            Checkpoint::from_bytes("scan", &network, Some(&b"\xff\x00garbage"[..]), test_store())
                .unwrap();
        assert_eq!(
            checkpoint.locator(),
            &BlockLocator::genesis_only(network.genesis())
        );
    }

    #[test]
    fn test_valid_data_reproduces_saved_locator() {
        let network = test_network();
        let locator =
            BlockLocator::new(vec![BlockHash::new([3; 32]), network.genesis()]).unwrap();
        let bytes = locator.to_bytes();
        let checkpoint =
            Checkpoint::from_bytes("scan", &network, Some(bytes.as_slice()), test_store()).unwrap();
        assert_eq!(checkpoint.locator(), &locator);
    }

    #[test]
    fn test_display_is_the_name() {
        let checkpoint =
            Checkpoint::from_bytes("wallet-scan", &test_network(), None, test_store()).unwrap();
        assert_eq!(checkpoint.to_string(), "wallet-scan");
    }

    proptest! {
        #[test]
        fn prop_any_payload_yields_a_usable_checkpoint(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let network = test_network();
            let checkpoint =
                Checkpoint::from_bytes("scan", &network, Some(bytes.as_slice()), test_store()).unwrap();
            prop_assert!(checkpoint.locator().len() >= 1);
            match BlockLocator::from_bytes(&bytes) {
                Ok(locator) => prop_assert_eq!(checkpoint.locator(), &locator),
                Err(_) => prop_assert_eq!(
                    checkpoint.locator(),
                    &BlockLocator::genesis_only(network.genesis())
                ),
            }
        }
    }
}
