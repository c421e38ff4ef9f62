//! # System Constants
//!
//! Key-derivation and codec boundaries shared across the checkpoint
//! persistence component.

/// Separator between the network prefix segment and the checkpoint name in a
/// derived object-store key.
pub const KEY_SEPARATOR: char = '/';

/// Length in bytes of a block hash.
pub const BLOCK_HASH_LEN: usize = 32;

/// Upper bound on locator entries accepted by the codec. Chain locators grow
/// logarithmically with chain height, so anything past this is corruption.
pub const MAX_LOCATOR_ENTRIES: usize = 101;

/// Environment variable names recognized by [`crate::config::CheckpointConfig::from_env`]
pub mod env {
    /// Network name, e.g. `main` or `test`
    pub const NETWORK: &str = "INDEXER_NETWORK";
    /// Genesis block hash of the target network, hex encoded
    pub const GENESIS_HASH: &str = "INDEXER_GENESIS_HASH";
    /// Object-store container holding checkpoint objects
    pub const CHECKPOINT_CONTAINER: &str = "INDEXER_CHECKPOINT_CONTAINER";
}
