//! # Network Identity
//!
//! A [`Network`] names a target chain and carries its genesis hash, which
//! doubles as the identifying prefix segment of every checkpoint key so that
//! checkpoints for different networks never collide.

use crate::constants::KEY_SEPARATOR;
use crate::locator::BlockHash;

/// A target chain: a human-readable name plus the genesis block hash used as
/// the locator fallback and the checkpoint key prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    name: String,
    genesis: BlockHash,
}

impl Network {
    pub fn new(name: impl Into<String>, genesis: BlockHash) -> Self {
        Self {
            name: name.into(),
            genesis,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genesis(&self) -> BlockHash {
        self.genesis
    }

    /// Prefix scoping every checkpoint key of this network, including the
    /// trailing separator.
    pub fn checkpoint_prefix(&self) -> String {
        format!("{}{}", self.genesis, KEY_SEPARATOR)
    }

    /// Deterministic object-store key for a named checkpoint.
    pub fn checkpoint_key(&self, name: &str) -> String {
        format!("{}{}{}", self.genesis, KEY_SEPARATOR, name)
    }
}

/// Recover a checkpoint name from a full store key by stripping the leading
/// prefix segment. Returns `None` when the key has no prefix segment or an
/// empty remainder.
///
/// Names may themselves contain separators; everything after the first
/// separator is the name.
pub fn checkpoint_name_from_key(key: &str) -> Option<&str> {
    match key.split_once(KEY_SEPARATOR) {
        Some((_, name)) if !name.is_empty() => Some(name),
        _ => None,
    }
}
