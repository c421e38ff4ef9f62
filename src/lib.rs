#![allow(clippy::doc_markdown)] // Allow technical terms like ETag, CompactSize in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear
#![allow(clippy::len_without_is_empty)] // BlockLocator is never empty by construction

//! # Indexer Checkpoint
//!
//! Checkpoint persistence for a blockchain-indexing process: resumable sync
//! progress stored in a remote object store with optimistic-concurrency saves.
//!
//! ## Overview
//!
//! An indexer scanning a chain needs to remember how far it got, so that a
//! restart resumes from the last confirmed position instead of rescanning from
//! genesis. This crate owns exactly that concern: a named [`Checkpoint`] holds
//! the current [`BlockLocator`], loads it from a key-addressed object store
//! (falling back to a genesis-only locator when the stored payload is absent
//! or corrupt), and saves it back with a compare-and-swap precondition so two
//! racing writers can never silently clobber each other's progress.
//!
//! ## Key Behaviors
//!
//! - **Tolerance of corruption**: a checkpoint payload that fails to decode is
//!   treated exactly like a missing one. Indexing always starts; a corrupt
//!   checkpoint only costs the progress that was lost.
//! - **Optimistic concurrency**: saves are conditional on the last observed
//!   [`VersionTag`]. A lost race surfaces as `Ok(false)`, never as an
//!   overwrite. Conflict policy (reload, re-derive, retry) belongs to the
//!   caller.
//! - **Strict not-found handling**: only the store's exact not-found signal is
//!   treated as "first run". Every other store failure propagates unchanged so
//!   an outage is never mistaken for an empty store.
//!
//! ## Module Organization
//!
//! - [`checkpoint`] - The `Checkpoint` entity and persistence protocol
//! - [`locator`] - Block hashes, chain locators, and the locator byte codec
//! - [`network`] - Network identity and deterministic checkpoint key derivation
//! - [`store`] - The object-store boundary and the in-memory implementation
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging bootstrap
//!
//! ## Quick Start
//!
//! ```rust
//! use indexer_checkpoint::{BlockHash, BlockLocator, Checkpoint, InMemoryObjectStore, Network};
//! use std::sync::Arc;
//!
//! # async fn example() -> indexer_checkpoint::Result<()> {
//! let network = Network::new("regtest", BlockHash::new([0u8; 32]));
//! let store = Arc::new(InMemoryObjectStore::new());
//!
//! // First run: nothing stored yet, the locator falls back to genesis only.
//! let mut checkpoint = Checkpoint::load("wallet-scan", &network, store.clone()).await?;
//! assert_eq!(checkpoint.locator().len(), 1);
//!
//! // Persist new progress; `false` would mean a concurrent writer won the race.
//! let tip = BlockHash::new([1u8; 32]);
//! let locator = BlockLocator::new(vec![tip, network.genesis()]).unwrap();
//! assert!(checkpoint.save_progress(locator).await?);
//! # Ok(())
//! # }
//! ```

pub mod checkpoint;
pub mod config;
pub mod constants;
pub mod error;
pub mod locator;
pub mod logging;
pub mod network;
pub mod store;

pub use checkpoint::Checkpoint;
pub use config::CheckpointConfig;
pub use error::{CheckpointError, Result};
pub use locator::{BlockHash, BlockLocator, LocatorDecodeError};
pub use network::Network;
pub use store::{InMemoryObjectStore, ObjectStore, StoreError, StoredObject, VersionTag};
