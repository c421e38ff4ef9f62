//! # Object Store Boundary
//!
//! Key-addressed blob storage as the checkpoint component consumes it:
//! plain reads, conditional (compare-and-swap) writes keyed on an opaque
//! version tag, idempotent deletes, and prefix listing.

pub mod errors;
pub mod memory;
pub mod object_store;

pub use errors::StoreError;
pub use memory::InMemoryObjectStore;
pub use object_store::{ObjectStore, StoredObject, VersionTag};
