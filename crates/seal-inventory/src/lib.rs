//! # seal-inventory — Hash Inventory Builder
//!
//! Walks a release file tree, computes a streaming SHA-256 digest per file,
//! and aggregates the digests into a single Merkle root. The resulting
//! [`HashInventory`] is itself a canonical, reproducible artifact: same file
//! set, same include patterns → byte-identical JSON, on any host.
//!
//! ## Reproducibility Invariants
//!
//! - Entries are sorted by slash-normalized relative path; filesystem
//!   enumeration order never leaks into the output.
//! - Ignorable artifacts (VCS metadata, compiled caches) are excluded by a
//!   fixed deny-list, not a pattern callers must remember to pass.
//! - An unreadable file aborts the whole build. A partial inventory is a
//!   false integrity claim, so none is ever produced.

pub mod builder;
pub mod error;
mod matcher;

pub use builder::{HashInventory, InventoryBuilder, InventoryEntry, DEFAULT_INCLUDE};
pub use error::InventoryError;
