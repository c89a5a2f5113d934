#![deny(missing_docs)]

//! # seal-core — Foundational Types for the seal Toolkit
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `serde_yaml`, `thiserror`, `chrono`, and `sha2` from the external
//! ecosystem.
//!
//! ## Design Principles
//!
//! 1. **[`CanonicalBytes`] is the sole path to signed or hashed bytes.**
//!    Every digest and every signature payload in the toolkit flows through
//!    `CanonicalBytes::new()`, which applies one canonicalization rule
//!    (sorted keys, compact separators, float rejection, datetime
//!    normalization). There is no second serialization path to diverge from.
//!
//! 2. **[`SealError`] hierarchy.** Structured errors with `thiserror` — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::{yaml_to_json, CanonicalBytes};
pub use digest::{
    sha256_bytes, sha256_digest, ContentDigest, DigestAlgorithm, Sha256Accumulator,
};
pub use error::{EncodingError, SealError};
