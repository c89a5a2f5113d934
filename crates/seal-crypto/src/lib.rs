//! # seal-crypto — Cryptographic Primitives for the seal Toolkit
//!
//! This crate provides the cryptographic building blocks used throughout
//! the workspace:
//!
//! - **Detached Ed25519 signatures** over canonical payloads, carried as
//!   two-line text blocks (comment line + base64 block) that the rest of
//!   the toolkit treats as opaque strings.
//! - **Binary Merkle tree** aggregation of per-file digests into a single
//!   root summarizing a whole release file set.
//!
//! ## Security Invariant
//!
//! Signing and verification take [`CanonicalBytes`](seal_core::CanonicalBytes),
//! not raw byte slices. The type system makes it impossible to sign a
//! non-canonical serialization of a document.

pub mod detached;
pub mod error;
pub mod merkle;

// Re-export primary types.
pub use detached::{sign_detached, verify_detached, PublicKey, SecretKey, SignatureBlock};
pub use error::CryptoError;
pub use merkle::merkle_root;
