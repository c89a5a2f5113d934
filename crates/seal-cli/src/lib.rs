//! # seal-cli — Command-Line Interface for the seal Toolkit
//!
//! Provides the `seal` binary. Subcommands mirror the provenance pipeline:
//!
//! - `seal sign` — sign a manifest with a detached Ed25519 signature.
//! - `seal verify` — verify a signed manifest against a public key.
//! - `seal check-schema-uri` — enforce the expected schema reference.
//! - `seal validate-schema` — structural validation against a JSON Schema.
//! - `seal inventory` — build the hash inventory and Merkle root, with an
//!   optional consistency check against a manifest's published root.
//! - `seal gate` — verify every manifest under a directory; fail closed.
//!
//! Exit code contract: `0` on success, `1` on any failure (validation,
//! verification, or tamper detection). Diagnostics go to stderr; status
//! text goes to stdout.

pub mod gate;
pub mod inventory;
pub mod schema;
pub mod signing;
