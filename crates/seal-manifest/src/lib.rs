//! # seal-manifest — Manifest Provenance
//!
//! The provenance pipeline for release manifests:
//!
//! - **[`Manifest`]** — the tagged document type. A file is a manifest
//!   because it parses as one (top-level mapping with a string
//!   `schema_uri`), not because some field probe happened to succeed.
//! - **Signature codec** ([`extract_signature`], [`strip_signature`],
//!   [`insert_signature`]) — isolates the signed payload (document minus
//!   `signing.signature.value`) from the envelope.
//! - **[`sign_document`] / [`sign_manifest_file`]** — produce a signed
//!   manifest; file persistence is atomic.
//! - **[`verify_document`] / [`verify_manifest_file`]** — recompute the
//!   canonical payload and check the embedded signature, mapping every
//!   failure mode to a [`Verification`] outcome instead of a crash.
//! - **[`check_all`]** — the release gate: verify every manifest under a
//!   directory and fail closed.
//!
//! ## Security Invariants
//!
//! - Signer, verifier, and gate share one canonicalization path
//!   ([`canonical_payload`]); there is no second serialization to drift.
//! - A placeholder or empty signature value never verifies as valid.
//! - Zero manifests discovered is a gate failure, not a pass.

pub mod codec;
pub mod document;
pub mod gate;
pub mod signer;
pub mod verifier;

pub use codec::{canonical_payload, extract_signature, insert_signature, strip_signature};
pub use document::{Manifest, MANIFEST_SUFFIX};
pub use gate::{check_all, GateReport, GateRow};
pub use signer::{sign_document, sign_manifest_file};
pub use verifier::{
    verify_document, verify_manifest_file, Verification, PLACEHOLDER_SENTINEL,
};
