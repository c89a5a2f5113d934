//! # Error Hierarchy
//!
//! Structured error types for the seal toolkit, built with `thiserror`.
//!
//! Each variant carries the context an operator needs to act on the failure:
//! the path that was missing, the value that could not be encoded, the
//! operation that was aborted. None of these errors are retried anywhere in
//! the toolkit; the CLI maps every one of them to a non-zero exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for provenance operations.
#[derive(Error, Debug)]
pub enum SealError {
    /// A required file (manifest, key, schema) does not exist.
    #[error("{what} not found: {path}")]
    NotFound {
        /// What kind of file was expected (e.g. "manifest", "secret key").
        what: &'static str,
        /// The path that was checked.
        path: PathBuf,
    },

    /// The document could not be canonicalized.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// I/O failure during hashing, signing, or persistence. Always aborts
    /// the current operation; files are never silently skipped.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest file is not parseable YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document is not a tagged manifest (missing or non-string
    /// `schema_uri`, or the top level is not a mapping).
    #[error("not a manifest: {0}")]
    NotAManifest(String),

    /// Key material could not be decoded.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// The external signing step failed. The manifest on disk is left
    /// unmodified when this is returned.
    #[error("signing error: {0}")]
    Signing(String),

    /// An integrity check failed: signature mismatch or a Merkle root that
    /// disagrees with a previously published value. Never downgraded to a
    /// warning.
    #[error("security violation: {0}")]
    Security(String),
}

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// Non-integer floats are not permitted in canonical representations.
    /// Anything that will be hashed or signed must be a string or integer.
    #[error("float values are not permitted in canonical representations; use string or integer: {0}")]
    FloatRejected(f64),

    /// The value has no canonical JSON representation (YAML tag, binary
    /// node, or a mapping key that cannot be coerced to a string).
    #[error("value has no canonical representation: {0}")]
    Unrepresentable(String),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
