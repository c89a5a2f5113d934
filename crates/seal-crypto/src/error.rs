//! # Cryptographic Error Types
//!
//! Structured errors for all cryptographic operations in `seal-crypto`.
//! Uses `thiserror` for ergonomic error definitions with diagnostic context.

use thiserror::Error;

/// Errors from cryptographic operations in the seal toolkit.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The two-line signature block is malformed (wrong line count, bad
    /// base64, wrong algorithm tag, truncated payload).
    #[error("invalid signature block: {0}")]
    InvalidSignatureBlock(String),

    /// Invalid Ed25519 signature length.
    #[error("invalid Ed25519 signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Key material could not be decoded into an Ed25519 key.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Ed25519 signature verification failed.
    #[error("Ed25519 verification failed: {0}")]
    VerificationFailed(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// I/O error while loading key files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
