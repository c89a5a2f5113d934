//! # Content-Addressed Digests
//!
//! Defines [`ContentDigest`] and [`DigestAlgorithm`], plus the streaming
//! [`Sha256Accumulator`] used to digest file contents without loading them
//! into memory.
//!
//! ## Security Invariant
//!
//! [`sha256_digest`] only accepts [`CanonicalBytes`] — document digests can
//! only be computed from properly canonicalized data. Raw byte hashing is
//! reserved for file contents ([`Sha256Accumulator`], [`sha256_bytes`]),
//! which are opaque streams with no canonical form to enforce.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// The hash algorithm used to compute a content-addressed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-256 — the only algorithm in use; the tag exists so inventory
    /// files and manifests stay self-describing if a successor is added.
    Sha256,
}

impl DigestAlgorithm {
    /// Stable string form used in inventory files (`"sha256"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content-addressed digest with its algorithm tag.
///
/// The 32-byte digest and its algorithm are always stored together so
/// verification code can select the correct hash function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a new SHA-256 content digest from raw bytes.
    pub fn sha256(bytes: [u8; 32]) -> Self {
        Self {
            algorithm: DigestAlgorithm::Sha256,
            bytes,
        }
    }

    /// Return the digest as a lowercase hex string (64 chars).
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from 64 lowercase hex chars.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in bytes.iter_mut().enumerate() {
            *chunk = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).ok()?;
        }
        Some(Self::sha256(bytes))
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Compute a SHA-256 digest of raw bytes, returning the 32-byte array.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// This is the standard digest computation path for documents. The input
/// must be [`CanonicalBytes`] — raw byte slices are not accepted.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    ContentDigest::sha256(sha256_bytes(data.as_bytes()))
}

/// An incremental SHA-256 hasher for streaming file contents.
///
/// Callers feed chunks via [`update`](Self::update) and take the digest with
/// [`finalize`](Self::finalize); memory stays bounded by the caller's chunk
/// size regardless of file size.
#[derive(Debug, Default)]
pub struct Sha256Accumulator {
    inner: Sha256,
}

impl Sha256Accumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes into the accumulator.
    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
    }

    /// Consume the accumulator and return the content digest.
    pub fn finalize(self) -> ContentDigest {
        ContentDigest::sha256(self.inner.finalize().into())
    }
}
