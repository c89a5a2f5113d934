//! # Detached Ed25519 Signatures
//!
//! Implements the detached-signature primitive: sign a canonical payload
//! with a secret key, carry the signature as a self-describing two-line
//! text block, verify it with the matching public key.
//!
//! ## Wire Format
//!
//! ```text
//! untrusted comment: <free text, not covered by the signature>
//! <base64 of: "Ed" || key_id (8 bytes) || signature (64 bytes)>
//! ```
//!
//! The `Ed` algorithm tag versions the format; a future scheme would use a
//! different tag. `key_id` is the first 8 bytes of SHA-256 over the 32-byte
//! public key, letting a verifier detect a wrong-key mismatch before the
//! signature check runs. Everything above this module treats the whole block
//! as one opaque string.
//!
//! ## Key Files
//!
//! A key file is a single line of 64 lowercase hex chars: the 32-byte
//! Ed25519 seed (secret) or the 32-byte public key. Key generation and
//! custody are out of scope for this toolkit.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, Verifier};
use sha2::{Digest, Sha256};
use std::path::Path;

use seal_core::CanonicalBytes;

use crate::error::CryptoError;

/// Algorithm tag embedded in every signature block.
const ALGORITHM_TAG: &[u8; 2] = b"Ed";

/// Decoded length of the base64 block: tag + key id + signature.
const BLOCK_LEN: usize = 2 + 8 + 64;

/// Comment line prefix required by the wire format.
const COMMENT_PREFIX: &str = "untrusted comment: ";

/// Default comment written by [`sign_detached`].
const DEFAULT_COMMENT: &str = "signature from seal secret key";

// ---------------------------------------------------------------------------
// Hex helpers
// ---------------------------------------------------------------------------

/// Decode a 64-char hex string into 32 bytes.
fn hex_to_key_bytes(hex: &str) -> Result<[u8; 32], CryptoError> {
    let hex = hex.trim();
    if hex.len() != 64 || !hex.is_ascii() {
        return Err(CryptoError::HexDecode(format!(
            "expected 64 hex chars, got {}",
            hex.len()
        )));
    }
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16)
            .map_err(|e| CryptoError::HexDecode(format!("invalid hex at position {}: {e}", 2 * i)))?;
    }
    Ok(out)
}

/// Encode bytes as lowercase hex.
fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// An Ed25519 secret key loaded from a hex key file.
///
/// The inner `ed25519_dalek::SigningKey` zeroizes its seed on drop.
pub struct SecretKey {
    inner: ed25519_dalek::SigningKey,
}

impl SecretKey {
    /// Construct a secret key from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Parse a secret key from 64 hex chars.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        Ok(Self::from_seed(&hex_to_key_bytes(hex)?))
    }

    /// Load a secret key from a hex key file.
    pub fn load(path: &Path) -> Result<Self, CryptoError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_hex(&content)
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.verifying_key(),
        }
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never prints key material.
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}

/// An Ed25519 public key loaded from a hex key file.
#[derive(Debug, Clone)]
pub struct PublicKey {
    inner: ed25519_dalek::VerifyingKey,
}

impl PublicKey {
    /// Parse a public key from 64 hex chars.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_key_bytes(hex)?;
        let inner = ed25519_dalek::VerifyingKey::from_bytes(&bytes)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Load a public key from a hex key file.
    pub fn load(path: &Path) -> Result<Self, CryptoError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_hex(&content)
    }

    /// Return the key as lowercase hex.
    pub fn to_hex(&self) -> String {
        to_hex(self.inner.as_bytes())
    }

    /// The 8-byte key id: first 8 bytes of SHA-256 over the public key.
    pub fn key_id(&self) -> [u8; 8] {
        let digest: [u8; 32] = Sha256::digest(self.inner.as_bytes()).into();
        let mut id = [0u8; 8];
        id.copy_from_slice(&digest[..8]);
        id
    }

    /// The key id as 16 lowercase hex chars.
    pub fn key_id_hex(&self) -> String {
        to_hex(&self.key_id())
    }
}

// ---------------------------------------------------------------------------
// Signature block
// ---------------------------------------------------------------------------

/// A parsed detached-signature block.
///
/// The comment line is carried verbatim but is not covered by the signature;
/// tampering with it has no effect on verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBlock {
    /// Free-text comment from the first line.
    pub comment: String,
    /// The signer's 8-byte key id.
    pub key_id: [u8; 8],
    /// The raw 64-byte Ed25519 signature.
    pub signature: [u8; 64],
}

impl SignatureBlock {
    /// Render the block in its two-line wire format.
    pub fn to_text(&self) -> String {
        let mut payload = Vec::with_capacity(BLOCK_LEN);
        payload.extend_from_slice(ALGORITHM_TAG);
        payload.extend_from_slice(&self.key_id);
        payload.extend_from_slice(&self.signature);
        format!("{COMMENT_PREFIX}{}\n{}", self.comment, BASE64.encode(payload))
    }

    /// Parse a block from its two-line wire format.
    pub fn from_text(text: &str) -> Result<Self, CryptoError> {
        let mut lines = text.trim().lines();
        let comment_line = lines
            .next()
            .ok_or_else(|| CryptoError::InvalidSignatureBlock("empty block".to_string()))?;
        let b64_line = lines
            .next()
            .ok_or_else(|| CryptoError::InvalidSignatureBlock("missing base64 line".to_string()))?;
        if lines.next().is_some() {
            return Err(CryptoError::InvalidSignatureBlock(
                "expected exactly two lines".to_string(),
            ));
        }

        let comment = comment_line
            .strip_prefix(COMMENT_PREFIX)
            .ok_or_else(|| {
                CryptoError::InvalidSignatureBlock(format!(
                    "first line must start with {COMMENT_PREFIX:?}"
                ))
            })?
            .to_string();

        let payload = BASE64
            .decode(b64_line.trim())
            .map_err(|e| CryptoError::InvalidSignatureBlock(format!("bad base64: {e}")))?;
        if payload.len() != BLOCK_LEN {
            return Err(CryptoError::InvalidSignatureBlock(format!(
                "expected {BLOCK_LEN} decoded bytes, got {}",
                payload.len()
            )));
        }
        if &payload[..2] != ALGORITHM_TAG {
            return Err(CryptoError::InvalidSignatureBlock(format!(
                "unknown algorithm tag: {:?}",
                &payload[..2]
            )));
        }

        let mut key_id = [0u8; 8];
        key_id.copy_from_slice(&payload[2..10]);
        let mut signature = [0u8; 64];
        signature.copy_from_slice(&payload[10..]);

        Ok(Self {
            comment,
            key_id,
            signature,
        })
    }

    /// The signer's key id as 16 lowercase hex chars.
    pub fn key_id_hex(&self) -> String {
        to_hex(&self.key_id)
    }
}

// ---------------------------------------------------------------------------
// Sign / verify
// ---------------------------------------------------------------------------

/// Sign a canonical payload, producing a detached signature block.
///
/// Callers must not assume the output is deterministic: re-signing an
/// identical payload is free to produce a different block, and both verify.
pub fn sign_detached(message: &CanonicalBytes, key: &SecretKey) -> SignatureBlock {
    let signature = key.inner.sign(message.as_bytes());
    SignatureBlock {
        comment: DEFAULT_COMMENT.to_string(),
        key_id: key.public_key().key_id(),
        signature: signature.to_bytes(),
    }
}

/// Verify a detached signature block against a canonical payload.
///
/// Fails if the block's key id does not match the supplied public key, or
/// if the Ed25519 signature does not verify over the payload bytes.
pub fn verify_detached(
    message: &CanonicalBytes,
    block: &SignatureBlock,
    key: &PublicKey,
) -> Result<(), CryptoError> {
    if block.key_id != key.key_id() {
        return Err(CryptoError::VerificationFailed(format!(
            "key id mismatch: block signed by {}, verifying with {}",
            block.key_id_hex(),
            key.key_id_hex()
        )));
    }
    let signature = Signature::from_bytes(&block.signature);
    key.inner
        .verify(message.as_bytes(), &signature)
        .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
}
