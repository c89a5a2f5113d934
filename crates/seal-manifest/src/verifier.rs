//! # Verifier
//!
//! Mirror of the signer: recompute the canonical payload from a signed
//! manifest and check it against the embedded signature block.
//!
//! Every failure mode maps to a [`Verification`] outcome — a manifest that
//! was edited after signing reports [`Verification::Tampered`], never a
//! crash, and a placeholder value never verifies as valid.

use std::path::Path;

use seal_core::SealError;
use seal_crypto::{verify_detached, PublicKey, SignatureBlock};
use serde_yaml::Value;

use crate::codec::{canonical_payload, extract_signature};
use crate::document::Manifest;

/// The placeholder sentinel standing in for "not yet signed".
///
/// Treated identically to a missing signature: a manifest carrying it must
/// never pass verification.
pub const PLACEHOLDER_SENTINEL: &str = "${SEAL_SIG}";

/// Outcome of verifying one manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The embedded signature verifies over the recomputed payload.
    Valid,
    /// The signature value is absent, empty, or the placeholder sentinel.
    NoSignature,
    /// The signature does not verify — the payload changed after signing,
    /// or the signature belongs to a different document or key.
    Tampered,
    /// The manifest or its signature block is structurally unusable
    /// (unparseable block, uncanonicalizable document).
    Invalid,
}

impl Verification {
    /// True only for [`Verification::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid)
    }

    /// Short lowercase label for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verification::Valid => "valid",
            Verification::NoSignature => "no signature",
            Verification::Tampered => "tampered",
            Verification::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for Verification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verify a manifest document in memory against a public key.
pub fn verify_document(doc: &Value, key: &PublicKey) -> Verification {
    let Some(sig_text) = extract_signature(doc) else {
        return Verification::NoSignature;
    };
    let trimmed = sig_text.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER_SENTINEL {
        return Verification::NoSignature;
    }

    let block = match SignatureBlock::from_text(sig_text) {
        Ok(block) => block,
        Err(e) => {
            tracing::debug!("unparseable signature block: {e}");
            return Verification::Invalid;
        }
    };

    let payload = match canonical_payload(doc) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("payload not canonicalizable: {e}");
            return Verification::Invalid;
        }
    };

    match verify_detached(&payload, &block, key) {
        Ok(()) => Verification::Valid,
        Err(e) => {
            tracing::debug!("signature verification failed: {e}");
            Verification::Tampered
        }
    }
}

/// Verify a manifest file against a public key file.
///
/// Fails fast with [`SealError::NotFound`] when either path is missing;
/// all signature-level failures are reported through the returned
/// [`Verification`], not as errors.
pub fn verify_manifest_file(
    manifest_path: &Path,
    pubkey_path: &Path,
) -> Result<Verification, SealError> {
    if !manifest_path.exists() {
        return Err(SealError::NotFound {
            what: "manifest",
            path: manifest_path.to_path_buf(),
        });
    }
    if !pubkey_path.exists() {
        return Err(SealError::NotFound {
            what: "public key",
            path: pubkey_path.to_path_buf(),
        });
    }

    let manifest = Manifest::load(manifest_path)?;
    let key = PublicKey::load(pubkey_path).map_err(|e| SealError::InvalidKey(e.to_string()))?;
    Ok(verify_document(manifest.document(), &key))
}
