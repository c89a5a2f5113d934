//! # Signer
//!
//! Produces signed manifests: strip any existing signature value, stamp the
//! signature metadata, canonically encode the payload, invoke the detached
//! signing primitive, and embed the resulting block.
//!
//! Persistence is atomic — the manifest on disk is replaced only after the
//! complete signed document has been written to a temporary file. A failed
//! signing step therefore never leaves a partially signed manifest behind.

use std::path::Path;

use chrono::Utc;
use seal_core::SealError;
use seal_crypto::{sign_detached, SecretKey};
use serde_yaml::Value;

use crate::codec::{canonical_payload, insert_signature, insert_signature_field, strip_signature};
use crate::document::Manifest;

/// Sign a manifest document in memory.
///
/// Any existing signature value is discarded and the `signing.signature`
/// metadata (`created_at`, `key_id`) is restamped, so a re-sign always
/// starts from a freshly stripped payload. The metadata is written *before*
/// the payload is encoded: it is covered by the signature, and only `value`
/// sits outside the payload.
pub fn sign_document(doc: &Value, key: &SecretKey) -> Result<Value, SealError> {
    let stripped = strip_signature(doc);

    let created_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let stamped = insert_signature_field(&stripped, "created_at", &created_at);
    let stamped = insert_signature_field(&stamped, "key_id", &key.public_key().key_id_hex());

    let payload = canonical_payload(&stamped)?;
    let block = sign_detached(&payload, key);

    Ok(insert_signature(&stamped, &block.to_text()))
}

/// Sign a manifest file.
///
/// Fails fast with [`SealError::NotFound`] if the manifest or key file is
/// missing, before the signing primitive is ever invoked. On success the
/// signed manifest is written to `output` (or over the input when `output`
/// is `None`) via an atomic replace; on any failure the target file is left
/// unmodified.
pub fn sign_manifest_file(
    manifest_path: &Path,
    key_path: &Path,
    output: Option<&Path>,
) -> Result<Manifest, SealError> {
    if !manifest_path.exists() {
        return Err(SealError::NotFound {
            what: "manifest",
            path: manifest_path.to_path_buf(),
        });
    }
    if !key_path.exists() {
        return Err(SealError::NotFound {
            what: "secret key",
            path: key_path.to_path_buf(),
        });
    }

    let manifest = Manifest::load(manifest_path)?;
    let key = SecretKey::load(key_path).map_err(|e| SealError::InvalidKey(e.to_string()))?;

    let signed = Manifest::from_value(sign_document(manifest.document(), &key)?)?;

    let target = output.unwrap_or(manifest_path);
    signed.write(target)?;
    tracing::info!(manifest = %target.display(), "signed manifest written");

    Ok(signed)
}
