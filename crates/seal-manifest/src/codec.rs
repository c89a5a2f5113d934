//! # Signature Codec
//!
//! Separates a manifest's signed payload from its signature envelope. The
//! payload is the document with `signing.signature.value` structurally
//! removed — not set to an empty string — with now-empty parent mappings
//! collapsed, exactly mirroring what the signer serialized.
//!
//! [`canonical_payload`] is the single canonicalization entry point shared
//! by signer, verifier, and gate.

use seal_core::{yaml_to_json, CanonicalBytes, EncodingError};
use serde_yaml::{Mapping, Value};

/// Extract the detached signature value from a document, if present.
pub fn extract_signature(doc: &Value) -> Option<&str> {
    doc.get("signing")?.get("signature")?.get("value")?.as_str()
}

/// Return the payload: the document with `signing.signature.value` removed
/// and empty parent containers collapsed.
pub fn strip_signature(doc: &Value) -> Value {
    let mut out = doc.clone();
    if let Some(root) = out.as_mapping_mut() {
        let signing_key = Value::from("signing");
        let signature_key = Value::from("signature");

        if let Some(Value::Mapping(signing)) = root.get_mut(&signing_key) {
            if let Some(Value::Mapping(signature)) = signing.get_mut(&signature_key) {
                signature.remove(Value::from("value"));
            }
            let signature_empty =
                matches!(signing.get(&signature_key), Some(Value::Mapping(m)) if m.is_empty());
            if signature_empty {
                signing.remove(&signature_key);
            }
        }
        let signing_empty =
            matches!(root.get(&signing_key), Some(Value::Mapping(m)) if m.is_empty());
        if signing_empty {
            root.remove(&signing_key);
        }
    }
    out
}

/// Insert a signature value, creating the `signing.signature` path as
/// needed. The rest of the document is untouched.
pub fn insert_signature(doc: &Value, signature: &str) -> Value {
    insert_signature_field(doc, "value", signature)
}

/// Set one field of the `signing.signature` mapping, creating intermediate
/// mappings as needed.
pub(crate) fn insert_signature_field(doc: &Value, field: &str, value: &str) -> Value {
    let mut out = doc.clone();
    if let Some(root) = out.as_mapping_mut() {
        let signing_key = Value::from("signing");
        if !matches!(root.get(&signing_key), Some(Value::Mapping(_))) {
            root.insert(signing_key.clone(), Value::Mapping(Mapping::new()));
        }
        if let Some(Value::Mapping(signing)) = root.get_mut(&signing_key) {
            let signature_key = Value::from("signature");
            if !matches!(signing.get(&signature_key), Some(Value::Mapping(_))) {
                signing.insert(signature_key.clone(), Value::Mapping(Mapping::new()));
            }
            if let Some(Value::Mapping(signature)) = signing.get_mut(&signature_key) {
                signature.insert(Value::from(field), Value::from(value));
            }
        }
    }
    out
}

/// Canonical payload bytes for a document: strip the signature value, bridge
/// to JSON, and encode with sorted keys and compact separators.
///
/// This is the only path to the bytes that get signed or verified.
pub fn canonical_payload(doc: &Value) -> Result<CanonicalBytes, EncodingError> {
    let payload = strip_signature(doc);
    CanonicalBytes::new(&yaml_to_json(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    const SIGNED: &str = "\
schema_uri: schema/manifest.schema.json
metadata:
  name: test-app
signing:
  signature:
    created_at: \"2026-01-15T12:00:00Z\"
    value: |-
      untrusted comment: signature from seal secret key
      QUJDREVG
";

    #[test]
    fn extract_finds_the_value() {
        let binding = doc(SIGNED);
        let sig = extract_signature(&binding).unwrap();
        assert!(sig.starts_with("untrusted comment:"));
    }

    #[test]
    fn extract_is_none_without_signature() {
        assert!(extract_signature(&doc("schema_uri: s\n")).is_none());
        assert!(extract_signature(&doc("schema_uri: s\nsigning: {}\n")).is_none());
    }

    #[test]
    fn strip_removes_only_the_value() {
        let stripped = strip_signature(&doc(SIGNED));
        assert!(extract_signature(&stripped).is_none());
        // created_at survives: it is part of the signed payload.
        assert!(stripped
            .get("signing")
            .and_then(|s| s.get("signature"))
            .and_then(|s| s.get("created_at"))
            .is_some());
        // Other fields untouched.
        assert_eq!(
            stripped.get("metadata").and_then(|m| m.get("name")),
            Some(&Value::from("test-app"))
        );
    }

    #[test]
    fn strip_collapses_empty_parents() {
        let only_value = doc("schema_uri: s\nsigning:\n  signature:\n    value: sig\n");
        let stripped = strip_signature(&only_value);
        assert!(stripped.get("signing").is_none());
    }

    #[test]
    fn strip_is_idempotent() {
        let stripped = strip_signature(&doc(SIGNED));
        assert_eq!(strip_signature(&stripped), stripped);
    }

    #[test]
    fn insert_never_perturbs_the_payload() {
        // strip(insert(strip(d), s)) == strip(d)
        let original = doc(SIGNED);
        let stripped = strip_signature(&original);
        let reinserted = insert_signature(&stripped, "another signature");
        assert_eq!(strip_signature(&reinserted), stripped);
    }

    #[test]
    fn insert_creates_missing_sections() {
        let bare = doc("schema_uri: s\n");
        let signed = insert_signature(&bare, "sig");
        assert_eq!(extract_signature(&signed), Some("sig"));
    }

    #[test]
    fn insert_overwrites_existing_value() {
        let signed = insert_signature(&doc(SIGNED), "replacement");
        assert_eq!(extract_signature(&signed), Some("replacement"));
    }

    #[test]
    fn payload_identical_with_and_without_signature() {
        let with = doc(SIGNED);
        let without = strip_signature(&with);
        assert_eq!(
            canonical_payload(&with).unwrap(),
            canonical_payload(&without).unwrap()
        );
    }

    #[test]
    fn payload_is_sorted_compact_json() {
        let payload = canonical_payload(&doc("schema_uri: s\nalpha: 1\n")).unwrap();
        assert_eq!(payload.as_bytes(), br#"{"alpha":1,"schema_uri":"s"}"#);
    }

    #[test]
    fn payload_changes_when_content_changes() {
        let a = canonical_payload(&doc("schema_uri: s\nmetadata:\n  name: test-app\n")).unwrap();
        let b =
            canonical_payload(&doc("schema_uri: s\nmetadata:\n  name: tampered-app\n")).unwrap();
        assert_ne!(a, b);
    }
}
