//! # Canonical Serialization
//!
//! This module defines [`CanonicalBytes`], the sole construction path for
//! bytes used in signature payloads and digest computation across the entire
//! toolkit.
//!
//! ## Security Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct `CanonicalBytes`
//! is through [`CanonicalBytes::new()`], which applies the full coercion
//! pipeline before serialization. Signer, verifier, and gate therefore cannot
//! drift onto different serializations of the same document — the "two
//! canonicalization rules" class of defects is structurally impossible.
//!
//! ## Canonicalization Rules
//!
//! 1. Reject non-integer floats — hashed/signed values must be strings or
//!    integers.
//! 2. Normalize RFC 3339 datetime strings to UTC with `Z` suffix, truncated
//!    to seconds.
//! 3. Sort object keys lexicographically.
//! 4. Use compact separators (no whitespace).

use serde::Serialize;
use serde_json::Value;

use crate::error::EncodingError;

/// Bytes produced exclusively by canonical serialization: sorted keys,
/// compact separators, coerced scalars.
///
/// The inner `Vec<u8>` is private — downstream code cannot construct
/// `CanonicalBytes` except through [`CanonicalBytes::new()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// Applies the full coercion pipeline before serialization. This is the
    /// ONLY way to construct `CanonicalBytes`; all signature payloads and
    /// content digests in the toolkit must flow through this constructor.
    pub fn new(obj: &impl Serialize) -> Result<Self, EncodingError> {
        let value = serde_json::to_value(obj)?;
        let coerced = coerce_json_value(value)?;
        Ok(Self(serde_json::to_vec(&coerced)?))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length of the canonical encoding in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the encoding is empty (never the case for a valid document).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively coerce JSON values according to the canonicalization rules.
fn coerce_json_value(value: Value) -> Result<Value, EncodingError> {
    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if n.is_f64() && !n.is_i64() && !n.is_u64() {
                    return Err(EncodingError::FloatRejected(f));
                }
            }
            Ok(Value::Number(n))
        }
        Value::Object(map) => {
            let mut coerced = serde_json::Map::new();
            for (k, v) in map {
                coerced.insert(k, coerce_json_value(v)?);
            }
            Ok(Value::Object(coerced))
        }
        Value::Array(arr) => {
            let coerced: Result<Vec<_>, _> = arr.into_iter().map(coerce_json_value).collect();
            Ok(Value::Array(coerced?))
        }
        Value::String(s) => {
            // Datetime normalization: if the string parses as RFC 3339,
            // normalize to UTC with Z suffix, truncated to seconds.
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                let utc = dt.with_timezone(&chrono::Utc);
                Ok(Value::String(utc.format("%Y-%m-%dT%H:%M:%SZ").to_string()))
            } else {
                Ok(Value::String(s))
            }
        }
        // Bool and Null pass through unchanged.
        other => Ok(other),
    }
}

/// Convert a YAML document into a JSON value suitable for canonicalization.
///
/// Manifests live on disk as YAML; the canonical form is JSON. This bridge
/// coerces non-string mapping keys to strings (booleans and integers only)
/// and rejects everything JSON cannot represent: YAML tags, float keys, and
/// non-integer numbers.
pub fn yaml_to_json(value: &serde_yaml::Value) -> Result<Value, EncodingError> {
    match value {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else {
                Err(EncodingError::FloatRejected(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let converted: Result<Vec<_>, _> = seq.iter().map(yaml_to_json).collect();
            Ok(Value::Array(converted?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Number(n) => {
                        if let Some(i) = n.as_i64() {
                            i.to_string()
                        } else if let Some(u) = n.as_u64() {
                            u.to_string()
                        } else {
                            return Err(EncodingError::Unrepresentable(
                                "float mapping key".to_string(),
                            ));
                        }
                    }
                    other => {
                        return Err(EncodingError::Unrepresentable(format!(
                            "mapping key is not a scalar: {other:?}"
                        )))
                    }
                };
                out.insert(key, yaml_to_json(v)?);
            }
            Ok(Value::Object(out))
        }
        serde_yaml::Value::Tagged(t) => Err(EncodingError::Unrepresentable(format!(
            "YAML tag {} has no canonical form",
            t.tag
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn keys_are_sorted() {
        let value = json!({"b": 1, "a": "x"});
        let bytes = CanonicalBytes::new(&value).unwrap();
        assert_eq!(bytes.as_bytes(), br#"{"a":"x","b":1}"#);
    }

    #[test]
    fn nested_keys_are_sorted() {
        let value = json!({"outer": {"z": 1, "a": 2}});
        let bytes = CanonicalBytes::new(&value).unwrap();
        assert_eq!(bytes.as_bytes(), br#"{"outer":{"a":2,"z":1}}"#);
    }

    #[test]
    fn no_whitespace_in_output() {
        let value = json!({"k": [1, 2, 3], "m": {"n": true}});
        let bytes = CanonicalBytes::new(&value).unwrap();
        let text = String::from_utf8(bytes.into_bytes()).unwrap();
        assert!(!text.contains(' '));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn floats_are_rejected() {
        let value = json!({"amount": 1.5});
        let err = CanonicalBytes::new(&value).unwrap_err();
        assert!(matches!(err, EncodingError::FloatRejected(_)));
    }

    #[test]
    fn integers_pass_through() {
        let value = json!({"count": 42, "neg": -7});
        let bytes = CanonicalBytes::new(&value).unwrap();
        assert_eq!(bytes.as_bytes(), br#"{"count":42,"neg":-7}"#);
    }

    #[test]
    fn datetime_strings_are_normalized_to_utc() {
        let value = json!({"created": "2026-01-15T17:30:00+05:00"});
        let bytes = CanonicalBytes::new(&value).unwrap();
        assert_eq!(
            bytes.as_bytes(),
            br#"{"created":"2026-01-15T12:30:00Z"}"#
        );
    }

    #[test]
    fn non_datetime_strings_are_untouched() {
        let value = json!({"name": "test-app"});
        let bytes = CanonicalBytes::new(&value).unwrap();
        assert_eq!(bytes.as_bytes(), br#"{"name":"test-app"}"#);
    }

    #[test]
    fn encoding_is_deterministic() {
        let value = json!({"schema_uri": "schema/manifest.schema.json",
                           "metadata": {"name": "test-app", "version": "1.0.0"}});
        let a = CanonicalBytes::new(&value).unwrap();
        let b = CanonicalBytes::new(&value).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn yaml_bridge_preserves_scalars() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("name: core\ncount: 3\nenabled: true\nempty: null").unwrap();
        let value = yaml_to_json(&yaml).unwrap();
        assert_eq!(value, json!({"name": "core", "count": 3, "enabled": true, "empty": null}));
    }

    #[test]
    fn yaml_bridge_coerces_non_string_keys() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes").unwrap();
        let value = yaml_to_json(&yaml).unwrap();
        assert_eq!(value, json!({"1": "one", "true": "yes"}));
    }

    #[test]
    fn yaml_bridge_rejects_floats() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("ratio: 0.5").unwrap();
        let err = yaml_to_json(&yaml).unwrap_err();
        assert!(matches!(err, EncodingError::FloatRejected(_)));
    }

    #[test]
    fn yaml_bridge_rejects_tags() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("key: !custom value").unwrap();
        let err = yaml_to_json(&yaml).unwrap_err();
        assert!(matches!(err, EncodingError::Unrepresentable(_)));
    }

    #[test]
    fn yaml_bridge_handles_nested_sequences() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("items:\n  - a\n  - b\nnested:\n  inner: [1, 2]").unwrap();
        let value = yaml_to_json(&yaml).unwrap();
        assert_eq!(value, json!({"items": ["a", "b"], "nested": {"inner": [1, 2]}}));
    }

    proptest! {
        /// Two encodings of the same logical document are byte-identical,
        /// regardless of the order keys were inserted in.
        #[test]
        fn encode_twice_is_identical(entries in proptest::collection::btree_map(
            "[a-z_]{1,12}", "[a-zA-Z0-9 ._-]{0,24}", 0..8,
        )) {
            let mut forward = serde_json::Map::new();
            for (k, v) in &entries {
                forward.insert(k.clone(), json!(v));
            }
            let mut reversed = serde_json::Map::new();
            for (k, v) in entries.iter().rev() {
                reversed.insert(k.clone(), json!(v));
            }
            let a = CanonicalBytes::new(&Value::Object(forward)).unwrap();
            let b = CanonicalBytes::new(&Value::Object(reversed)).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }
    }
}
