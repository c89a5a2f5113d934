//! # Tagged Manifest Documents
//!
//! A [`Manifest`] is a YAML mapping whose top level carries a string
//! `schema_uri`. The tag is checked when the document is parsed — a file
//! that lacks it is rejected up front, and no provenance operation ever
//! runs against an untagged document.

use std::path::Path;

use seal_core::SealError;
use serde_yaml::Value;

/// Filename suffix that marks a manifest for gate discovery.
pub const MANIFEST_SUFFIX: &str = ".manifest.yaml";

/// A parsed, tagged manifest document.
///
/// Key order from the source file is preserved (and is semantically
/// insignificant — canonicalization sorts keys). The on-disk YAML keeps the
/// author's ordering across sign/re-sign cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    schema_uri: String,
    doc: Value,
}

impl Manifest {
    /// Wrap an already-parsed YAML value, enforcing the manifest tag.
    pub fn from_value(doc: Value) -> Result<Self, SealError> {
        let mapping = doc
            .as_mapping()
            .ok_or_else(|| SealError::NotAManifest("top level is not a mapping".to_string()))?;
        let schema_uri = match mapping.get(Value::from("schema_uri")) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(SealError::NotAManifest(
                    "schema_uri is not a string".to_string(),
                ))
            }
            None => {
                return Err(SealError::NotAManifest(
                    "missing schema_uri field".to_string(),
                ))
            }
        };
        Ok(Self { schema_uri, doc })
    }

    /// Parse a manifest from YAML text.
    pub fn parse_str(text: &str) -> Result<Self, SealError> {
        let doc: Value = serde_yaml::from_str(text)?;
        Self::from_value(doc)
    }

    /// Load a manifest from disk, failing fast if the file is missing.
    pub fn load(path: &Path) -> Result<Self, SealError> {
        if !path.exists() {
            return Err(SealError::NotFound {
                what: "manifest",
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse_str(&text)
    }

    /// The schema contract this manifest claims to follow.
    pub fn schema_uri(&self) -> &str {
        &self.schema_uri
    }

    /// The published Merkle root, when the integrity section is present.
    pub fn merkle_root(&self) -> Option<&str> {
        self.doc.get("integrity")?.get("merkle_root")?.as_str()
    }

    /// Check the published `integrity.merkle_root` against a freshly
    /// computed root. A mismatch or an absent root is a security violation,
    /// never a warning.
    pub fn check_merkle_root(&self, computed: &str) -> Result<(), SealError> {
        match self.merkle_root() {
            None => Err(SealError::Security(
                "manifest has no integrity.merkle_root to check against".to_string(),
            )),
            Some(published) if published == computed => Ok(()),
            Some(published) => Err(SealError::Security(format!(
                "merkle root mismatch: computed {computed}, published {published}"
            ))),
        }
    }

    /// Borrow the underlying YAML document.
    pub fn document(&self) -> &Value {
        &self.doc
    }

    /// Consume the manifest, returning the underlying YAML document.
    pub fn into_value(self) -> Value {
        self.doc
    }

    /// Render the manifest as YAML text.
    pub fn to_yaml_string(&self) -> Result<String, SealError> {
        Ok(serde_yaml::to_string(&self.doc)?)
    }

    /// Write the manifest to disk atomically: a temporary file in the same
    /// directory is renamed over the target only after a complete write, so
    /// a failure never leaves a half-written manifest behind.
    pub fn write(&self, path: &Path) -> Result<(), SealError> {
        let text = self.to_yaml_string()?;
        let tmp = path.with_extension("yaml.tmp");
        std::fs::write(&tmp, text.as_bytes())?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}
