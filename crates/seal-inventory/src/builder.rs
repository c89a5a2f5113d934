//! # Inventory Builder
//!
//! Enumerates a file tree, digests each included file, and aggregates the
//! sorted digests into a Merkle root.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use seal_core::{CanonicalBytes, DigestAlgorithm, Sha256Accumulator};
use seal_crypto::merkle_root;

use crate::error::InventoryError;
use crate::matcher::fnmatch;

/// Default include patterns, covering the conventional release layout.
pub const DEFAULT_INCLUDE: &[&str] = &["core/**", "tools/**", "README.md", "LICENSE", "Makefile"];

/// Directory or file names that never enter an inventory: version-control
/// metadata and compiled caches.
const DENY_COMPONENTS: &[&str] = &[".git", ".hg", ".svn", "__pycache__", "target"];

/// File extensions that never enter an inventory.
const DENY_EXTENSIONS: &[&str] = &["pyc"];

/// Read files in 1 MiB chunks to bound memory during digesting.
const CHUNK_SIZE: usize = 1 << 20;

/// One `(path, digest)` row of a hash inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Relative, slash-normalized path under the inventory root.
    pub path: String,
    /// Lowercase hex SHA-256 of the file contents.
    pub sha256: String,
}

/// A content-addressed summary of a release file set.
///
/// Serialized through [`CanonicalBytes`], the JSON artifact has sorted keys
/// and compact separators, making the file itself reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashInventory {
    /// The digest algorithm used for entries and the tree (`"sha256"`).
    pub algo: DigestAlgorithm,
    /// Per-file digests, sorted by path.
    pub entries: Vec<InventoryEntry>,
    /// Merkle root over the entry digests in sorted-path order.
    pub merkle_root: String,
}

impl HashInventory {
    /// Serialize to the canonical JSON artifact (sorted keys, compact
    /// separators, UTF-8, no trailing newline).
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, InventoryError> {
        Ok(CanonicalBytes::new(self)?.into_bytes())
    }

    /// Write the canonical JSON artifact to `path`, creating parent
    /// directories as needed. The write is atomic: a temporary file in the
    /// same directory is renamed over the target only on full success.
    pub fn write(&self, path: &Path) -> Result<(), InventoryError> {
        let bytes = self.to_canonical_json()?;
        let io_err = |source| InventoryError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &bytes).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }

    /// Parse an inventory from its JSON artifact bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Builds a [`HashInventory`] from a root directory and include patterns.
#[derive(Debug, Clone)]
pub struct InventoryBuilder {
    root: PathBuf,
    include: Vec<String>,
    excluded_files: Vec<PathBuf>,
}

impl InventoryBuilder {
    /// Create a builder for the given root directory with the default
    /// include patterns.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            excluded_files: Vec::new(),
        }
    }

    /// Replace the include patterns.
    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Exclude a specific file even if a pattern matches it. The builder's
    /// own output file must never enter the inventory it summarizes.
    pub fn exclude_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded_files.push(path.into());
        self
    }

    /// Enumerate, digest, sort, and aggregate.
    ///
    /// Any unreadable file aborts the build with [`InventoryError::Io`];
    /// no partial inventory is returned.
    pub fn build(&self) -> Result<HashInventory, InventoryError> {
        let excluded: Vec<PathBuf> = self
            .excluded_files
            .iter()
            .filter_map(|p| std::fs::canonicalize(p).ok())
            .collect();

        let mut selected: Vec<(String, PathBuf)> = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let rel = path.strip_prefix(&self.root).unwrap_or(path);
            if is_denied(rel) {
                continue;
            }
            let rel_str = slash_normalized(rel);
            if !self.include.iter().any(|pat| fnmatch(pat, &rel_str)) {
                continue;
            }
            if !excluded.is_empty() {
                if let Ok(abs) = std::fs::canonicalize(path) {
                    if excluded.contains(&abs) {
                        continue;
                    }
                }
            }
            selected.push((rel_str, path.to_path_buf()));
        }

        // Sorted-path order is authoritative, not enumeration order.
        selected.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries = Vec::with_capacity(selected.len());
        let mut leaves = Vec::with_capacity(selected.len());
        for (rel_str, path) in selected {
            let digest = digest_file(&path)?;
            entries.push(InventoryEntry {
                path: rel_str,
                sha256: hex(&digest),
            });
            leaves.push(digest);
        }

        let root_hash = hex(&merkle_root(&leaves));
        tracing::debug!(
            files = entries.len(),
            merkle_root = %root_hash,
            "built hash inventory"
        );

        Ok(HashInventory {
            algo: DigestAlgorithm::Sha256,
            entries,
            merkle_root: root_hash,
        })
    }
}

/// True if any path component or the extension is on the fixed deny-list.
fn is_denied(rel: &Path) -> bool {
    for component in rel.components() {
        if let Some(name) = component.as_os_str().to_str() {
            if DENY_COMPONENTS.contains(&name) {
                return true;
            }
        }
    }
    if let Some(ext) = rel.extension().and_then(|e| e.to_str()) {
        if DENY_EXTENSIONS.contains(&ext) {
            return true;
        }
    }
    false
}

/// Relative path with forward slashes regardless of host conventions.
fn slash_normalized(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

/// Stream a file through SHA-256 in fixed-size chunks.
fn digest_file(path: &Path) -> Result<[u8; 32], InventoryError> {
    let io_err = |source| InventoryError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::File::open(path).map_err(io_err)?;
    let mut acc = Sha256Accumulator::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(io_err)?;
        if n == 0 {
            break;
        }
        acc.update(&buf[..n]);
    }
    Ok(acc.finalize().bytes)
}

/// Encode a digest as lowercase hex.
fn hex(bytes: &[u8; 32]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
