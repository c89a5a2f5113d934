//! # Release Gate
//!
//! Aggregates verification outcomes across every manifest in a directory
//! tree. The gate fails closed: zero manifests discovered is a failure (an
//! attacker who deletes every manifest must not thereby pass), and a single
//! run reports the complete set of problems rather than stopping at the
//! first.

use std::path::{Path, PathBuf};

use seal_core::SealError;
use seal_crypto::PublicKey;
use walkdir::WalkDir;

use crate::codec::extract_signature;
use crate::document::{Manifest, MANIFEST_SUFFIX};
use crate::verifier::{verify_document, Verification, PLACEHOLDER_SENTINEL};

/// One manifest's row in the gate report.
#[derive(Debug)]
pub struct GateRow {
    /// Path of the manifest that was checked.
    pub path: PathBuf,
    /// The verification outcome.
    pub outcome: Verification,
    /// Human-readable detail for the report.
    pub message: String,
}

/// Aggregate result of a gate run.
#[derive(Debug)]
pub struct GateReport {
    /// Per-manifest outcomes, sorted by path.
    pub rows: Vec<GateRow>,
    /// True when no public key was supplied and only signature presence
    /// was checked. Callers must surface this visibly.
    pub verification_skipped: bool,
}

impl GateReport {
    /// Overall gate decision: pass only if at least one manifest was found
    /// and every manifest verified (or, degraded, carried a signature).
    pub fn passed(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|row| row.outcome.is_valid())
    }

    /// Number of manifests that verified.
    pub fn valid_count(&self) -> usize {
        self.rows.iter().filter(|row| row.outcome.is_valid()).count()
    }
}

/// Verify every manifest under `manifest_dir`, recursively.
///
/// Discovery covers every file named `*.manifest.yaml`. Files that fail to
/// parse as tagged manifests are reported as [`Verification::Invalid`] rows
/// — discovery never silently skips a candidate. Without a public key the
/// gate degrades to presence-only checking and flags the report
/// accordingly.
///
/// Rows are ordered by path, so repeated runs over an unchanged tree
/// produce identical reports.
pub fn check_all(manifest_dir: &Path, pubkey: Option<&Path>) -> Result<GateReport, SealError> {
    if !manifest_dir.is_dir() {
        return Err(SealError::NotFound {
            what: "manifest directory",
            path: manifest_dir.to_path_buf(),
        });
    }

    let key = match pubkey {
        Some(path) => {
            if !path.exists() {
                return Err(SealError::NotFound {
                    what: "public key",
                    path: path.to_path_buf(),
                });
            }
            Some(PublicKey::load(path).map_err(|e| SealError::InvalidKey(e.to_string()))?)
        }
        None => {
            tracing::warn!("no public key supplied; checking signature presence only");
            None
        }
    };

    let mut paths: Vec<PathBuf> = WalkDir::new(manifest_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(MANIFEST_SUFFIX))
        })
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();

    let mut rows = Vec::with_capacity(paths.len());
    for path in paths {
        let row = match Manifest::load(&path) {
            Err(e) => GateRow {
                path,
                outcome: Verification::Invalid,
                message: e.to_string(),
            },
            Ok(manifest) => match &key {
                Some(key) => {
                    let outcome = verify_document(manifest.document(), key);
                    GateRow {
                        path,
                        message: format!("signature {outcome}"),
                        outcome,
                    }
                }
                None => presence_row(path, &manifest),
            },
        };
        rows.push(row);
    }

    Ok(GateReport {
        rows,
        verification_skipped: key.is_none(),
    })
}

/// Degraded check: signature presence only, no cryptography.
fn presence_row(path: PathBuf, manifest: &Manifest) -> GateRow {
    match extract_signature(manifest.document()) {
        Some(sig) if !sig.trim().is_empty() && sig.trim() != PLACEHOLDER_SENTINEL => GateRow {
            path,
            outcome: Verification::Valid,
            message: "signature present (cryptographic verification skipped)".to_string(),
        },
        Some(_) => GateRow {
            path,
            outcome: Verification::NoSignature,
            message: "signature is placeholder or empty".to_string(),
        },
        None => GateRow {
            path,
            outcome: Verification::NoSignature,
            message: "no signature found".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::sign_document;
    use seal_crypto::SecretKey;
    use serde_yaml::Value;

    const TEST_SEED: [u8; 32] = [11u8; 32];

    fn key() -> SecretKey {
        SecretKey::from_seed(&TEST_SEED)
    }

    fn write_pubkey(dir: &Path) -> PathBuf {
        let path = dir.join("release.pub");
        std::fs::write(&path, key().public_key().to_hex()).unwrap();
        path
    }

    fn write_signed_manifest(dir: &Path, rel: &str, name: &str) {
        let doc: Value = serde_yaml::from_str(&format!(
            "schema_uri: schema/manifest.schema.json\nmetadata:\n  name: {name}\n"
        ))
        .unwrap();
        let signed = sign_document(&doc, &key()).unwrap();
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, serde_yaml::to_string(&signed).unwrap()).unwrap();
    }

    #[test]
    fn empty_directory_fails_closed() {
        let dir = tempfile::tempdir().unwrap();
        let pubkey = write_pubkey(dir.path());
        let report = check_all(dir.path(), Some(&pubkey)).unwrap();
        assert!(report.rows.is_empty());
        assert!(!report.passed());
    }

    #[test]
    fn all_valid_manifests_pass() {
        let dir = tempfile::tempdir().unwrap();
        let pubkey = write_pubkey(dir.path());
        write_signed_manifest(dir.path(), "releases/a/core.manifest.yaml", "app-a");
        write_signed_manifest(dir.path(), "releases/b/core.manifest.yaml", "app-b");

        let report = check_all(dir.path(), Some(&pubkey)).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert!(report.passed());
        assert!(!report.verification_skipped);
    }

    #[test]
    fn one_bad_manifest_fails_the_gate_but_all_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let pubkey = write_pubkey(dir.path());
        write_signed_manifest(dir.path(), "good.manifest.yaml", "app");
        std::fs::write(
            dir.path().join("unsigned.manifest.yaml"),
            "schema_uri: s\nmetadata:\n  name: other\n",
        )
        .unwrap();

        let report = check_all(dir.path(), Some(&pubkey)).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert!(!report.passed());
        assert_eq!(report.valid_count(), 1);
        // The failing row names its problem.
        let bad = report
            .rows
            .iter()
            .find(|r| !r.outcome.is_valid())
            .unwrap();
        assert_eq!(bad.outcome, Verification::NoSignature);
    }

    #[test]
    fn untagged_file_is_reported_invalid_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let pubkey = write_pubkey(dir.path());
        std::fs::write(
            dir.path().join("rogue.manifest.yaml"),
            "metadata:\n  name: no-tag\n",
        )
        .unwrap();

        let report = check_all(dir.path(), Some(&pubkey)).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].outcome, Verification::Invalid);
        assert!(report.rows[0].message.contains("schema_uri"));
    }

    #[test]
    fn non_manifest_files_are_not_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let pubkey = write_pubkey(dir.path());
        write_signed_manifest(dir.path(), "core.manifest.yaml", "app");
        std::fs::write(dir.path().join("notes.yaml"), "schema_uri: s\n").unwrap();
        std::fs::write(dir.path().join("README.md"), "docs").unwrap();

        let report = check_all(dir.path(), Some(&pubkey)).unwrap();
        assert_eq!(report.rows.len(), 1);
    }

    #[test]
    fn rows_are_sorted_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let pubkey = write_pubkey(dir.path());
        write_signed_manifest(dir.path(), "zz/core.manifest.yaml", "z");
        write_signed_manifest(dir.path(), "aa/core.manifest.yaml", "a");
        write_signed_manifest(dir.path(), "mm/core.manifest.yaml", "m");

        let report = check_all(dir.path(), Some(&pubkey)).unwrap();
        let paths: Vec<&PathBuf> = report.rows.iter().map(|r| &r.path).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn degraded_mode_checks_presence_and_flags_the_report() {
        let dir = tempfile::tempdir().unwrap();
        write_signed_manifest(dir.path(), "signed.manifest.yaml", "app");
        std::fs::write(
            dir.path().join("placeholder.manifest.yaml"),
            "schema_uri: s\nsigning:\n  signature:\n    value: ${SEAL_SIG}\n",
        )
        .unwrap();

        let report = check_all(dir.path(), None).unwrap();
        assert!(report.verification_skipped);
        assert!(!report.passed());
        assert_eq!(report.valid_count(), 1);
    }

    #[test]
    fn degraded_mode_passes_when_all_signatures_present() {
        let dir = tempfile::tempdir().unwrap();
        write_signed_manifest(dir.path(), "signed.manifest.yaml", "app");
        let report = check_all(dir.path(), None).unwrap();
        assert!(report.verification_skipped);
        assert!(report.passed());
    }

    #[test]
    fn missing_directory_is_not_found() {
        let err = check_all(Path::new("/no/such/dir"), None).unwrap_err();
        assert!(matches!(
            err,
            SealError::NotFound {
                what: "manifest directory",
                ..
            }
        ));
    }

    #[test]
    fn tampered_manifest_fails_the_gate() {
        let dir = tempfile::tempdir().unwrap();
        let pubkey = write_pubkey(dir.path());
        write_signed_manifest(dir.path(), "core.manifest.yaml", "app");

        // Edit a payload field after signing.
        let path = dir.path().join("core.manifest.yaml");
        let text = std::fs::read_to_string(&path)
            .unwrap()
            .replace("name: app", "name: tampered");
        std::fs::write(&path, text).unwrap();

        let report = check_all(dir.path(), Some(&pubkey)).unwrap();
        assert!(!report.passed());
        assert_eq!(report.rows[0].outcome, Verification::Tampered);
    }
}
