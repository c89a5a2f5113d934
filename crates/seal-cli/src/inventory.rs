//! # Inventory Subcommand
//!
//! Builds the hash inventory for a release tree, writes the canonical JSON
//! artifact, and prints the Merkle root. With `--check`, the computed root
//! is compared against a manifest's published `integrity.merkle_root`; a
//! mismatch is a hard failure, never a warning.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use seal_inventory::{InventoryBuilder, DEFAULT_INCLUDE};
use seal_manifest::Manifest;

/// Arguments for `seal inventory`.
#[derive(Args, Debug)]
pub struct InventoryArgs {
    /// Root directory of the release tree.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Include pattern (repeatable). Defaults to the conventional release
    /// layout when omitted.
    #[arg(long = "include", value_name = "GLOB")]
    pub include: Vec<String>,

    /// Output path for the inventory artifact.
    #[arg(long, default_value = "manifest/hash-inventory.json")]
    pub out: PathBuf,

    /// Compare the computed root against this manifest's published
    /// `integrity.merkle_root`.
    #[arg(long, value_name = "MANIFEST")]
    pub check: Option<PathBuf>,
}

/// Execute `seal inventory`.
pub fn run_inventory(args: &InventoryArgs) -> Result<u8> {
    let patterns: Vec<String> = if args.include.is_empty() {
        DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect()
    } else {
        args.include.clone()
    };

    let inventory = InventoryBuilder::new(&args.root)
        .include(patterns)
        .exclude_file(&args.out)
        .build()
        .context("failed to build hash inventory")?;

    inventory
        .write(&args.out)
        .with_context(|| format!("failed to write inventory: {}", args.out.display()))?;

    println!("{}", inventory.merkle_root);

    if let Some(manifest_path) = &args.check {
        let manifest = Manifest::load(manifest_path).context("failed to load manifest")?;
        match manifest.check_merkle_root(&inventory.merkle_root) {
            Ok(()) => {
                println!("OK: merkle root matches: {}", manifest_path.display());
            }
            Err(e) => {
                eprintln!("FAIL: {}: {e}", manifest_path.display());
                return Ok(1);
            }
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(dir: &std::path::Path) {
        std::fs::create_dir_all(dir.join("core")).unwrap();
        std::fs::write(dir.join("core/a.txt"), "one").unwrap();
        std::fs::write(dir.join("core/b.txt"), "two").unwrap();
    }

    #[test]
    fn builds_and_writes_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        tree(dir.path());
        let out = dir.path().join("manifest/hash-inventory.json");

        let args = InventoryArgs {
            root: dir.path().to_path_buf(),
            include: vec![],
            out: out.clone(),
            check: None,
        };
        assert_eq!(run_inventory(&args).unwrap(), 0);
        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with(r#"{"algo":"sha256""#));
    }

    #[test]
    fn check_passes_when_roots_agree() {
        let dir = tempfile::tempdir().unwrap();
        tree(dir.path());
        let out = dir.path().join("manifest/hash-inventory.json");

        let inventory = InventoryBuilder::new(dir.path()).build().unwrap();
        let manifest_path = dir.path().join("core-v1.manifest.yaml");
        std::fs::write(
            &manifest_path,
            format!(
                "schema_uri: s\nintegrity:\n  merkle_root: {}\n",
                inventory.merkle_root
            ),
        )
        .unwrap();

        let args = InventoryArgs {
            root: dir.path().to_path_buf(),
            include: vec![],
            out,
            check: Some(manifest_path),
        };
        assert_eq!(run_inventory(&args).unwrap(), 0);
    }

    #[test]
    fn check_fails_on_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        tree(dir.path());
        let manifest_path = dir.path().join("core-v1.manifest.yaml");
        std::fs::write(
            &manifest_path,
            format!("schema_uri: s\nintegrity:\n  merkle_root: {}\n", "0".repeat(64)),
        )
        .unwrap();

        let args = InventoryArgs {
            root: dir.path().to_path_buf(),
            include: vec![],
            out: dir.path().join("manifest/hash-inventory.json"),
            check: Some(manifest_path),
        };
        assert_eq!(run_inventory(&args).unwrap(), 1);
    }

    #[test]
    fn check_fails_when_manifest_has_no_root() {
        let dir = tempfile::tempdir().unwrap();
        tree(dir.path());
        let manifest_path = dir.path().join("core-v1.manifest.yaml");
        std::fs::write(&manifest_path, "schema_uri: s\n").unwrap();

        let args = InventoryArgs {
            root: dir.path().to_path_buf(),
            include: vec![],
            out: dir.path().join("manifest/hash-inventory.json"),
            check: Some(manifest_path),
        };
        assert_eq!(run_inventory(&args).unwrap(), 1);
    }

    #[test]
    fn custom_includes_narrow_the_set() {
        let dir = tempfile::tempdir().unwrap();
        tree(dir.path());
        std::fs::write(dir.path().join("extra.bin"), "x").unwrap();
        let out = dir.path().join("manifest/hash-inventory.json");

        let args = InventoryArgs {
            root: dir.path().to_path_buf(),
            include: vec!["core/**".to_string()],
            out: out.clone(),
            check: None,
        };
        assert_eq!(run_inventory(&args).unwrap(), 0);
        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.contains("core/a.txt"));
        assert!(!content.contains("extra.bin"));
    }
}
