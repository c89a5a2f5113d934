//! # Sign and Verify Subcommands
//!
//! CLI access to the manifest signer and verifier. All canonicalization is
//! delegated to `seal-manifest`; this layer only maps outcomes to exit
//! codes and report lines.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use seal_manifest::{sign_manifest_file, verify_manifest_file};

/// Arguments for `seal sign`.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Path to the manifest file to sign.
    pub manifest: PathBuf,

    /// Path to the secret key file (64 hex chars, 32-byte Ed25519 seed).
    #[arg(long)]
    pub key: PathBuf,

    /// Output path (default: overwrite the input file).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `seal verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the signed manifest file.
    pub manifest: PathBuf,

    /// Path to the public key file (64 hex chars, 32-byte Ed25519 key).
    #[arg(long)]
    pub pubkey: PathBuf,
}

/// Execute `seal sign`.
pub fn run_sign(args: &SignArgs) -> Result<u8> {
    sign_manifest_file(&args.manifest, &args.key, args.output.as_deref())
        .context("failed to sign manifest")?;

    let target = args.output.as_deref().unwrap_or(&args.manifest);
    println!("Signed manifest written to: {}", target.display());
    Ok(0)
}

/// Execute `seal verify`.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let outcome = verify_manifest_file(&args.manifest, &args.pubkey)
        .context("failed to verify manifest")?;

    if outcome.is_valid() {
        println!("OK: signature verified for: {}", args.manifest.display());
        Ok(0)
    } else {
        eprintln!(
            "FAIL: {} — signature {outcome}",
            args.manifest.display()
        );
        Ok(1)
    }
}
