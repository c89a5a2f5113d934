//! # Gate Subcommand
//!
//! Runs the release gate over a directory tree and reports every manifest's
//! outcome. The run evaluates all manifests even after the first failure,
//! so one invocation surfaces the complete set of problems.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use seal_manifest::check_all;

/// Arguments for `seal gate`.
#[derive(Args, Debug)]
pub struct GateArgs {
    /// Directory to search for manifests, recursively.
    #[arg(long)]
    pub manifest_dir: PathBuf,

    /// Path to the public key file. Without it the gate only checks
    /// signature presence.
    #[arg(long)]
    pub pubkey: Option<PathBuf>,
}

/// Execute `seal gate`.
pub fn run_gate(args: &GateArgs) -> Result<u8> {
    if args.pubkey.is_none() {
        eprintln!("Warning: no public key provided; checking signature presence only");
    }

    let report = check_all(&args.manifest_dir, args.pubkey.as_deref())
        .context("release gate could not run")?;

    if report.rows.is_empty() {
        eprintln!(
            "FAIL: no manifests found under: {}",
            args.manifest_dir.display()
        );
        return Ok(1);
    }

    println!("Checking {} manifest(s)...", report.rows.len());
    for row in &report.rows {
        if row.outcome.is_valid() {
            println!("OK: {}: {}", row.path.display(), row.message);
        } else {
            eprintln!("FAIL: {}: {}", row.path.display(), row.message);
        }
    }

    if report.passed() {
        println!(
            "All {} manifest(s) have valid signatures",
            report.valid_count()
        );
        Ok(0)
    } else {
        eprintln!(
            "FAIL: {}/{} manifest(s) passed",
            report.valid_count(),
            report.rows.len()
        );
        Ok(1)
    }
}
