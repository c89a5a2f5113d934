//! # seal CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; every handler returns the process exit code it
//! wants, and operational errors bubble up as `anyhow` failures mapped to
//! exit code 1.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seal_cli::gate::{run_gate, GateArgs};
use seal_cli::inventory::{run_inventory, InventoryArgs};
use seal_cli::schema::{run_check_schema_uri, run_validate_schema, CheckSchemaUriArgs, ValidateSchemaArgs};
use seal_cli::signing::{run_sign, run_verify, SignArgs, VerifyArgs};

/// seal — release provenance toolkit.
///
/// Signs and verifies release manifests with detached Ed25519 signatures,
/// builds Merkle hash inventories, validates manifests against their JSON
/// Schema, and gates release promotion on signature validity.
#[derive(Parser, Debug)]
#[command(name = "seal", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign a manifest with a detached signature.
    Sign(SignArgs),

    /// Verify a signed manifest against a public key.
    Verify(VerifyArgs),

    /// Check that a manifest references the expected schema URI.
    CheckSchemaUri(CheckSchemaUriArgs),

    /// Validate a manifest against a JSON Schema definition.
    ValidateSchema(ValidateSchemaArgs),

    /// Build the hash inventory and Merkle root for a file tree.
    Inventory(InventoryArgs),

    /// Verify every manifest under a directory; fail closed.
    Gate(GateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("seal CLI starting");

    let result = match cli.command {
        Commands::Sign(args) => run_sign(&args),
        Commands::Verify(args) => run_verify(&args),
        Commands::CheckSchemaUri(args) => run_check_schema_uri(&args),
        Commands::ValidateSchema(args) => run_validate_schema(&args),
        Commands::Inventory(args) => run_inventory(&args),
        Commands::Gate(args) => run_gate(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}
