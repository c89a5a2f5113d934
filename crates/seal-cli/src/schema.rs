//! # Schema Subcommands
//!
//! `check-schema-uri` enforces that a manifest references the expected
//! structural contract; `validate-schema` runs full JSON Schema validation
//! and prints every violation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use seal_manifest::Manifest;
use seal_schema::{SchemaError, SchemaValidator};

/// Default schema reference for release manifests.
pub const DEFAULT_SCHEMA_URI: &str = "schema/manifest.schema.json";

/// Arguments for `seal check-schema-uri`.
#[derive(Args, Debug)]
pub struct CheckSchemaUriArgs {
    /// Path to the manifest file to check.
    pub manifest: PathBuf,

    /// Expected schema URI.
    #[arg(long, default_value = DEFAULT_SCHEMA_URI)]
    pub expected: String,
}

/// Arguments for `seal validate-schema`.
#[derive(Args, Debug)]
pub struct ValidateSchemaArgs {
    /// Path to the manifest file to validate.
    pub manifest: PathBuf,

    /// Path to the JSON Schema file.
    #[arg(long, default_value = DEFAULT_SCHEMA_URI)]
    pub schema: PathBuf,
}

/// Execute `seal check-schema-uri`.
pub fn run_check_schema_uri(args: &CheckSchemaUriArgs) -> Result<u8> {
    let manifest = Manifest::load(&args.manifest).context("failed to load manifest")?;

    if manifest.schema_uri() == args.expected {
        println!("OK: schema URI correct for: {}", args.manifest.display());
        Ok(0)
    } else {
        eprintln!("FAIL: schema URI mismatch in: {}", args.manifest.display());
        eprintln!("  Expected: {}", args.expected);
        eprintln!("  Actual:   {}", manifest.schema_uri());
        Ok(1)
    }
}

/// Execute `seal validate-schema`.
pub fn run_validate_schema(args: &ValidateSchemaArgs) -> Result<u8> {
    let validator =
        SchemaValidator::from_file(&args.schema).context("failed to load JSON schema")?;

    match validator.validate_yaml_file(&args.manifest) {
        Ok(()) => {
            println!(
                "OK: schema validation passed for: {}",
                args.manifest.display()
            );
            Ok(0)
        }
        Err(SchemaError::ValidationFailed { count, details, .. }) => {
            eprintln!(
                "FAIL: schema validation failed for: {} ({count} error(s))",
                args.manifest.display()
            );
            for detail in &details {
                eprintln!("  {detail}");
            }
            Ok(1)
        }
        Err(other) => Err(other).context("schema validation could not run"),
    }
}
