//! # Runtime Schema Validation
//!
//! Compiles a JSON Schema (Draft 2020-12) and validates YAML documents
//! against it, collecting every violation rather than stopping at the first.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Structured validation error with diagnostic context.
#[derive(Debug, Clone)]
pub struct SchemaValidationDetail {
    /// The JSON Schema `$id` or file path that was violated.
    pub schema_path: String,
    /// The JSON Pointer to the field that failed validation.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for SchemaValidationDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "schema={}, path={}: {}",
            self.schema_path, self.instance_path, self.message
        )
    }
}

/// Errors returned by schema validation operations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read or parsed.
    #[error("failed to load schema {path}: {reason}")]
    SchemaLoad {
        /// Path of the schema that failed to load.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The target document could not be loaded.
    #[error("failed to load document {path}: {reason}")]
    DocumentLoad {
        /// Path to the document that failed to load.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The schema could not be compiled into a validator.
    #[error("failed to compile schema {schema_id}: {reason}")]
    SchemaCompile {
        /// The schema `$id` or path.
        schema_id: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The document failed validation against its schema.
    #[error("{count} validation error(s) against {schema_id}")]
    ValidationFailed {
        /// The schema that was violated.
        schema_id: String,
        /// Number of violations found.
        count: usize,
        /// Individual violation details.
        details: Vec<SchemaValidationDetail>,
    },
}

// ---------------------------------------------------------------------------
// SchemaValidator
// ---------------------------------------------------------------------------

/// A compiled validator for one JSON Schema file.
pub struct SchemaValidator {
    schema_path: PathBuf,
    schema_id: String,
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_path", &self.schema_path)
            .field("schema_id", &self.schema_id)
            .finish()
    }
}

impl SchemaValidator {
    /// Load and compile a schema from a JSON file.
    ///
    /// The schema's identity for error reporting is its `$id` when present,
    /// the file path otherwise.
    pub fn from_file(schema_path: &Path) -> Result<Self, SchemaError> {
        let content =
            std::fs::read_to_string(schema_path).map_err(|e| SchemaError::SchemaLoad {
                path: schema_path.display().to_string(),
                reason: e.to_string(),
            })?;

        let schema: Value = serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
            path: schema_path.display().to_string(),
            reason: e.to_string(),
        })?;

        let schema_id = schema
            .get("$id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| schema_path.display().to_string());

        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(&schema)
            .map_err(|e| SchemaError::SchemaCompile {
                schema_id: schema_id.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            schema_path: schema_path.to_path_buf(),
            schema_id,
            validator,
        })
    }

    /// The schema identity used in error reports.
    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    /// The path the schema was loaded from.
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Validate a JSON value, returning every violation on failure.
    pub fn validate_value(&self, value: &Value) -> Result<(), SchemaError> {
        let details: Vec<SchemaValidationDetail> = self
            .validator
            .iter_errors(value)
            .map(|err| SchemaValidationDetail {
                schema_path: self.schema_id.clone(),
                instance_path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect();

        if details.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema_id: self.schema_id.clone(),
                count: details.len(),
                details,
            })
        }
    }

    /// Load a YAML document from disk and validate it.
    pub fn validate_yaml_file(&self, path: &Path) -> Result<(), SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let value: Value = serde_yaml::from_str(&content).map_err(|e| SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason: format!("YAML parse error: {e}"),
        })?;

        self.validate_value(&value)
    }
}
