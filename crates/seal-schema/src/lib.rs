//! # seal-schema — Manifest Schema Validation
//!
//! Validates YAML manifest documents against a JSON Schema (Draft 2020-12)
//! definition. The validator is a pass/fail oracle with a message list:
//! provenance operations consume its verdict, never its internals.
//!
//! ## Design
//!
//! [`SchemaValidator`] compiles one schema file at construction time and
//! reports every violation of a document in a single pass — structured as
//! the schema identity, the JSON Pointer to the violating field, and a
//! human-readable message. Structural validation runs before any provenance
//! operation touches a manifest.

pub mod validate;

pub use validate::{SchemaError, SchemaValidationDetail, SchemaValidator};
