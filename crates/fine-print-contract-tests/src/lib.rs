#![warn(missing_docs)]
//! # fine-print-contract-tests
//!
//! Schema validation harness for the JSON documents exchanged with the
//! analysis service and the browser extension. Schemas and fixtures live in
//! the workspace `contracts/` directory.

use std::path::PathBuf;

use jsonschema::JSONSchema;
use serde_json::Value;

/// Absolute path of a file under `contracts/`.
pub fn contract_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../contracts")
        .join(relative)
}

/// Reads and decodes a JSON file under `contracts/`.
///
/// # Panics
/// Panics when the file is missing or not JSON; this crate only backs tests.
pub fn load_json(relative: &str) -> Value {
    let path = contract_path(relative);
    let raw = std::fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("{} should be readable: {error}", path.display()));
    serde_json::from_str(&raw)
        .unwrap_or_else(|error| panic!("{} should be valid json: {error}", path.display()))
}

/// Compiles the named schema under `contracts/`.
///
/// # Panics
/// Panics when the schema does not compile.
pub fn compile_validator(schema: &str) -> JSONSchema {
    let schema = load_json(schema);
    JSONSchema::compile(&schema).unwrap_or_else(|error| panic!("schema should compile: {error}"))
}

/// Collects validation messages for `instance`, empty when valid.
pub fn violations(validator: &JSONSchema, instance: &Value) -> Vec<String> {
    match validator.validate(instance) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.map(|error| error.to_string()).collect(),
    }
}
