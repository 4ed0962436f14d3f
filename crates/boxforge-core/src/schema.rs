//! JSON Schema validation for boxforge.yaml

use crate::error::{Error, Result};
use jsonschema::Validator;
use rust_embed::RustEmbed;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Schema files baked into the binary at build time
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../schemas/"]
struct EmbeddedSchemas;

const SCHEMA_FILE: &str = "boxforge.schema.json";

/// Compiled validator for the boxforge.yaml document format
#[derive(Debug)]
pub struct SchemaValidator {
    schema: Validator,
}

/// Global validator instance; the schema compiles once per process
static VALIDATOR: OnceLock<SchemaValidator> = OnceLock::new();

impl SchemaValidator {
    /// Get the global validator instance
    pub fn global() -> &'static SchemaValidator {
        VALIDATOR
            .get_or_init(|| SchemaValidator::new().expect("embedded schema failed to compile"))
    }

    /// Compile the embedded boxforge schema, falling back to a built-in
    /// minimal schema when the embed folder is empty
    pub fn new() -> Result<Self> {
        let schema_value = match EmbeddedSchemas::get(SCHEMA_FILE) {
            Some(content) => {
                debug!("Loading embedded schema: {}", SCHEMA_FILE);
                let json_str = std::str::from_utf8(&content.data).map_err(|_| {
                    Error::invalid_config(format!("Invalid UTF-8 in schema: {}", SCHEMA_FILE))
                })?;
                serde_json::from_str(json_str)?
            }
            None => {
                debug!("Embedded schema missing, using the built-in fallback");
                fallback_schema()
            }
        };

        let schema = jsonschema::validator_for(&schema_value)
            .map_err(|e| Error::invalid_config(format!("Failed to compile schema: {}", e)))?;

        Ok(Self { schema })
    }

    /// Validate a parsed JSON value against the boxforge schema
    pub fn validate(&self, value: &Value) -> Result<()> {
        let errors: Vec<String> = self
            .schema
            .iter_errors(value)
            .map(|e| {
                let path = e.instance_path().to_string();
                if path.is_empty() {
                    format!("  - {}", e)
                } else {
                    format!("  - {}: {}", path, e)
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::schema_validation(errors))
        }
    }

    /// Validate a YAML document
    pub fn validate_yaml(&self, yaml: &str) -> Result<()> {
        let value: Value = serde_yaml_ng::from_str(yaml)?;
        self.validate(&value)
    }
}

/// Minimal stand-in for the embedded schema. Keeps the required fields and
/// the checks that catch real mistakes, drops the finer string patterns.
fn fallback_schema() -> Value {
    serde_json::json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["version", "name"],
        "properties": {
            "version": { "type": "string" },
            "name": { "type": "string", "pattern": "^[a-z][a-z0-9-]*$" },
            "ubuntu": {
                "type": "object",
                "properties": {
                    "series": { "type": "string", "enum": ["noble", "jammy"] },
                    "version": { "type": "string" },
                    "iso_url": { "type": "string" },
                    "iso_checksum": { "type": "string" }
                }
            },
            "vm": {
                "type": "object",
                "properties": {
                    "cpus": { "type": "integer", "minimum": 1 },
                    "memory": { "type": "integer", "minimum": 512 },
                    "disk_size": { "type": "integer", "minimum": 8192 },
                    "hostname": { "type": "string" },
                    "boot_wait": { "type": "string" }
                }
            },
            "ssh": { "type": "object" },
            "provision": { "type": "object" },
            "output": { "type": "object" }
        }
    })
}
