// irix-assembler/src/validate.rs
//
// Schema validator gate. The assembled typed tree is projected to JSON and
// checked against every supplied schema before any XML bytes are produced;
// the first violation aborts the whole assembly. With no schemas the gate
// is a no-op.

use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use serde_json::Value;
use tracing::info;

use crate::error::{IrixError, Result};

pub struct SchemaGate {
    schemas: Vec<(String, JSONSchema)>,
}

impl SchemaGate {
    pub fn empty() -> Self {
        Self { schemas: Vec::new() }
    }

    /// Compile schemas from files. Compiled schemas are immutable and may be
    /// shared across concurrent validations.
    pub fn from_files(paths: &[PathBuf]) -> Result<Self> {
        let mut schemas = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = std::fs::read_to_string(path)?;
            let value: Value = serde_json::from_str(&raw)
                .map_err(|e| IrixError::SchemaLoad(format!("{}: {e}", path.display())))?;
            schemas.push((display_name(path), compile(&value, &display_name(path))?));
        }
        info!(schemas = schemas.len(), "Schema gate initialised");
        Ok(Self { schemas })
    }

    pub fn from_values(values: &[Value]) -> Result<Self> {
        let mut schemas = Vec::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            let name = format!("schema[{i}]");
            schemas.push((name.clone(), compile(value, &name)?));
        }
        Ok(Self { schemas })
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// All-or-nothing: the first violation of any schema fails the whole
    /// operation, carrying the validator's diagnostic unmodified.
    pub fn validate(&self, document: &Value) -> Result<()> {
        for (name, schema) in &self.schemas {
            if let Err(mut errors) = schema.validate(document) {
                if let Some(first) = errors.next() {
                    return Err(IrixError::SchemaValidationFailed(format!(
                        "{name}: {first} (at {})",
                        first.instance_path
                    )));
                }
            }
        }
        Ok(())
    }
}

fn compile(value: &Value, name: &str) -> Result<JSONSchema> {
    JSONSchema::compile(value).map_err(|e| IrixError::SchemaLoad(format!("{name}: {e}")))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
