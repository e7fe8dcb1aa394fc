// irix-assembler/src/config.rs

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub schemas: SchemaConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    /// JSON Schema files the validator gate compiles at startup. Empty list
    /// disables the gate.
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default values
            .set_default("service.name", "irix-assembler")?
            .set_default("service.log_level", "info")?
            .set_default("schemas.paths", vec!["schemas/irix-report.schema.json"])?
            .set_default("output.dir", "out")?
            // Load from config file if it exists
            .add_source(File::with_name("config").required(false))
            // Override with environment variables (e.g., SERVICE__NAME)
            .add_source(Environment::with_prefix("SERVICE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
