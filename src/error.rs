// irix-assembler/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IrixError>;

#[derive(Error, Debug)]
pub enum IrixError {
    #[error("Invalid date-time value: {0}")]
    InvalidDateTime(String),

    #[error("Invalid numeric value: {0}")]
    InvalidNumber(String),

    #[error("Missing required field: {0}")]
    SchemaFieldMissing(String),

    #[error("Invalid enumeration value for {field}: {value}")]
    InvalidEnumValue { field: String, value: String },

    #[error("Invalid request format: {0}")]
    InvalidRequest(String),

    #[error("Schema validation failed: {0}")]
    SchemaValidationFailed(String),

    #[error("Schema load error: {0}")]
    SchemaLoad(String),

    #[error("XML serialization error: {0}")]
    XmlError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),
}

impl IrixError {
    /// Stable machine-readable tag, used in log fields and error responses.
    pub fn error_type(&self) -> &'static str {
        match self {
            IrixError::InvalidDateTime(_) => "invalid_date_time",
            IrixError::InvalidNumber(_) => "invalid_number",
            IrixError::SchemaFieldMissing(_) => "schema_field_missing",
            IrixError::InvalidEnumValue { .. } => "invalid_enum_value",
            IrixError::InvalidRequest(_) => "invalid_request",
            IrixError::SchemaValidationFailed(_) => "schema_validation_failed",
            IrixError::SchemaLoad(_) => "schema_load",
            IrixError::XmlError(_) => "xml_error",
            IrixError::SerializationError(_) => "serialization_error",
            IrixError::IoError(_) => "io_error",
            IrixError::Base64Error(_) => "base64_error",
        }
    }
}
