// irix-assembler/src/meta/elan.rs

use serde::Serialize;

use super::registry::{FieldDescriptor, Setter};

/// ELAN scenario assignment. "Scenarios" is the legacy spelling and still
/// binds, with a deprecation warning.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Elan {
    #[serde(rename = "Scenario", skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<String>,
}

pub const ELAN_FIELDS: &[FieldDescriptor<Elan>] = &[FieldDescriptor::with_deprecated(
    "Scenario",
    &["Scenarios"],
    Setter::TextList(|e, v| e.scenarios = v),
)];
