// irix-assembler/src/meta/dokpool.rs

use serde::Serialize;

use super::doksys::Doksys;
use super::elan::Elan;
use super::registry::{FieldDescriptor, Setter};
use super::rei::Rei;
use super::rodos::Rodos;

/// Vendor extension block embedded as an annotation in the report annexes.
/// The content type is kept as a plain string; its enumeration is enforced
/// by the schema gate, not the model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DokpoolMeta {
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    pub xmlns: Option<String>,
    #[serde(rename = "DokpoolContentType", skip_serializing_if = "Option::is_none")]
    pub dokpool_content_type: Option<String>,
    #[serde(rename = "DokpoolName", skip_serializing_if = "Option::is_none")]
    pub dokpool_name: Option<String>,
    #[serde(rename = "DokpoolGroupFolder", skip_serializing_if = "Option::is_none")]
    pub dokpool_group_folder: Option<String>,
    #[serde(rename = "DokpoolPrivateFolder", skip_serializing_if = "Option::is_none")]
    pub dokpool_private_folder: Option<String>,
    #[serde(rename = "DokpoolTransferFolder", skip_serializing_if = "Option::is_none")]
    pub dokpool_transfer_folder: Option<String>,
    #[serde(rename = "DokpoolDocumentOwner", skip_serializing_if = "Option::is_none")]
    pub dokpool_document_owner: Option<String>,
    #[serde(rename = "Subject", skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,
    #[serde(rename = "IsElan")]
    pub is_elan: bool,
    #[serde(rename = "IsDoksys")]
    pub is_doksys: bool,
    #[serde(rename = "IsRodos")]
    pub is_rodos: bool,
    #[serde(rename = "IsRei")]
    pub is_rei: bool,
    #[serde(rename = "DOKSYS", skip_serializing_if = "Option::is_none")]
    pub doksys: Option<Doksys>,
    #[serde(rename = "ELAN", skip_serializing_if = "Option::is_none")]
    pub elan: Option<Elan>,
    #[serde(rename = "RODOS", skip_serializing_if = "Option::is_none")]
    pub rodos: Option<Rodos>,
    #[serde(rename = "REI", skip_serializing_if = "Option::is_none")]
    pub rei: Option<Rei>,
}

impl DokpoolMeta {
    /// Derived from the Is* flags; callers use it to decide whether any
    /// extension processing is still pending.
    pub fn has_extension(&self) -> bool {
        self.is_elan || self.is_doksys || self.is_rodos || self.is_rei
    }
}

/// Scalar fields of the DokpoolMeta block itself. Sub-extension trees are
/// dispatched separately.
pub const DOKPOOL_FIELDS: &[FieldDescriptor<DokpoolMeta>] = &[
    FieldDescriptor::new(
        "DokpoolContentType",
        Setter::Text(|m, v| m.dokpool_content_type = Some(v)),
    ),
    FieldDescriptor::new("DokpoolName", Setter::Text(|m, v| m.dokpool_name = Some(v))),
    FieldDescriptor::new(
        "DokpoolGroupFolder",
        Setter::Text(|m, v| m.dokpool_group_folder = Some(v)),
    ),
    FieldDescriptor::new(
        "DokpoolPrivateFolder",
        Setter::Text(|m, v| m.dokpool_private_folder = Some(v)),
    ),
    FieldDescriptor::new(
        "DokpoolTransferFolder",
        Setter::Text(|m, v| m.dokpool_transfer_folder = Some(v)),
    ),
    FieldDescriptor::new(
        "DokpoolDocumentOwner",
        Setter::Text(|m, v| m.dokpool_document_owner = Some(v)),
    ),
    FieldDescriptor::with_aliases(
        "Subjects",
        &["Subject"],
        Setter::TextList(|m, v| m.subjects = v),
    ),
    FieldDescriptor::new("IsElan", Setter::Boolean(|m, v| m.is_elan = v)),
    FieldDescriptor::new("IsDoksys", Setter::Boolean(|m, v| m.is_doksys = v)),
    FieldDescriptor::new("IsRodos", Setter::Boolean(|m, v| m.is_rodos = v)),
    FieldDescriptor::new("IsRei", Setter::Boolean(|m, v| m.is_rei = v)),
];
