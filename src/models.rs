// irix-assembler/src/models.rs

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{IrixError, Result};
use crate::meta::dokpool::DokpoolMeta;

pub const REPORT_VERSION: &str = "1.0";
pub const IRIX_NAMESPACE: &str = "http://www.iaea.org/2012/IRIX/Format";
pub const DOKPOOL_NAMESPACE: &str = "http://www.bfs.de/2019/Dokpool";

/// Top-level IRIX report. Built once per request, mutated by the skeleton
/// builder and the annex assemblers, serialized and dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "Report")]
pub struct Report {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    #[serde(rename = "Identification")]
    pub identification: Identification,
    #[serde(rename = "Annexes")]
    pub annexes: Annexes,
}

#[derive(Debug, Clone, Serialize)]
pub struct Identification {
    #[serde(rename = "OrganisationReporting")]
    pub organisation_reporting: String,
    #[serde(rename = "DateAndTimeOfCreation")]
    pub date_and_time_of_creation: DateTime<Utc>,
    #[serde(rename = "ReportUUID")]
    pub report_uuid: String,
    #[serde(
        rename = "SequenceNumber",
        skip_serializing_if = "Option::is_none",
        serialize_with = "opt_bigint_decimal"
    )]
    pub sequence_number: Option<BigInt>,
    #[serde(rename = "Confidentiality", skip_serializing_if = "Option::is_none")]
    pub confidentiality: Option<Confidentiality>,
    #[serde(rename = "ReportingBases", skip_serializing_if = "Option::is_none")]
    pub reporting_bases: Option<ReportingBases>,
    #[serde(rename = "ReportContext")]
    pub report_context: ReportContext,
    #[serde(rename = "Identifications")]
    pub identifications: Identifications,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportingBases {
    #[serde(rename = "ReportingBasis")]
    pub reporting_basis: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Identifications {
    #[serde(rename = "OrganisationContactInfo")]
    pub organisation_contact: OrganisationContact,
    #[serde(rename = "PersonContactInfo")]
    pub person_contact: PersonContact,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganisationContact {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "OrganisationID")]
    pub organisation_id: String,
    #[serde(rename = "Country")]
    pub country: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonContact {
    #[serde(rename = "Name")]
    pub name: String,
}

/// Annex container. Insertion order of both lists is preserved and is
/// significant for downstream consumers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Annexes {
    #[serde(rename = "Annotation")]
    pub annotations: Vec<Annotation>,
    #[serde(rename = "FileEnclosure")]
    pub file_enclosures: Vec<FileEnclosure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "DokpoolMeta", skip_serializing_if = "Option::is_none")]
    pub dokpool_meta: Option<DokpoolMeta>,
}

/// Immutable once attached.
#[derive(Debug, Clone, Serialize)]
pub struct FileEnclosure {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "MimeType")]
    pub mime_type: String,
    #[serde(rename = "FileSize")]
    pub file_size: u64,
    #[serde(rename = "FileHash")]
    pub file_hash: FileHash,
    #[serde(rename = "FileName")]
    pub file_name: String,
    #[serde(rename = "EnclosedObject")]
    pub enclosed_object: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileHash {
    #[serde(rename = "@algorithm")]
    pub algorithm: String,
    #[serde(rename = "$text")]
    pub digest: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportContext {
    Emergency,
    Exercise,
    Drill,
    Test,
    Routine,
}

impl ReportContext {
    /// Case-sensitive match against the schema enumeration.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "Emergency" => Ok(ReportContext::Emergency),
            "Exercise" => Ok(ReportContext::Exercise),
            "Drill" => Ok(ReportContext::Drill),
            "Test" => Ok(ReportContext::Test),
            "Routine" => Ok(ReportContext::Routine),
            other => Err(IrixError::InvalidEnumValue {
                field: "ReportContext".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidentiality {
    #[serde(rename = "Free for Public Use")]
    FreeForPublicUse,
    #[serde(rename = "For Authority Use Only")]
    ForAuthorityUseOnly,
    #[serde(rename = "Restricted Distribution")]
    RestrictedDistribution,
}

impl Confidentiality {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "Free for Public Use" => Ok(Confidentiality::FreeForPublicUse),
            "For Authority Use Only" => Ok(Confidentiality::ForAuthorityUseOnly),
            "Restricted Distribution" => Ok(Confidentiality::RestrictedDistribution),
            other => Err(IrixError::InvalidEnumValue {
                field: "Confidentiality".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Inbound upload request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    #[serde(rename = "request-type")]
    pub request_type: String,
    pub irix: Value,
    #[serde(default)]
    pub attachments: Vec<AttachmentInput>,
}

/// One attachment record standing in for the print/image fetch collaborators.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentInput {
    pub title: String,
    pub mime_type: String,
    pub file_name: String,
    pub content_base64: String,
}

/// Identity supplied by the authenticating front end. Only `uid` is consumed
/// by the binder (DokpoolDocumentOwner override); the rest pass through.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserIdentity {
    pub uid: Option<String>,
    pub displayname: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// BigInt fields serialize as plain decimal text, for both the XML output
/// and the JSON projection the schema gate sees.
pub fn opt_bigint_decimal<S: Serializer>(
    v: &Option<BigInt>,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    match v {
        Some(n) => s.collect_str(n),
        None => s.serialize_none(),
    }
}
