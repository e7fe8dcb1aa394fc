// irix-assembler/src/report.rs
//
// Report skeleton builder. Required identification fields fail fast with
// SchemaFieldMissing; enumerated fields are matched case-sensitively. The
// report UUID and creation timestamp are generated here, never taken from
// the input.

use chrono::{SubsecRound, Utc};
use num_bigint::BigInt;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::coerce;
use crate::error::{IrixError, Result};
use crate::models::{
    Annexes, Confidentiality, Identification, Identifications, OrganisationContact, PersonContact,
    Report, ReportContext, ReportingBases, IRIX_NAMESPACE, REPORT_VERSION,
};

fn require_scalar(source: &Map<String, Value>, key: &str, path: &str) -> Result<String> {
    source
        .get(key)
        .and_then(coerce::scalar_string)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| IrixError::SchemaFieldMissing(path.to_string()))
}

/// Sequence numbers arrive as JSON numbers or, from legacy senders, as
/// quoted digit-strings. Anything else is a hard error.
fn optional_sequence_number(source: &Map<String, Value>) -> Result<Option<BigInt>> {
    match source.get("SequenceNumber") {
        None | Some(Value::Null) => Ok(None),
        Some(v @ Value::Number(_)) => coerce::parse_integer(v).map(Some),
        Some(Value::String(s)) => s
            .parse::<BigInt>()
            .map(Some)
            .map_err(|_| IrixError::InvalidNumber(s.clone())),
        Some(other) => Err(IrixError::InvalidNumber(
            coerce::json_type_name(other).to_string(),
        )),
    }
}

/// Build the top-level report from the `Identification` object of the
/// request: version, identification block and an empty annex container.
pub fn build_skeleton(identification: &Map<String, Value>) -> Result<Report> {
    let organisation_reporting = require_scalar(
        identification,
        "OrganisationReporting",
        "Identification.OrganisationReporting",
    )?;
    let report_context = ReportContext::parse(&require_scalar(
        identification,
        "ReportContext",
        "Identification.ReportContext",
    )?)?;
    let user = require_scalar(identification, "User", "Identification.User")?;

    let contact = identification
        .get("OrganisationContact")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            IrixError::SchemaFieldMissing("Identification.OrganisationContact".to_string())
        })?;
    let organisation_contact = OrganisationContact {
        name: require_scalar(contact, "Name", "Identification.OrganisationContact.Name")?,
        organisation_id: require_scalar(
            contact,
            "OrganisationID",
            "Identification.OrganisationContact.OrganisationID",
        )?,
        country: require_scalar(
            contact,
            "Country",
            "Identification.OrganisationContact.Country",
        )?,
    };

    let confidentiality = match identification.get("Confidentiality") {
        None | Some(Value::Null) => None,
        Some(v) => {
            let raw = coerce::scalar_string(v).ok_or_else(|| IrixError::InvalidEnumValue {
                field: "Confidentiality".to_string(),
                value: coerce::json_type_name(v).to_string(),
            })?;
            Some(Confidentiality::parse(&raw)?)
        }
    };

    let reporting_bases = identification
        .get("ReportingBases")
        .map(coerce::as_string_list)
        .filter(|bases| !bases.is_empty())
        .map(|reporting_basis| ReportingBases { reporting_basis });

    Ok(Report {
        version: REPORT_VERSION.to_string(),
        xmlns: IRIX_NAMESPACE.to_string(),
        identification: Identification {
            organisation_reporting,
            date_and_time_of_creation: Utc::now().trunc_subsecs(0),
            report_uuid: Uuid::new_v4().to_string(),
            sequence_number: optional_sequence_number(identification)?,
            confidentiality,
            reporting_bases,
            report_context,
            identifications: Identifications {
                organisation_contact,
                person_contact: PersonContact { name: user },
            },
        },
        annexes: Annexes::default(),
    })
}
