// irix-assembler/src/meta/rei.rs

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::Serialize;
use serde_json::Value;

use super::registry::{FieldDescriptor, Setter};
use crate::coerce;
use crate::models::opt_bigint_decimal;

/// REI reporting metadata. Year and Revision are unbounded integers.
/// NuclearInstallation, Origin, ReiLegalBase and MSt are list-handled only;
/// the upstream scalar paths for them were dropped deliberately.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Rei {
    #[serde(
        rename = "Revision",
        skip_serializing_if = "Option::is_none",
        serialize_with = "opt_bigint_decimal"
    )]
    pub revision: Option<BigInt>,
    #[serde(
        rename = "Year",
        skip_serializing_if = "Option::is_none",
        serialize_with = "opt_bigint_decimal"
    )]
    pub year: Option<BigInt>,
    #[serde(rename = "Period", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(rename = "Signed", skip_serializing_if = "Option::is_none")]
    pub signed: Option<bool>,
    #[serde(rename = "SigningDate", skip_serializing_if = "Option::is_none")]
    pub signing_date: Option<DateTime<Utc>>,
    #[serde(rename = "SigningComment", skip_serializing_if = "Option::is_none")]
    pub signing_comment: Option<String>,
    #[serde(rename = "Authority", skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(rename = "PDFVersion", skip_serializing_if = "Option::is_none")]
    pub pdf_version: Option<String>,
    #[serde(rename = "ReiLegalBase", skip_serializing_if = "Vec::is_empty")]
    pub rei_legal_base: Vec<String>,
    #[serde(rename = "Origin", skip_serializing_if = "Vec::is_empty")]
    pub origin: Vec<String>,
    #[serde(rename = "NuclearInstallation", skip_serializing_if = "Vec::is_empty")]
    pub nuclear_installation: Vec<String>,
    #[serde(rename = "MSt", skip_serializing_if = "Vec::is_empty")]
    pub mst: Vec<MSt>,
}

/// Measuring station record. MStID is required; a missing MStName stays null.
#[derive(Debug, Clone, Serialize)]
pub struct MSt {
    #[serde(rename = "MStID")]
    pub mst_id: String,
    #[serde(rename = "MStName", skip_serializing_if = "Option::is_none")]
    pub mst_name: Option<String>,
}

fn set_mst(target: &mut Rei, raw: &Value) -> Result<(), String> {
    let entries: Vec<&Value> = match raw {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let obj = entry
            .as_object()
            .ok_or_else(|| format!("MSt entry is not an object: {}", coerce::json_type_name(entry)))?;
        let mst_id = obj
            .get("MStID")
            .and_then(coerce::scalar_string)
            .ok_or_else(|| "MSt entry missing MStID".to_string())?;
        let mst_name = obj.get("MStName").and_then(coerce::scalar_string);
        records.push(MSt { mst_id, mst_name });
    }

    target.mst = records;
    Ok(())
}

pub const REI_FIELDS: &[FieldDescriptor<Rei>] = &[
    FieldDescriptor::new("Revision", Setter::Integer(|r, v| r.revision = Some(v))),
    FieldDescriptor::new("Year", Setter::Integer(|r, v| r.year = Some(v))),
    FieldDescriptor::new("Period", Setter::Text(|r, v| r.period = Some(v))),
    FieldDescriptor::new("Signed", Setter::Boolean(|r, v| r.signed = Some(v))),
    FieldDescriptor::new(
        "SigningDate",
        Setter::DateTime(|r, v| r.signing_date = Some(v)),
    ),
    FieldDescriptor::new(
        "SigningComment",
        Setter::Text(|r, v| r.signing_comment = Some(v)),
    ),
    FieldDescriptor::new("Authority", Setter::Text(|r, v| r.authority = Some(v))),
    FieldDescriptor::new("PDFVersion", Setter::Text(|r, v| r.pdf_version = Some(v))),
    FieldDescriptor::with_aliases(
        "ReiLegalBase",
        &["ReiLegalBases"],
        Setter::TextList(|r, v| r.rei_legal_base = v),
    ),
    FieldDescriptor::with_aliases(
        "Origin",
        &["Origins"],
        Setter::TextList(|r, v| r.origin = v),
    ),
    FieldDescriptor::with_aliases(
        "NuclearInstallation",
        &["NuclearInstallations"],
        Setter::TextList(|r, v| r.nuclear_installation = v),
    ),
    FieldDescriptor::new("MSt", Setter::Custom(set_mst)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::registry::{bind, BindOverrides};
    use serde_json::json;

    #[test]
    fn integers_bind_with_arbitrary_precision() {
        let src = json!({"Year": 2023, "Revision": 18446744073709551615u64});
        let mut rei = Rei::default();
        let report = bind(
            "REI",
            REI_FIELDS,
            src.as_object().unwrap(),
            &mut rei,
            &BindOverrides::default(),
        )
        .unwrap();
        assert!(report.is_clean());
        assert_eq!(rei.year, Some(BigInt::from(2023)));
        assert_eq!(
            rei.revision,
            Some("18446744073709551615".parse::<BigInt>().unwrap())
        );
    }

    #[test]
    fn mst_records_require_mst_id() {
        let src = json!({"MSt": [{"MStID": "DE123"}, {"MStName": "nameless"}]});
        let mut rei = Rei::default();
        let report = bind(
            "REI",
            REI_FIELDS,
            src.as_object().unwrap(),
            &mut rei,
            &BindOverrides::default(),
        )
        .unwrap();
        // Whole field fails non-fatally, nothing partially applied.
        assert!(rei.mst.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].field, "MSt");
    }

    #[test]
    fn mst_records_bind_with_optional_name() {
        let src = json!({"MSt": [{"MStID": "DE123", "MStName": "Station A"}, {"MStID": "DE456"}]});
        let mut rei = Rei::default();
        bind(
            "REI",
            REI_FIELDS,
            src.as_object().unwrap(),
            &mut rei,
            &BindOverrides::default(),
        )
        .unwrap();
        assert_eq!(rei.mst.len(), 2);
        assert_eq!(rei.mst[0].mst_name.as_deref(), Some("Station A"));
        assert!(rei.mst[1].mst_name.is_none());
    }

    #[test]
    fn list_fields_accept_singular_and_plural_keys() {
        let src = json!({"Origins": ["A", "B"], "NuclearInstallation": "KKW"});
        let mut rei = Rei::default();
        bind(
            "REI",
            REI_FIELDS,
            src.as_object().unwrap(),
            &mut rei,
            &BindOverrides::default(),
        )
        .unwrap();
        assert_eq!(rei.origin, vec!["A", "B"]);
        assert_eq!(rei.nuclear_installation, vec!["KKW"]);
    }

    #[test]
    fn signing_date_failure_aborts_rei_binding() {
        let src = json!({"SigningDate": "not-a-date", "Year": 2023});
        let mut rei = Rei::default();
        assert!(bind(
            "REI",
            REI_FIELDS,
            src.as_object().unwrap(),
            &mut rei,
            &BindOverrides::default(),
        )
        .is_err());
    }
}
