// irix-assembler/src/meta/rodos.rs
//
// RODOS has no field registry: every key of the JSON object is bound through
// a string setter looked up by exact name. Keys without a setter are recorded
// as per-field failures; the pass never aborts.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::registry::BindingReport;
use crate::coerce;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Rodos {
    #[serde(rename = "ProjectName", skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(rename = "ProjectComment", skip_serializing_if = "Option::is_none")]
    pub project_comment: Option<String>,
    #[serde(rename = "Site", skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(rename = "SourceTermName", skip_serializing_if = "Option::is_none")]
    pub source_term_name: Option<String>,
    #[serde(rename = "SourceTermComment", skip_serializing_if = "Option::is_none")]
    pub source_term_comment: Option<String>,
    #[serde(rename = "Prognosis", skip_serializing_if = "Option::is_none")]
    pub prognosis: Option<String>,
    #[serde(rename = "Model", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "CalculationDate", skip_serializing_if = "Option::is_none")]
    pub calculation_date: Option<String>,
    #[serde(rename = "CalculationUser", skip_serializing_if = "Option::is_none")]
    pub calculation_user: Option<String>,
    #[serde(rename = "ReportId", skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
}

fn setter_for(key: &str) -> Option<fn(&mut Rodos, String)> {
    match key {
        "ProjectName" => Some(|r, v| r.project_name = Some(v)),
        "ProjectComment" => Some(|r, v| r.project_comment = Some(v)),
        "Site" => Some(|r, v| r.site = Some(v)),
        "SourceTermName" => Some(|r, v| r.source_term_name = Some(v)),
        "SourceTermComment" => Some(|r, v| r.source_term_comment = Some(v)),
        "Prognosis" => Some(|r, v| r.prognosis = Some(v)),
        "Model" => Some(|r, v| r.model = Some(v)),
        "CalculationDate" => Some(|r, v| r.calculation_date = Some(v)),
        "CalculationUser" => Some(|r, v| r.calculation_user = Some(v)),
        "ReportId" => Some(|r, v| r.report_id = Some(v)),
        _ => None,
    }
}

/// Bind every key of `source` onto the RODOS tree by exact name.
pub fn bind_rodos(source: &Map<String, Value>, target: &mut Rodos) -> BindingReport {
    let mut report = BindingReport::default();

    for (key, raw) in source {
        let Some(set) = setter_for(key) else {
            warn!(extension = "RODOS", field = %key, "No matching RODOS accessor");
            report.record_failure(key, "no matching RODOS accessor");
            continue;
        };
        match coerce::as_string_list(raw).pop() {
            Some(value) => {
                set(target, value);
                report.bound += 1;
            }
            None => report.record_failure(key, "no scalar value"),
        }
    }

    report
}
