// irix-assembler/src/meta/doksys.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::registry::{FieldDescriptor, Setter};

/// DOKSYS measurement metadata. Scalars arrive as string or array; for the
/// list-valued fields every supplied value is kept, for the string-valued
/// ones the last wins (registry policy).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Doksys {
    #[serde(rename = "Purpose", skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(rename = "NetworkOperator", skip_serializing_if = "Vec::is_empty")]
    pub network_operator: Vec<String>,
    #[serde(rename = "SampleType", skip_serializing_if = "Vec::is_empty")]
    pub sample_type: Vec<String>,
    #[serde(rename = "MeasurementCategory", skip_serializing_if = "Vec::is_empty")]
    pub measurement_category: Vec<String>,
    #[serde(rename = "Dom", skip_serializing_if = "Vec::is_empty")]
    pub dom: Vec<String>,
    #[serde(rename = "DataSource", skip_serializing_if = "Vec::is_empty")]
    pub data_source: Vec<String>,
    #[serde(rename = "LegalBase", skip_serializing_if = "Vec::is_empty")]
    pub legal_base: Vec<String>,
    #[serde(rename = "MeasuringProgram", skip_serializing_if = "Vec::is_empty")]
    pub measuring_program: Vec<String>,
    #[serde(rename = "Duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "OperationMode", skip_serializing_if = "Option::is_none")]
    pub operation_mode: Option<String>,
    #[serde(rename = "TrajectoryStartLocation", skip_serializing_if = "Option::is_none")]
    pub trajectory_start_location: Option<String>,
    #[serde(rename = "TrajectoryEndLocation", skip_serializing_if = "Option::is_none")]
    pub trajectory_end_location: Option<String>,
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "SamplingBegin", skip_serializing_if = "Option::is_none")]
    pub sampling_begin: Option<DateTime<Utc>>,
    #[serde(rename = "SamplingEnd", skip_serializing_if = "Option::is_none")]
    pub sampling_end: Option<DateTime<Utc>>,
    #[serde(rename = "TrajectoryStartTime", skip_serializing_if = "Option::is_none")]
    pub trajectory_start_time: Option<DateTime<Utc>>,
    #[serde(rename = "TrajectoryEndTime", skip_serializing_if = "Option::is_none")]
    pub trajectory_end_time: Option<DateTime<Utc>>,
}

pub const DOKSYS_FIELDS: &[FieldDescriptor<Doksys>] = &[
    FieldDescriptor::new("Purpose", Setter::Text(|d, v| d.purpose = Some(v))),
    FieldDescriptor::new(
        "NetworkOperator",
        Setter::TextList(|d, v| d.network_operator = v),
    ),
    FieldDescriptor::new("SampleType", Setter::TextList(|d, v| d.sample_type = v)),
    FieldDescriptor::new(
        "MeasurementCategory",
        Setter::TextList(|d, v| d.measurement_category = v),
    ),
    FieldDescriptor::new("Dom", Setter::TextList(|d, v| d.dom = v)),
    FieldDescriptor::new("DataSource", Setter::TextList(|d, v| d.data_source = v)),
    FieldDescriptor::new("LegalBase", Setter::TextList(|d, v| d.legal_base = v)),
    FieldDescriptor::new(
        "MeasuringProgram",
        Setter::TextList(|d, v| d.measuring_program = v),
    ),
    FieldDescriptor::new("Duration", Setter::Text(|d, v| d.duration = Some(v))),
    FieldDescriptor::new("OperationMode", Setter::Text(|d, v| d.operation_mode = Some(v))),
    FieldDescriptor::new(
        "TrajectoryStartLocation",
        Setter::Text(|d, v| d.trajectory_start_location = Some(v)),
    ),
    FieldDescriptor::new(
        "TrajectoryEndLocation",
        Setter::Text(|d, v| d.trajectory_end_location = Some(v)),
    ),
    FieldDescriptor::new("Status", Setter::Text(|d, v| d.status = Some(v))),
    FieldDescriptor::new(
        "SamplingBegin",
        Setter::DateTime(|d, v| d.sampling_begin = Some(v)),
    ),
    FieldDescriptor::new(
        "SamplingEnd",
        Setter::DateTime(|d, v| d.sampling_end = Some(v)),
    ),
    FieldDescriptor::new(
        "TrajectoryStartTime",
        Setter::DateTime(|d, v| d.trajectory_start_time = Some(v)),
    ),
    FieldDescriptor::new(
        "TrajectoryEndTime",
        Setter::DateTime(|d, v| d.trajectory_end_time = Some(v)),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::registry::{bind, BindOverrides};
    use serde_json::json;

    #[test]
    fn minimal_input_leaves_unset_fields_absent() {
        let src = json!({"SampleType": "L5", "Dom": ["Trinkwasser"]});
        let mut doksys = Doksys::default();
        let report = bind(
            "DOKSYS",
            DOKSYS_FIELDS,
            src.as_object().unwrap(),
            &mut doksys,
            &BindOverrides::default(),
        )
        .unwrap();

        assert!(report.is_clean());
        assert_eq!(doksys.sample_type, vec!["L5"]);
        assert_eq!(doksys.dom, vec!["Trinkwasser"]);
        assert!(doksys.purpose.is_none());
        assert!(doksys.sampling_begin.is_none());
        assert!(doksys.network_operator.is_empty());
    }

    #[test]
    fn malformed_sampling_begin_is_fatal() {
        let src = json!({"SamplingBegin": "2015-15-28T15:35:54.168+02:00"});
        let mut doksys = Doksys::default();
        let err = bind(
            "DOKSYS",
            DOKSYS_FIELDS,
            src.as_object().unwrap(),
            &mut doksys,
            &BindOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::IrixError::InvalidDateTime(_)));
    }
}
