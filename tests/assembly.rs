// End-to-end assembly coverage against the shipped report schema.

use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};

use irix_assembler::annex::sha1_digest;
use irix_assembler::models::{AttachmentInput, UploadRequest};
use irix_assembler::validate::SchemaGate;
use irix_assembler::{IrixError, ReportPipeline};

fn report_schema() -> Value {
    serde_json::from_str(include_str!("../schemas/irix-report.schema.json")).unwrap()
}

fn gated_pipeline() -> ReportPipeline {
    let schema = report_schema();
    ReportPipeline::new(SchemaGate::from_values(std::slice::from_ref(&schema)).unwrap())
}

fn full_irix() -> Value {
    json!({
        "Identification": {
            "OrganisationReporting": "irix-test.bund.de",
            "ReportContext": "Exercise",
            "SequenceNumber": 42,
            "Confidentiality": "For Authority Use Only",
            "ReportingBases": ["EU Council Decision 87/600/EURATOM"],
            "User": "testuser",
            "OrganisationContact": {
                "Name": "Bundesamt fuer Strahlenschutz",
                "OrganisationID": "irix-test.bund.de",
                "Country": "DE"
            }
        },
        "Title": "Event information exercise",
        "Text": "Generated during exercise",
        "DokpoolMeta": {
            "DokpoolContentType": "eventinformation",
            "DokpoolName": "exercise-doc-1",
            "DokpoolGroupFolder": "/groups/exercise",
            "Subjects": ["abc", "def"],
            "IsElan": "true",
            "IsDoksys": true,
            "IsRodos": true,
            "IsRei": true,
            "ELAN": {"Scenario": ["scenario-x", "scenario-y"]},
            "DOKSYS": {
                "Purpose": "Standard-Info",
                "SampleType": "L5",
                "Dom": ["Trinkwasser", "Boden"],
                "SamplingBegin": "2015-05-28T15:35:54.168+02:00",
                "SamplingEnd": "2015-05-28T17:35:54+02:00"
            },
            "RODOS": {"ProjectName": "exercise-run", "Prognosis": "yes"},
            "Rei": {
                "Year": 2023,
                "Revision": 4,
                "Signed": "true",
                "SigningDate": "2023-03-01T09:00:00+01:00",
                "ReiLegalBases": ["REI-E"],
                "NuclearInstallation": "KKW Test",
                "MSt": [{"MStID": "DE123", "MStName": "Station A"}, {"MStID": "DE456"}]
            }
        }
    })
}

fn request(irix: Value, attachments: Vec<AttachmentInput>) -> UploadRequest {
    UploadRequest {
        request_type: "upload".to_string(),
        irix,
        attachments,
    }
}

fn attachment(title: &str, bytes: &[u8], file_name: &str) -> AttachmentInput {
    AttachmentInput {
        title: title.to_string(),
        mime_type: "application/pdf".to_string(),
        file_name: file_name.to_string(),
        content_base64: general_purpose::STANDARD.encode(bytes),
    }
}

#[test]
fn full_request_assembles_and_passes_the_schema_gate() {
    let assembled = gated_pipeline()
        .process(&request(full_irix(), vec![]), None)
        .unwrap();

    let meta = assembled.report.annexes.annotations[0]
        .dokpool_meta
        .as_ref()
        .unwrap();
    assert!(meta.has_extension());

    // ELAN: scalar-or-array inputs end up array-coerced.
    assert_eq!(
        meta.elan.as_ref().unwrap().scenarios,
        vec!["scenario-x", "scenario-y"]
    );

    // REI integers equal the input verbatim; alias keys bound.
    let rei = meta.rei.as_ref().unwrap();
    assert_eq!(rei.year.as_ref().unwrap().to_string(), "2023");
    assert_eq!(rei.revision.as_ref().unwrap().to_string(), "4");
    assert_eq!(rei.rei_legal_base, vec!["REI-E"]);
    assert_eq!(rei.mst.len(), 2);

    // DOKSYS dates normalized to UTC seconds precision.
    let doksys = meta.doksys.as_ref().unwrap();
    assert_eq!(
        doksys.sampling_begin.unwrap().to_rfc3339(),
        "2015-05-28T13:35:54+00:00"
    );
    assert_eq!(doksys.dom, vec!["Trinkwasser", "Boden"]);

    assert!(assembled.xml.contains("<Scenario>scenario-x</Scenario>"));
    assert!(assembled.xml.contains("<Year>2023</Year>"));
}

#[test]
fn rodos_unknown_keys_surface_as_binding_failures_not_errors() {
    let mut irix = full_irix();
    irix["DokpoolMeta"]["RODOS"]
        .as_object_mut()
        .unwrap()
        .insert("UnknownField".to_string(), json!("x"));

    let assembled = gated_pipeline()
        .process(&request(irix, vec![]), None)
        .unwrap();
    assert!(assembled
        .binding
        .failures
        .iter()
        .any(|f| f.field == "UnknownField"));
}

#[test]
fn attachments_keep_order_and_independent_sha1() {
    let contents: [&[u8]; 3] = [b"alpha", b"beta", b"gamma"];
    let attachments = contents
        .iter()
        .enumerate()
        .map(|(i, bytes)| attachment(&format!("doc {i}"), bytes, &format!("{i}.pdf")))
        .collect();

    let assembled = gated_pipeline()
        .process(&request(full_irix(), attachments), None)
        .unwrap();

    let enclosures = &assembled.report.annexes.file_enclosures;
    assert_eq!(enclosures.len(), 3);
    for (i, bytes) in contents.iter().enumerate() {
        assert_eq!(enclosures[i].title, format!("doc {i}"));
        assert_eq!(enclosures[i].file_size, bytes.len() as u64);
        assert_eq!(enclosures[i].file_hash.digest, sha1_digest(bytes));
        assert_eq!(
            enclosures[i].enclosed_object,
            general_purpose::STANDARD.encode(bytes)
        );
    }
}

#[test]
fn out_of_range_content_type_fails_only_when_gated() {
    let mut irix = full_irix();
    irix["DokpoolMeta"]["DokpoolContentType"] = json!("not-a-content-type");

    let err = gated_pipeline()
        .process(&request(irix.clone(), vec![]), None)
        .unwrap_err();
    assert!(matches!(err, IrixError::SchemaValidationFailed(_)));
    assert!(err.to_string().contains("DokpoolContentType") || err.to_string().contains("enum"));

    // Without a schema the value passes through verbatim.
    let assembled = ReportPipeline::new(SchemaGate::empty())
        .process(&request(irix, vec![]), None)
        .unwrap();
    assert!(assembled
        .xml
        .contains("<DokpoolContentType>not-a-content-type</DokpoolContentType>"));
}

#[test]
fn malformed_sampling_begin_fails_before_the_gate() {
    let mut irix = full_irix();
    irix["DokpoolMeta"]["DOKSYS"]["SamplingBegin"] = json!("2015-15-28T15:35:54.168+02:00");

    let err = gated_pipeline()
        .process(&request(irix, vec![]), None)
        .unwrap_err();
    assert!(matches!(err, IrixError::InvalidDateTime(_)));
}

#[test]
fn deprecated_scenarios_key_binds_end_to_end() {
    let mut irix = full_irix();
    irix["DokpoolMeta"]["ELAN"] = json!({"Scenarios": "legacy-scenario"});

    let assembled = gated_pipeline()
        .process(&request(irix, vec![]), None)
        .unwrap();
    let meta = assembled.report.annexes.annotations[0]
        .dokpool_meta
        .as_ref()
        .unwrap();
    assert_eq!(meta.elan.as_ref().unwrap().scenarios, vec!["legacy-scenario"]);
}
