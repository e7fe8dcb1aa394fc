// irix-assembler/src/pipeline.rs
//
// Orchestrates one assembly: skeleton → extension binding → annotation →
// file enclosures → schema gate → XML. Purely sequential over one mutable
// document tree; concurrent requests each get their own pipeline call.

use base64::{engine::general_purpose, Engine as _};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::annex::{attach_annotation, attach_file};
use crate::coerce;
use crate::error::{IrixError, Result};
use crate::meta::{bind_dokpool_meta, BindOverrides, BindingReport};
use crate::models::{Report, UploadRequest, UserIdentity};
use crate::report::build_skeleton;
use crate::validate::SchemaGate;
use crate::xml;

#[derive(Debug)]
pub struct AssembledReport {
    pub report: Report,
    pub xml: String,
    pub binding: BindingReport,
}

pub struct ReportPipeline {
    gate: SchemaGate,
}

impl ReportPipeline {
    pub fn new(gate: SchemaGate) -> Self {
        Self { gate }
    }

    /// Assemble and validate one report from an upload request.
    #[instrument(skip_all, fields(request_type = %request.request_type))]
    pub fn process(
        &self,
        request: &UploadRequest,
        identity: Option<&UserIdentity>,
    ) -> Result<AssembledReport> {
        let irix = request
            .irix
            .as_object()
            .ok_or_else(|| IrixError::InvalidRequest("irix is not an object".to_string()))?;
        let identification = irix
            .get("Identification")
            .and_then(Value::as_object)
            .ok_or_else(|| IrixError::SchemaFieldMissing("Identification".to_string()))?;

        let mut report = build_skeleton(identification)?;
        info!(
            report_uuid = %report.identification.report_uuid,
            organisation = %report.identification.organisation_reporting,
            "Report skeleton built"
        );

        let overrides = BindOverrides::from_identity(identity);
        let (meta, binding) = match bind_dokpool_meta(irix, &overrides)? {
            Some((meta, binding)) => (Some(meta), binding),
            None => (None, BindingReport::default()),
        };
        for failure in &binding.failures {
            warn!(field = %failure.field, reason = %failure.reason, "Field binding failure");
        }

        let (title, text) = annotation_texts(irix)?;
        attach_annotation(&mut report, &title, &text, meta);

        for attachment in &request.attachments {
            let bytes = general_purpose::STANDARD.decode(&attachment.content_base64)?;
            attach_file(
                &mut report,
                &attachment.title,
                &bytes,
                &attachment.mime_type,
                &attachment.file_name,
            );
        }

        // Gate before any XML bytes exist, so consumers can never observe a
        // schema-invalid document.
        let projection = serde_json::to_value(&report)?;
        self.gate.validate(&projection)?;

        let xml = xml::to_xml(&report)?;
        info!(
            report_uuid = %report.identification.report_uuid,
            enclosures = report.annexes.file_enclosures.len(),
            xml_bytes = xml.len(),
            "Report assembled and validated"
        );

        Ok(AssembledReport { report, xml, binding })
    }
}

fn annotation_texts(irix: &Map<String, Value>) -> Result<(String, String)> {
    let title = irix
        .get("Title")
        .and_then(coerce::scalar_string)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| IrixError::SchemaFieldMissing("Title".to_string()))?;
    let text = irix
        .get("Text")
        .and_then(coerce::scalar_string)
        .unwrap_or_default();
    Ok((title, text))
}
