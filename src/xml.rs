// irix-assembler/src/xml.rs

use serde::Serialize;

use crate::error::{IrixError, Result};
use crate::models::Report;

/// Serialize the assembled report as UTF-8, human-readable XML.
pub fn to_xml(report: &Report) -> Result<String> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    report
        .serialize(serializer)
        .map_err(|e| IrixError::XmlError(e.to_string()))?;

    let mut out = String::with_capacity(body.len() + 64);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&body);
    out.push('\n');
    Ok(out)
}
