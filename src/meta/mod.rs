// irix-assembler/src/meta/mod.rs

pub mod dokpool;
pub mod doksys;
pub mod elan;
pub mod registry;
pub mod rei;
pub mod rodos;

use serde_json::{Map, Value};
use tracing::{debug, info};

pub use registry::{bind, BindOverrides, BindingFailure, BindingReport, FieldDescriptor, Setter};

use crate::error::{IrixError, Result};
use dokpool::DokpoolMeta;

const DOKPOOL_KEYS: &[&str] = &["DokpoolMeta"];
const ELAN_KEYS: &[&str] = &["ELAN", "Elan"];
const DOKSYS_KEYS: &[&str] = &["DOKSYS", "Doksys"];
const RODOS_KEYS: &[&str] = &["RODOS", "Rodos"];
const REI_KEYS: &[&str] = &["REI", "Rei"];

fn find_key<'a>(source: &'a Map<String, Value>, keys: &'static [&'static str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| source.get(*key))
}

/// Fetch an extension sub-object under any accepted spelling. A flag that is
/// true with no matching key is tolerated (`Ok(None)`); a present key whose
/// value is not an object is a request error.
fn extension_object<'a>(
    source: &'a Map<String, Value>,
    keys: &'static [&'static str],
    extension: &str,
) -> Result<Option<&'a Map<String, Value>>> {
    match find_key(source, keys) {
        None => Ok(None),
        Some(value) => value
            .as_object()
            .map(Some)
            .ok_or_else(|| IrixError::InvalidRequest(format!("{extension} is not an object"))),
    }
}

/// Bind the DokpoolMeta block of the `irix` object, dispatching to each
/// sub-extension whose Is* gate is set. Returns `None` when no DokpoolMeta
/// key is present at all.
pub fn bind_dokpool_meta(
    irix: &Map<String, Value>,
    overrides: &BindOverrides,
) -> Result<Option<(DokpoolMeta, BindingReport)>> {
    let Some(source) = extension_object(irix, DOKPOOL_KEYS, "DokpoolMeta")? else {
        return Ok(None);
    };

    let mut meta = DokpoolMeta::default();
    let mut report = bind("DokpoolMeta", dokpool::DOKPOOL_FIELDS, source, &mut meta, overrides)?;

    if meta.is_doksys {
        if let Some(sub) = extension_object(source, DOKSYS_KEYS, "DOKSYS")? {
            let mut doksys = doksys::Doksys::default();
            report.merge(bind("DOKSYS", doksys::DOKSYS_FIELDS, sub, &mut doksys, overrides)?);
            meta.doksys = Some(doksys);
        } else {
            debug!("IsDoksys set but no DOKSYS data supplied, skipping");
        }
    }

    if meta.is_elan {
        if let Some(sub) = extension_object(source, ELAN_KEYS, "ELAN")? {
            let mut elan = elan::Elan::default();
            report.merge(bind("ELAN", elan::ELAN_FIELDS, sub, &mut elan, overrides)?);
            meta.elan = Some(elan);
        } else {
            debug!("IsElan set but no ELAN data supplied, skipping");
        }
    }

    if meta.is_rodos {
        if let Some(sub) = extension_object(source, RODOS_KEYS, "RODOS")? {
            let mut rodos = rodos::Rodos::default();
            report.merge(rodos::bind_rodos(sub, &mut rodos));
            meta.rodos = Some(rodos);
        } else {
            debug!("IsRodos set but no RODOS data supplied, skipping");
        }
    }

    if meta.is_rei {
        if let Some(sub) = extension_object(source, REI_KEYS, "REI")? {
            let mut rei = rei::Rei::default();
            report.merge(bind("REI", rei::REI_FIELDS, sub, &mut rei, overrides)?);
            meta.rei = Some(rei);
        } else {
            debug!("IsRei set but no REI data supplied, skipping");
        }
    }

    info!(
        bound = report.bound,
        failures = report.failures.len(),
        has_extension = meta.has_extension(),
        "DokpoolMeta bound"
    );

    Ok(Some((meta, report)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn irix_with_meta(meta: Value) -> Map<String, Value> {
        json!({"DokpoolMeta": meta}).as_object().unwrap().clone()
    }

    #[test]
    fn missing_dokpool_meta_is_none() {
        let irix = json!({"Identification": {}}).as_object().unwrap().clone();
        let result = bind_dokpool_meta(&irix, &BindOverrides::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn flag_true_without_data_is_tolerated() {
        let irix = irix_with_meta(json!({"IsElan": true, "IsRodos": "true"}));
        let (meta, report) = bind_dokpool_meta(&irix, &BindOverrides::default())
            .unwrap()
            .unwrap();
        assert!(meta.is_elan);
        assert!(meta.is_rodos);
        assert!(meta.elan.is_none());
        assert!(meta.rodos.is_none());
        assert!(report.is_clean());
    }

    #[test]
    fn both_key_spellings_dispatch() {
        let upper = irix_with_meta(json!({"IsElan": true, "ELAN": {"Scenario": "a"}}));
        let lower = irix_with_meta(json!({"IsElan": true, "Elan": {"Scenario": "a"}}));
        for irix in [upper, lower] {
            let (meta, _) = bind_dokpool_meta(&irix, &BindOverrides::default())
                .unwrap()
                .unwrap();
            assert_eq!(meta.elan.unwrap().scenarios, vec!["a"]);
        }
    }

    #[test]
    fn flag_false_skips_present_data() {
        let irix = irix_with_meta(json!({"IsDoksys": false, "DOKSYS": {"Dom": "x"}}));
        let (meta, _) = bind_dokpool_meta(&irix, &BindOverrides::default())
            .unwrap()
            .unwrap();
        assert!(meta.doksys.is_none());
        assert!(!meta.has_extension());
    }

    #[test]
    fn identity_uid_overrides_document_owner() {
        let irix = irix_with_meta(json!({"DokpoolDocumentOwner": "from-json"}));
        let overrides = BindOverrides {
            document_owner: Some("from-identity".to_string()),
        };
        let (meta, _) = bind_dokpool_meta(&irix, &overrides).unwrap().unwrap();
        assert_eq!(meta.dokpool_document_owner.as_deref(), Some("from-identity"));
    }
}
