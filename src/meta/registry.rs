// irix-assembler/src/meta/registry.rs
//
// Declarative field registry and the generic binder that walks it. Each
// extension declares an ordered table of descriptors; the binder looks the
// key up (canonical first, then aliases), coerces the raw JSON value per the
// setter's kind, and writes it through a typed accessor. Per-field failures
// are collected and binding continues, with one exception: date coercion
// failures abort the whole extension, because a malformed date would
// otherwise surface later as an opaque schema violation.

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde_json::{Map, Value};
use tracing::warn;

use crate::coerce;
use crate::error::Result;
use crate::models::UserIdentity;

/// Typed accessor for one bindable field. The variant fixes the value kind;
/// the function pointer is bound at compile time, no runtime name lookup.
pub enum Setter<T> {
    Text(fn(&mut T, String)),
    TextList(fn(&mut T, Vec<String>)),
    Boolean(fn(&mut T, bool)),
    Integer(fn(&mut T, BigInt)),
    DateTime(fn(&mut T, DateTime<Utc>)),
    /// Structured values with their own coercion (e.g. REI measuring-station
    /// records). An `Err` is recorded as a non-fatal binding failure.
    Custom(fn(&mut T, &Value) -> std::result::Result<(), String>),
}

pub struct FieldDescriptor<T: 'static> {
    pub key: &'static str,
    pub aliases: &'static [&'static str],
    /// Still-accepted legacy spellings; binding through one logs a warning.
    pub deprecated_aliases: &'static [&'static str],
    pub setter: Setter<T>,
}

impl<T> FieldDescriptor<T> {
    pub const fn new(key: &'static str, setter: Setter<T>) -> Self {
        Self {
            key,
            aliases: &[],
            deprecated_aliases: &[],
            setter,
        }
    }

    pub const fn with_aliases(
        key: &'static str,
        aliases: &'static [&'static str],
        setter: Setter<T>,
    ) -> Self {
        Self {
            key,
            aliases,
            deprecated_aliases: &[],
            setter,
        }
    }

    pub const fn with_deprecated(
        key: &'static str,
        deprecated_aliases: &'static [&'static str],
        setter: Setter<T>,
    ) -> Self {
        Self {
            key,
            aliases: &[],
            deprecated_aliases,
            setter,
        }
    }

    /// Canonical key first, then aliases, then deprecated spellings.
    fn lookup<'a>(&self, source: &'a Map<String, Value>) -> Option<(&'static str, &'a Value)> {
        if let Some(value) = source.get(self.key) {
            return Some((self.key, value));
        }
        for alias in self.aliases {
            if let Some(value) = source.get(*alias) {
                return Some((*alias, value));
            }
        }
        for alias in self.deprecated_aliases {
            if let Some(value) = source.get(*alias) {
                return Some((*alias, value));
            }
        }
        None
    }
}

#[derive(Debug)]
pub struct BindingFailure {
    pub field: String,
    pub reason: String,
}

/// Outcome of one binding pass: count of bound fields plus the non-fatal
/// per-field failures encountered along the way.
#[derive(Debug, Default)]
pub struct BindingReport {
    pub bound: usize,
    pub failures: Vec<BindingFailure>,
}

impl BindingReport {
    pub fn record_failure(&mut self, field: &str, reason: impl Into<String>) {
        self.failures.push(BindingFailure {
            field: field.to_string(),
            reason: reason.into(),
        });
    }

    pub fn merge(&mut self, other: BindingReport) {
        self.bound += other.bound;
        self.failures.extend(other.failures);
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Externally supplied values that win over the JSON document. Currently
/// only the document owner, taken from the authenticated identity's uid.
#[derive(Debug, Default)]
pub struct BindOverrides {
    pub document_owner: Option<String>,
}

impl BindOverrides {
    pub fn from_identity(identity: Option<&UserIdentity>) -> Self {
        let document_owner = identity
            .and_then(|id| id.uid.as_deref())
            .map(str::trim)
            .filter(|uid| !uid.is_empty())
            .map(str::to_string);
        Self { document_owner }
    }

    fn value_for(&self, canonical_key: &str) -> Option<&str> {
        match canonical_key {
            "DokpoolDocumentOwner" => self.document_owner.as_deref(),
            _ => None,
        }
    }
}

/// Walk `fields` over `source`, binding every present key onto `target`.
pub fn bind<T>(
    extension: &str,
    fields: &[FieldDescriptor<T>],
    source: &Map<String, Value>,
    target: &mut T,
    overrides: &BindOverrides,
) -> Result<BindingReport> {
    let mut report = BindingReport::default();

    for field in fields {
        let Some((matched_key, raw)) = field.lookup(source) else {
            continue;
        };
        if field.deprecated_aliases.contains(&matched_key) {
            warn!(
                extension,
                field = field.key,
                key = matched_key,
                "Binding through deprecated key"
            );
        }

        let override_value = overrides
            .value_for(field.key)
            .map(|v| Value::String(v.to_string()));
        let raw = override_value.as_ref().unwrap_or(raw);

        match field.setter {
            Setter::Text(set) => {
                // Scalar target: the last (or only) supplied value wins.
                match coerce::as_string_list(raw).pop() {
                    Some(value) => {
                        set(target, value);
                        report.bound += 1;
                    }
                    None => report.record_failure(field.key, "no scalar value"),
                }
            }
            Setter::TextList(set) => {
                let values = coerce::as_string_list(raw);
                if values.is_empty() {
                    report.record_failure(field.key, "no scalar values");
                } else {
                    set(target, values);
                    report.bound += 1;
                }
            }
            Setter::Boolean(set) => {
                set(target, coerce::parse_boolean(raw));
                report.bound += 1;
            }
            Setter::Integer(set) => match coerce::parse_integer(raw) {
                Ok(value) => {
                    set(target, value);
                    report.bound += 1;
                }
                Err(e) => report.record_failure(field.key, e.to_string()),
            },
            Setter::DateTime(set) => {
                // Fatal on malformed input: an empty schema element later
                // would fail validation with a far less useful diagnostic.
                let text = coerce::scalar_string(raw).ok_or_else(|| {
                    crate::error::IrixError::InvalidDateTime(format!(
                        "{}: expected a date-time string, got {}",
                        field.key,
                        coerce::json_type_name(raw)
                    ))
                })?;
                set(target, coerce::parse_datetime(&text)?);
                report.bound += 1;
            }
            Setter::Custom(set) => match set(target, raw) {
                Ok(()) => report.bound += 1,
                Err(reason) => report.record_failure(field.key, reason),
            },
        }
    }

    Ok(report)
}
