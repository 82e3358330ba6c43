//! Specification-driven field validation.
//!
//! The [`Validator`] owns a specification map and checks gateway proxy
//! events against it. Per-field failures are collected, never thrown: one
//! `validate` call reports every failing field at once. Only a broken
//! specification or an undecodable body aborts the call as a whole.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{CerberusError, CerberusResult, FieldError};
use crate::event::{ParamMap, ProxyEvent};
use crate::spec::{FieldSpec, ParamKind, ParamSource, Spec};

/// Specification map: field name to declared spec.
pub type SpecMap = IndexMap<String, Spec>;

/// Result of one `validate` call.
///
/// A fresh, immutable record: the extracted values, the per-field errors,
/// and the derived validity flag. Every declared field lands in exactly one
/// of the two maps, except non-required fields whose container, value, or
/// type check failed, which appear in neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Validation {
    values: IndexMap<String, Value>,
    errors: IndexMap<String, FieldError>,
}

impl Validation {
    /// Returns `true` iff no field failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the extracted, type-verified values.
    #[must_use]
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    /// Returns the per-field failures.
    #[must_use]
    pub fn errors(&self) -> &IndexMap<String, FieldError> {
        &self.errors
    }

    /// Returns the value extracted for `field`, if it passed.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Returns the failure recorded for `field`, if any.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<FieldError> {
        self.errors.get(field).copied()
    }

    /// Consumes the result and returns the values map.
    #[must_use]
    pub fn into_values(self) -> IndexMap<String, Value> {
        self.values
    }
}

/// Validates gateway proxy events against a declarative specification.
///
/// A `Validator` is cheap to construct and intended to live for one
/// request. The specification map is fixed at construction; each
/// [`validate`](Self::validate) call returns a fresh [`Validation`], so
/// repeated calls never accumulate state.
///
/// # Example
///
/// ```rust
/// use cerberus::{ProxyEvent, Validator};
///
/// let validator: Validator = [
///     ("principalId", "requestContext:string:true"),
///     ("limit", "query:number"),
/// ]
/// .into_iter()
/// .collect();
///
/// let event = ProxyEvent::builder()
///     .authorizer_entry("principalId", "user-123")
///     .query_param("limit", 25)
///     .build();
///
/// let result = validator.validate(&event)?;
/// assert!(result.is_valid());
/// assert_eq!(result.value("limit"), Some(&serde_json::json!(25)));
/// # Ok::<(), cerberus::CerberusError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    specs: SpecMap,
}

impl Validator {
    /// Creates a validator from a specification map.
    #[must_use]
    pub fn new(specs: SpecMap) -> Self {
        Self { specs }
    }

    /// Returns the declared specification map.
    #[must_use]
    pub fn specs(&self) -> &SpecMap {
        &self.specs
    }

    /// Validates `event` against the declared specification.
    ///
    /// Fields are processed independently and order-insensitively. For each
    /// field: resolve its spec, select the source container, apply the
    /// required/presence rules, then the runtime type check. A required
    /// field that fails lands in the error map; a non-required field that
    /// fails is silently skipped.
    ///
    /// The body is decoded at most once per call, on the first body-sourced
    /// field.
    ///
    /// # Errors
    ///
    /// Returns a [`CerberusError`] when a shorthand spec carries an
    /// unrecognized source or type token, or when a body-sourced field is
    /// declared and the body is absent, not valid JSON, or not a JSON
    /// object. These abort the whole call rather than being attributed to
    /// one field.
    pub fn validate(&self, event: &ProxyEvent) -> CerberusResult<Validation> {
        let mut values = IndexMap::new();
        let mut errors = IndexMap::new();
        // Decoded lazily, at most once per call.
        let mut body: Option<ParamMap> = None;

        for (field, spec) in &self.specs {
            let spec = spec.resolve(field)?;

            let container = match spec.source {
                ParamSource::RequestContext => event.request_context.authorizer.as_ref(),
                ParamSource::Path => event.path_parameters.as_ref(),
                ParamSource::Query => event.query_string_parameters.as_ref(),
                ParamSource::Body => {
                    if body.is_none() {
                        body = Some(decode_body(event)?);
                    }
                    body.as_ref()
                }
            };

            match check_field(field, spec, container) {
                Outcome::Value(value) => {
                    values.insert(field.clone(), value);
                }
                Outcome::Error(kind) => {
                    errors.insert(field.clone(), kind);
                }
                Outcome::Skip => {
                    debug!(field = %field, source = %spec.source, "optional field skipped");
                }
            }
        }

        debug!(
            fields = self.specs.len(),
            failed = errors.len(),
            "event validated"
        );

        Ok(Validation { values, errors })
    }
}

impl<K, S> FromIterator<(K, S)> for Validator
where
    K: Into<String>,
    S: Into<Spec>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(name, spec)| (name.into(), spec.into()))
                .collect(),
        )
    }
}

/// Outcome of checking a single field.
enum Outcome {
    Value(Value),
    Error(FieldError),
    Skip,
}

fn check_field(field: &str, spec: FieldSpec, container: Option<&ParamMap>) -> Outcome {
    let Some(container) = container else {
        return if spec.required {
            Outcome::Error(FieldError::MissingRequired)
        } else {
            Outcome::Skip
        };
    };

    let value = container.get(field);

    // Truthiness applies to required values before the type check: `0`,
    // `false`, `""`, and `null` count as missing.
    if spec.required && value.map_or(true, is_falsy) {
        return Outcome::Error(FieldError::MissingRequired);
    }

    match value {
        Some(value) if matches_kind(value, spec.kind) => Outcome::Value(value.clone()),
        _ if spec.required => Outcome::Error(FieldError::TypeError),
        _ => Outcome::Skip,
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => {
            n.as_i64() == Some(0) || n.as_u64() == Some(0) || n.as_f64() == Some(0.0)
        }
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn matches_kind(value: &Value, kind: ParamKind) -> bool {
    match kind {
        ParamKind::String => value.is_string(),
        ParamKind::Boolean => value.is_boolean(),
        ParamKind::Number => value.is_number(),
        // Arrays satisfy `object`, matching the wire format's loose typing.
        ParamKind::Object => value.is_object() || value.is_array(),
    }
}

fn decode_body(event: &ProxyEvent) -> CerberusResult<ParamMap> {
    let raw = event.body.as_deref().ok_or(CerberusError::EmptyBody)?;
    let decoded: Value = serde_json::from_str(raw)?;
    match decoded {
        Value::Object(map) => Ok(map),
        other => Err(CerberusError::BodyNotObject {
            got: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
