//! Field specifications and shorthand resolution.
//!
//! A field is declared either as a structured [`FieldSpec`] or as the
//! compact shorthand `"<source>:<type>[:<required>]"`. Both forms resolve
//! to the same canonical descriptor before validation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CerberusError;

/// Source container a field's raw value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamSource {
    /// Caller-identity map from the gateway request context.
    RequestContext,
    /// Path segment parameters.
    Path,
    /// Query string parameters.
    Query,
    /// Decoded JSON body.
    Body,
}

impl ParamSource {
    /// Returns the wire token for this source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequestContext => "requestContext",
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "requestContext" => Some(Self::RequestContext),
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "body" => Some(Self::Body),
            _ => None,
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Runtime type a field's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// JSON string.
    String,
    /// JSON boolean.
    Boolean,
    /// JSON number.
    Number,
    /// JSON object; arrays also satisfy this kind.
    Object,
}

impl ParamKind {
    /// Returns the wire token for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Object => "object",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            "number" => Some(Self::Number),
            "object" => Some(Self::Object),
            _ => None,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical field descriptor: where to look, what type to expect, and
/// whether absence is an error.
///
/// Immutable once resolved. Structured descriptors supplied by the caller
/// pass through resolution unchanged, with no defaulting or re-validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Where the value is drawn from.
    pub source: ParamSource,

    /// Runtime type the value must have.
    #[serde(rename = "type")]
    pub kind: ParamKind,

    /// Whether absence or type mismatch is an error rather than a silent
    /// skip.
    #[serde(default)]
    pub required: bool,
}

/// A declared field specification: compact shorthand or structured
/// descriptor.
///
/// Specification maps deserialize from configuration with either form per
/// field:
///
/// ```rust
/// use cerberus::{ParamKind, ParamSource, SpecMap};
///
/// let specs: SpecMap = serde_json::from_str(
///     r#"{
///         "principalId": "requestContext:string:true",
///         "limit": { "source": "query", "type": "number" }
///     }"#,
/// )
/// .unwrap();
///
/// let resolved = specs["limit"].resolve("limit").unwrap();
/// assert_eq!(resolved.source, ParamSource::Query);
/// assert_eq!(resolved.kind, ParamKind::Number);
/// assert!(!resolved.required);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Spec {
    /// Compact `"<source>:<type>[:<required>]"` form.
    Shorthand(String),
    /// Structured descriptor, trusted as-is.
    Full(FieldSpec),
}

impl Spec {
    /// Resolves this spec to its canonical [`FieldSpec`].
    ///
    /// Shorthand strings are split positionally on `:`. The third segment
    /// makes the field required only when it is literally `"true"`; any
    /// other third segment, or none at all, leaves it optional. Segments
    /// past the third are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CerberusError::UnknownSource`] or
    /// [`CerberusError::UnknownKind`] when a shorthand token does not name
    /// a known source or type. `field` is only used to attribute the error.
    pub fn resolve(&self, field: &str) -> Result<FieldSpec, CerberusError> {
        match self {
            Self::Full(spec) => Ok(*spec),
            Self::Shorthand(shorthand) => resolve_shorthand(shorthand, field),
        }
    }
}

impl From<&str> for Spec {
    fn from(shorthand: &str) -> Self {
        Self::Shorthand(shorthand.to_string())
    }
}

impl From<String> for Spec {
    fn from(shorthand: String) -> Self {
        Self::Shorthand(shorthand)
    }
}

impl From<FieldSpec> for Spec {
    fn from(spec: FieldSpec) -> Self {
        Self::Full(spec)
    }
}

fn resolve_shorthand(shorthand: &str, field: &str) -> Result<FieldSpec, CerberusError> {
    let mut segments = shorthand.split(':');

    let token = segments.next().unwrap_or("");
    let source = ParamSource::from_token(token).ok_or_else(|| CerberusError::UnknownSource {
        field: field.to_string(),
        token: token.to_string(),
    })?;

    let token = segments.next().unwrap_or("");
    let kind = ParamKind::from_token(token).ok_or_else(|| CerberusError::UnknownKind {
        field: field.to_string(),
        token: token.to_string(),
    })?;

    let required = segments.next() == Some("true");

    Ok(FieldSpec {
        source,
        kind,
        required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_two_segments() {
        let spec = Spec::from("path:number").resolve("p_number").unwrap();
        assert_eq!(spec.source, ParamSource::Path);
        assert_eq!(spec.kind, ParamKind::Number);
        assert!(!spec.required);
    }

    #[test]
    fn test_shorthand_required() {
        let spec = Spec::from("requestContext:string:true")
            .resolve("principalId")
            .unwrap();
        assert_eq!(spec.source, ParamSource::RequestContext);
        assert_eq!(spec.kind, ParamKind::String);
        assert!(spec.required);
    }

    #[test]
    fn test_shorthand_third_segment_must_be_literal_true() {
        for tail in ["yes", "required", "TRUE", "1", ""] {
            let spec = Spec::from(format!("query:boolean:{tail}"))
                .resolve("q_flag")
                .unwrap();
            assert!(!spec.required, "'{tail}' must not mark the field required");
        }
    }

    #[test]
    fn test_shorthand_extra_segments_ignored() {
        let spec = Spec::from("body:object:true:extra").resolve("payload").unwrap();
        assert!(spec.required);
        assert_eq!(spec.kind, ParamKind::Object);
    }

    #[test]
    fn test_unknown_source_token() {
        let err = Spec::from("header:string").resolve("x_api_key").unwrap_err();
        assert!(matches!(
            err,
            CerberusError::UnknownSource { ref token, .. } if token == "header"
        ));
    }

    #[test]
    fn test_unknown_kind_token() {
        let err = Spec::from("query:integer").resolve("limit").unwrap_err();
        assert!(matches!(
            err,
            CerberusError::UnknownKind { ref token, .. } if token == "integer"
        ));
    }

    #[test]
    fn test_missing_kind_segment() {
        let err = Spec::from("query").resolve("limit").unwrap_err();
        assert!(matches!(
            err,
            CerberusError::UnknownKind { ref token, .. } if token.is_empty()
        ));
    }

    #[test]
    fn test_structured_spec_passes_through() {
        let full = FieldSpec {
            source: ParamSource::Body,
            kind: ParamKind::Object,
            required: true,
        };
        assert_eq!(Spec::from(full).resolve("payload").unwrap(), full);
    }

    #[test]
    fn test_spec_deserializes_both_forms() {
        let shorthand: Spec = serde_json::from_str("\"path:number:true\"").unwrap();
        assert_eq!(shorthand, Spec::Shorthand("path:number:true".to_string()));

        let full: Spec =
            serde_json::from_str(r#"{"source": "body", "type": "object", "required": true}"#)
                .unwrap();
        assert_eq!(
            full,
            Spec::Full(FieldSpec {
                source: ParamSource::Body,
                kind: ParamKind::Object,
                required: true,
            })
        );
    }

    #[test]
    fn test_structured_required_defaults_false() {
        let full: Spec = serde_json::from_str(r#"{"source": "query", "type": "string"}"#).unwrap();
        let resolved = full.resolve("q").unwrap();
        assert!(!resolved.required);
    }

    #[test]
    fn test_token_round_trips() {
        for source in [
            ParamSource::RequestContext,
            ParamSource::Path,
            ParamSource::Query,
            ParamSource::Body,
        ] {
            assert_eq!(ParamSource::from_token(source.as_str()), Some(source));
        }
        for kind in [
            ParamKind::String,
            ParamKind::Boolean,
            ParamKind::Number,
            ParamKind::Object,
        ] {
            assert_eq!(ParamKind::from_token(kind.as_str()), Some(kind));
        }
    }
}
