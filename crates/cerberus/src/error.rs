//! Error types.
//!
//! Two layers of failure exist. Per-field failures ([`FieldError`]) are
//! collected into the validation result so a single pass reports every
//! failing field. Fatal failures ([`CerberusError`]) abort the whole
//! `validate` call: they indicate a broken specification or an undecodable
//! body, neither of which can be attributed to one field.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using [`CerberusError`].
pub type CerberusResult<T> = Result<T, CerberusError>;

/// Fatal conditions that abort an entire `validate` call.
#[derive(Debug, Error)]
pub enum CerberusError {
    /// A shorthand spec named a source container that does not exist.
    #[error("unrecognized source token '{token}' in spec for field '{field}'")]
    UnknownSource {
        /// Field whose spec carried the token.
        field: String,
        /// The offending source token.
        token: String,
    },

    /// A shorthand spec named a value type that does not exist.
    #[error("unrecognized type token '{token}' in spec for field '{field}'")]
    UnknownKind {
        /// Field whose spec carried the token.
        field: String,
        /// The offending type token.
        token: String,
    },

    /// A body-sourced field was declared but the event carried no body.
    #[error("spec declares body parameters but the event has no body")]
    EmptyBody,

    /// The request body was not valid JSON.
    #[error("failed to decode request body: {0}")]
    BodyDecode(#[from] serde_json::Error),

    /// The request body decoded to something other than a JSON object.
    #[error("request body decoded to {got}, expected a JSON object")]
    BodyNotObject {
        /// JSON type the body decoded to.
        got: &'static str,
    },
}

impl CerberusError {
    /// Returns the wire code used in error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSource { .. } => "UNKNOWN_SOURCE",
            Self::UnknownKind { .. } => "UNKNOWN_TYPE",
            Self::EmptyBody | Self::BodyDecode(_) | Self::BodyNotObject { .. } => {
                "BODY_DECODE_FAILED"
            }
        }
    }

    /// Returns the HTTP status code this failure maps to.
    ///
    /// Unrecognized spec tokens are configuration mistakes on the embedding
    /// service, not client faults, and map to `500`. Body decode failures
    /// are client faults and map to `400`.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownSource { .. } | Self::UnknownKind { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::EmptyBody | Self::BodyDecode(_) | Self::BodyNotObject { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

/// Per-field validation failure kinds.
///
/// Serialized with the wire codes `missing_required` and `type_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// A required field was absent, or present with a falsy value.
    ///
    /// Truthiness is applied to required values before the type check: a
    /// required field explicitly set to `0`, `false`, `""`, or `null` is
    /// reported as missing rather than accepted. This collapse of "present
    /// but falsy" into "absent" is kept for wire compatibility; it is a
    /// documented limitation, not a guarantee worth relying on.
    MissingRequired,

    /// A required field was present but its value had the wrong runtime type.
    TypeError,
}

impl FieldError {
    /// Returns the wire code used in error maps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequired => "missing_required",
            Self::TypeError => "type_error",
        }
    }

    /// Returns the HTTP status code for a response reporting this error.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_wire_codes() {
        assert_eq!(FieldError::MissingRequired.as_str(), "missing_required");
        assert_eq!(FieldError::TypeError.as_str(), "type_error");

        let json = serde_json::to_string(&FieldError::MissingRequired).unwrap();
        assert_eq!(json, "\"missing_required\"");

        let parsed: FieldError = serde_json::from_str("\"type_error\"").unwrap();
        assert_eq!(parsed, FieldError::TypeError);
    }

    #[test]
    fn test_field_error_status() {
        assert_eq!(
            FieldError::MissingRequired.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(FieldError::TypeError.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_fatal_error_codes() {
        let err = CerberusError::UnknownSource {
            field: "userId".to_string(),
            token: "header".to_string(),
        };
        assert_eq!(err.error_code(), "UNKNOWN_SOURCE");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("header"));
        assert!(err.to_string().contains("userId"));

        assert_eq!(CerberusError::EmptyBody.error_code(), "BODY_DECODE_FAILED");
        assert_eq!(CerberusError::EmptyBody.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_body_decode_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = CerberusError::from(parse_err);
        assert_eq!(err.error_code(), "BODY_DECODE_FAILED");
        assert!(err.to_string().contains("failed to decode request body"));
    }
}
