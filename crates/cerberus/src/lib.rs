//! # Cerberus
//!
//! Declarative parameter validation and extraction for gateway proxy
//! events.
//!
//! A request handler declares, per field, where the value lives, what
//! runtime type it must have, and whether it is required. One `validate`
//! call then produces either a map of typed values or a map of per-field
//! errors — always the full picture, never just the first failure.
//!
//! ## Sources
//!
//! | Token | Container |
//! |-------|-----------|
//! | `requestContext` | Caller-identity map from the gateway authorizer |
//! | `path` | Path segment parameters |
//! | `query` | Query string parameters |
//! | `body` | JSON request body, decoded once per call |
//!
//! Recognized type tokens are `string`, `boolean`, `number`, and `object`
//! (arrays satisfy `object`).
//!
//! ## Example
//!
//! ```rust
//! use cerberus::{FieldError, ProxyEvent, Validator};
//!
//! let validator: Validator = [
//!     ("principalId", "requestContext:string:true"),
//!     ("userId", "path:number:true"),
//!     ("verbose", "query:boolean"),
//!     ("payload", "body:object"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let event = ProxyEvent::builder()
//!     .authorizer_entry("principalId", "user-123")
//!     .path_param("userId", 42)
//!     .body(r#"{"payload": {"name": "alice"}}"#)
//!     .build();
//!
//! let result = validator.validate(&event)?;
//! assert!(result.is_valid());
//! assert_eq!(result.value("userId"), Some(&serde_json::json!(42)));
//! // `verbose` was optional and absent: skipped, no error.
//! assert_eq!(result.error("verbose"), None);
//! # Ok::<(), cerberus::CerberusError>(())
//! ```
//!
//! ## Specifications
//!
//! Fields are declared with the compact shorthand
//! `"<source>:<type>[:<required>]"` or a structured [`FieldSpec`]. The
//! third shorthand segment marks the field required only when it is
//! literally `"true"`. Specification maps deserialize from configuration
//! with `serde`, accepting either form per field.
//!
//! ## Error Handling
//!
//! Per-field failures are collected into the [`Validation`] result as
//! [`FieldError`] kinds (`missing_required`, `type_error`) and never abort
//! the call. A required field with a falsy value (`0`, `false`, `""`,
//! `null`) is reported as `missing_required`; see
//! [`FieldError::MissingRequired`] for the rationale. Two conditions are
//! fatal and abort the whole call as a typed [`CerberusError`]: an
//! unrecognized source or type token in a shorthand spec, and a body that
//! is absent, not valid JSON, or not a JSON object while body fields are
//! declared.

#![doc(html_root_url = "https://docs.rs/cerberus/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod event;
mod spec;
mod validator;

// Re-export main types
pub use error::{CerberusError, CerberusResult, FieldError};
pub use event::{ParamMap, ProxyEvent, ProxyEventBuilder, RequestContext};
pub use spec::{FieldSpec, ParamKind, ParamSource, Spec};
pub use validator::{SpecMap, Validation, Validator};

// Re-export useful types from dependencies
pub use indexmap::IndexMap;
pub use serde_json::Value;
