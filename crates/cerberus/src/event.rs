//! Gateway proxy event model.
//!
//! [`ProxyEvent`] is the request representation consumed by the
//! [`Validator`](crate::Validator). It exposes the four independently
//! addressable parameter sources: the caller-identity map populated by the
//! gateway authorizer, path parameters, query string parameters, and the
//! raw request body. Field names follow the gateway wire format, so a full
//! event deserializes directly with `serde`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Map of named parameters as decoded from the gateway wire format.
pub type ParamMap = Map<String, Value>;

/// An incoming gateway proxy event.
///
/// Each source is independently optional: a `GET` carries no body, a route
/// without segments carries no path parameters, and an unauthenticated
/// route carries no authorizer map. The body is kept as the raw string the
/// gateway delivered; it is decoded at most once per validation call.
///
/// # Example
///
/// ```rust
/// use cerberus::ProxyEvent;
///
/// let event = ProxyEvent::builder()
///     .authorizer_entry("principalId", "user-123")
///     .path_param("id", 42)
///     .query_param("verbose", true)
///     .body(r#"{"name":"alice"}"#)
///     .build();
///
/// assert!(event.request_context.authorizer.is_some());
/// assert!(event.body.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    /// Request context carrying the caller identity.
    #[serde(default)]
    pub request_context: RequestContext,

    /// Parameters extracted from path segments.
    #[serde(default)]
    pub path_parameters: Option<ParamMap>,

    /// Parameters from the query string.
    #[serde(default)]
    pub query_string_parameters: Option<ParamMap>,

    /// Raw, not-yet-decoded request body.
    #[serde(default)]
    pub body: Option<String>,
}

impl ProxyEvent {
    /// Returns a builder for constructing events in tests and embedders.
    #[must_use]
    pub fn builder() -> ProxyEventBuilder {
        ProxyEventBuilder::new()
    }
}

/// The request context portion of a proxy event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Caller identity map populated by the gateway authorizer.
    #[serde(default)]
    pub authorizer: Option<ParamMap>,
}

/// Builder for constructing a [`ProxyEvent`].
#[derive(Debug, Default)]
pub struct ProxyEventBuilder {
    authorizer: Option<ParamMap>,
    path_parameters: Option<ParamMap>,
    query_string_parameters: Option<ParamMap>,
    body: Option<String>,
}

impl ProxyEventBuilder {
    /// Creates a new builder with every source absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full authorizer map.
    #[must_use]
    pub fn authorizer(mut self, map: ParamMap) -> Self {
        self.authorizer = Some(map);
        self
    }

    /// Adds a single authorizer entry.
    #[must_use]
    pub fn authorizer_entry(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.authorizer
            .get_or_insert_with(ParamMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sets the full path-parameter map.
    #[must_use]
    pub fn path_parameters(mut self, map: ParamMap) -> Self {
        self.path_parameters = Some(map);
        self
    }

    /// Adds a single path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path_parameters
            .get_or_insert_with(ParamMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sets the full query-parameter map.
    #[must_use]
    pub fn query_parameters(mut self, map: ParamMap) -> Self {
        self.query_string_parameters = Some(map);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(ParamMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sets the raw body string.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the body to the JSON encoding of `value`.
    #[must_use]
    pub fn json_body(mut self, value: Value) -> Self {
        self.body = Some(value.to_string());
        self
    }

    /// Builds the event.
    #[must_use]
    pub fn build(self) -> ProxyEvent {
        ProxyEvent {
            request_context: RequestContext {
                authorizer: self.authorizer,
            },
            path_parameters: self.path_parameters,
            query_string_parameters: self.query_string_parameters,
            body: self.body,
        }
    }
}
