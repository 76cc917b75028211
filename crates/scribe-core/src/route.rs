//! Endpoint descriptors supplied by the route registry.
//!
//! A [`Route`] carries a method, a path pattern, its own schema slots
//! ([`Hooks`]) and the slots of every ancestor guard. Routes derive serde so a
//! registry can be supplied as JSON:
//!
//! ```rust
//! use scribe_core::{Method, Route};
//! use serde_json::json;
//!
//! let route: Route = serde_json::from_value(json!({
//!     "method": "GET",
//!     "path": "/users/:id",
//!     "params": { "type": "object", "properties": { "id": { "type": "string" } } },
//!     "response": { "200": "User", "404": { "type": "null" } },
//!     "detail": { "summary": "Fetch a user", "tags": ["users"] }
//! }))
//! .unwrap();
//!
//! assert_eq!(route.method, Method::Get);
//! assert!(route.hooks.params.is_some());
//! assert_eq!(route.detail.tags, vec!["users".to_string()]);
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;
use crate::input::SchemaInput;
use crate::merge::merge_hooks;
use crate::normalize::Normalizer;

/// HTTP method of a route, including the `all` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
    /// TRACE
    Trace,
    /// Every standard method.
    All,
}

impl Method {
    /// Methods a wildcard route expands to, in emission order.
    pub const STANDARD: [Method; 8] = [
        Method::Get,
        Method::Put,
        Method::Post,
        Method::Delete,
        Method::Options,
        Method::Head,
        Method::Patch,
        Method::Trace,
    ];

    /// Lowercase method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Head => "head",
            Self::Options => "options",
            Self::Trace => "trace",
            Self::All => "all",
        }
    }

    /// Concrete methods this method stands for.
    pub fn expand(self) -> &'static [Method] {
        match self {
            Self::All => &Self::STANDARD,
            Self::Get => &[Method::Get],
            Self::Post => &[Method::Post],
            Self::Put => &[Method::Put],
            Self::Delete => &[Method::Delete],
            Self::Patch => &[Method::Patch],
            Self::Head => &[Method::Head],
            Self::Options => &[Method::Options],
            Self::Trace => &[Method::Trace],
        }
    }

    /// Whether requests with this method may carry a body.
    pub fn allows_body(self) -> bool {
        !matches!(self, Self::Get | Self::Head)
    }
}

impl FromStr for Method {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            "patch" => Ok(Self::Patch),
            "head" => Ok(Self::Head),
            "options" => Ok(Self::Options),
            "trace" => Ok(Self::Trace),
            "all" | "*" => Ok(Self::All),
            _ => Err(CoreError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Response slot: one schema for status 200, or a map keyed by status.
#[derive(Debug, Clone)]
pub enum ResponseSlot {
    /// Schema of the implicit `200` response.
    Single(SchemaInput),
    /// Schemas keyed by status code (`"200"`, `"4XX"`, `"default"`).
    ByStatus(IndexMap<String, SchemaInput>),
}

impl ResponseSlot {
    /// Status used for a single-schema slot.
    pub const DEFAULT_STATUS: &'static str = "200";

    /// Status-keyed view of this slot.
    pub fn to_status_map(&self) -> IndexMap<String, SchemaInput> {
        match self {
            Self::Single(schema) => {
                IndexMap::from([(Self::DEFAULT_STATUS.to_string(), schema.clone())])
            }
            Self::ByStatus(map) => map.clone(),
        }
    }
}

impl From<SchemaInput> for ResponseSlot {
    fn from(schema: SchemaInput) -> Self {
        Self::Single(schema)
    }
}

/// Whether a key names a response status.
pub fn is_status_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    key == "default"
        || (bytes.len() == 3
            && (b'1'..=b'5').contains(&bytes[0])
            && bytes[1..].iter().all(|b| b.is_ascii_digit() || *b == b'X'))
}

/// A status map has only status keys and at least one numeric one, so a
/// bare schema carrying a `default` keyword stays a single schema.
fn is_status_map(map: &serde_json::Map<String, Value>) -> bool {
    map.keys().all(|key| is_status_key(key)) && map.keys().any(|key| key != "default")
}

impl Serialize for ResponseSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(schema) => schema.serialize(serializer),
            Self::ByStatus(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Object(map) if is_status_map(&map) => map
                .into_iter()
                .map(|(status, schema)| SchemaInput::classify(schema).map(|schema| (status, schema)))
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(Self::ByStatus)
                .map_err(serde::de::Error::custom),
            other => SchemaInput::classify(other)
                .map(Self::Single)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// The six schema slots of a route or guard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hooks {
    /// Path parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<SchemaInput>,
    /// Query string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<SchemaInput>,
    /// Request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<SchemaInput>,
    /// Cookies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<SchemaInput>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<SchemaInput>,
    /// Response schemas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseSlot>,
}

/// Slots contributed by an ancestor scope.
pub type Guard = Hooks;

impl Hooks {
    /// Create empty slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the params slot.
    #[must_use]
    pub fn params(mut self, schema: impl Into<SchemaInput>) -> Self {
        self.params = Some(schema.into());
        self
    }

    /// Set the query slot.
    #[must_use]
    pub fn query(mut self, schema: impl Into<SchemaInput>) -> Self {
        self.query = Some(schema.into());
        self
    }

    /// Set the headers slot.
    #[must_use]
    pub fn headers(mut self, schema: impl Into<SchemaInput>) -> Self {
        self.headers = Some(schema.into());
        self
    }

    /// Set the cookie slot.
    #[must_use]
    pub fn cookie(mut self, schema: impl Into<SchemaInput>) -> Self {
        self.cookie = Some(schema.into());
        self
    }

    /// Set the body slot.
    #[must_use]
    pub fn body(mut self, schema: impl Into<SchemaInput>) -> Self {
        self.body = Some(schema.into());
        self
    }

    /// Set a single response schema (status 200).
    #[must_use]
    pub fn response(mut self, schema: impl Into<SchemaInput>) -> Self {
        self.response = Some(ResponseSlot::Single(schema.into()));
        self
    }

    /// Add a response schema for a status, promoting a single schema to a
    /// status map first.
    #[must_use]
    pub fn response_status(mut self, status: impl Into<String>, schema: impl Into<SchemaInput>) -> Self {
        let mut map = self
            .response
            .as_ref()
            .map(ResponseSlot::to_status_map)
            .unwrap_or_default();
        map.insert(status.into(), schema.into());
        self.response = Some(ResponseSlot::ByStatus(map));
        self
    }

    /// Whether no slot is set.
    pub fn is_empty(&self) -> bool {
        self.params.is_none()
            && self.query.is_none()
            && self.headers.is_none()
            && self.cookie.is_none()
            && self.body.is_none()
            && self.response.is_none()
    }
}

/// A request body parser declared on a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parser {
    /// A named format such as `json` or `multipart/form-data`.
    Named(String),
    /// A custom parser function; it names no content type.
    Custom(Value),
}

/// Human-authored operation metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grouping tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Explicit operation id, overriding the synthesized one.
    #[serde(default, rename = "operationId", alias = "operation_id", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Deprecation flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Hide the operation from the document.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hide: bool,
    /// Any other keys, copied verbatim into the operation.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// An endpoint descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// Path pattern, e.g. `/users/:id?`.
    pub path: String,
    /// The route's own schema slots.
    #[serde(flatten)]
    pub hooks: Hooks,
    /// Ancestor guard slots, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guards: Vec<Guard>,
    /// Hide the route from the document.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hide: bool,
    /// Declared body parsers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parsers: Vec<Parser>,
    /// Operation metadata.
    #[serde(default)]
    pub detail: Detail,
}

impl Route {
    /// Create a route with empty slots.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            hooks: Hooks::default(),
            guards: Vec::new(),
            hide: false,
            parsers: Vec::new(),
            detail: Detail::default(),
        }
    }

    /// Replace the route's own slots.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Append a guard; guards are applied in the order they are added.
    #[must_use]
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Declare a body parser.
    #[must_use]
    pub fn parser(mut self, parser: impl Into<String>) -> Self {
        self.parsers.push(Parser::Named(parser.into()));
        self
    }

    /// Set operation metadata.
    #[must_use]
    pub fn detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    /// Hide the route.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hide = true;
        self
    }

    /// Whether the route or its metadata asks to be hidden.
    pub fn is_hidden(&self) -> bool {
        self.hide || self.detail.hide
    }

    /// Fold the guard chain into the route's own slots.
    ///
    /// Guards merge outer to inner, then the route's slots are merged on
    /// top. The result has no guards, so flattening it again returns an
    /// equivalent route.
    #[must_use]
    pub fn flatten(&self, normalizer: &Normalizer) -> Route {
        if self.guards.is_empty() {
            return self.clone();
        }

        let guarded = self
            .guards
            .iter()
            .fold(Hooks::default(), |outer, guard| merge_hooks(&outer, guard, normalizer));

        Route {
            hooks: merge_hooks(&guarded, &self.hooks, normalizer),
            guards: Vec::new(),
            ..self.clone()
        }
    }
}
