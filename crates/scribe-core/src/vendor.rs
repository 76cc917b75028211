//! Vendor schema conversion strategies.
//!
//! Schemas authored with third-party libraries arrive as [`VendorSchema`]
//! values. The [`VendorRegistry`] maps a vendor name to a [`VendorConverter`];
//! the normalizer consults it first, then the schema's own
//! [`NativeSchema`] capability, then a probe over well-known embedded keys.
//!
//! ```rust
//! use scribe_core::{Direction, Schema, VendorRegistry, VendorSchema};
//! use serde_json::json;
//!
//! let registry = VendorRegistry::new().with("acme", |_: &VendorSchema, _: Direction| {
//!     Some(Schema::string())
//! });
//!
//! assert!(registry.get("acme").is_some());
//! assert!(registry.get("zod").is_none());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::Schema;

/// Key under which standard-schema objects expose their vendor marker.
pub const STANDARD_MARKER: &str = "~standard";

/// Payload keys probed for an embedded JSON Schema, in order.
pub const EMBEDDED_SCHEMA_KEYS: &[&str] = &["jsonSchema", "json_schema", "toJSONSchema"];

/// Which side of the wire a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Data flowing into a handler (requests).
    #[default]
    Input,
    /// Data flowing out of a handler (responses).
    Output,
}

impl Direction {
    /// Lowercase name, matching the embedded `input`/`output` keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

/// Conversion capability carried by a vendor schema itself.
pub trait NativeSchema: Send + Sync + fmt::Debug {
    /// Produce a JSON Schema document for the given direction.
    fn to_json_schema(&self, direction: Direction) -> Option<Value>;
}

/// A schema object produced by a third-party schema library.
#[derive(Debug, Clone)]
pub struct VendorSchema {
    vendor: String,
    payload: Value,
    native: Option<Arc<dyn NativeSchema>>,
}

impl VendorSchema {
    /// Wrap a raw vendor payload.
    #[must_use]
    pub fn new(vendor: impl Into<String>, payload: Value) -> Self {
        Self {
            vendor: vendor.into(),
            payload,
            native: None,
        }
    }

    /// Attach a native conversion capability.
    #[must_use]
    pub fn with_native(mut self, native: Arc<dyn NativeSchema>) -> Self {
        self.native = Some(native);
        self
    }

    /// Vendor name, e.g. `zod`.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Raw payload as received.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Native conversion capability, if any.
    pub fn native(&self) -> Option<&dyn NativeSchema> {
        self.native.as_deref()
    }

    /// JSON Schema embedded in the payload under a well-known key.
    ///
    /// An embedded value may be split into `input`/`output` variants; the
    /// one matching `direction` wins, falling back to the other side.
    /// TypeBox payloads are JSON Schema already and are returned without
    /// their vendor marker.
    pub fn embedded_json_schema(&self, direction: Direction) -> Option<Value> {
        let map = self.payload.as_object()?;

        if self.vendor.eq_ignore_ascii_case("typebox") {
            let mut schema = map.clone();
            schema.remove(STANDARD_MARKER);
            return Some(Value::Object(schema));
        }

        let embedded = EMBEDDED_SCHEMA_KEYS.iter().find_map(|key| map.get(*key))?;
        let Some(split) = embedded.as_object() else {
            return Some(embedded.clone());
        };

        let other = match direction {
            Direction::Input => Direction::Output,
            Direction::Output => Direction::Input,
        };
        if split.contains_key("input") || split.contains_key("output") {
            split
                .get(direction.as_str())
                .or_else(|| split.get(other.as_str()))
                .cloned()
        } else {
            Some(embedded.clone())
        }
    }

    /// Detect a vendor-marked JSON object.
    ///
    /// Returns the vendor name from `~standard.vendor`, if present.
    pub fn detect(value: &Value) -> Option<&str> {
        value.get(STANDARD_MARKER)?.get("vendor")?.as_str()
    }
}

/// Converts a vendor schema into canonical form.
pub trait VendorConverter: Send + Sync {
    /// Convert `schema` for the given direction, or `None` if unsupported.
    fn convert(&self, schema: &VendorSchema, direction: Direction) -> Option<Schema>;
}

impl<F> VendorConverter for F
where
    F: Fn(&VendorSchema, Direction) -> Option<Schema> + Send + Sync,
{
    fn convert(&self, schema: &VendorSchema, direction: Direction) -> Option<Schema> {
        self(schema, direction)
    }
}

/// User-supplied converters keyed by vendor name.
#[derive(Clone, Default)]
pub struct VendorRegistry {
    converters: IndexMap<String, Arc<dyn VendorConverter>>,
}

impl VendorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter for a vendor, replacing any previous one.
    pub fn register(&mut self, vendor: impl Into<String>, converter: impl VendorConverter + 'static) {
        self.converters.insert(vendor.into(), Arc::new(converter));
    }

    /// Builder-style [`VendorRegistry::register`].
    #[must_use]
    pub fn with(mut self, vendor: impl Into<String>, converter: impl VendorConverter + 'static) -> Self {
        self.register(vendor, converter);
        self
    }

    /// Converter registered for a vendor.
    pub fn get(&self, vendor: &str) -> Option<&dyn VendorConverter> {
        self.converters.get(vendor).map(|converter| converter.as_ref())
    }

    /// Registered vendor names.
    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }
}

impl fmt::Debug for VendorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorRegistry")
            .field("vendors", &self.converters.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn warned_vendors() -> &'static Mutex<HashSet<String>> {
    static WARNED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    WARNED.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Record that an unsupported-vendor diagnostic is about to be emitted.
///
/// Returns `true` the first time a vendor is seen in this process and
/// `false` afterwards. The set only ever grows.
pub fn first_unsupported_warning(vendor: &str) -> bool {
    warned_vendors().lock().insert(vendor.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_vendor_marker() {
        let value = json!({ "~standard": { "version": 1, "vendor": "zod" } });
        assert_eq!(VendorSchema::detect(&value), Some("zod"));
        assert_eq!(VendorSchema::detect(&json!({ "type": "string" })), None);
    }

    #[test]
    fn test_embedded_schema_plain() {
        let schema = VendorSchema::new("valibot", json!({ "jsonSchema": { "type": "string" } }));
        assert_eq!(schema.embedded_json_schema(Direction::Input), Some(json!({ "type": "string" })));
    }

    #[test]
    fn test_embedded_schema_split_by_direction() {
        let schema = VendorSchema::new(
            "effect",
            json!({
                "toJSONSchema": {
                    "input": { "type": "string" },
                    "output": { "type": "integer" }
                }
            }),
        );
        assert_eq!(schema.embedded_json_schema(Direction::Input), Some(json!({ "type": "string" })));
        assert_eq!(schema.embedded_json_schema(Direction::Output), Some(json!({ "type": "integer" })));
    }

    #[test]
    fn test_embedded_schema_split_falls_back_to_other_side() {
        let schema = VendorSchema::new("effect", json!({ "jsonSchema": { "input": { "type": "string" } } }));
        assert_eq!(schema.embedded_json_schema(Direction::Output), Some(json!({ "type": "string" })));
    }

    #[test]
    fn test_typebox_payload_is_json_schema() {
        let schema = VendorSchema::new(
            "typebox",
            json!({ "~standard": { "vendor": "typebox" }, "type": "boolean" }),
        );
        assert_eq!(schema.embedded_json_schema(Direction::Input), Some(json!({ "type": "boolean" })));
    }

    #[test]
    fn test_registry_closure_converter() {
        let registry = VendorRegistry::new().with("acme", |_: &VendorSchema, direction: Direction| {
            (direction == Direction::Input).then(Schema::string)
        });
        let converter = registry.get("acme").unwrap();
        let schema = VendorSchema::new("acme", json!({}));
        assert_eq!(converter.convert(&schema, Direction::Input), Some(Schema::string()));
        assert_eq!(converter.convert(&schema, Direction::Output), None);
        assert_eq!(registry.vendors().collect::<Vec<_>>(), vec!["acme"]);
    }

    #[test]
    fn test_first_unsupported_warning_is_once() {
        assert!(first_unsupported_warning("vendor-test-once"));
        assert!(!first_unsupported_warning("vendor-test-once"));
    }
}
