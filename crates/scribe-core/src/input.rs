//! Classification of external schema input.
//!
//! Input from a route registry is classified exactly once, when it crosses
//! into the engine. Downstream code matches on [`SchemaInput`] and never
//! probes raw shapes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreResult;
use crate::schema::Schema;
use crate::vendor::VendorSchema;

/// A schema slot value as supplied by the route registry.
#[derive(Debug, Clone)]
pub enum SchemaInput {
    /// Reference to a component schema by name.
    Named(String),
    /// Schema already in canonical form.
    Canonical(Schema),
    /// Schema authored with a third-party library.
    Vendor(VendorSchema),
}

impl SchemaInput {
    /// Classify a raw JSON value.
    ///
    /// - strings are named references,
    /// - objects carrying a `~standard.vendor` marker are vendor schemas,
    /// - everything else is read as JSON Schema.
    ///
    /// ```rust
    /// use scribe_core::SchemaInput;
    /// use serde_json::json;
    ///
    /// assert!(matches!(SchemaInput::classify(json!("User")).unwrap(), SchemaInput::Named(_)));
    /// assert!(matches!(
    ///     SchemaInput::classify(json!({ "~standard": { "vendor": "zod" } })).unwrap(),
    ///     SchemaInput::Vendor(_)
    /// ));
    /// assert!(matches!(
    ///     SchemaInput::classify(json!({ "type": "string" })).unwrap(),
    ///     SchemaInput::Canonical(_)
    /// ));
    /// ```
    pub fn classify(value: Value) -> CoreResult<Self> {
        if let Value::String(name) = value {
            return Ok(Self::Named(name));
        }
        if let Some(vendor) = VendorSchema::detect(&value) {
            let vendor = vendor.to_string();
            return Ok(Self::Vendor(VendorSchema::new(vendor, value)));
        }
        Schema::from_json_schema(&value).map(Self::Canonical)
    }

    /// The canonical schema, if this input is already canonical.
    pub fn as_canonical(&self) -> Option<&Schema> {
        match self {
            Self::Canonical(schema) => Some(schema),
            _ => None,
        }
    }
}

impl From<Schema> for SchemaInput {
    fn from(schema: Schema) -> Self {
        Self::Canonical(schema)
    }
}

impl From<VendorSchema> for SchemaInput {
    fn from(schema: VendorSchema) -> Self {
        Self::Vendor(schema)
    }
}

impl From<&str> for SchemaInput {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for SchemaInput {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl Serialize for SchemaInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(name) => serializer.serialize_str(name),
            Self::Canonical(schema) => schema.serialize(serializer),
            Self::Vendor(schema) => schema.payload().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::classify(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_named() {
        match SchemaInput::classify(json!("Pet")).unwrap() {
            SchemaInput::Named(name) => assert_eq!(name, "Pet"),
            other => panic!("expected named, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_vendor_keeps_payload() {
        let value = json!({ "~standard": { "vendor": "valibot" }, "jsonSchema": { "type": "string" } });
        match SchemaInput::classify(value.clone()).unwrap() {
            SchemaInput::Vendor(schema) => {
                assert_eq!(schema.vendor(), "valibot");
                assert_eq!(schema.payload(), &value);
            }
            other => panic!("expected vendor, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_invalid_json_schema() {
        assert!(SchemaInput::classify(json!(12)).is_err());
    }

    #[test]
    fn test_serde_round_trip_preserves_variant() {
        let inputs: Vec<SchemaInput> =
            serde_json::from_value(json!(["User", { "type": "integer" }])).unwrap();
        assert!(matches!(inputs[0], SchemaInput::Named(_)));
        assert_eq!(inputs[1].as_canonical(), Some(&Schema::integer()));

        let json = serde_json::to_value(&inputs).unwrap();
        assert_eq!(json, json!(["User", { "type": "integer" }]));
    }
}
