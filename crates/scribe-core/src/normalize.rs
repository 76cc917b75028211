//! Canonical schema normalization.
//!
//! The [`Normalizer`] turns any [`SchemaInput`] into a canonical [`Schema`].
//! Failures never escape: unsupported vendors and broken conversions are
//! logged and reported as `None`, which callers treat as an absent slot.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::definitions::Definitions;
use crate::input::SchemaInput;
use crate::schema::Schema;
use crate::vendor::{first_unsupported_warning, Direction, VendorRegistry, VendorSchema};

/// Converts schema input into canonical form.
///
/// # Example
///
/// ```rust
/// use scribe_core::{Direction, Normalizer, Schema, SchemaInput, SchemaKind, VendorRegistry};
///
/// let normalizer = Normalizer::new(VendorRegistry::new());
/// let gender = SchemaInput::from(Schema::union(vec![
///     Schema::constant("male"),
///     Schema::constant("female"),
/// ]));
///
/// let schema = normalizer.normalize(&gender, Direction::Input).unwrap();
/// assert_eq!(schema.kind, SchemaKind::String);
/// assert_eq!(schema.enum_values.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    vendors: VendorRegistry,
    definitions: Definitions,
}

impl Normalizer {
    /// Create a normalizer with the given vendor converters and no
    /// component schemas.
    #[must_use]
    pub fn new(vendors: VendorRegistry) -> Self {
        Self {
            vendors,
            definitions: Definitions::new(),
        }
    }

    /// Normalize and register component schemas.
    ///
    /// Entries that cannot be normalized are skipped.
    #[must_use]
    pub fn with_definitions(mut self, definitions: &IndexMap<String, SchemaInput>) -> Self {
        for (name, input) in definitions {
            match self.normalize(input, Direction::Input) {
                Some(schema) => self.definitions.insert(name.clone(), schema),
                None => debug!(schema = %name, "Skipping component schema that could not be normalized"),
            }
        }
        self
    }

    /// Registered component schemas.
    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Vendor converters in use.
    pub fn vendors(&self) -> &VendorRegistry {
        &self.vendors
    }

    /// Normalize one input.
    ///
    /// Named inputs become references, canonical inputs have their enum
    /// unions folded and vendor inputs go through the converter chain.
    pub fn normalize(&self, input: &SchemaInput, direction: Direction) -> Option<Schema> {
        match input {
            SchemaInput::Named(name) => Some(Schema::reference(name)),
            SchemaInput::Canonical(schema) => Some(schema.clone().fold_enums()),
            SchemaInput::Vendor(schema) => self
                .convert_vendor(schema, direction)
                .map(Schema::fold_enums),
        }
    }

    /// Inline-expand a reference against the component table.
    pub fn resolve<'a>(&'a self, schema: &'a Schema) -> &'a Schema {
        self.definitions.resolve(schema)
    }

    /// Copy documentation from a reference's target, keeping the pointer.
    #[must_use]
    pub fn annotate(&self, schema: &Schema) -> Schema {
        self.definitions.annotate(schema)
    }

    fn convert_vendor(&self, schema: &VendorSchema, direction: Direction) -> Option<Schema> {
        let vendor = schema.vendor();

        if let Some(converter) = self.vendors.get(vendor) {
            if let Some(converted) = converter.convert(schema, direction) {
                return Some(converted);
            }
            debug!(vendor, "Registered converter declined schema, trying fallbacks");
        }

        if let Some(native) = schema.native() {
            if let Some(converted) = native
                .to_json_schema(direction)
                .and_then(|value| self.parse_converted(vendor, &value))
            {
                return Some(converted);
            }
        }

        if let Some(embedded) = schema.embedded_json_schema(direction) {
            if let Some(converted) = self.parse_converted(vendor, &embedded) {
                return Some(converted);
            }
        }

        if first_unsupported_warning(vendor) {
            warn!(
                vendor,
                "Unsupported schema vendor, register a converter to include these schemas"
            );
        }
        None
    }

    fn parse_converted(&self, vendor: &str, value: &serde_json::Value) -> Option<Schema> {
        match Schema::from_json_schema(value) {
            Ok(schema) => Some(schema),
            Err(error) => {
                warn!(vendor, error = %error, "Vendor schema conversion produced invalid JSON Schema");
                None
            }
        }
    }
}
