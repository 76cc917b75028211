//! Canonical schema representation.
//!
//! Every schema that enters the engine, whatever vendor produced it, ends up
//! as a [`Schema`]: a tree of nodes discriminated by [`SchemaKind`] with a
//! shared set of annotations. Nothing vendor specific survives past this
//! point.
//!
//! The canonical form reads from and writes to JSON Schema, which is also
//! the wire format used by [`Serialize`] and [`Deserialize`]:
//!
//! ```rust
//! use scribe_core::{Schema, SchemaKind};
//! use serde_json::json;
//!
//! let schema = Schema::from_json_schema(&json!({
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } },
//!     "required": ["name"]
//! }))
//! .unwrap();
//!
//! let object = schema.as_object().unwrap();
//! assert_eq!(object.required, vec!["name".to_string()]);
//! assert_eq!(object.properties["name"].kind, SchemaKind::String);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// Pointer prefix used for component references.
pub const COMPONENTS_PREFIX: &str = "#/components/schemas/";

/// Validation keywords carried through untouched.
///
/// Anything outside this list (and outside the modelled fields) is dropped
/// when reading JSON Schema, which keeps vendor markers out of the output.
pub const CONSTRAINT_KEYWORDS: &[&str] = &[
    "minLength",
    "maxLength",
    "pattern",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "multipleOf",
    "minItems",
    "maxItems",
    "uniqueItems",
    "minProperties",
    "maxProperties",
    "readOnly",
    "writeOnly",
    "deprecated",
];

/// Discriminator of a canonical schema node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SchemaKind {
    /// Object with named properties.
    Object(ObjectSchema),
    /// Homogeneous array.
    Array(Box<Schema>),
    /// String value.
    String,
    /// Floating point number.
    Number,
    /// Integer number.
    Integer,
    /// Boolean value.
    Boolean,
    /// JSON `null`.
    Null,
    /// No value at all (a handler returning nothing).
    Void,
    /// Explicitly undefined value.
    Undefined,
    /// Any one of the member schemas.
    Union(Vec<Schema>),
    /// All of the member schemas at once.
    Intersection(Vec<Schema>),
    /// Named pointer into the component table.
    Reference(String),
    /// Anything.
    #[default]
    Unknown,
}

/// Object-specific schema fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Properties in declaration order.
    pub properties: IndexMap<String, Schema>,
    /// Names of required properties.
    pub required: Vec<String>,
    /// Whether undeclared properties are allowed. `None` means unspecified.
    pub additional_properties: Option<bool>,
}

impl ObjectSchema {
    /// Whether the named property is listed as required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// A node of the canonical schema tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    /// Kind discriminator with kind-specific data.
    pub kind: SchemaKind,
    /// Human readable description.
    pub description: Option<String>,
    /// Short title.
    pub title: Option<String>,
    /// Format hint (e.g. `date-time`).
    pub format: Option<String>,
    /// Single allowed value.
    pub constant: Option<Value>,
    /// Allowed values.
    pub enum_values: Vec<Value>,
    /// Default value.
    pub default: Option<Value>,
    /// Example values.
    pub examples: Vec<Value>,
    /// Validation keywords from [`CONSTRAINT_KEYWORDS`].
    pub constraints: IndexMap<String, Value>,
}

impl Schema {
    /// Create a schema of the given kind with no annotations.
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Create a schema accepting anything.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(SchemaKind::Unknown)
    }

    /// Create a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    /// Create a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    /// Create an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    /// Create a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    /// Create a null schema.
    #[must_use]
    pub fn null() -> Self {
        Self::new(SchemaKind::Null)
    }

    /// Create a void schema.
    #[must_use]
    pub fn void() -> Self {
        Self::new(SchemaKind::Void)
    }

    /// Create an undefined schema.
    #[must_use]
    pub fn undefined() -> Self {
        Self::new(SchemaKind::Undefined)
    }

    /// Create an array schema with the given item schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::new(SchemaKind::Array(Box::new(items)))
    }

    /// Create an empty object schema.
    #[must_use]
    pub fn object() -> Self {
        Self::new(SchemaKind::Object(ObjectSchema::default()))
    }

    /// Create a union schema.
    #[must_use]
    pub fn union(members: Vec<Schema>) -> Self {
        Self::new(SchemaKind::Union(members))
    }

    /// Create an intersection schema.
    #[must_use]
    pub fn intersection(members: Vec<Schema>) -> Self {
        Self::new(SchemaKind::Intersection(members))
    }

    /// Create a reference. Accepts either a bare name or a full pointer.
    #[must_use]
    pub fn reference(name: impl AsRef<str>) -> Self {
        Self::new(SchemaKind::Reference(
            reference_name(name.as_ref()).to_string(),
        ))
    }

    /// Create a single-constant schema, inferring the kind from the value.
    #[must_use]
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            kind: kind_of_value(&value),
            constant: Some(value),
            ..Default::default()
        }
    }

    /// Add a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a format hint.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Add a property to an object schema. No-op for other kinds.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        if let SchemaKind::Object(object) = &mut self.kind {
            object.properties.insert(name.into(), schema);
        }
        self
    }

    /// Mark a property as required. No-op for other kinds.
    #[must_use]
    pub fn required_property(mut self, name: impl Into<String>) -> Self {
        if let SchemaKind::Object(object) = &mut self.kind {
            let name = name.into();
            if !object.required.contains(&name) {
                object.required.push(name);
            }
        }
        self
    }

    /// Set whether undeclared properties are allowed. No-op for other kinds.
    #[must_use]
    pub fn additional_properties(mut self, allowed: bool) -> Self {
        if let SchemaKind::Object(object) = &mut self.kind {
            object.additional_properties = Some(allowed);
        }
        self
    }

    /// Object fields, if this is an object schema.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.kind {
            SchemaKind::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Target name, if this is a reference.
    pub fn reference_target(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::Reference(name) => Some(name),
            _ => None,
        }
    }

    /// Whether this is an object with at least one property.
    pub fn has_properties(&self) -> bool {
        self.as_object()
            .is_some_and(|object| !object.properties.is_empty())
    }

    /// Whether this schema pins a single constant value.
    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    /// Scalar kinds that travel as plain text.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self.kind,
            SchemaKind::String | SchemaKind::Number | SchemaKind::Integer | SchemaKind::Boolean
        )
    }

    /// Kinds that describe the absence of a payload.
    pub fn is_void(&self) -> bool {
        matches!(
            self.kind,
            SchemaKind::Void | SchemaKind::Undefined | SchemaKind::Null
        )
    }

    /// Short name of the kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            SchemaKind::Object(_) => "object",
            SchemaKind::Array(_) => "array",
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
            SchemaKind::Void => "void",
            SchemaKind::Undefined => "undefined",
            SchemaKind::Union(_) => "union",
            SchemaKind::Intersection(_) => "intersection",
            SchemaKind::Reference(_) => "reference",
            SchemaKind::Unknown => "unknown",
        }
    }

    /// Rewrite unions of constants into string enums, recursively.
    ///
    /// `"male" | "female"` becomes `{ type: string, enum: [male, female] }`.
    /// Unions with any non-constant member are left as they are.
    #[must_use]
    pub fn fold_enums(self) -> Self {
        let mut schema = self;
        schema.kind = match schema.kind {
            SchemaKind::Object(object) => SchemaKind::Object(ObjectSchema {
                properties: object
                    .properties
                    .into_iter()
                    .map(|(name, property)| (name, property.fold_enums()))
                    .collect(),
                ..object
            }),
            SchemaKind::Array(items) => SchemaKind::Array(Box::new(items.fold_enums())),
            SchemaKind::Union(members) => {
                let members: Vec<Schema> = members.into_iter().map(Schema::fold_enums).collect();
                if !members.is_empty() && members.iter().all(Schema::is_constant) {
                    schema.enum_values = members.into_iter().filter_map(|m| m.constant).collect();
                    SchemaKind::String
                } else {
                    SchemaKind::Union(members)
                }
            }
            SchemaKind::Intersection(members) => {
                SchemaKind::Intersection(members.into_iter().map(Schema::fold_enums).collect())
            }
            other => other,
        };
        schema
    }

    /// Read a JSON Schema document into canonical form.
    pub fn from_json_schema(value: &Value) -> CoreResult<Self> {
        parse_node(value, "")
    }

    /// Render this schema as a JSON Schema document.
    pub fn to_json_schema(&self) -> Value {
        let mut map = Map::new();

        match &self.kind {
            SchemaKind::Object(object) => {
                map.insert("type".into(), "object".into());
                if !object.properties.is_empty() {
                    let properties: Map<String, Value> = object
                        .properties
                        .iter()
                        .map(|(name, property)| (name.clone(), property.to_json_schema()))
                        .collect();
                    map.insert("properties".into(), Value::Object(properties));
                }
                if !object.required.is_empty() {
                    map.insert("required".into(), object.required.clone().into());
                }
                if let Some(allowed) = object.additional_properties {
                    map.insert("additionalProperties".into(), allowed.into());
                }
            }
            SchemaKind::Array(items) => {
                map.insert("type".into(), "array".into());
                map.insert("items".into(), items.to_json_schema());
            }
            SchemaKind::Union(members) => {
                map.insert("anyOf".into(), members_to_json(members));
            }
            SchemaKind::Intersection(members) => {
                map.insert("allOf".into(), members_to_json(members));
            }
            SchemaKind::Reference(name) => {
                map.insert("$ref".into(), format!("{COMPONENTS_PREFIX}{name}").into());
            }
            SchemaKind::Unknown => {}
            _ => {
                map.insert("type".into(), self.kind_name().into());
            }
        }

        if let Some(description) = &self.description {
            map.insert("description".into(), description.clone().into());
        }
        if let Some(title) = &self.title {
            map.insert("title".into(), title.clone().into());
        }
        if let Some(format) = &self.format {
            map.insert("format".into(), format.clone().into());
        }
        if let Some(constant) = &self.constant {
            map.insert("const".into(), constant.clone());
        }
        if !self.enum_values.is_empty() {
            map.insert("enum".into(), Value::Array(self.enum_values.clone()));
        }
        if let Some(default) = &self.default {
            map.insert("default".into(), default.clone());
        }
        if !self.examples.is_empty() {
            map.insert("examples".into(), Value::Array(self.examples.clone()));
        }
        for (keyword, value) in &self.constraints {
            map.insert(keyword.clone(), value.clone());
        }

        Value::Object(map)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_schema().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json_schema(&value).map_err(serde::de::Error::custom)
    }
}

/// Extract the component name from a reference pointer.
///
/// `#/components/schemas/User` and `#/definitions/User` both yield `User`;
/// a bare name is returned unchanged.
pub fn reference_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

fn members_to_json(members: &[Schema]) -> Value {
    Value::Array(members.iter().map(Schema::to_json_schema).collect())
}

fn kind_of_value(value: &Value) -> SchemaKind {
    match value {
        Value::String(_) => SchemaKind::String,
        Value::Bool(_) => SchemaKind::Boolean,
        Value::Number(number) if number.is_i64() || number.is_u64() => SchemaKind::Integer,
        Value::Number(_) => SchemaKind::Number,
        Value::Null => SchemaKind::Null,
        Value::Array(_) => SchemaKind::Array(Box::new(Schema::unknown())),
        Value::Object(_) => SchemaKind::Object(ObjectSchema::default()),
    }
}

fn parse_node(value: &Value, pointer: &str) -> CoreResult<Schema> {
    let map = match value {
        Value::Bool(true) => return Ok(Schema::unknown()),
        Value::Object(map) => map,
        Value::Bool(false) => {
            return Err(CoreError::invalid_schema(
                pointer,
                "the `false` schema has no canonical form",
            ))
        }
        _ => {
            return Err(CoreError::invalid_schema(
                pointer,
                "expected an object or boolean schema",
            ))
        }
    };

    let mut schema = Schema::new(parse_kind(map, pointer)?);
    schema.description = string_field(map, "description");
    schema.title = string_field(map, "title");
    schema.format = string_field(map, "format");
    schema.constant = map.get("const").cloned();
    schema.default = map.get("default").cloned();

    if let Some(values) = map.get("enum") {
        schema.enum_values = values
            .as_array()
            .cloned()
            .ok_or_else(|| CoreError::invalid_schema(pointer, "`enum` must be an array"))?;
    }

    match (map.get("examples"), map.get("example")) {
        (Some(Value::Array(examples)), _) => schema.examples = examples.clone(),
        (_, Some(example)) => schema.examples = vec![example.clone()],
        _ => {}
    }

    for keyword in CONSTRAINT_KEYWORDS {
        if let Some(value) = map.get(*keyword) {
            schema.constraints.insert((*keyword).to_string(), value.clone());
        }
    }

    Ok(schema)
}

fn parse_kind(map: &Map<String, Value>, pointer: &str) -> CoreResult<SchemaKind> {
    if let Some(target) = map.get("$ref") {
        let target = target
            .as_str()
            .ok_or_else(|| CoreError::invalid_schema(pointer, "`$ref` must be a string"))?;
        return Ok(SchemaKind::Reference(reference_name(target).to_string()));
    }

    if let Some(members) = map.get("anyOf").or_else(|| map.get("oneOf")) {
        return Ok(SchemaKind::Union(parse_members(members, pointer, "anyOf")?));
    }

    if let Some(members) = map.get("allOf") {
        return Ok(SchemaKind::Intersection(parse_members(
            members, pointer, "allOf",
        )?));
    }

    match map.get("type") {
        Some(Value::String(name)) => kind_for_type(name, map, pointer),
        Some(Value::Array(names)) => {
            let mut kinds = names
                .iter()
                .map(|name| {
                    name.as_str()
                        .ok_or_else(|| CoreError::invalid_schema(pointer, "`type` entries must be strings"))
                        .and_then(|name| kind_for_type(name, map, pointer))
                })
                .collect::<CoreResult<Vec<_>>>()?;
            if kinds.len() == 1 {
                Ok(kinds.remove(0))
            } else {
                Ok(SchemaKind::Union(kinds.into_iter().map(Schema::new).collect()))
            }
        }
        Some(_) => Err(CoreError::invalid_schema(
            pointer,
            "`type` must be a string or an array of strings",
        )),
        None => {
            if map.contains_key("properties") {
                kind_for_type("object", map, pointer)
            } else if map.contains_key("items") {
                kind_for_type("array", map, pointer)
            } else if let Some(constant) = map.get("const") {
                Ok(kind_of_value(constant))
            } else if let Some(first) = map.get("enum").and_then(Value::as_array).and_then(|v| v.first()) {
                Ok(kind_of_value(first))
            } else {
                Ok(SchemaKind::Unknown)
            }
        }
    }
}

fn kind_for_type(name: &str, map: &Map<String, Value>, pointer: &str) -> CoreResult<SchemaKind> {
    match name {
        "object" => Ok(SchemaKind::Object(parse_object(map, pointer)?)),
        "array" => {
            let items = match map.get("items") {
                Some(tuple @ Value::Array(_)) => Schema::union(parse_members(tuple, pointer, "items")?),
                Some(items) => parse_node(items, &format!("{pointer}/items"))?,
                None => Schema::unknown(),
            };
            Ok(SchemaKind::Array(Box::new(items)))
        }
        "string" => Ok(SchemaKind::String),
        "number" => Ok(SchemaKind::Number),
        "integer" => Ok(SchemaKind::Integer),
        "boolean" => Ok(SchemaKind::Boolean),
        "null" => Ok(SchemaKind::Null),
        "void" => Ok(SchemaKind::Void),
        "undefined" => Ok(SchemaKind::Undefined),
        other => Err(CoreError::invalid_schema(
            pointer,
            format!("unsupported type '{other}'"),
        )),
    }
}

fn parse_object(map: &Map<String, Value>, pointer: &str) -> CoreResult<ObjectSchema> {
    let mut object = ObjectSchema::default();

    if let Some(properties) = map.get("properties") {
        let properties = properties
            .as_object()
            .ok_or_else(|| CoreError::invalid_schema(pointer, "`properties` must be an object"))?;
        for (name, property) in properties {
            let property = parse_node(property, &format!("{pointer}/properties/{name}"))?;
            object.properties.insert(name.clone(), property);
        }
    }

    if let Some(required) = map.get("required") {
        object.required = required
            .as_array()
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .ok_or_else(|| CoreError::invalid_schema(pointer, "`required` must be an array"))?;
    }

    object.additional_properties = match map.get("additionalProperties") {
        Some(Value::Bool(allowed)) => Some(*allowed),
        Some(Value::Object(_)) => Some(true),
        _ => None,
    };

    Ok(object)
}

fn parse_members(value: &Value, pointer: &str, keyword: &str) -> CoreResult<Vec<Schema>> {
    value
        .as_array()
        .ok_or_else(|| CoreError::invalid_schema(pointer, format!("`{keyword}` must be an array")))?
        .iter()
        .enumerate()
        .map(|(index, member)| parse_node(member, &format!("{pointer}/{keyword}/{index}")))
        .collect()
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_builders() {
        let object = Schema::object()
            .property("name", Schema::string())
            .required_property("name")
            .required_property("name");
        let fields = object.as_object().unwrap();
        assert!(fields.properties.contains_key("name"));
        assert_eq!(fields.required, vec!["name".to_string()]);

        let array = Schema::array(Schema::integer());
        assert_eq!(array.kind_name(), "array");

        let reference = Schema::reference("#/components/schemas/User");
        assert_eq!(reference.reference_target(), Some("User"));
    }

    #[test]
    fn test_property_on_non_object_is_ignored() {
        let schema = Schema::string().property("x", Schema::string());
        assert_eq!(schema, Schema::string());
    }

    #[test]
    fn test_constant_infers_kind() {
        assert_eq!(Schema::constant("male").kind, SchemaKind::String);
        assert_eq!(Schema::constant(3).kind, SchemaKind::Integer);
        assert_eq!(Schema::constant(1.5).kind, SchemaKind::Number);
        assert_eq!(Schema::constant(true).kind, SchemaKind::Boolean);
    }

    #[test]
    fn test_fold_constant_union() {
        let union = Schema::union(vec![Schema::constant("male"), Schema::constant("female")]);
        let folded = union.fold_enums();
        assert_eq!(folded.kind, SchemaKind::String);
        assert_eq!(folded.enum_values, vec![json!("male"), json!("female")]);
    }

    #[test]
    fn test_fold_leaves_mixed_union() {
        let union = Schema::union(vec![Schema::constant("male"), Schema::string()]);
        let folded = union.clone().fold_enums();
        assert_eq!(folded, union);
    }

    #[test]
    fn test_fold_recurses_into_properties_and_items() {
        let gender = Schema::union(vec![Schema::constant("a"), Schema::constant("b")]);
        let schema = Schema::object()
            .property("gender", gender.clone())
            .property("tags", Schema::array(gender));

        let folded = schema.fold_enums();
        let object = folded.as_object().unwrap();
        assert_eq!(object.properties["gender"].kind, SchemaKind::String);
        match &object.properties["tags"].kind {
            SchemaKind::Array(items) => assert_eq!(items.enum_values.len(), 2),
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_schema_object() {
        let schema = Schema::from_json_schema(&json!({
            "type": "object",
            "description": "A user",
            "properties": {
                "id": { "type": "integer", "minimum": 1 },
                "email": { "type": "string", "format": "email" }
            },
            "required": ["id"],
            "additionalProperties": false
        }))
        .unwrap();

        assert_eq!(schema.description.as_deref(), Some("A user"));
        let object = schema.as_object().unwrap();
        assert_eq!(object.additional_properties, Some(false));
        assert!(object.is_required("id"));
        assert!(!object.is_required("email"));
        assert_eq!(object.properties["id"].constraints["minimum"], json!(1));
        assert_eq!(object.properties["email"].format.as_deref(), Some("email"));
    }

    #[test]
    fn test_from_json_schema_composites() {
        let union = Schema::from_json_schema(&json!({ "anyOf": [{ "type": "string" }, { "type": "null" }] })).unwrap();
        assert!(matches!(union.kind, SchemaKind::Union(ref m) if m.len() == 2));

        let nullable = Schema::from_json_schema(&json!({ "type": ["string", "null"] })).unwrap();
        assert!(matches!(nullable.kind, SchemaKind::Union(ref m) if m.len() == 2));

        let all = Schema::from_json_schema(&json!({ "allOf": [{ "$ref": "#/components/schemas/A" }] })).unwrap();
        assert!(matches!(all.kind, SchemaKind::Intersection(_)));

        let reference = Schema::from_json_schema(&json!({ "$ref": "#/definitions/User" })).unwrap();
        assert_eq!(reference.reference_target(), Some("User"));
    }

    #[test]
    fn test_from_json_schema_void_and_unknown() {
        assert_eq!(Schema::from_json_schema(&json!({ "type": "void" })).unwrap().kind, SchemaKind::Void);
        assert_eq!(Schema::from_json_schema(&json!({})).unwrap().kind, SchemaKind::Unknown);
        assert_eq!(Schema::from_json_schema(&json!(true)).unwrap().kind, SchemaKind::Unknown);
    }

    #[test]
    fn test_from_json_schema_rejects_garbage() {
        assert!(Schema::from_json_schema(&json!(42)).is_err());
        assert!(Schema::from_json_schema(&json!({ "type": "tuple" })).is_err());

        let err = Schema::from_json_schema(&json!({
            "type": "object",
            "properties": { "bad": { "type": 7 } }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("/properties/bad"));
    }

    #[test]
    fn test_to_json_schema_shapes() {
        let schema = Schema::object()
            .property("tags", Schema::array(Schema::string()))
            .property("owner", Schema::reference("User"))
            .required_property("tags")
            .additional_properties(false);

        assert_eq!(
            schema.to_json_schema(),
            json!({
                "type": "object",
                "properties": {
                    "tags": { "type": "array", "items": { "type": "string" } },
                    "owner": { "$ref": "#/components/schemas/User" }
                },
                "required": ["tags"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn test_serde_uses_json_schema() {
        let schema: Schema = serde_json::from_value(json!({ "type": "string", "const": "x" })).unwrap();
        assert!(schema.is_constant());
        assert_eq!(serde_json::to_value(&schema).unwrap(), json!({ "type": "string", "const": "x" }));
    }

    #[test]
    fn test_reference_name() {
        assert_eq!(reference_name("#/components/schemas/Pet"), "Pet");
        assert_eq!(reference_name("Pet"), "Pet");
    }
}
