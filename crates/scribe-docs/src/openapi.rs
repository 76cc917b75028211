//! OpenAPI 3.1 document model.
//!
//! These types mirror the subset of the OpenAPI specification the generator
//! writes. Optional members are skipped when empty so that key presence in
//! the serialized document carries meaning (a void response has no
//! `content` key at all).

use indexmap::IndexMap;
use scribe_core::{Method, SchemaKind, COMPONENTS_PREFIX};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OpenAPI version written into every document.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// OpenAPI 3.1 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    /// OpenAPI version (always "3.1.0").
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Server information.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// API paths.
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// API tags, in first-use order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl OpenApi {
    /// Number of operations across all paths.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations().count()).sum()
    }
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Server information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// TRACE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Store an operation under a concrete method.
    ///
    /// The `all` wildcard has no slot of its own and stores nothing; expand it
    /// with [`Method::expand`] first.
    pub fn set(&mut self, method: Method, operation: Operation) {
        if let Some(slot) = self.slot_mut(method) {
            *slot = Some(operation);
        }
    }

    /// Operation stored under a method, if any.
    pub fn operation(&self, method: Method) -> Option<&Operation> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Trace => self.trace.as_ref(),
            Method::All => None,
        }
    }

    /// Stored operations in emission order.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        Method::STANDARD
            .into_iter()
            .filter_map(|method| self.operation(method).map(|operation| (method, operation)))
    }

    fn slot_mut(&mut self, method: Method) -> Option<&mut Option<Operation>> {
        let slot = match method {
            Method::Get => &mut self.get,
            Method::Put => &mut self.put,
            Method::Post => &mut self.post,
            Method::Delete => &mut self.delete,
            Method::Options => &mut self.options,
            Method::Head => &mut self.head,
            Method::Patch => &mut self.patch,
            Method::Trace => &mut self.trace,
            Method::All => return None,
        };
        Some(slot)
    }
}

/// An API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Detailed description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags for grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Operation parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Possible responses.
    pub responses: IndexMap<String, Response>,
    /// Any additional keys supplied with the route metadata.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// URL path parameter.
    Path,
    /// Query string parameter.
    Query,
    /// HTTP header.
    Header,
    /// Cookie.
    Cookie,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Parameter schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Content by media type.
    pub content: IndexMap<String, MediaType>,
}

/// Media type content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Description (required).
    pub description: String,
    /// Response content by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Reusable schemas.
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

/// API tag for grouping operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// JSON Schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// String type.
    String,
    /// Number type.
    Number,
    /// Integer type.
    Integer,
    /// Boolean type.
    Boolean,
    /// Array type.
    Array,
    /// Object type.
    Object,
    /// Null type.
    Null,
}

/// JSON Schema as written into the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    /// Schema format (e.g., "date-time", "email").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference to a component schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Object properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Whether undeclared properties are allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<bool>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Single allowed value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "const")]
    pub const_value: Option<Value>,
    /// Enum values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(rename = "enum")]
    pub enum_values: Vec<Value>,
    /// anyOf schemas.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(rename = "anyOf")]
    pub any_of: Vec<Schema>,
    /// allOf schemas.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(rename = "allOf")]
    pub all_of: Vec<Schema>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Example values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,
    /// Validation keywords such as `minLength` or `maximum`.
    #[serde(flatten)]
    pub constraints: IndexMap<String, Value>,
}

impl Schema {
    /// Create a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self {
            schema_type: Some(SchemaType::String),
            ..Default::default()
        }
    }
}

impl From<&scribe_core::Schema> for Schema {
    fn from(schema: &scribe_core::Schema) -> Self {
        let mut result = Self {
            format: schema.format.clone(),
            title: schema.title.clone(),
            description: schema.description.clone(),
            const_value: schema.constant.clone(),
            enum_values: schema.enum_values.clone(),
            default: schema.default.clone(),
            examples: schema.examples.clone(),
            constraints: schema.constraints.clone(),
            ..Default::default()
        };

        match &schema.kind {
            SchemaKind::Object(object) => {
                result.schema_type = Some(SchemaType::Object);
                result.properties = object
                    .properties
                    .iter()
                    .map(|(name, property)| (name.clone(), Self::from(property)))
                    .collect();
                result.required.clone_from(&object.required);
                result.additional_properties = object.additional_properties;
            }
            SchemaKind::Array(items) => {
                result.schema_type = Some(SchemaType::Array);
                result.items = Some(Box::new(Self::from(items.as_ref())));
            }
            SchemaKind::String => result.schema_type = Some(SchemaType::String),
            SchemaKind::Number => result.schema_type = Some(SchemaType::Number),
            SchemaKind::Integer => result.schema_type = Some(SchemaType::Integer),
            SchemaKind::Boolean => result.schema_type = Some(SchemaType::Boolean),
            SchemaKind::Null => result.schema_type = Some(SchemaType::Null),
            SchemaKind::Union(members) => result.any_of = members.iter().map(Self::from).collect(),
            SchemaKind::Intersection(members) => {
                result.all_of = members.iter().map(Self::from).collect();
            }
            SchemaKind::Reference(name) => {
                result.reference = Some(format!("{COMPONENTS_PREFIX}{name}"));
            }
            // No payload, or no constraint on it: an empty schema.
            SchemaKind::Void | SchemaKind::Undefined | SchemaKind::Unknown => {}
        }

        result
    }
}

impl From<scribe_core::Schema> for Schema {
    fn from(schema: scribe_core::Schema) -> Self {
        Self::from(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn operation(id: &str) -> Operation {
        Operation {
            operation_id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_string_schema() {
        let value = serde_json::to_value(Schema::string()).unwrap();
        assert_eq!(value, json!({ "type": "string" }));
    }

    #[test]
    fn test_convert_canonical_object() {
        let canonical = scribe_core::Schema::object()
            .property("id", scribe_core::Schema::integer())
            .required_property("id")
            .additional_properties(false);

        let schema = Schema::from(&canonical);
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        assert_eq!(schema.required, vec!["id".to_string()]);
        assert_eq!(schema.additional_properties, Some(false));
        assert_eq!(schema.properties["id"].schema_type, Some(SchemaType::Integer));
    }

    #[test]
    fn test_convert_void_is_empty() {
        let schema = Schema::from(&scribe_core::Schema::void());
        assert_eq!(serde_json::to_value(&schema).unwrap(), json!({}));
    }

    #[test]
    fn test_convert_union_and_reference() {
        let canonical = scribe_core::Schema::union(vec![
            scribe_core::Schema::reference("User"),
            scribe_core::Schema::null(),
        ]);
        let value = serde_json::to_value(Schema::from(&canonical)).unwrap();
        assert_eq!(
            value,
            json!({ "anyOf": [{ "$ref": "#/components/schemas/User" }, { "type": "null" }] })
        );
    }

    #[test]
    fn test_constraints_are_flattened() {
        let mut canonical = scribe_core::Schema::string();
        canonical.constraints.insert("minLength".into(), json!(3));
        let value = serde_json::to_value(Schema::from(&canonical)).unwrap();
        assert_eq!(value, json!({ "type": "string", "minLength": 3 }));
    }

    #[test]
    fn test_path_item_wildcard_has_no_slot() {
        let mut item = PathItem::default();
        item.set(Method::All, operation("allPing"));

        assert_eq!(item.operations().count(), 0);
        assert!(item.operation(Method::All).is_none());
    }

    #[test]
    fn test_path_item_operations_order() {
        let mut item = PathItem::default();
        item.set(Method::Post, operation("b"));
        item.set(Method::Get, operation("a"));

        let methods: Vec<Method> = item.operations().map(|(method, _)| method).collect();
        assert_eq!(methods, vec![Method::Get, Method::Post]);
    }

    #[test]
    fn test_operation_extra_keys_are_flattened() {
        let mut op = operation("getUser");
        op.extra.insert("x-internal".into(), json!(true));

        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["x-internal"], json!(true));
        assert_eq!(value["operationId"], json!("getUser"));
        assert!(value.get("deprecated").is_none());
    }

    #[test]
    fn test_parameter_in_serialization() {
        let param = Parameter {
            name: "id".to_string(),
            location: ParameterIn::Query,
            description: None,
            required: false,
            schema: None,
        };

        let json = serde_json::to_string(&param).unwrap();
        assert!(json.contains("\"in\":\"query\""));
    }

    #[test]
    fn test_void_response_has_no_content_key() {
        let response = Response {
            description: "No Content".to_string(),
            content: IndexMap::new(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({ "description": "No Content" }));
    }
}
