//! Assembly of an OpenAPI document from a route registry.

use http::StatusCode;
use indexmap::{IndexMap, IndexSet};
use scribe_core::{
    path, Direction, Hooks, Method, Normalizer, ObjectSchema, Parser, ReferenceMap, ResponseSlot, Route,
    SchemaInput, SchemaKind, VendorRegistry,
};
use tracing::{debug, info};

use crate::error::{DocsError, DocsResult};
use crate::exclude::ExcludeRules;
use crate::openapi::{
    Components, Info, MediaType, OpenApi, Operation, Parameter, ParameterIn, PathItem,
    RequestBody, Response, Schema, Server, Tag, OPENAPI_VERSION,
};

const JSON: &str = "application/json";
const URL_ENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";
const TEXT: &str = "text/plain";

/// Content types offered for structured payloads when no parser is declared.
const STRUCTURED_CONTENT_TYPES: [&str; 3] = [JSON, URL_ENCODED, MULTIPART];

const DEFAULT_TITLE: &str = "API";
const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_RESPONSE_DESCRIPTION: &str = "Successful response";

/// Generator for turning a route registry into an OpenAPI document.
///
/// # Example
///
/// ```rust
/// use scribe_core::{Hooks, Method, Route, Schema};
/// use scribe_docs::OpenApiGenerator;
///
/// let routes = vec![Route::new(Method::Get, "/users/:id").with_hooks(
///     Hooks::new().response(Schema::object().property("name", Schema::string())),
/// )];
///
/// let document = OpenApiGenerator::new().title("Users").version("2.0.0").generate(&routes);
///
/// let operation = document.paths["/users/{id}"].get.as_ref().unwrap();
/// assert_eq!(operation.operation_id, "getUsersById");
/// assert_eq!(operation.parameters[0].name, "id");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenApiGenerator {
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
    servers: Vec<Server>,
    exclude: ExcludeRules,
    references: Vec<ReferenceMap>,
    vendors: VendorRegistry,
    definitions: IndexMap<String, SchemaInput>,
}

impl OpenApiGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a server.
    #[must_use]
    pub fn server(mut self, url: impl Into<String>, description: Option<String>) -> Self {
        self.servers.push(Server {
            url: url.into(),
            description,
        });
        self
    }

    /// Set the exclusion rules.
    #[must_use]
    pub fn exclude(mut self, exclude: ExcludeRules) -> Self {
        self.exclude = exclude;
        self
    }

    /// Add a reference map. Maps are consulted in the order they are added.
    #[must_use]
    pub fn reference(mut self, references: ReferenceMap) -> Self {
        self.references.push(references);
        self
    }

    /// Set the vendor converters.
    #[must_use]
    pub fn vendors(mut self, vendors: VendorRegistry) -> Self {
        self.vendors = vendors;
        self
    }

    /// Register a component schema.
    #[must_use]
    pub fn definition(mut self, name: impl Into<String>, schema: impl Into<SchemaInput>) -> Self {
        self.definitions.insert(name.into(), schema.into());
        self
    }

    /// Register several component schemas.
    #[must_use]
    pub fn definitions(mut self, definitions: IndexMap<String, SchemaInput>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Generate a document from the routes, in registry order.
    ///
    /// Every call rebuilds the document from scratch, so the same input
    /// always yields the same output.
    pub fn generate(&self, routes: &[Route]) -> OpenApi {
        let normalizer = Normalizer::new(self.vendors.clone()).with_definitions(&self.definitions);
        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        let mut tags: IndexSet<String> = IndexSet::new();

        for route in routes {
            if route.is_hidden() {
                debug!(method = %route.method, path = %route.path, "Skipping hidden route");
                continue;
            }
            if self.exclude.matches(route) {
                debug!(method = %route.method, path = %route.path, "Skipping excluded route");
                continue;
            }

            let flattened = route.flatten(&normalizer).hooks;
            let operations: Vec<(Method, Operation)> = route
                .method
                .expand()
                .iter()
                .map(|&method| (method, self.build_operation(route, method, flattened.clone(), &normalizer)))
                .collect();

            tags.extend(route.detail.tags.iter().cloned());
            write_operation(&mut paths, route, &operations);
        }

        let schemas: IndexMap<String, Schema> = normalizer
            .definitions()
            .iter()
            .map(|(name, schema)| (name.clone(), Schema::from(schema)))
            .collect();

        let document = OpenApi {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title: self.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                version: self.version.clone().unwrap_or_else(|| DEFAULT_VERSION.to_string()),
                description: self.description.clone(),
            },
            servers: self.servers.clone(),
            paths,
            components: Some(Components { schemas }),
            tags: tags
                .into_iter()
                .map(|name| Tag {
                    name,
                    description: None,
                })
                .collect(),
        };

        info!(
            paths = document.paths.len(),
            operations = document.operation_count(),
            schemas = normalizer.definitions().len(),
            "Generated OpenAPI document"
        );
        document
    }

    /// Generate the document as pretty-printed JSON.
    pub fn generate_json(&self, routes: &[Route]) -> DocsResult<String> {
        serde_json::to_string_pretty(&self.generate(routes)).map_err(DocsError::from)
    }

    /// Generate the document as YAML.
    pub fn generate_yaml(&self, routes: &[Route]) -> DocsResult<String> {
        serde_yaml::to_string(&self.generate(routes)).map_err(DocsError::from)
    }

    fn build_operation(&self, route: &Route, method: Method, hooks: Hooks, normalizer: &Normalizer) -> Operation {
        let hooks = self.fill_from_references(route, method, hooks);

        let request_body = if method.allows_body() {
            hooks
                .body
                .as_ref()
                .and_then(|body| request_body(body, &route.parsers, normalizer))
        } else {
            None
        };

        let detail = &route.detail;
        Operation {
            operation_id: String::new(),
            summary: detail.summary.clone(),
            description: detail.description.clone(),
            tags: detail.tags.clone(),
            deprecated: detail.deprecated.unwrap_or(false),
            parameters: parameters(&hooks, &route.path, normalizer),
            request_body,
            responses: responses(hooks.response.as_ref(), normalizer),
            extra: detail.extra.clone(),
        }
    }

    /// Fill empty slots from each reference map in turn. A wildcard route
    /// looks up the concrete method first, then its own `all` entry.
    fn fill_from_references(&self, route: &Route, method: Method, hooks: Hooks) -> Hooks {
        let mut keys = vec![method];
        if route.method == Method::All {
            keys.push(Method::All);
        }

        self.references.iter().fold(hooks, |hooks, references| {
            keys.iter().fold(hooks, |hooks, &key| match references.get(&route.path, key) {
                Some(entry) => {
                    debug!(method = %key, path = %route.path, "Filling empty slots from reference map");
                    entry.fill(&hooks)
                }
                None => hooks,
            })
        })
    }
}

/// Write the per-method operations under every expansion of the route's path.
fn write_operation(paths: &mut IndexMap<String, PathItem>, route: &Route, operations: &[(Method, Operation)]) {
    let expansions: IndexSet<String> = path::expand(&route.path).into_iter().collect();

    for expanded in expansions {
        let present = path::path_parameters(&expanded);
        let operation_id = route
            .detail
            .operation_id
            .clone()
            .unwrap_or_else(|| path::operation_id(route.method.as_str(), &expanded));

        let item = paths.entry(path::to_openapi_path(&expanded)).or_default();
        for (method, operation) in operations {
            let mut concrete = operation.clone();
            concrete.operation_id.clone_from(&operation_id);
            concrete
                .parameters
                .retain(|parameter| parameter.location != ParameterIn::Path || present.contains(&parameter.name));
            item.set(*method, concrete);
        }
    }
}

fn parameters(hooks: &Hooks, route_path: &str, normalizer: &Normalizer) -> Vec<Parameter> {
    let slots = [
        (&hooks.params, ParameterIn::Path),
        (&hooks.query, ParameterIn::Query),
        (&hooks.headers, ParameterIn::Header),
        (&hooks.cookie, ParameterIn::Cookie),
    ];

    let mut parameters = Vec::new();
    for (slot, location) in slots {
        let mut found = slot
            .as_ref()
            .and_then(|input| normalizer.normalize(input, Direction::Input))
            .map(|schema| slot_parameters(&schema, location, normalizer))
            .unwrap_or_default();

        if location == ParameterIn::Path && found.is_empty() {
            found = path::path_parameters(route_path)
                .into_iter()
                .map(|name| Parameter {
                    name,
                    location,
                    description: None,
                    required: true,
                    schema: Some(Schema::string()),
                })
                .collect();
        }
        parameters.extend(found);
    }
    parameters
}

fn slot_parameters(
    schema: &scribe_core::Schema,
    location: ParameterIn,
    normalizer: &Normalizer,
) -> Vec<Parameter> {
    let mut parameters: Vec<Parameter> = Vec::new();

    for object in object_parts(schema, normalizer) {
        for (name, property) in &object.properties {
            parameters.retain(|existing| &existing.name != name);
            let property = normalizer.annotate(property);
            parameters.push(Parameter {
                name: name.clone(),
                location,
                description: property.description.clone(),
                required: location == ParameterIn::Path || object.is_required(name),
                schema: Some(Schema::from(&property)),
            });
        }
    }
    parameters
}

/// Object members of a parameter schema, following references and
/// intersections.
fn object_parts<'a>(schema: &'a scribe_core::Schema, normalizer: &'a Normalizer) -> Vec<&'a ObjectSchema> {
    let resolved = normalizer.resolve(schema);
    match &resolved.kind {
        SchemaKind::Object(object) => vec![object],
        SchemaKind::Intersection(members) => members
            .iter()
            .flat_map(|member| object_parts(member, normalizer))
            .collect(),
        _ => {
            debug!(kind = resolved.kind_name(), "Ignoring parameter schema that is not an object");
            Vec::new()
        }
    }
}

fn request_body(input: &SchemaInput, parsers: &[Parser], normalizer: &Normalizer) -> Option<RequestBody> {
    let schema = normalizer.normalize(input, Direction::Input)?;
    let resolved = normalizer.resolve(&schema);
    if resolved.is_void() {
        return None;
    }

    let declared: IndexSet<String> = parsers.iter().filter_map(parser_content_type).collect();
    let content_types = if declared.is_empty() {
        default_content_types(resolved)
    } else {
        declared.into_iter().collect()
    };

    Some(RequestBody {
        description: resolved.description.clone(),
        required: true,
        content: content(&content_types, &Schema::from(normalizer.annotate(&schema))),
    })
}

fn responses(slot: Option<&ResponseSlot>, normalizer: &Normalizer) -> IndexMap<String, Response> {
    let mut responses = IndexMap::new();

    for (status, input) in slot.map(ResponseSlot::to_status_map).unwrap_or_default() {
        let Some(schema) = normalizer.normalize(&input, Direction::Output) else {
            continue;
        };
        let resolved = normalizer.resolve(&schema);
        let description = resolved
            .description
            .clone()
            .unwrap_or_else(|| status_description(&status));
        let content = if resolved.is_void() {
            IndexMap::new()
        } else {
            content(
                &default_content_types(resolved),
                &Schema::from(normalizer.annotate(&schema)),
            )
        };
        responses.insert(status, Response { description, content });
    }

    if responses.is_empty() {
        responses.insert(
            ResponseSlot::DEFAULT_STATUS.to_string(),
            Response {
                description: DEFAULT_RESPONSE_DESCRIPTION.to_string(),
                content: IndexMap::new(),
            },
        );
    }
    responses
}

fn content(content_types: &[String], schema: &Schema) -> IndexMap<String, MediaType> {
    content_types
        .iter()
        .map(|content_type| {
            (
                content_type.clone(),
                MediaType {
                    schema: Some(schema.clone()),
                },
            )
        })
        .collect()
}

fn default_content_types(schema: &scribe_core::Schema) -> Vec<String> {
    if schema.is_primitive() {
        vec![TEXT.to_string()]
    } else {
        STRUCTURED_CONTENT_TYPES.iter().map(ToString::to_string).collect()
    }
}

/// Content type named by a declared parser. Function parsers name none.
fn parser_content_type(parser: &Parser) -> Option<String> {
    let Parser::Named(name) = parser else {
        return None;
    };

    let content_type = match name.to_ascii_lowercase().as_str() {
        "text" | TEXT => TEXT,
        "urlencoded" | URL_ENCODED => URL_ENCODED,
        "json" | JSON => JSON,
        "formdata" | "multipart" | MULTIPART => MULTIPART,
        other if other.contains('/') => return Some(name.clone()),
        _ => return None,
    };
    Some(content_type.to_string())
}

fn status_description(status: &str) -> String {
    if status == "default" {
        return "Default response".to_string();
    }
    status
        .parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Response")
        .to_string()
}
