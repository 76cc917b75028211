//! Folding compiled route literals into a reference map.

use scribe_core::{is_status_key, ReferenceEntry, ReferenceMap, Schema, SchemaKind};
use tracing::debug;

use crate::compiler::{TypeCompiler, TypeLiteralCompiler};
use crate::extract::extract_root_objects;

const METHODS: &[&str] = &[
    "get", "post", "put", "delete", "patch", "head", "options", "trace", "all",
];

const SLOTS: &[&str] = &["params", "query", "headers", "cookie", "body", "response"];

/// Mines `path -> method -> slots` out of declaration text.
///
/// ```rust
/// use scribe_core::Method;
/// use scribe_declaration::DeclarationMiner;
///
/// let references = DeclarationMiner::new().mine(
///     "{ users: { ':id': { get: { params: { id: string }; response: { 200: { name: string } } } } } }",
/// );
///
/// let entry = references.get("/users/:id", Method::Get).unwrap();
/// assert!(entry.params.is_some());
/// assert!(entry.response.contains_key("200"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeclarationMiner<C = TypeLiteralCompiler> {
    compiler: C,
}

impl DeclarationMiner {
    /// Create a miner using the built-in compiler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: TypeCompiler> DeclarationMiner<C> {
    /// Create a miner with a custom compiler.
    pub fn with_compiler(compiler: C) -> Self {
        Self { compiler }
    }

    /// Mine a declaration text.
    ///
    /// Fragments that fail to compile or that do not end in a method are
    /// skipped. Later fragments replace earlier ones for the same path and
    /// method.
    pub fn mine(&self, text: &str) -> ReferenceMap {
        let mut references = ReferenceMap::new();

        for fragment in extract_root_objects(text) {
            let schema = match self.compiler.compile(&fragment) {
                Ok(schema) => schema,
                Err(error) => {
                    debug!(error = %error, "Skipping declaration fragment that failed to compile");
                    continue;
                }
            };

            match fold_route(&schema) {
                Some((path, method, entry)) => {
                    debug!(path = %path, method = %method, "Mined route declaration");
                    references.insert(path, method, entry);
                }
                None => debug!("Skipping declaration fragment with no method"),
            }
        }

        references
    }
}

/// Fold a chain of single-key objects into `(path, method, entry)`.
///
/// Keys are collected while each level has exactly one property. The walk
/// also stops on reaching a method whose value holds only slot keys. The
/// last key is the method.
pub fn fold_route(schema: &Schema) -> Option<(String, String, ReferenceEntry)> {
    let mut segments: Vec<&str> = Vec::new();
    let mut current = schema;

    while let Some(object) = current.as_object() {
        if object.properties.len() != 1 {
            break;
        }
        let at_method = segments
            .last()
            .is_some_and(|last| METHODS.contains(&last.to_ascii_lowercase().as_str()));
        if at_method && object.properties.keys().all(|key| SLOTS.contains(&key.as_str())) {
            break;
        }

        let Some((key, value)) = object.properties.first() else {
            break;
        };
        segments.push(key);
        current = value;
        if !value.has_properties() {
            break;
        }
    }

    let method = segments.pop()?.to_ascii_lowercase();
    let path = format!("/{}", segments.join("/"));
    Some((path, method, route_entry(current)))
}

fn route_entry(route: &Schema) -> ReferenceEntry {
    let slot = |name: &str| {
        route
            .as_object()
            .and_then(|object| object.properties.get(name))
            .filter(|schema| is_informative(schema))
            .cloned()
    };

    let response = match slot("response") {
        Some(response) => {
            let by_status = response
                .as_object()
                .filter(|object| {
                    !object.properties.is_empty()
                        && object.properties.keys().all(|key| is_status_key(key))
                })
                .map(|object| object.properties.clone());
            by_status.unwrap_or_else(|| [("200".to_string(), response)].into_iter().collect())
        }
        None => Default::default(),
    };

    ReferenceEntry {
        params: slot("params"),
        query: slot("query"),
        headers: slot("headers"),
        body: slot("body"),
        response,
    }
}

fn is_informative(schema: &Schema) -> bool {
    match &schema.kind {
        SchemaKind::Unknown => false,
        SchemaKind::Object(object) => {
            !object.properties.is_empty() || object.additional_properties.is_some()
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::TypeLiteralCompiler;
    use crate::error::DeclarationResult;
    use scribe_core::Method;

    fn compiled(source: &str) -> Schema {
        TypeLiteralCompiler.compile(source).unwrap()
    }

    #[test]
    fn test_fold_nested_chain() {
        let schema = compiled(
            r#"{ "hello": { "world": { "get": { "params": {} "query": {} "headers": {} "body": {} "response": { "200": { "name": string } } } } } }"#,
        );
        let (path, method, entry) = fold_route(&schema).unwrap();
        assert_eq!(path, "/hello/world");
        assert_eq!(method, "get");
        assert!(entry.params.is_none());
        assert!(entry.body.is_none());
        assert_eq!(
            entry.response["200"].as_object().unwrap().properties["name"].kind,
            SchemaKind::String
        );
    }

    #[test]
    fn test_fold_single_slot_route() {
        let schema = compiled(r#"{ "ping": { "GET": { "response": { "200": string } } } }"#);
        let (path, method, entry) = fold_route(&schema).unwrap();
        assert_eq!(path, "/ping");
        assert_eq!(method, "get");
        assert_eq!(entry.response["200"].kind, SchemaKind::String);
    }

    #[test]
    fn test_fold_without_method_is_none() {
        assert!(fold_route(&compiled(r#"{ "a": string; "b": string }"#)).is_none());
        assert!(fold_route(&compiled("string")).is_none());
    }

    #[test]
    fn test_non_status_response_becomes_200() {
        let schema = compiled(r#"{ "me": { "get": { "response": { "id": string; "name": string } } } }"#);
        let (_, _, entry) = fold_route(&schema).unwrap();
        assert!(entry.response["200"].has_properties());
    }

    #[test]
    fn test_root_path() {
        let schema = compiled(r#"{ "get": { "query": { "q": string } "response": { "200": string } } }"#);
        let (path, method, entry) = fold_route(&schema).unwrap();
        assert_eq!(path, "/");
        assert_eq!(method, "get");
        assert!(entry.query.is_some());
    }

    struct Refusing;

    impl TypeCompiler for Refusing {
        fn compile(&self, _source: &str) -> DeclarationResult<Schema> {
            Err(crate::error::DeclarationError::UnexpectedEnd)
        }
    }

    #[test]
    fn test_custom_compiler_failures_are_skipped() {
        let miner = DeclarationMiner::with_compiler(Refusing);
        assert!(miner.mine("{ a: { get: {} } }").is_empty());
    }

    #[test]
    fn test_mine_merges_paths() {
        let references = DeclarationMiner::new().mine(
            "{ users: { get: { query: { page: number } } } } & { users: { post: { body: { name: string } } } }",
        );
        assert_eq!(references.len(), 1);
        assert!(references.get("/users", Method::Get).unwrap().query.is_some());
        assert!(references.get("/users", Method::Post).unwrap().body.is_some());
    }
}
