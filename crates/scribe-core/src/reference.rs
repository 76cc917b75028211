//! Additional schema references keyed by path and method.
//!
//! A [`ReferenceMap`] fills slots a route leaves empty. Maps are usually
//! mined from declaration text, but they can be supplied directly as JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::SchemaInput;
use crate::route::{Hooks, Method, ResponseSlot};
use crate::schema::Schema;

/// Schemas known for one (path, method) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Path parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Schema>,
    /// Query string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Schema>,
    /// Request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Schema>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Schema>,
    /// Responses keyed by status.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub response: IndexMap<String, Schema>,
}

impl ReferenceEntry {
    /// Whether the entry carries no schema at all.
    pub fn is_empty(&self) -> bool {
        self.params.is_none()
            && self.query.is_none()
            && self.headers.is_none()
            && self.body.is_none()
            && self.response.is_empty()
    }

    /// Fill the empty slots of `hooks` from this entry.
    ///
    /// Slots that are already set are never replaced.
    #[must_use]
    pub fn fill(&self, hooks: &Hooks) -> Hooks {
        let pick = |own: &Option<SchemaInput>, fallback: &Option<Schema>| {
            own.clone()
                .or_else(|| fallback.clone().map(SchemaInput::Canonical))
        };

        let response = hooks.response.clone().or_else(|| {
            (!self.response.is_empty()).then(|| {
                ResponseSlot::ByStatus(
                    self.response
                        .iter()
                        .map(|(status, schema)| (status.clone(), SchemaInput::Canonical(schema.clone())))
                        .collect(),
                )
            })
        });

        Hooks {
            params: pick(&hooks.params, &self.params),
            query: pick(&hooks.query, &self.query),
            headers: pick(&hooks.headers, &self.headers),
            cookie: hooks.cookie.clone(),
            body: pick(&hooks.body, &self.body),
            response,
        }
    }
}

/// Reference entries keyed by path, then by lowercase method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceMap {
    paths: IndexMap<String, IndexMap<String, ReferenceEntry>>,
}

impl ReferenceMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry for the same pair.
    pub fn insert(&mut self, path: impl Into<String>, method: impl AsRef<str>, entry: ReferenceEntry) {
        self.paths
            .entry(path.into())
            .or_default()
            .insert(method.as_ref().to_ascii_lowercase(), entry);
    }

    /// Builder-style [`ReferenceMap::insert`].
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, method: impl AsRef<str>, entry: ReferenceEntry) -> Self {
        self.insert(path, method, entry);
        self
    }

    /// Entry for a route, matching the path with and without a trailing
    /// slash.
    pub fn get(&self, path: &str, method: Method) -> Option<&ReferenceEntry> {
        let alternate = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
            Some(_) => String::from("/"),
            None => format!("{path}/"),
        };

        self.lookup(path, method)
            .or_else(|| self.lookup(&alternate, method))
    }

    fn lookup(&self, path: &str, method: Method) -> Option<&ReferenceEntry> {
        self.paths.get(path)?.get(method.as_str())
    }

    /// Methods declared for a path.
    pub fn methods(&self, path: &str) -> Option<&IndexMap<String, ReferenceEntry>> {
        self.paths.get(path)
    }

    /// Iterate over `(path, method map)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexMap<String, ReferenceEntry>)> {
        self.paths.iter()
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the map has no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry() -> ReferenceEntry {
        ReferenceEntry {
            query: Some(Schema::object().property("q", Schema::string())),
            body: Some(Schema::string()),
            response: IndexMap::from([("200".to_string(), Schema::boolean())]),
            ..ReferenceEntry::default()
        }
    }

    #[test]
    fn test_get_matches_trailing_slash() {
        let map = ReferenceMap::new().with("/users", "GET", entry());
        assert!(map.get("/users", Method::Get).is_some());
        assert!(map.get("/users/", Method::Get).is_some());
        assert!(map.get("/users", Method::Post).is_none());

        let map = ReferenceMap::new().with("/users/", "get", entry());
        assert!(map.get("/users", Method::Get).is_some());

        let map = ReferenceMap::new().with("/", "get", entry());
        assert!(map.get("/", Method::Get).is_some());
        assert!(map.get("/", Method::Put).is_none());
    }

    #[test]
    fn test_insert_last_wins() {
        let mut map = ReferenceMap::new();
        map.insert("/a", "get", entry());
        map.insert("/a", "get", ReferenceEntry::default());
        assert!(map.get("/a", Method::Get).unwrap().is_empty());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_fill_only_empty_slots() {
        let hooks = Hooks::new().body(Schema::integer());
        let filled = entry().fill(&hooks);

        assert_eq!(filled.body.unwrap().as_canonical(), Some(&Schema::integer()));
        assert!(filled.query.is_some());
        assert!(filled.params.is_none());
        assert!(matches!(filled.response, Some(ResponseSlot::ByStatus(_))));
    }

    #[test]
    fn test_serde_shape() {
        let map = ReferenceMap::new().with("/a", "get", entry());
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["/a"]["get"]["body"], json!({ "type": "string" }));
        assert!(json["/a"]["get"].get("params").is_none());

        let back: ReferenceMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }
}
