//! Component schema table and reference resolution.

use indexmap::IndexMap;

use crate::schema::{reference_name, Schema, SchemaKind};

/// Upper bound on reference hops followed during inline expansion.
const MAX_REFERENCE_DEPTH: usize = 16;

/// Named component schemas, in registration order.
///
/// References are never replaced destructively. [`Definitions::annotate`]
/// keeps the pointer and only borrows documentation from the target, while
/// [`Definitions::resolve`] is for callers that need the target's structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definitions {
    schemas: IndexMap<String, Schema>,
}

impl Definitions {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under a name, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, schema: Schema) {
        self.schemas.insert(name.into(), schema);
    }

    /// Builder-style [`Definitions::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.insert(name, schema);
        self
    }

    /// Look up a schema by name or pointer.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(reference_name(name))
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterate over `(name, schema)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.schemas.iter()
    }

    /// Follow references until a non-reference schema is reached.
    ///
    /// Missing targets stop the walk and return the last reference seen, so
    /// an unresolved pointer stays visible to the caller.
    pub fn resolve<'a>(&'a self, schema: &'a Schema) -> &'a Schema {
        let mut current = schema;
        for _ in 0..MAX_REFERENCE_DEPTH {
            match &current.kind {
                SchemaKind::Reference(name) => match self.schemas.get(name) {
                    Some(target) => current = target,
                    None => return current,
                },
                _ => return current,
            }
        }
        current
    }

    /// Copy documentation from a reference's target onto the reference.
    ///
    /// The pointer is preserved; the description and title of the target
    /// fill in whatever the reference itself leaves empty. Non-references
    /// and references with no target are returned unchanged.
    #[must_use]
    pub fn annotate(&self, schema: &Schema) -> Schema {
        let mut annotated = schema.clone();
        if schema.reference_target().is_none() {
            return annotated;
        }

        let target = self.resolve(schema);
        if target.reference_target().is_some() {
            return annotated;
        }
        if annotated.description.is_none() {
            annotated.description.clone_from(&target.description);
        }
        if annotated.title.is_none() {
            annotated.title.clone_from(&target.title);
        }
        annotated
    }
}

impl FromIterator<(String, Schema)> for Definitions {
    fn from_iter<I: IntoIterator<Item = (String, Schema)>>(iter: I) -> Self {
        Self {
            schemas: iter.into_iter().collect(),
        }
    }
}
