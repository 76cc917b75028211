//! Validator merge engine.
//!
//! Guard slots and route slots are merged one slot at a time. Objects merge
//! field-wise, with the inner (more specific) side winning on conflicts;
//! anything that is not an object survives as a member of an intersection.
//! Every function here builds new values and leaves its inputs untouched.

use indexmap::IndexMap;
use tracing::debug;

use crate::input::SchemaInput;
use crate::normalize::Normalizer;
use crate::route::{Hooks, ResponseSlot};
use crate::schema::{ObjectSchema, Schema, SchemaKind};
use crate::vendor::Direction;

/// Merge two request slots, `outer` being the less specific one.
///
/// An absent side yields the other side unchanged, including unresolved
/// named references. When both are present they are normalized and merged.
///
/// ```rust
/// use scribe_core::{merge_slot, Normalizer, Schema, SchemaInput};
///
/// let outer = SchemaInput::from(Schema::object().property("a", Schema::string()).required_property("a"));
/// let inner = SchemaInput::from(Schema::object().property("b", Schema::string()).required_property("a"));
///
/// let merged = merge_slot(Some(&outer), Some(&inner), &Normalizer::default()).unwrap();
/// let object = merged.as_canonical().unwrap().as_object().unwrap();
/// assert_eq!(object.properties.len(), 2);
/// assert_eq!(object.required, vec!["a".to_string()]);
/// ```
pub fn merge_slot(
    outer: Option<&SchemaInput>,
    inner: Option<&SchemaInput>,
    normalizer: &Normalizer,
) -> Option<SchemaInput> {
    merge_directed(outer, inner, normalizer, Direction::Input)
}

/// Merge two response slots.
///
/// Both sides are viewed as status maps (a single schema is status `200`)
/// and merged status by status; a status present on one side only is kept
/// as is.
pub fn merge_response_slot(
    outer: Option<&ResponseSlot>,
    inner: Option<&ResponseSlot>,
    normalizer: &Normalizer,
) -> Option<ResponseSlot> {
    let (outer, inner) = match (outer, inner) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => return Some(only.clone()),
        (Some(outer), Some(inner)) => (outer.to_status_map(), inner.to_status_map()),
    };

    let mut merged = IndexMap::with_capacity(outer.len() + inner.len());
    for (status, schema) in &outer {
        let combined = merge_directed(Some(schema), inner.get(status), normalizer, Direction::Output);
        if let Some(combined) = combined {
            merged.insert(status.clone(), combined);
        }
    }
    for (status, schema) in inner {
        if !merged.contains_key(&status) {
            merged.insert(status, schema);
        }
    }

    Some(ResponseSlot::ByStatus(merged))
}

/// Merge every slot of two hook sets.
#[must_use]
pub fn merge_hooks(outer: &Hooks, inner: &Hooks, normalizer: &Normalizer) -> Hooks {
    Hooks {
        params: merge_slot(outer.params.as_ref(), inner.params.as_ref(), normalizer),
        query: merge_slot(outer.query.as_ref(), inner.query.as_ref(), normalizer),
        headers: merge_slot(outer.headers.as_ref(), inner.headers.as_ref(), normalizer),
        cookie: merge_slot(outer.cookie.as_ref(), inner.cookie.as_ref(), normalizer),
        body: merge_slot(outer.body.as_ref(), inner.body.as_ref(), normalizer),
        response: merge_response_slot(outer.response.as_ref(), inner.response.as_ref(), normalizer),
    }
}

/// Merge two canonical schemas.
///
/// Object members (after spreading intersections and expanding references
/// to objects) fold into one object. Remaining members form an
/// intersection with that object first. Unconstrained `unknown` members are
/// dropped.
#[must_use]
pub fn merge_schemas(outer: &Schema, inner: &Schema, normalizer: &Normalizer) -> Schema {
    let mut members = Vec::new();
    spread(outer, normalizer, &mut members);
    spread(inner, normalizer, &mut members);

    let mut object: Option<Schema> = None;
    let mut leftovers = Vec::new();
    for member in members {
        if member.as_object().is_some() {
            object = Some(match object {
                Some(merged) => merge_objects(&merged, &member),
                None => member,
            });
        } else if !is_unconstrained(&member) {
            leftovers.push(member);
        }
    }

    match (object, leftovers.len()) {
        (Some(object), 0) => object,
        (None, 0) => Schema::unknown(),
        (None, 1) => leftovers.remove(0),
        (object, _) => {
            debug!(
                members = leftovers.len(),
                "Non-object schemas in merge, falling back to intersection"
            );
            Schema::intersection(object.into_iter().chain(leftovers).collect())
        }
    }
}

fn merge_directed(
    outer: Option<&SchemaInput>,
    inner: Option<&SchemaInput>,
    normalizer: &Normalizer,
    direction: Direction,
) -> Option<SchemaInput> {
    let (outer, inner) = match (outer, inner) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => return Some(only.clone()),
        (Some(outer), Some(inner)) => (outer, inner),
    };

    match (
        normalizer.normalize(outer, direction),
        normalizer.normalize(inner, direction),
    ) {
        (Some(outer), Some(inner)) => Some(SchemaInput::Canonical(merge_schemas(
            &outer, &inner, normalizer,
        ))),
        (Some(_), None) => Some(outer.clone()),
        (None, _) => Some(inner.clone()),
    }
}

fn spread(schema: &Schema, normalizer: &Normalizer, out: &mut Vec<Schema>) {
    match &schema.kind {
        SchemaKind::Intersection(members) => {
            for member in members {
                spread(member, normalizer, out);
            }
        }
        SchemaKind::Reference(_) => {
            let target = normalizer.resolve(schema);
            match &target.kind {
                SchemaKind::Object(_) => out.push(target.clone()),
                SchemaKind::Intersection(_) => spread(target, normalizer, out),
                _ => out.push(schema.clone()),
            }
        }
        _ => out.push(schema.clone()),
    }
}

fn is_unconstrained(schema: &Schema) -> bool {
    *schema == Schema::unknown()
}

fn merge_objects(outer: &Schema, inner: &Schema) -> Schema {
    let empty = ObjectSchema::default();
    let outer_fields = outer.as_object().unwrap_or(&empty);
    let inner_fields = inner.as_object().unwrap_or(&empty);

    let mut properties = outer_fields.properties.clone();
    for (name, property) in &inner_fields.properties {
        properties.insert(name.clone(), property.clone());
    }

    let mut required = outer_fields.required.clone();
    for name in &inner_fields.required {
        if !required.contains(name) {
            required.push(name.clone());
        }
    }

    let additional_properties = match (
        outer_fields.additional_properties,
        inner_fields.additional_properties,
    ) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), _) | (_, Some(true)) => Some(true),
        (None, None) => None,
    };

    let mut constraints = outer.constraints.clone();
    constraints.extend(inner.constraints.clone());

    Schema {
        kind: SchemaKind::Object(ObjectSchema {
            properties,
            required,
            additional_properties,
        }),
        description: inner.description.clone().or_else(|| outer.description.clone()),
        title: inner.title.clone().or_else(|| outer.title.clone()),
        constraints,
        ..Schema::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendor::{VendorRegistry, VendorSchema};
    use serde_json::json;

    fn canonical(input: Option<SchemaInput>) -> Schema {
        input.and_then(|input| input.as_canonical().cloned()).unwrap()
    }

    #[test]
    fn test_absent_side_returns_other() {
        let normalizer = Normalizer::default();
        let named = SchemaInput::from("User");
        let merged = merge_slot(None, Some(&named), &normalizer).unwrap();
        assert!(matches!(merged, SchemaInput::Named(ref name) if name == "User"));
        assert!(merge_slot(None, None, &normalizer).is_none());
    }

    #[test]
    fn test_object_merge_inner_wins() {
        let normalizer = Normalizer::default();
        let outer = SchemaInput::from(
            Schema::object()
                .property("id", Schema::string())
                .property("page", Schema::integer())
                .required_property("id")
                .additional_properties(true),
        );
        let inner = SchemaInput::from(
            Schema::object()
                .property("id", Schema::integer())
                .required_property("id")
                .additional_properties(false),
        );

        let merged = canonical(merge_slot(Some(&outer), Some(&inner), &normalizer));
        let object = merged.as_object().unwrap();
        assert_eq!(object.properties["id"].kind, SchemaKind::Integer);
        assert_eq!(object.properties.keys().collect::<Vec<_>>(), vec!["id", "page"]);
        assert_eq!(object.required, vec!["id".to_string()]);
        assert_eq!(object.additional_properties, Some(false));
    }

    #[test]
    fn test_object_and_non_object_intersect() {
        let normalizer = Normalizer::default();
        let outer = SchemaInput::from(Schema::object().property("a", Schema::string()));
        let inner = SchemaInput::from(Schema::string());

        let merged = canonical(merge_slot(Some(&outer), Some(&inner), &normalizer));
        match merged.kind {
            SchemaKind::Intersection(members) => {
                assert_eq!(members.len(), 2);
                assert!(members[0].as_object().is_some());
                assert_eq!(members[1].kind, SchemaKind::String);
            }
            other => panic!("expected intersection, got {other:?}"),
        }
    }

    #[test]
    fn test_existing_intersection_is_spread() {
        let normalizer = Normalizer::default();
        let outer = SchemaInput::from(Schema::intersection(vec![
            Schema::object().property("a", Schema::string()),
            Schema::number(),
        ]));
        let inner = SchemaInput::from(Schema::object().property("b", Schema::string()));

        let merged = canonical(merge_slot(Some(&outer), Some(&inner), &normalizer));
        match merged.kind {
            SchemaKind::Intersection(members) => {
                assert_eq!(members.len(), 2);
                assert_eq!(members[0].as_object().unwrap().properties.len(), 2);
            }
            other => panic!("expected intersection, got {other:?}"),
        }
    }

    #[test]
    fn test_reference_expands_for_merge() {
        let mut definitions = IndexMap::new();
        definitions.insert(
            "Paging".to_string(),
            SchemaInput::from(Schema::object().property("page", Schema::integer())),
        );
        let normalizer = Normalizer::default().with_definitions(&definitions);

        let outer = SchemaInput::from("Paging");
        let inner = SchemaInput::from(Schema::object().property("q", Schema::string()));
        let merged = canonical(merge_slot(Some(&outer), Some(&inner), &normalizer));
        assert_eq!(merged.as_object().unwrap().properties.len(), 2);
    }

    #[test]
    fn test_unresolved_reference_is_kept_as_member() {
        let normalizer = Normalizer::default();
        let outer = SchemaInput::from("Missing");
        let inner = SchemaInput::from(Schema::object());
        let merged = canonical(merge_slot(Some(&outer), Some(&inner), &normalizer));
        match merged.kind {
            SchemaKind::Intersection(members) => {
                assert_eq!(members[1].reference_target(), Some("Missing"));
            }
            other => panic!("expected intersection, got {other:?}"),
        }
    }

    #[test]
    fn test_unnormalizable_side_keeps_other() {
        let normalizer = Normalizer::new(VendorRegistry::new());
        let outer = SchemaInput::from(VendorSchema::new("mystery-merge", json!({})));
        let inner = SchemaInput::from(Schema::object());
        let merged = merge_slot(Some(&outer), Some(&inner), &normalizer).unwrap();
        assert!(merged.as_canonical().is_some());
    }

    #[test]
    fn test_response_merge_by_status() {
        let normalizer = Normalizer::default();
        let outer = ResponseSlot::ByStatus(IndexMap::from([
            (
                "200".to_string(),
                SchemaInput::from(Schema::object().property("a", Schema::string())),
            ),
            ("401".to_string(), SchemaInput::from(Schema::string())),
        ]));
        let inner = ResponseSlot::Single(SchemaInput::from(
            Schema::object().property("b", Schema::string()),
        ));

        let merged = merge_response_slot(Some(&outer), Some(&inner), &normalizer).unwrap();
        let map = merged.to_status_map();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["200", "401"]);
        assert_eq!(
            map["200"].as_canonical().unwrap().as_object().unwrap().properties.len(),
            2
        );
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let normalizer = Normalizer::default();
        let outer = Schema::object().property("a", Schema::string());
        let inner = Schema::object().property("b", Schema::string());
        let before = outer.clone();
        let _ = merge_schemas(&outer, &inner, &normalizer);
        assert_eq!(outer, before);
    }

    #[test]
    fn test_unknown_members_are_dropped() {
        let normalizer = Normalizer::new(VendorRegistry::new());
        let merged = merge_schemas(&Schema::unknown(), &Schema::string(), &normalizer);
        assert_eq!(merged.kind, SchemaKind::String);
    }
}
