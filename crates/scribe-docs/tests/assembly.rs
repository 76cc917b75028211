//! Route registry to document assembly.
//!
//! Covers the full pass: exclusion, guard flattening, reference filling,
//! parameter synthesis, content negotiation, path expansion and component
//! emission.

use indexmap::IndexMap;
use scribe_core::{
    Detail, Direction, Hooks, Method, ReferenceEntry, ReferenceMap, Route, Schema, SchemaInput,
    VendorRegistry, VendorSchema,
};
use scribe_docs::{ExcludeRules, OpenApiGenerator, ParameterIn, SchemaType};
use serde_json::json;

fn user() -> Schema {
    Schema::object()
        .property("id", Schema::integer())
        .property("name", Schema::string())
        .required_property("id")
}

fn registry() -> Vec<Route> {
    vec![
        Route::new(Method::Get, "/users/:id?")
            .guard(Hooks::new().headers(
                Schema::object()
                    .property("authorization", Schema::string())
                    .required_property("authorization"),
            ))
            .with_hooks(
                Hooks::new()
                    .query(Schema::object().property("fields", Schema::string()))
                    .response(Schema::reference("User")),
            )
            .detail(Detail {
                tags: vec!["users".into()],
                ..Default::default()
            }),
        Route::new(Method::Post, "/users")
            .with_hooks(Hooks::new().body(user()).response_status("201", Schema::void()))
            .detail(Detail {
                tags: vec!["users".into(), "admin".into()],
                ..Default::default()
            }),
        Route::new(Method::All, "/ping"),
        Route::new(Method::Get, "/internal").hidden(),
        Route::new(Method::Get, "/assets/app.js"),
    ]
}

fn generator() -> OpenApiGenerator {
    OpenApiGenerator::new()
        .title("Users")
        .version("2.0.0")
        .definition("User", user())
}

#[test]
fn generation_is_deterministic() {
    let generator = generator();
    let first = generator.generate_json(&registry()).unwrap();
    let second = generator.generate_json(&registry()).unwrap();
    assert_eq!(first, second);

    let yaml = generator.generate_yaml(&registry()).unwrap();
    assert_eq!(yaml, generator.generate_yaml(&registry()).unwrap());
}

#[test]
fn hidden_and_static_routes_are_left_out() {
    let document = generator().generate(&registry());
    assert!(!document.paths.contains_key("/internal"));
    assert!(!document.paths.contains_key("/assets/app.js"));
}

#[test]
fn optional_segments_expand_into_operations() {
    let document = generator().generate(&registry());

    let with_id = document.paths["/users/{id}"].get.as_ref().unwrap();
    assert_eq!(with_id.operation_id, "getUsersById");
    assert!(with_id
        .parameters
        .iter()
        .any(|p| p.name == "id" && p.location == ParameterIn::Path && p.required));

    let without_id = document.paths["/users"].get.as_ref().unwrap();
    assert_eq!(without_id.operation_id, "getUsers");
    assert!(without_id.parameters.iter().all(|p| p.location != ParameterIn::Path));
}

#[test]
fn guard_and_route_slots_become_parameters() {
    let document = generator().generate(&registry());
    let operation = document.paths["/users/{id}"].get.as_ref().unwrap();

    let header = operation.parameters.iter().find(|p| p.name == "authorization").unwrap();
    assert_eq!(header.location, ParameterIn::Header);
    assert!(header.required);

    let query = operation.parameters.iter().find(|p| p.name == "fields").unwrap();
    assert_eq!(query.location, ParameterIn::Query);
    assert!(!query.required);
}

#[test]
fn structured_bodies_offer_three_content_types() {
    let document = generator().generate(&registry());
    let body = document.paths["/users"]
        .post
        .as_ref()
        .and_then(|operation| operation.request_body.as_ref())
        .unwrap();

    assert!(body.required);
    assert_eq!(
        body.content.keys().collect::<Vec<_>>(),
        vec!["application/json", "application/x-www-form-urlencoded", "multipart/form-data"]
    );
}

#[test]
fn primitive_bodies_are_plain_text() {
    let routes = vec![Route::new(Method::Put, "/motd").with_hooks(Hooks::new().body(Schema::string()))];
    let document = OpenApiGenerator::new().generate(&routes);

    let body = document.paths["/motd"].put.as_ref().unwrap().request_body.as_ref().unwrap();
    assert_eq!(body.content.keys().collect::<Vec<_>>(), vec!["text/plain"]);
}

#[test]
fn declared_parsers_pick_content_types() {
    let routes = vec![Route::new(Method::Post, "/upload")
        .parser("formdata")
        .parser("application/octet-stream")
        .with_hooks(Hooks::new().body(Schema::object().property("file", Schema::string())))];
    let document = OpenApiGenerator::new().generate(&routes);

    let body = document.paths["/upload"].post.as_ref().unwrap().request_body.as_ref().unwrap();
    assert_eq!(
        body.content.keys().collect::<Vec<_>>(),
        vec!["multipart/form-data", "application/octet-stream"]
    );
}

#[test]
fn void_responses_have_no_content() {
    let document = generator().generate(&registry());
    let created = &document.paths["/users"].post.as_ref().unwrap().responses["201"];

    assert_eq!(created.description, "Created");
    let value = serde_json::to_value(created).unwrap();
    assert_eq!(value, json!({ "description": "Created" }));
}

#[test]
fn referenced_responses_keep_the_pointer() {
    let document = generator().generate(&registry());
    let ok = &document.paths["/users/{id}"].get.as_ref().unwrap().responses["200"];

    let schema = ok.content["application/json"].schema.as_ref().unwrap();
    assert_eq!(schema.reference.as_deref(), Some("#/components/schemas/User"));
    assert_eq!(ok.description, "OK");
}

#[test]
fn wildcard_routes_expand_to_every_method() {
    let routes = vec![Route::new(Method::All, "/ping").with_hooks(Hooks::new().body(Schema::object()))];
    let document = OpenApiGenerator::new().generate(&routes);
    let item = &document.paths["/ping"];

    assert_eq!(item.operations().count(), 8);
    for (method, operation) in item.operations() {
        assert_eq!(operation.operation_id, "allPing");
        assert_eq!(operation.request_body.is_some(), method.allows_body());
    }
}

#[test]
fn reference_maps_only_fill_gaps() {
    let references = ReferenceMap::new().with(
        "/users/:id",
        "get",
        ReferenceEntry {
            query: Some(Schema::object().property("ignored", Schema::string())),
            response: [("200".to_string(), Schema::string())].into_iter().collect(),
            ..Default::default()
        },
    );
    let routes = vec![Route::new(Method::Get, "/users/:id")
        .with_hooks(Hooks::new().query(Schema::object().property("kept", Schema::string())))];

    let document = OpenApiGenerator::new().reference(references).generate(&routes);
    let operation = document.paths["/users/{id}"].get.as_ref().unwrap();

    assert!(operation.parameters.iter().any(|p| p.name == "kept"));
    assert!(!operation.parameters.iter().any(|p| p.name == "ignored"));
    assert_eq!(
        operation.responses["200"].content.keys().collect::<Vec<_>>(),
        vec!["text/plain"]
    );
}

#[test]
fn missing_params_schema_synthesizes_path_parameters() {
    let routes = vec![Route::new(Method::Delete, "/orgs/:org/members/:member")];
    let document = OpenApiGenerator::new().generate(&routes);
    let operation = document.paths["/orgs/{org}/members/{member}"].delete.as_ref().unwrap();

    let names: Vec<&str> = operation.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["org", "member"]);
    for parameter in &operation.parameters {
        assert!(parameter.required);
        assert_eq!(parameter.schema.as_ref().unwrap().schema_type, Some(SchemaType::String));
    }
    assert_eq!(operation.responses["200"].description, "Successful response");
}

#[test]
fn detail_is_merged_into_the_operation() {
    let mut extra = IndexMap::new();
    extra.insert("x-rate-limit".to_string(), json!(100));
    let routes = vec![Route::new(Method::Get, "/legacy").detail(Detail {
        summary: Some("Legacy endpoint".into()),
        operation_id: Some("legacyRead".into()),
        deprecated: Some(true),
        extra,
        ..Default::default()
    })];

    let document = OpenApiGenerator::new().generate(&routes);
    let value = serde_json::to_value(&document.paths["/legacy"]).unwrap();

    assert_eq!(value["get"]["operationId"], json!("legacyRead"));
    assert_eq!(value["get"]["summary"], json!("Legacy endpoint"));
    assert_eq!(value["get"]["deprecated"], json!(true));
    assert_eq!(value["get"]["x-rate-limit"], json!(100));
}

#[test]
fn tags_are_listed_in_first_use_order() {
    let document = generator().generate(&registry());
    let tags: Vec<&str> = document.tags.iter().map(|tag| tag.name.as_str()).collect();
    assert_eq!(tags, vec!["users", "admin"]);
}

#[test]
fn exclusion_rules_apply() {
    let exclude = ExcludeRules::new().method(Method::All).tag("admin");
    let document = generator().exclude(exclude).generate(&registry());

    assert!(!document.paths.contains_key("/ping"));
    assert!(document.paths["/users"].post.is_none());
    assert!(document.paths["/users"].get.is_some());
}

#[test]
fn components_are_emitted() {
    let document = generator().generate(&registry());
    let schemas = &document.components.as_ref().unwrap().schemas;
    assert_eq!(schemas["User"].required, vec!["id".to_string()]);
}

#[test]
fn vendor_schemas_use_registered_converters() {
    let vendors = VendorRegistry::new().with("acme", |_: &VendorSchema, _: Direction| {
        Some(Schema::object().property("sku", Schema::string()))
    });
    let routes = vec![
        Route::new(Method::Post, "/orders")
            .with_hooks(Hooks::new().body(VendorSchema::new("acme", json!({ "shape": "order" })))),
        Route::new(Method::Post, "/refunds")
            .with_hooks(Hooks::new().body(VendorSchema::new("mystery", json!({})))),
    ];

    let document = OpenApiGenerator::new().vendors(vendors).generate(&routes);

    let orders = document.paths["/orders"].post.as_ref().unwrap();
    let schema = orders.request_body.as_ref().unwrap().content["application/json"]
        .schema
        .as_ref()
        .unwrap();
    assert!(schema.properties.contains_key("sku"));

    let refunds = document.paths["/refunds"].post.as_ref().unwrap();
    assert!(refunds.request_body.is_none());
}

#[test]
fn registry_can_be_read_from_json() {
    let routes: Vec<Route> = serde_json::from_value(json!([
        {
            "method": "get",
            "path": "/books/:isbn",
            "params": { "type": "object", "properties": { "isbn": { "type": "string" } } },
            "response": {
                "200": "Book",
                "404": { "type": "null", "description": "No such book" }
            }
        }
    ]))
    .unwrap();

    let definitions: IndexMap<String, SchemaInput> =
        [("Book".to_string(), SchemaInput::from(Schema::object().property("title", Schema::string())))]
            .into_iter()
            .collect();
    let document = OpenApiGenerator::new().definitions(definitions).generate(&routes);
    let operation = document.paths["/books/{isbn}"].get.as_ref().unwrap();

    assert_eq!(operation.parameters[0].name, "isbn");
    assert!(operation.parameters[0].required);
    assert_eq!(operation.responses["404"].description, "No such book");
    assert!(operation.responses["404"].content.is_empty());
    assert_eq!(
        operation.responses["200"].content["application/json"].schema.as_ref().unwrap().reference.as_deref(),
        Some("#/components/schemas/Book")
    );
}

#[test]
fn wildcard_routes_fill_from_per_method_references() {
    let references = ReferenceMap::new()
        .with(
            "/items/:id",
            "get",
            ReferenceEntry {
                query: Some(Schema::object().property("expand", Schema::string())),
                ..Default::default()
            },
        )
        .with(
            "/items/:id",
            "all",
            ReferenceEntry {
                headers: Some(Schema::object().property("x-tenant", Schema::string())),
                ..Default::default()
            },
        );
    let routes = vec![Route::new(Method::All, "/items/:id")];

    let document = OpenApiGenerator::new().reference(references).generate(&routes);
    let item = &document.paths["/items/{id}"];

    let get = item.operation(Method::Get).unwrap();
    assert!(get.parameters.iter().any(|p| p.name == "expand" && p.location == ParameterIn::Query));
    assert!(get.parameters.iter().any(|p| p.name == "x-tenant"));

    let post = item.operation(Method::Post).unwrap();
    assert!(!post.parameters.iter().any(|p| p.name == "expand"));
    assert!(post.parameters.iter().any(|p| p.name == "x-tenant"));
    assert_eq!(post.operation_id, "allItemsById");
}
