//! # Scribe Docs
//!
//! OpenAPI document assembly for Scribe.
//!
//! This crate provides:
//! - **Document model**: the OpenAPI 3.1 types written to JSON or YAML
//! - **Assembly**: [`OpenApiGenerator`] folds guards, fills gaps from
//!   reference maps, normalizes every slot and expands optional path
//!   segments into concrete operations
//! - **Exclusion**: [`ExcludeRules`] keeps internal and static routes out
//!
//! ## Quick Start
//!
//! ```rust
//! use scribe_core::{Hooks, Method, Route, Schema};
//! use scribe_docs::{ExcludeRules, OpenApiGenerator};
//!
//! let routes = vec![
//!     Route::new(Method::Post, "/users").with_hooks(
//!         Hooks::new()
//!             .body(Schema::object().property("name", Schema::string()).required_property("name"))
//!             .response_status("201", Schema::reference("User")),
//!     ),
//!     Route::new(Method::Get, "/health"),
//! ];
//!
//! let generator = OpenApiGenerator::new()
//!     .title("My API")
//!     .version("1.0.0")
//!     .definition("User", Schema::object().property("id", Schema::integer()))
//!     .exclude(ExcludeRules::new().path("/health"));
//!
//! let document = generator.generate(&routes);
//! assert!(document.paths.contains_key("/users"));
//! assert!(!document.paths.contains_key("/health"));
//!
//! let json = generator.generate_json(&routes).unwrap();
//! assert!(json.contains("#/components/schemas/User"));
//! ```

#![doc(html_root_url = "https://docs.rs/scribe-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod exclude;
mod generator;
mod openapi;

pub use error::{DocsError, DocsResult};
pub use exclude::ExcludeRules;
pub use generator::OpenApiGenerator;
pub use openapi::{
    Components, Info, MediaType, OpenApi, Operation, Parameter, ParameterIn, PathItem,
    RequestBody, Response, Schema, SchemaType, Server, Tag, OPENAPI_VERSION,
};
