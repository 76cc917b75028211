//! # Scribe
//!
//! **OpenAPI 3.1 documents from route registries**
//!
//! Scribe turns a registry of routes, each carrying schemas for its params,
//! query, headers, cookies, body and responses, into an OpenAPI document:
//!
//! - **Canonical schemas** – vendor schemas are normalized through registered converters
//! - **Guard flattening** – ancestor validators merge into every route they cover
//! - **Declaration mining** – type declaration text fills gaps the registry leaves open
//! - **Path expansion** – optional segments become one operation per concrete path
//!
//! ## Quick Start
//!
//! ```rust
//! use scribe::prelude::*;
//!
//! let routes = vec![Route::new(Method::Get, "/users/:id?")
//!     .with_hooks(Hooks::new().response(Schema::reference("User")))];
//!
//! let config = ScribeConfig::default();
//! let generator = scribe::generator_from_config(&config)
//!     .unwrap()
//!     .definition("User", Schema::object().property("id", Schema::integer()));
//!
//! let document = generator.generate(&routes);
//! assert!(document.paths.contains_key("/users"));
//! assert!(document.paths.contains_key("/users/{id}"));
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! routes.json ─┐
//! declarations ─┼─→ OpenApiGenerator ─→ OpenApi ─→ JSON / YAML
//! definitions ──┘
//! ```

#![doc(html_root_url = "https://docs.rs/scribe/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod pipeline;

pub use error::{ScribeError, ScribeResult};
pub use pipeline::{
    generator_from_config, load_definitions, load_routes, mine_declarations, render,
};

// Re-export core types
pub use scribe_core as core;

// Re-export declaration mining
pub use scribe_declaration as declaration;

// Re-export document assembly
pub use scribe_docs as docs;

// Re-export configuration
pub use scribe_config as config;

// Re-export logging setup
pub use scribe_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use scribe::prelude::*;
///
/// let route = Route::new(Method::Post, "/users").with_hooks(Hooks::new().body(Schema::object()));
/// let document = OpenApiGenerator::new().generate(&[route]);
/// assert_eq!(document.operation_count(), 1);
/// ```
pub mod prelude {
    pub use scribe_core::{
        Detail, Direction, Hooks, Method, ReferenceEntry, ReferenceMap, Route, Schema,
        SchemaInput, VendorRegistry, VendorSchema,
    };

    pub use scribe_declaration::DeclarationMiner;

    pub use scribe_docs::{ExcludeRules, OpenApi, OpenApiGenerator};

    pub use scribe_config::{ConfigLoader, OutputFormat, ScribeConfig};
}
