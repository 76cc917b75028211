//! # Scribe Core
//!
//! The schema engine behind Scribe's OpenAPI generation.
//!
//! This crate provides:
//! - **Canonical schemas**: one vendor-neutral [`Schema`] tree, readable from
//!   and writable to JSON Schema
//! - **Vendor normalization**: a [`VendorRegistry`] of converters and a
//!   [`Normalizer`] with a fixed fallback order
//! - **Validator merging**: guard and route slots folded into one effective
//!   [`Route`] via [`merge_slot`] and [`merge_response_slot`]
//! - **Path helpers**: optional-segment expansion and operation ids in
//!   [`path`]
//!
//! ## Quick Start
//!
//! ```rust
//! use scribe_core::{Hooks, Method, Normalizer, Route, Schema};
//!
//! let route = Route::new(Method::Get, "/users/:id")
//!     .guard(Hooks::new().headers(
//!         Schema::object().property("authorization", Schema::string()),
//!     ))
//!     .with_hooks(Hooks::new().query(
//!         Schema::object().property("fields", Schema::string()),
//!     ));
//!
//! let flat = route.flatten(&Normalizer::default());
//! assert!(flat.guards.is_empty());
//! assert!(flat.hooks.headers.is_some());
//! ```

#![doc(html_root_url = "https://docs.rs/scribe-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod definitions;
mod error;
mod input;
mod merge;
mod normalize;
pub mod path;
mod reference;
mod route;
mod schema;
mod vendor;

pub use definitions::Definitions;
pub use error::{CoreError, CoreResult};
pub use input::SchemaInput;
pub use merge::{merge_hooks, merge_response_slot, merge_schemas, merge_slot};
pub use normalize::Normalizer;
pub use reference::{ReferenceEntry, ReferenceMap};
pub use route::{is_status_key, Detail, Guard, Hooks, Method, Parser, ResponseSlot, Route};
pub use schema::{
    reference_name, ObjectSchema, Schema, SchemaKind, COMPONENTS_PREFIX, CONSTRAINT_KEYWORDS,
};
pub use vendor::{
    first_unsupported_warning, Direction, NativeSchema, VendorConverter, VendorRegistry,
    VendorSchema, EMBEDDED_SCHEMA_KEYS, STANDARD_MARKER,
};
