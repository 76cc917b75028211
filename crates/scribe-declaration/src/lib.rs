//! # Scribe Declaration
//!
//! Recovers route schemas from raw type-declaration text when no compiled
//! schema exists for a slot.
//!
//! The pipeline has three steps:
//!
//! 1. [`extract_root_objects`] quotes bare keys, strips `readonly` and
//!    comments, and splits the text into top-level object literals
//! 2. a [`TypeCompiler`] turns each literal into a canonical schema
//! 3. [`DeclarationMiner`] folds each schema into `path -> method -> slots`
//!
//! ```rust
//! use scribe_core::Method;
//! use scribe_declaration::DeclarationMiner;
//!
//! let text = r#"
//!     {
//!         hello: {
//!             world: {
//!                 get: {
//!                     params: {}
//!                     query: {}
//!                     headers: {}
//!                     body: {}
//!                     response: { 200: { name: string } }
//!                 }
//!             }
//!         }
//!     }
//! "#;
//!
//! let references = DeclarationMiner::new().mine(text);
//! let entry = references.get("/hello/world", Method::Get).unwrap();
//! assert!(entry.response["200"].has_properties());
//! ```

#![doc(html_root_url = "https://docs.rs/scribe-declaration/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod compiler;
mod error;
mod extract;
mod miner;

pub use compiler::{TypeCompiler, TypeLiteralCompiler};
pub use error::{DeclarationError, DeclarationResult};
pub use extract::{extract_root_objects, prepare, quote_keys, strip_comments, strip_readonly};
pub use miner::{fold_route, DeclarationMiner};
