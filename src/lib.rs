//! graphql fetcher builder generator
//!
//! this crate reads a graphql schema and generates typescript sources for
//! immutable, strongly typed query builders ("fetchers"). every selection
//! step returns a new builder whose type records exactly what has been
//! selected so far, so a client can infer the response shape of a query from
//! the builder that produced it.
//!
//! start with [`Schema`], [`GeneratorConfig`], and [`Generator`]. schemas can
//! be parsed from sdl text or loaded with [`load_schema`].
//!
//! ## quick start
//!
//! ```no_run
//! use fetchgen::{Generator, GeneratorConfig, Schema};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::parse("type Query { hello: String! }")?;
//! let config = GeneratorConfig::new();
//! let generator = Generator::new(&schema, &config)?;
//! generator.generate(Path::new("src/__generated"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## building blocks
//!
//! - [`FetchableType`] is the language-neutral model of one selectable type.
//! - [`InheritanceInfo`] resolves interface and union relationships into
//!   reduced downcast/upcast maps.
//! - [`CodeWriter`] renders indented, scoped text with per-file imports.

mod common_types;
mod config;
mod context;
mod enums;
mod error;
mod fetchable;
mod fetcher;
mod generator;
mod index;
mod inheritance;
mod inputs;
mod loader;
mod schema;
mod writer;

pub use config::GeneratorConfig;
pub use context::{ConnectionInfo, GeneratorContext};
pub use error::{Error, Result};
pub use fetchable::{FetchableField, FetchableType, FieldCategory, FieldDecl, TypeCategory};
pub use generator::Generator;
pub use inheritance::{InheritanceInfo, TypeMap};
pub use loader::{load_schema, load_schema_text, SchemaSource};
pub use schema::{
    EnumDef, InputObjectDef, ObjectDef, Schema, SchemaArgument, SchemaField, SchemaType, TypeRef,
    UnionDef,
};
pub use writer::{Artifact, ArtifactDir, ArtifactLocation, CodeWriter, ScopeType};
