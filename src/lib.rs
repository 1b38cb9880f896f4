//! # xsd-typegraph
//!
//! Builds a resolved, language-agnostic type graph from a compiled XML Schema
//! set, ready for a code emitter to render into classes, interfaces and enums.
//!
//! ## Features
//!
//! - One node per named construct, shared across every reference
//! - Explicit namespace mapping with a fallback chain and pluggable policy
//! - Dependency-ordered construction over includes and imports, cycles allowed
//! - Classes for complex types, interfaces for groups, enums and restricted
//!   simple types for simple types
//! - Root element classes for types shared by several top-level elements
//! - Substitution groups merged into one property or split per member
//! - Restriction metadata at a configurable fidelity
//!
//! ## Example
//!
//! ```rust,ignore
//! use xsd_typegraph::{build_graph, Configuration, PascalCaseNaming, SchemaSet};
//!
//! let set = SchemaSet::from_file("schema-set.json")?;
//! let config = Configuration::default().map_namespace("urn:shop", "Shop");
//! let graph = build_graph(&set, &config, &PascalCaseNaming::new())?;
//!
//! for ns in graph.namespaces() {
//!     println!("{}: {} types", ns.output_name, ns.types.len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod namespaces;
pub mod naming;

pub mod config;
pub mod schema;

pub mod builder;
pub mod model;

pub mod dump;

pub use builder::{build_graph, ModelBuilder, NamespacePolicy, NamespaceResolver};
pub use config::{BuildOptions, Configuration, NamespaceMapping, SubstitutionStrategy};
pub use dump::GraphDump;
pub use error::{BuildError, Error, Result};
pub use model::{AnnotationMode, TypeGraph, TypeId, TypeKind, TypeModel};
pub use namespaces::QName;
pub use naming::{NamingPolicy, PascalCaseNaming};
pub use schema::{SchemaDocument, SchemaSet};

/// Version of the xsd-typegraph library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
