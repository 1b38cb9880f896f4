//! The language-agnostic type graph
//!
//! What the builder produces and an emitter consumes: class, interface, enum
//! and simple nodes in an arena, grouped into output namespaces.

pub mod graph;
pub mod namespace;
pub mod properties;
pub mod restrictions;
pub mod types;

pub use graph::TypeGraph;
pub use namespace::{NamespaceKey, NamespaceModel};
pub use properties::{PropertyModel, PropertyType, Substitute};
pub use restrictions::{AnnotationMode, Bound, BoundValue, RestrictionModel};
pub use types::{
    ClassModel, EnumModel, EnumValue, InterfaceModel, SimpleModel, TypeId, TypeKind, TypeModel,
};
