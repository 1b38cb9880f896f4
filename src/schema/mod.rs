//! Compiled XML Schema sets
//!
//! The data the type graph builder consumes: an already parsed, import-resolved
//! and UPA-checked set of schema documents. Parsing raw XSD text is someone
//! else's job; these types only fix the shape of the hand-off, and are
//! `serde`-(de)serializable so a compiled set can travel as JSON.

pub mod attributes;
pub mod builtins;
pub mod complex_types;
pub mod elements;
pub mod facets;
pub mod globals;
pub mod particles;
pub mod simple_types;

pub use attributes::{AttributeDecl, AttributeGroupDef, AttributeItem, AttributeUse};
pub use builtins::PrimitiveType;
pub use complex_types::{ComplexTypeDef, Derivation, DerivationMethod};
pub use elements::{ElementDecl, Form};
pub use facets::{Facet, WhiteSpace};
pub use globals::{Global, GlobalMaps, GroupDef, SchemaDocument, SchemaSet, TypeDefinition, TypeRef};
pub use particles::{ModelGroup, ModelType, Occurs, Particle, ProcessContents, Term, Wildcard};
pub use simple_types::{SimpleContent, SimpleTypeDef, SimpleTypeVariety};
