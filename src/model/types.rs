//! Type graph nodes
//!
//! A closed set of node variants sharing one header: [`TypeModel`] holds what
//! every node has (name, namespace, schema identity, root information), and
//! [`TypeKind`] the variant-specific part. Nodes reference each other through
//! [`TypeId`]s into the graph arena, never by ownership.

use std::fmt;

use crate::namespaces::QName;
use crate::schema::PrimitiveType;

use super::properties::{PropertyModel, PropertyType};
use super::restrictions::RestrictionModel;

/// Stable index of a node in the [`TypeGraph`](super::TypeGraph) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    /// The arena index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A class: a complex type or a synthesized root element class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassModel {
    /// Base class, for derived types
    pub base_class: Option<TypeId>,
    /// Classes whose base class is this one
    pub derived_types: Vec<TypeId>,
    /// Declared properties (inherited ones live on the ancestors)
    pub properties: Vec<PropertyModel>,
    /// Implemented interfaces
    pub interfaces: Vec<TypeId>,
    /// Abstract class
    pub is_abstract: bool,
    /// Mixed content (text interleaved with elements)
    pub is_mixed_content: bool,
    /// Type of the text content, for simple or mixed content
    pub text_value_type: Option<PropertyType>,
}

/// An interface: a named model group or attribute group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceModel {
    /// Implementers (classes or interfaces)
    pub derived_types: Vec<TypeId>,
    /// Properties, flattened over nested groups
    pub properties: Vec<PropertyModel>,
    /// Interfaces of nested group references
    pub interfaces: Vec<TypeId>,
}

/// One value of an enum
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    /// Member name
    pub name: String,
    /// Literal value in the schema
    pub value: String,
    /// Annotated as deprecated
    pub is_deprecated: bool,
    /// Documentation annotations
    pub documentation: Vec<String>,
}

/// An enumeration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumModel {
    /// Values, deduplicated by literal
    pub values: Vec<EnumValue>,
}

impl EnumModel {
    /// Find a value by literal
    pub fn value(&self, literal: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.value == literal)
    }
}

/// A restricted simple value
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleModel {
    /// Underlying primitive
    pub value_type: PrimitiveType,
    /// Restrictions
    pub restrictions: Vec<RestrictionModel>,
    /// List of `value_type`
    pub is_list: bool,
}

/// Variant part of a node
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Class
    Class(ClassModel),
    /// Interface
    Interface(InterfaceModel),
    /// Enum
    Enum(EnumModel),
    /// Simple
    Simple(SimpleModel),
}

impl TypeKind {
    /// Variant name, as used in logs and dumps
    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Class(_) => "class",
            TypeKind::Interface(_) => "interface",
            TypeKind::Enum(_) => "enum",
            TypeKind::Simple(_) => "simple",
        }
    }
}

/// A node of the type graph
#[derive(Debug, Clone, PartialEq)]
pub struct TypeModel {
    /// Arena id
    pub id: TypeId,
    /// Name, unique within its namespace
    pub name: String,
    /// Output name of the namespace holding the node
    pub namespace: String,
    /// Qualified name in the schema; empty for anonymous constructs
    pub schema_identity: QName,
    /// Documentation annotations
    pub documentation: Vec<String>,
    /// Built from an inline, unnamed definition
    pub is_anonymous: bool,
    /// Root element this node is the type of
    pub root_element_name: Option<QName>,
    /// A type shared by several root elements, demoted to an abstract base
    pub is_abstract_root: bool,
    /// Variant part
    pub kind: TypeKind,
}

impl TypeModel {
    /// Get as class
    pub fn as_class(&self) -> Option<&ClassModel> {
        match &self.kind {
            TypeKind::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Get as mutable class
    pub fn as_class_mut(&mut self) -> Option<&mut ClassModel> {
        match &mut self.kind {
            TypeKind::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Get as interface
    pub fn as_interface(&self) -> Option<&InterfaceModel> {
        match &self.kind {
            TypeKind::Interface(i) => Some(i),
            _ => None,
        }
    }

    /// Get as mutable interface
    pub fn as_interface_mut(&mut self) -> Option<&mut InterfaceModel> {
        match &mut self.kind {
            TypeKind::Interface(i) => Some(i),
            _ => None,
        }
    }

    /// Get as enum
    pub fn as_enum(&self) -> Option<&EnumModel> {
        match &self.kind {
            TypeKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Get as simple
    pub fn as_simple(&self) -> Option<&SimpleModel> {
        match &self.kind {
            TypeKind::Simple(s) => Some(s),
            _ => None,
        }
    }

    /// Properties of a class or interface; empty for other variants
    pub fn properties(&self) -> &[PropertyModel] {
        match &self.kind {
            TypeKind::Class(c) => &c.properties,
            TypeKind::Interface(i) => &i.properties,
            _ => &[],
        }
    }

    /// Mutable properties of a class or interface
    pub fn properties_mut(&mut self) -> Option<&mut Vec<PropertyModel>> {
        match &mut self.kind {
            TypeKind::Class(c) => Some(&mut c.properties),
            TypeKind::Interface(i) => Some(&mut i.properties),
            _ => None,
        }
    }

    /// Implemented (or, for interfaces, extended) interfaces
    pub fn interfaces(&self) -> &[TypeId] {
        match &self.kind {
            TypeKind::Class(c) => &c.interfaces,
            TypeKind::Interface(i) => &i.interfaces,
            _ => &[],
        }
    }

    /// Fully qualified display name `namespace.Name`
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}
