//! Properties of class and interface models

use std::fmt;

use crate::namespaces::QName;
use crate::schema::{Form, PrimitiveType};

use super::restrictions::RestrictionModel;
use super::types::TypeId;

/// The type of a property or text value: a graph node or a bare primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// A node of the type graph
    Model(TypeId),
    /// A built-in value type
    Primitive(PrimitiveType),
}

impl PropertyType {
    /// The node id, if this refers to a graph node
    pub fn model(&self) -> Option<TypeId> {
        match self {
            PropertyType::Model(id) => Some(*id),
            PropertyType::Primitive(_) => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Model(id) => write!(f, "{}", id),
            PropertyType::Primitive(p) => write!(f, "{}", p),
        }
    }
}

/// An element standing in for a substitution group head
#[derive(Debug, Clone, PartialEq)]
pub struct Substitute {
    /// The head element
    pub head: QName,
    /// The member element
    pub member: QName,
    /// The member's resolved type
    pub resolved_type: PropertyType,
}

/// A property of a class or interface
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyModel {
    /// The class or interface declaring the property
    pub owning_type: TypeId,
    /// Current name; post-processing may change it
    pub name: String,
    /// Name as first produced by the naming policy
    pub original_name: String,
    /// Element or attribute name in the schema
    pub schema_name: QName,
    /// Property type
    pub property_type: PropertyType,
    /// Restrictions applied directly on the property's anonymous type
    pub restrictions: Vec<RestrictionModel>,
    /// Attribute (true) or element (false)
    pub is_attribute: bool,
    /// Repeats (effective maxOccurs > 1, or a list type)
    pub is_collection: bool,
    /// May be absent
    pub is_nullable: bool,
    /// Element is nillable
    pub is_nillable: bool,
    /// Must be present
    pub is_required: bool,
    /// Default value
    pub default_value: Option<String>,
    /// Fixed value
    pub fixed_value: Option<String>,
    /// Qualified or unqualified
    pub form: Form,
    /// Namespace to serialize under, when it differs from the owner's
    pub explicit_namespace: Option<String>,
    /// Position within a sequence, when order is emitted
    pub order: Option<usize>,
    /// Members of a substitution group headed by this property's element
    pub substitutes: Vec<Substitute>,
    /// xs:any or xs:anyAttribute
    pub is_wildcard: bool,
    /// Documentation annotations
    pub documentation: Vec<String>,
}

impl PropertyModel {
    /// Create a property with default flags
    pub fn new(
        owning_type: TypeId,
        name: impl Into<String>,
        schema_name: QName,
        property_type: PropertyType,
    ) -> Self {
        let name = name.into();
        Self {
            owning_type,
            original_name: name.clone(),
            name,
            schema_name,
            property_type,
            restrictions: Vec::new(),
            is_attribute: false,
            is_collection: false,
            is_nullable: false,
            is_nillable: false,
            is_required: false,
            default_value: None,
            fixed_value: None,
            form: Form::default(),
            explicit_namespace: None,
            order: None,
            substitutes: Vec::new(),
            is_wildcard: false,
            documentation: Vec::new(),
        }
    }

    /// Whether this property models the same schema construct as `other`
    pub fn same_schema_identity(&self, other: &PropertyModel) -> bool {
        self.schema_name == other.schema_name
            && self.is_attribute == other.is_attribute
            && self.is_wildcard == other.is_wildcard
    }
}
