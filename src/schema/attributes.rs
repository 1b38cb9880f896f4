//! XSD attribute declarations and attribute groups
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Attribute_Declarations

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::namespaces::QName;

use super::elements::Form;
use super::globals::TypeRef;
use super::particles::Wildcard;

/// Attribute use mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeUse {
    /// Attribute is optional (default)
    #[default]
    Optional,
    /// Attribute is required
    Required,
    /// Attribute is prohibited
    Prohibited,
}

impl AttributeUse {
    /// Get the use as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeUse::Optional => "optional",
            AttributeUse::Required => "required",
            AttributeUse::Prohibited => "prohibited",
        }
    }
}

impl fmt::Display for AttributeUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// XSD attribute declaration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDecl {
    /// Attribute name
    pub name: QName,
    /// Attribute type; None means xs:anySimpleType
    #[serde(default, rename = "type")]
    pub type_ref: Option<TypeRef>,
    /// Usage mode
    #[serde(default, rename = "use")]
    pub use_mode: AttributeUse,
    /// Default value
    #[serde(default)]
    pub default: Option<String>,
    /// Fixed value
    #[serde(default)]
    pub fixed: Option<String>,
    /// Form (qualified/unqualified)
    #[serde(default)]
    pub form: Form,
    /// Documentation annotations
    #[serde(default)]
    pub documentation: Vec<String>,
}

impl AttributeDecl {
    /// Create an optional attribute declaration
    pub fn new(name: QName, type_ref: TypeRef) -> Self {
        Self {
            name,
            type_ref: Some(type_ref),
            ..Default::default()
        }
    }

    /// Set the use mode
    pub fn with_use(mut self, use_mode: AttributeUse) -> Self {
        self.use_mode = use_mode;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// An entry in an attribute list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AttributeItem {
    /// Local attribute declaration
    Attribute(AttributeDecl),
    /// Reference to a global attribute
    Ref(QName),
    /// Reference to a named attribute group
    Group(QName),
}

/// A named attribute group definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeGroupDef {
    /// Group name
    pub name: QName,
    /// Attributes, attribute references and nested group references
    #[serde(default)]
    pub attributes: Vec<AttributeItem>,
    /// Attribute wildcard
    #[serde(default)]
    pub any_attribute: Option<Wildcard>,
    /// Documentation annotations
    #[serde(default)]
    pub documentation: Vec<String>,
}
