//! XSD complex type definitions
//!
//! A compiled complex type carries its *declared* particle: for a type
//! derived by extension that is only the appended part, for a restriction it
//! is the full restated content. The builder relies on this split to avoid
//! duplicating inherited content.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Complex_Type_Definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::namespaces::QName;

use super::attributes::AttributeItem;
use super::globals::TypeRef;
use super::particles::{Particle, Wildcard};

/// Derivation method for complex types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DerivationMethod {
    /// Type derived by restriction
    Restriction,
    /// Type derived by extension
    Extension,
}

impl fmt::Display for DerivationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Restriction => write!(f, "restriction"),
            Self::Extension => write!(f, "extension"),
        }
    }
}

/// Base type and derivation method of a complex type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    /// Base type name
    pub base: QName,
    /// Derivation method
    pub method: DerivationMethod,
}

/// XSD complex type definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexTypeDef {
    /// Type name (None for anonymous types)
    #[serde(default)]
    pub name: Option<QName>,
    /// Documentation annotations
    #[serde(default)]
    pub documentation: Vec<String>,
    /// Whether this type is abstract
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Whether this is a mixed content type
    #[serde(default)]
    pub mixed: bool,
    /// Base type, for derived types
    #[serde(default)]
    pub derivation: Option<Derivation>,
    /// Declared content particle
    #[serde(default)]
    pub particle: Option<Particle>,
    /// Declared attributes
    #[serde(default)]
    pub attributes: Vec<AttributeItem>,
    /// Attribute wildcard
    #[serde(default)]
    pub any_attribute: Option<Wildcard>,
    /// Value type of simple content, when the base is a simple type
    #[serde(default)]
    pub simple_content: Option<TypeRef>,
}

impl ComplexTypeDef {
    /// Create a named complex type
    pub fn named(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    /// Create an anonymous complex type
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Set the declared particle
    pub fn with_particle(mut self, particle: Particle) -> Self {
        self.particle = Some(particle);
        self
    }

    /// Derive from a base type
    pub fn derived(mut self, base: QName, method: DerivationMethod) -> Self {
        self.derivation = Some(Derivation { base, method });
        self
    }

    /// Add an attribute item
    pub fn with_attribute(mut self, item: AttributeItem) -> Self {
        self.attributes.push(item);
        self
    }

    /// Set the mixed flag
    pub fn with_mixed(mut self, mixed: bool) -> Self {
        self.mixed = mixed;
        self
    }

    /// Set the abstract flag
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Set the attribute wildcard
    pub fn with_any_attribute(mut self, wildcard: Wildcard) -> Self {
        self.any_attribute = Some(wildcard);
        self
    }

    /// Set simple content
    pub fn with_simple_content(mut self, value_type: TypeRef) -> Self {
        self.simple_content = Some(value_type);
        self
    }

    /// The derivation method, if any
    pub fn derivation_method(&self) -> Option<DerivationMethod> {
        self.derivation.as_ref().map(|d| d.method)
    }
}
