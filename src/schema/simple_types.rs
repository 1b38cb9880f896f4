//! XSD simple type definitions
//!
//! Atomic restrictions, lists and unions, as they arrive compiled.
//!
//! See: https://www.w3.org/TR/xmlschema-2/

use serde::{Deserialize, Serialize};

use crate::namespaces::QName;

use super::facets::Facet;
use super::globals::TypeRef;

/// Variety of a simple type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleTypeVariety {
    /// Atomic type (single value)
    Atomic,
    /// List type (whitespace-separated values)
    List,
    /// Union type (value matches one of several types)
    Union,
}

/// The derivation of a simple type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SimpleContent {
    /// Restriction of a base type by facets
    Restriction {
        /// Base type
        base: TypeRef,
        /// Constraining facets
        #[serde(default)]
        facets: Vec<Facet>,
    },
    /// List of an item type
    List {
        /// Item type
        item: TypeRef,
    },
    /// Union of member types
    Union {
        /// Member types
        members: Vec<TypeRef>,
    },
}

/// XSD simple type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleTypeDef {
    /// Type name (None for anonymous types)
    #[serde(default)]
    pub name: Option<QName>,
    /// Documentation annotations
    #[serde(default)]
    pub documentation: Vec<String>,
    /// Derivation
    pub content: SimpleContent,
}

impl SimpleTypeDef {
    /// Create a restriction of `base`
    pub fn restriction(name: Option<QName>, base: TypeRef, facets: Vec<Facet>) -> Self {
        Self {
            name,
            documentation: Vec::new(),
            content: SimpleContent::Restriction { base, facets },
        }
    }

    /// Create a list of `item`
    pub fn list(name: Option<QName>, item: TypeRef) -> Self {
        Self {
            name,
            documentation: Vec::new(),
            content: SimpleContent::List { item },
        }
    }

    /// Create a union of `members`
    pub fn union(name: Option<QName>, members: Vec<TypeRef>) -> Self {
        Self {
            name,
            documentation: Vec::new(),
            content: SimpleContent::Union { members },
        }
    }

    /// Get the variety of this simple type
    pub fn variety(&self) -> SimpleTypeVariety {
        match self.content {
            SimpleContent::Restriction { .. } => SimpleTypeVariety::Atomic,
            SimpleContent::List { .. } => SimpleTypeVariety::List,
            SimpleContent::Union { .. } => SimpleTypeVariety::Union,
        }
    }

    /// Facets of a restriction, empty for lists and unions
    pub fn facets(&self) -> &[Facet] {
        match &self.content {
            SimpleContent::Restriction { facets, .. } => facets,
            _ => &[],
        }
    }
}
