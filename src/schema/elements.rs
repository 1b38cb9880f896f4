//! XSD element declarations
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Element_Declarations

use serde::{Deserialize, Serialize};

use crate::namespaces::QName;

use super::globals::TypeRef;

/// Element or attribute form (qualified or unqualified)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Form {
    /// Name must be namespace-qualified
    Qualified,
    /// Name is unqualified
    #[default]
    Unqualified,
}

impl Form {
    /// Get the form as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Form::Qualified => "qualified",
            Form::Unqualified => "unqualified",
        }
    }
}

/// XSD element declaration, global or local
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDecl {
    /// Element name
    pub name: QName,
    /// Resolved effective type; None means xs:anyType
    #[serde(default, rename = "type")]
    pub type_ref: Option<TypeRef>,
    /// Whether this element is nillable
    #[serde(default)]
    pub nillable: bool,
    /// Default value
    #[serde(default)]
    pub default: Option<String>,
    /// Fixed value
    #[serde(default)]
    pub fixed: Option<String>,
    /// Element form
    #[serde(default)]
    pub form: Form,
    /// Whether this element is abstract
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Substitution group head element name
    #[serde(default)]
    pub substitution_group: Option<QName>,
    /// Documentation annotations
    #[serde(default)]
    pub documentation: Vec<String>,
}

impl ElementDecl {
    /// Create an element declaration with the given type
    pub fn new(name: QName, type_ref: TypeRef) -> Self {
        Self {
            name,
            type_ref: Some(type_ref),
            ..Default::default()
        }
    }

    /// Create an untyped (xs:anyType) element declaration
    pub fn untyped(name: QName) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Put the element in a substitution group
    pub fn with_substitution_group(mut self, head: QName) -> Self {
        self.substitution_group = Some(head);
        self
    }

    /// Set the nillable flag
    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = nillable;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the form
    pub fn with_form(mut self, form: Form) -> Self {
        self.form = form;
        self
    }
}
