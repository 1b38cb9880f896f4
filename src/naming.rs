//! Naming policies
//!
//! The builder never invents identifiers itself: every candidate name comes
//! from a [`NamingPolicy`], one method per kind of construct. Each method gets
//! the construct's qualified name and a container hint (the enclosing type's
//! name, or the element an anonymous type is declared on). Making candidates
//! unique within a namespace or class stays the builder's job.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::namespaces::QName;

/// Produces candidate identifiers for schema constructs
pub trait NamingPolicy {
    /// Property name for an attribute declared in `container`
    fn property_name_from_attribute(&self, attribute: &QName, container: &str) -> String;

    /// Property name for an element declared in `container`
    fn property_name_from_element(&self, element: &QName, container: &str) -> String;

    /// Type name for a complex type
    fn type_name_from_complex_type(&self, name: &QName, hint: &str) -> String;

    /// Type name for an attribute group
    fn type_name_from_attribute_group(&self, name: &QName, hint: &str) -> String;

    /// Type name for a model group
    fn type_name_from_group(&self, name: &QName, hint: &str) -> String;

    /// Type name for a (non-enum) simple type
    fn type_name_from_simple_type(&self, name: &QName, hint: &str) -> String;

    /// Type name for a class synthesized for a root element
    fn type_name_from_root_element(&self, element: &QName, hint: &str) -> String;

    /// Type name for an enum simple type
    fn type_name_from_enum(&self, name: &QName, hint: &str) -> String;

    /// Member name for an enumeration literal
    fn enum_member_name(&self, value: &str, enum_name: &str) -> String;

    /// Type name for an anonymous type declared on an attribute
    fn name_from_attribute(&self, attribute: &QName, container: &str) -> String;

    /// Type name for an anonymous type declared on an element
    fn name_from_element(&self, element: &QName, container: &str) -> String;
}

static WORD_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

/// Convert an XML name or literal to PascalCase
///
/// Non-alphanumeric runs separate words; each word's first character is
/// upper-cased and the rest kept. Identifiers that would start with a digit
/// get a leading underscore.
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in WORD_SEPARATOR.split(s).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    if result.chars().next().map_or(false, |c| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// The default policy: PascalCase identifiers derived from XML names
#[derive(Debug, Clone, Default)]
pub struct PascalCaseNaming {
    /// Prefix for interfaces built from groups and attribute groups
    pub interface_prefix: String,
}

impl PascalCaseNaming {
    /// Create the policy with the conventional `I` interface prefix
    pub fn new() -> Self {
        Self {
            interface_prefix: "I".to_string(),
        }
    }

    fn member_name(&self, name: &QName, container: &str) -> String {
        let candidate = to_pascal_case(&name.local_name);
        if candidate == container {
            format!("{}Property", candidate)
        } else {
            candidate
        }
    }
}

impl NamingPolicy for PascalCaseNaming {
    fn property_name_from_attribute(&self, attribute: &QName, container: &str) -> String {
        self.member_name(attribute, container)
    }

    fn property_name_from_element(&self, element: &QName, container: &str) -> String {
        self.member_name(element, container)
    }

    fn type_name_from_complex_type(&self, name: &QName, _hint: &str) -> String {
        to_pascal_case(&name.local_name)
    }

    fn type_name_from_attribute_group(&self, name: &QName, _hint: &str) -> String {
        format!("{}{}", self.interface_prefix, to_pascal_case(&name.local_name))
    }

    fn type_name_from_group(&self, name: &QName, _hint: &str) -> String {
        format!("{}{}", self.interface_prefix, to_pascal_case(&name.local_name))
    }

    fn type_name_from_simple_type(&self, name: &QName, _hint: &str) -> String {
        to_pascal_case(&name.local_name)
    }

    fn type_name_from_root_element(&self, element: &QName, _hint: &str) -> String {
        to_pascal_case(&element.local_name)
    }

    fn type_name_from_enum(&self, name: &QName, _hint: &str) -> String {
        to_pascal_case(&name.local_name)
    }

    fn enum_member_name(&self, value: &str, _enum_name: &str) -> String {
        let name = to_pascal_case(value);
        if name.is_empty() {
            "Empty".to_string()
        } else {
            name
        }
    }

    fn name_from_attribute(&self, attribute: &QName, container: &str) -> String {
        format!("{}{}", container, to_pascal_case(&attribute.local_name))
    }

    fn name_from_element(&self, element: &QName, _container: &str) -> String {
        to_pascal_case(&element.local_name)
    }
}
