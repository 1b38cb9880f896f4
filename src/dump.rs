//! Serializable projection of a type graph
//!
//! [`GraphDump`] flattens the arena into namespaces, types and properties,
//! with every node reference rendered as `Namespace.Name`. The order is the
//! graph's own (namespaces and types in creation order), so two builds of
//! the same schema set dump to identical JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::model::{PropertyModel, PropertyType, RestrictionModel, TypeGraph, TypeId, TypeKind, TypeModel};

/// Complete graph dump
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphDump {
    /// Output namespaces, in creation order
    pub namespaces: Vec<NamespaceDump>,
}

/// One output namespace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamespaceDump {
    /// Output name
    pub name: String,
    /// Source document of the first construct placed here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// XML namespace of the first construct placed here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_namespace: Option<String>,
    /// Needs fully qualified references
    #[serde(default, skip_serializing_if = "is_false")]
    pub ambiguous: bool,
    /// Types, in creation order
    pub types: Vec<TypeDump>,
}

/// One node
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeDump {
    /// Name within the namespace
    pub name: String,
    /// class, interface, enum or simple
    pub kind: String,
    /// Schema identity in Clark notation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    /// Built from an inline definition
    #[serde(default, skip_serializing_if = "is_false")]
    pub anonymous: bool,
    /// Root element, in Clark notation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_element: Option<String>,
    /// Shared by several root elements
    #[serde(default, skip_serializing_if = "is_false")]
    pub abstract_root: bool,
    /// Abstract class
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_abstract: bool,
    /// Mixed content
    #[serde(default, skip_serializing_if = "is_false")]
    pub mixed: bool,
    /// Base class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_class: Option<String>,
    /// Implemented or extended interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    /// Derived classes or implementers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub derived_types: Vec<String>,
    /// Text content type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
    /// Value type of a simple node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// List of `value_type`
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_list: bool,
    /// Properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDump>,
    /// Enum values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<EnumValueDump>,
    /// Restrictions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<RestrictionDump>,
    /// Documentation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documentation: Vec<String>,
}

/// One property of a class or interface
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyDump {
    /// Property name
    pub name: String,
    /// Element or attribute name in Clark notation
    pub schema_name: String,
    /// Type: `Namespace.Name` for nodes, the built-in name for primitives
    #[serde(rename = "type")]
    pub property_type: String,
    /// Attribute rather than element
    #[serde(default, skip_serializing_if = "is_false")]
    pub attribute: bool,
    /// Repeats
    #[serde(default, skip_serializing_if = "is_false")]
    pub collection: bool,
    /// May be absent
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    /// Nillable element
    #[serde(default, skip_serializing_if = "is_false")]
    pub nillable: bool,
    /// Must be present
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// xs:any or xs:anyAttribute
    #[serde(default, skip_serializing_if = "is_false")]
    pub wildcard: bool,
    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Fixed value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed: Option<String>,
    /// qualified or unqualified
    pub form: String,
    /// Namespace differing from the owner's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_namespace: Option<String>,
    /// Sequence position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    /// Substitution group members, in Clark notation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substitutes: Vec<String>,
    /// Restrictions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<RestrictionDump>,
}

/// One enum value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumValueDump {
    /// Member name
    pub name: String,
    /// Schema literal
    pub value: String,
    /// Deprecated
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
}

/// One restriction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestrictionDump {
    /// Restriction kind (`minLength`, `pattern`, ...)
    pub kind: String,
    /// Value as a literal
    pub value: String,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl From<&RestrictionModel> for RestrictionDump {
    fn from(restriction: &RestrictionModel) -> Self {
        Self {
            kind: restriction.kind().to_string(),
            value: restriction.value_literal(),
        }
    }
}

impl GraphDump {
    /// Project a graph
    pub fn from_graph(graph: &TypeGraph) -> Self {
        let namespaces = graph
            .namespaces()
            .map(|ns| NamespaceDump {
                name: ns.output_name.clone(),
                source: ns.key.source.clone(),
                xml_namespace: ns.key.xml_namespace.clone(),
                ambiguous: ns.is_ambiguous,
                types: ns
                    .types
                    .values()
                    .map(|&id| type_dump(graph, graph.get(id)))
                    .collect(),
            })
            .collect();
        Self { namespaces }
    }

    /// Serialize as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Find a type by namespace and name
    pub fn find(&self, namespace: &str, name: &str) -> Option<&TypeDump> {
        self.namespaces
            .iter()
            .find(|ns| ns.name == namespace)
            .and_then(|ns| ns.types.iter().find(|t| t.name == name))
    }

    /// Total number of types
    pub fn type_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.types.len()).sum()
    }
}

impl TypeDump {
    /// Find a property by name
    pub fn property(&self, name: &str) -> Option<&PropertyDump> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Textual summary, one line per type
impl fmt::Display for GraphDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ns in &self.namespaces {
            writeln!(f, "namespace {} ({} types)", ns.name, ns.types.len())?;
            for t in &ns.types {
                write!(f, "  {} {}", t.kind, t.name)?;
                if let Some(base) = &t.base_class {
                    write!(f, " : {}", base)?;
                }
                if !t.interfaces.is_empty() {
                    write!(f, " implements {}", t.interfaces.join(", "))?;
                }
                if let Some(root) = &t.root_element {
                    write!(f, " [root {}]", root)?;
                }
                writeln!(f)?;
                for p in &t.properties {
                    let marker = if p.collection { "[]" } else { "" };
                    writeln!(f, "    {}: {}{}", p.name, p.property_type, marker)?;
                }
                for v in &t.values {
                    writeln!(f, "    {} = {:?}", v.name, v.value)?;
                }
            }
        }
        Ok(())
    }
}

fn reference(graph: &TypeGraph, id: TypeId) -> String {
    graph.get(id).full_name()
}

fn type_name(graph: &TypeGraph, property_type: PropertyType) -> String {
    match property_type {
        PropertyType::Model(id) => reference(graph, id),
        PropertyType::Primitive(p) => p.to_string(),
    }
}

fn type_dump(graph: &TypeGraph, node: &TypeModel) -> TypeDump {
    let mut dump = TypeDump {
        name: node.name.clone(),
        kind: node.kind.label().to_string(),
        schema_name: (!node.schema_identity.is_empty()).then(|| node.schema_identity.to_string()),
        anonymous: node.is_anonymous,
        root_element: node.root_element_name.as_ref().map(|q| q.to_string()),
        abstract_root: node.is_abstract_root,
        documentation: node.documentation.clone(),
        ..Default::default()
    };
    let references = |ids: &[TypeId]| ids.iter().map(|&id| reference(graph, id)).collect::<Vec<_>>();

    match &node.kind {
        TypeKind::Class(class) => {
            dump.is_abstract = class.is_abstract;
            dump.mixed = class.is_mixed_content;
            dump.base_class = class.base_class.map(|id| reference(graph, id));
            dump.interfaces = references(&class.interfaces);
            dump.derived_types = references(&class.derived_types);
            dump.text_type = class.text_value_type.map(|t| type_name(graph, t));
            dump.properties = class.properties.iter().map(|p| property_dump(graph, p)).collect();
        }
        TypeKind::Interface(interface) => {
            dump.interfaces = references(&interface.interfaces);
            dump.derived_types = references(&interface.derived_types);
            dump.properties = interface.properties.iter().map(|p| property_dump(graph, p)).collect();
        }
        TypeKind::Enum(e) => {
            dump.values = e
                .values
                .iter()
                .map(|v| EnumValueDump {
                    name: v.name.clone(),
                    value: v.value.clone(),
                    deprecated: v.is_deprecated,
                })
                .collect();
        }
        TypeKind::Simple(simple) => {
            dump.value_type = Some(simple.value_type.to_string());
            dump.is_list = simple.is_list;
            dump.restrictions = simple.restrictions.iter().map(RestrictionDump::from).collect();
        }
    }
    dump
}

fn property_dump(graph: &TypeGraph, property: &PropertyModel) -> PropertyDump {
    PropertyDump {
        name: property.name.clone(),
        schema_name: property.schema_name.to_string(),
        property_type: type_name(graph, property.property_type),
        attribute: property.is_attribute,
        collection: property.is_collection,
        nullable: property.is_nullable,
        nillable: property.is_nillable,
        required: property.is_required,
        wildcard: property.is_wildcard,
        default: property.default_value.clone(),
        fixed: property.fixed_value.clone(),
        form: property.form.as_str().to_string(),
        explicit_namespace: property.explicit_namespace.clone(),
        order: property.order,
        substitutes: property
            .substitutes
            .iter()
            .map(|s| s.member.to_string())
            .collect(),
        restrictions: property.restrictions.iter().map(RestrictionDump::from).collect(),
    }
}
