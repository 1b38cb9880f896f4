//! Global declarations of a compiled schema set
//!
//! [`SchemaSet`] is the input of the type graph builder: every document of an
//! import/include-resolved schema, with its global types, elements, groups and
//! attribute groups. Lookups go through a [`GlobalMaps`] index built on first
//! use; when two documents declare the same QName the first one in document
//! order wins.

use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::namespaces::QName;

use super::attributes::{AttributeDecl, AttributeGroupDef};
use super::complex_types::ComplexTypeDef;
use super::elements::ElementDecl;
use super::particles::ModelGroup;
use super::simple_types::SimpleTypeDef;

/// A type definition - either simple or complex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDefinition {
    /// Complex type
    Complex(ComplexTypeDef),
    /// Simple type
    Simple(SimpleTypeDef),
}

impl TypeDefinition {
    /// Get the type name (None for anonymous types)
    pub fn name(&self) -> Option<&QName> {
        match self {
            TypeDefinition::Complex(t) => t.name.as_ref(),
            TypeDefinition::Simple(t) => t.name.as_ref(),
        }
    }

    /// Check if this is a complex type
    pub fn is_complex(&self) -> bool {
        matches!(self, TypeDefinition::Complex(_))
    }

    /// Get as complex type
    pub fn as_complex(&self) -> Option<&ComplexTypeDef> {
        match self {
            TypeDefinition::Complex(t) => Some(t),
            TypeDefinition::Simple(_) => None,
        }
    }

    /// Get as simple type
    pub fn as_simple(&self) -> Option<&SimpleTypeDef> {
        match self {
            TypeDefinition::Simple(t) => Some(t),
            TypeDefinition::Complex(_) => None,
        }
    }
}

/// A reference to a type: a global (or built-in) name, or an inline definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeRef {
    /// Named global or built-in type
    Named(QName),
    /// Anonymous inline type
    Anonymous(Box<TypeDefinition>),
}

impl TypeRef {
    /// Reference a built-in XSD type
    pub fn xsd(local_name: &str) -> Self {
        TypeRef::Named(QName::xsd(local_name))
    }

    /// Reference a named type
    pub fn named(name: QName) -> Self {
        TypeRef::Named(name)
    }

    /// Inline an anonymous complex type
    pub fn complex(def: ComplexTypeDef) -> Self {
        TypeRef::Anonymous(Box::new(TypeDefinition::Complex(def)))
    }

    /// Inline an anonymous simple type
    pub fn simple(def: SimpleTypeDef) -> Self {
        TypeRef::Anonymous(Box::new(TypeDefinition::Simple(def)))
    }
}

/// A named model group definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDef {
    /// Group name
    pub name: QName,
    /// The group's content
    pub group: ModelGroup,
    /// Documentation annotations
    #[serde(default)]
    pub documentation: Vec<String>,
}

/// One schema document of the set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    /// Source identity (URI or path) of the document
    pub location: String,
    /// Target namespace
    #[serde(default)]
    pub target_namespace: Option<String>,
    /// Locations of included documents
    #[serde(default)]
    pub includes: Vec<String>,
    /// Locations of imported documents
    #[serde(default)]
    pub imports: Vec<String>,
    /// Global type definitions
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
    /// Global element declarations
    #[serde(default)]
    pub elements: Vec<ElementDecl>,
    /// Named model groups
    #[serde(default)]
    pub groups: Vec<GroupDef>,
    /// Named attribute groups
    #[serde(default)]
    pub attribute_groups: Vec<AttributeGroupDef>,
    /// Global attribute declarations
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,
}

impl SchemaDocument {
    /// Create an empty document
    pub fn new(location: impl Into<String>, target_namespace: Option<&str>) -> Self {
        Self {
            location: location.into(),
            target_namespace: target_namespace.map(str::to_string),
            ..Default::default()
        }
    }

    /// All documents this one depends on (includes, then imports)
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.includes
            .iter()
            .chain(self.imports.iter())
            .map(String::as_str)
    }

    /// Add a global type
    pub fn with_type(mut self, def: TypeDefinition) -> Self {
        self.types.push(def);
        self
    }

    /// Add a global complex type
    pub fn with_complex_type(self, def: ComplexTypeDef) -> Self {
        self.with_type(TypeDefinition::Complex(def))
    }

    /// Add a global simple type
    pub fn with_simple_type(self, def: SimpleTypeDef) -> Self {
        self.with_type(TypeDefinition::Simple(def))
    }

    /// Add a global element
    pub fn with_element(mut self, decl: ElementDecl) -> Self {
        self.elements.push(decl);
        self
    }

    /// Add a named group
    pub fn with_group(mut self, group: GroupDef) -> Self {
        self.groups.push(group);
        self
    }

    /// Add a named attribute group
    pub fn with_attribute_group(mut self, group: AttributeGroupDef) -> Self {
        self.attribute_groups.push(group);
        self
    }

    /// Add a global attribute
    pub fn with_attribute(mut self, decl: AttributeDecl) -> Self {
        self.attributes.push(decl);
        self
    }

    /// Add an include edge
    pub fn including(mut self, location: impl Into<String>) -> Self {
        self.includes.push(location.into());
        self
    }

    /// Add an import edge
    pub fn importing(mut self, location: impl Into<String>) -> Self {
        self.imports.push(location.into());
        self
    }
}

/// A global declaration together with the document declaring it
#[derive(Debug)]
pub struct Global<'a, T> {
    /// The declaring document
    pub document: &'a SchemaDocument,
    /// The declaration
    pub def: &'a T,
}

impl<T> Clone for Global<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Global<'_, T> {}

impl<'a, T> Global<'a, T> {
    /// Source identity of the declaring document
    pub fn location(&self) -> &'a str {
        &self.document.location
    }
}

/// (document index, item index)
type Slot = (usize, usize);

/// Index of global declarations by QName
#[derive(Debug, Default)]
pub struct GlobalMaps {
    /// Global type definitions
    pub types: IndexMap<QName, Slot>,
    /// Global element declarations
    pub elements: IndexMap<QName, Slot>,
    /// Model group definitions
    pub groups: IndexMap<QName, Slot>,
    /// Attribute group definitions
    pub attribute_groups: IndexMap<QName, Slot>,
    /// Global attribute declarations
    pub attributes: IndexMap<QName, Slot>,
    /// Substitution group head -> direct member elements
    pub substitution_groups: IndexMap<QName, Vec<Slot>>,
    /// Documents by location
    pub documents: IndexMap<String, usize>,
}

impl GlobalMaps {
    fn build(documents: &[SchemaDocument]) -> Self {
        let mut maps = GlobalMaps::default();

        for (d, doc) in documents.iter().enumerate() {
            maps.documents.entry(doc.location.clone()).or_insert(d);

            for (i, def) in doc.types.iter().enumerate() {
                if let Some(name) = def.name() {
                    maps.types.entry(name.clone()).or_insert((d, i));
                }
            }
            for (i, decl) in doc.elements.iter().enumerate() {
                maps.elements.entry(decl.name.clone()).or_insert((d, i));
            }
            for (i, group) in doc.groups.iter().enumerate() {
                maps.groups.entry(group.name.clone()).or_insert((d, i));
            }
            for (i, group) in doc.attribute_groups.iter().enumerate() {
                maps.attribute_groups.entry(group.name.clone()).or_insert((d, i));
            }
            for (i, decl) in doc.attributes.iter().enumerate() {
                maps.attributes.entry(decl.name.clone()).or_insert((d, i));
            }
        }

        // Members are registered against the winning declaration only
        for (name, &(d, i)) in &maps.elements {
            let decl = &documents[d].elements[i];
            debug_assert_eq!(&decl.name, name);
            if let Some(head) = &decl.substitution_group {
                maps.substitution_groups
                    .entry(head.clone())
                    .or_default()
                    .push((d, i));
            }
        }

        maps
    }
}

/// A compiled, import-resolved set of schema documents
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSet {
    /// Documents, in the order the parser produced them
    pub documents: Vec<SchemaDocument>,
    #[serde(skip)]
    maps: OnceCell<GlobalMaps>,
}

impl Clone for SchemaSet {
    fn clone(&self) -> Self {
        Self::new(self.documents.clone())
    }
}

impl SchemaSet {
    /// Create a schema set from its documents
    pub fn new(documents: Vec<SchemaDocument>) -> Self {
        Self {
            documents,
            maps: OnceCell::new(),
        }
    }

    /// Load a schema set serialized as JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a schema set from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The global index
    pub fn maps(&self) -> &GlobalMaps {
        self.maps.get_or_init(|| GlobalMaps::build(&self.documents))
    }

    fn resolve<'a, T>(
        &'a self,
        slot: Option<&Slot>,
        items: impl Fn(&'a SchemaDocument) -> &'a [T],
    ) -> Option<Global<'a, T>> {
        slot.map(|&(d, i)| {
            let document = &self.documents[d];
            Global {
                document,
                def: &items(document)[i],
            }
        })
    }

    /// Get a document by location
    pub fn document(&self, location: &str) -> Option<&SchemaDocument> {
        self.maps()
            .documents
            .get(location)
            .map(|&d| &self.documents[d])
    }

    /// Look up a global type
    pub fn lookup_type(&self, name: &QName) -> Option<Global<'_, TypeDefinition>> {
        self.resolve(self.maps().types.get(name), |d| d.types.as_slice())
    }

    /// Look up a global element
    pub fn lookup_element(&self, name: &QName) -> Option<Global<'_, ElementDecl>> {
        self.resolve(self.maps().elements.get(name), |d| d.elements.as_slice())
    }

    /// Look up a named model group
    pub fn lookup_group(&self, name: &QName) -> Option<Global<'_, GroupDef>> {
        self.resolve(self.maps().groups.get(name), |d| d.groups.as_slice())
    }

    /// Look up a named attribute group
    pub fn lookup_attribute_group(&self, name: &QName) -> Option<Global<'_, AttributeGroupDef>> {
        self.resolve(self.maps().attribute_groups.get(name), |d| {
            d.attribute_groups.as_slice()
        })
    }

    /// Look up a global attribute
    pub fn lookup_attribute(&self, name: &QName) -> Option<Global<'_, AttributeDecl>> {
        self.resolve(self.maps().attributes.get(name), |d| d.attributes.as_slice())
    }

    /// Direct members of the substitution group headed by `head`
    pub fn substitution_members(&self, head: &QName) -> Vec<Global<'_, ElementDecl>> {
        self.maps()
            .substitution_groups
            .get(head)
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|slot| self.resolve(Some(slot), |d| d.elements.as_slice()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
