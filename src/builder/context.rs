//! Build context and identity cache
//!
//! Everything the builder has to remember between construction calls lives
//! in one [`BuildContext`] owned by the builder: the identity cache, root
//! element claims, substitution bookkeeping and the groups currently being
//! expanded.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::model::TypeId;
use crate::namespaces::QName;
use crate::naming::NamingPolicy;
use crate::schema::{SchemaSet, TypeDefinition};

use super::substitutions::SubstitutionRegistry;

/// The kind of schema construct a cached node was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructKind {
    /// Global complex type
    ComplexType,
    /// Global simple type
    SimpleType,
    /// Named model group
    Group,
    /// Named attribute group
    AttributeGroup,
    /// Inline type of a global element
    ElementType,
    /// Inline type of a global attribute
    AttributeType,
    /// Class synthesized for a root element sharing its type
    RootElement,
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstructKind::ComplexType => "complexType",
            ConstructKind::SimpleType => "simpleType",
            ConstructKind::Group => "group",
            ConstructKind::AttributeGroup => "attributeGroup",
            ConstructKind::ElementType => "elementType",
            ConstructKind::AttributeType => "attributeType",
            ConstructKind::RootElement => "rootElement",
        };
        f.write_str(name)
    }
}

/// Identity cache key: (construct kind, source location, qualified name)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Construct kind
    pub kind: ConstructKind,
    /// Declaring document
    pub location: String,
    /// Qualified name of the construct
    pub name: QName,
}

impl CacheKey {
    /// Create a key
    pub fn new(kind: ConstructKind, location: &str, name: &QName) -> Self {
        Self {
            kind,
            location: location.to_string(),
            name: name.clone(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind, self.name, self.location)
    }
}

/// One node per named construct for the lifetime of a build
///
/// Callers insert a node before building its children; a recursive
/// reference back to the construct then finds the node instead of
/// rebuilding it. Anonymous constructs are never cached.
#[derive(Debug, Default)]
pub struct IdentityCache {
    nodes: HashMap<CacheKey, TypeId>,
}

impl IdentityCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The node built for `key`, if any
    pub fn get(&self, key: &CacheKey) -> Option<TypeId> {
        self.nodes.get(key).copied()
    }

    /// Record the node for `key`; anonymous names are ignored
    ///
    /// Returns the node already cached for `key` when there is one, leaving
    /// the cache unchanged.
    pub fn insert(&mut self, key: CacheKey, id: TypeId) -> Option<TypeId> {
        if key.name.is_empty() {
            return None;
        }
        match self.nodes.get(&key) {
            Some(&existing) => Some(existing),
            None => {
                self.nodes.insert(key, id);
                None
            }
        }
    }

    /// Number of cached nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Output names the global constructs of a schema set will take
///
/// An anonymous type must not take one of these names (ignoring case), even
/// when the global it belongs to is built later. Names come from the naming
/// policy, so they compare with the candidates of anonymous types. Groups
/// only produce types when interfaces are generated.
#[derive(Debug, Default)]
pub struct ReservedNames {
    names: HashSet<(String, String)>,
}

impl ReservedNames {
    /// Collect the output names of every global type, and of every group
    /// when `interfaces` is set
    pub fn new(set: &SchemaSet, naming: &dyn NamingPolicy, interfaces: bool) -> Self {
        let mut reserved = Self::default();
        for document in &set.documents {
            for def in &document.types {
                match def {
                    TypeDefinition::Complex(def) => {
                        if let Some(name) = &def.name {
                            reserved.add(name, naming.type_name_from_complex_type(name, ""));
                        }
                    }
                    TypeDefinition::Simple(def) => {
                        if let Some(name) = &def.name {
                            reserved.add(name, naming.type_name_from_simple_type(name, ""));
                            reserved.add(name, naming.type_name_from_enum(name, ""));
                        }
                    }
                }
            }
            if interfaces {
                for group in &document.groups {
                    reserved.add(&group.name, naming.type_name_from_group(&group.name, ""));
                }
                for group in &document.attribute_groups {
                    reserved.add(
                        &group.name,
                        naming.type_name_from_attribute_group(&group.name, ""),
                    );
                }
            }
        }
        reserved
    }

    fn add(&mut self, name: &QName, output: String) {
        self.names
            .insert((name.namespace_str().to_string(), output.to_lowercase()));
    }

    /// Whether `name` is reserved in `namespace`, ignoring case
    pub fn contains(&self, namespace: Option<&str>, name: &str) -> bool {
        self.names
            .contains(&(namespace.unwrap_or("").to_string(), name.to_lowercase()))
    }
}

/// The first root element that claimed a type
#[derive(Debug, Clone)]
pub struct RootClaim {
    /// Element name
    pub element: QName,
    /// Declaring document
    pub location: String,
}

/// Mutable state threaded through construction
#[derive(Debug, Default)]
pub struct BuildContext {
    /// Named construct -> node
    pub cache: IdentityCache,
    /// Type -> root element that claimed it first
    pub roots: HashMap<TypeId, RootClaim>,
    /// Substitution group members and the properties waiting for them
    pub substitutions: SubstitutionRegistry,
    /// Model and attribute groups being expanded, innermost last
    pub active_groups: Vec<QName>,
    /// Inline type declaration (by address) -> node
    inline_types: HashMap<usize, TypeId>,
}

impl BuildContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the group `name` is already being expanded
    pub fn is_expanding(&self, name: &QName) -> bool {
        self.active_groups.contains(name)
    }

    /// The node already built for the inline declaration `def`
    ///
    /// A declaration inside a named group is reached once for the group's
    /// interface and once per referencing type; all of them share one node.
    /// The schema set outlives the build, so declaration addresses are stable.
    pub fn inline_type<T>(&self, def: &T) -> Option<TypeId> {
        self.inline_types.get(&address(def)).copied()
    }

    /// Record the node built for the inline declaration `def`
    pub fn insert_inline_type<T>(&mut self, def: &T, id: TypeId) {
        self.inline_types.entry(address(def)).or_insert(id);
    }
}

fn address<T>(def: &T) -> usize {
    def as *const T as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_distinguishes_kind_and_location() {
        let mut cache = IdentityCache::new();
        let name = QName::namespaced("urn:a", "Order");
        let id = TypeId(0);

        assert_eq!(cache.insert(CacheKey::new(ConstructKind::ComplexType, "a.xsd", &name), id), None);
        assert_eq!(
            cache.get(&CacheKey::new(ConstructKind::ComplexType, "a.xsd", &name)),
            Some(id)
        );
        assert_eq!(cache.get(&CacheKey::new(ConstructKind::SimpleType, "a.xsd", &name)), None);
        assert_eq!(cache.get(&CacheKey::new(ConstructKind::ComplexType, "b.xsd", &name)), None);
    }

    #[test]
    fn test_first_insert_wins() {
        let mut cache = IdentityCache::new();
        let key = CacheKey::new(ConstructKind::Group, "a.xsd", &QName::local("g"));
        cache.insert(key.clone(), TypeId(1));
        assert_eq!(cache.insert(key.clone(), TypeId(2)), Some(TypeId(1)));
        assert_eq!(cache.get(&key), Some(TypeId(1)));
    }

    #[test]
    fn test_anonymous_is_never_cached() {
        let mut cache = IdentityCache::new();
        let key = CacheKey::new(ConstructKind::ComplexType, "a.xsd", &QName::default());
        cache.insert(key.clone(), TypeId(0));
        assert!(cache.is_empty());
        assert_eq!(cache.get(&key), None);
    }

    #[test]
    fn test_reserved_names_use_the_naming_policy() {
        use crate::naming::PascalCaseNaming;
        use crate::schema::{AttributeGroupDef, ComplexTypeDef, GroupDef, ModelGroup, SchemaDocument};

        let set = SchemaSet::new(vec![SchemaDocument::new("a.xsd", Some("urn:a"))
            .with_complex_type(ComplexTypeDef::named(QName::namespaced("urn:a", "purchase-order")))
            .with_group(GroupDef {
                name: QName::namespaced("urn:a", "item"),
                group: ModelGroup::sequence(Vec::new()),
                documentation: Vec::new(),
            })
            .with_attribute_group(AttributeGroupDef {
                name: QName::namespaced("urn:a", "audit"),
                ..Default::default()
            })]);
        let naming = PascalCaseNaming::new();

        let reserved = ReservedNames::new(&set, &naming, true);
        assert!(reserved.contains(Some("urn:a"), "PurchaseOrder"));
        assert!(reserved.contains(Some("urn:a"), "purchaseorder"));
        assert!(!reserved.contains(Some("urn:a"), "purchase-order"));
        assert!(reserved.contains(Some("urn:a"), "IItem"));
        assert!(!reserved.contains(Some("urn:a"), "Item"));
        assert!(reserved.contains(Some("urn:a"), "IAudit"));
        assert!(!reserved.contains(Some("urn:b"), "PurchaseOrder"));

        let without_interfaces = ReservedNames::new(&set, &naming, false);
        assert!(without_interfaces.contains(Some("urn:a"), "PurchaseOrder"));
        assert!(!without_interfaces.contains(Some("urn:a"), "IItem"));
    }

    #[test]
    fn test_inline_types_follow_the_declaration() {
        use crate::schema::ComplexTypeDef;

        let first = ComplexTypeDef::anonymous();
        let second = ComplexTypeDef::anonymous();
        let mut ctx = BuildContext::new();
        ctx.insert_inline_type(&first, TypeId(3));
        ctx.insert_inline_type(&first, TypeId(4));

        assert_eq!(ctx.inline_type(&first), Some(TypeId(3)));
        // Structurally equal, but a distinct declaration
        assert_eq!(first, second);
        assert_eq!(ctx.inline_type(&second), None);
    }
}
