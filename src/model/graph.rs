//! The type graph arena
//!
//! Nodes live in one `Vec` and are addressed by [`TypeId`]. Edges that have
//! an inverse (base class / derived types, interface / implementers) are only
//! ever created through [`TypeGraph::set_base_class`] and
//! [`TypeGraph::add_implementer`], which maintain both directions.

use indexmap::IndexMap;

use crate::namespaces::QName;

use super::namespace::{NamespaceKey, NamespaceModel};
use super::properties::PropertyModel;
use super::types::{TypeId, TypeKind, TypeModel};

/// A resolved type graph, exposed per namespace
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    types: Vec<TypeModel>,
    namespaces: IndexMap<String, NamespaceModel>,
}

impl TypeGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Allocate a node; it is not placed in a namespace yet
    pub fn allocate(
        &mut self,
        name: impl Into<String>,
        namespace: impl Into<String>,
        schema_identity: QName,
        kind: TypeKind,
    ) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(TypeModel {
            id,
            name: name.into(),
            namespace: namespace.into(),
            is_anonymous: schema_identity.is_empty(),
            schema_identity,
            documentation: Vec::new(),
            root_element_name: None,
            is_abstract_root: false,
            kind,
        });
        id
    }

    /// Get a node
    ///
    /// # Panics
    /// If `id` was not allocated by this graph.
    pub fn get(&self, id: TypeId) -> &TypeModel {
        &self.types[id.0]
    }

    /// Get a mutable node
    pub fn get_mut(&mut self, id: TypeId) -> &mut TypeModel {
        &mut self.types[id.0]
    }

    /// All nodes, in allocation order
    pub fn types(&self) -> impl Iterator<Item = &TypeModel> {
        self.types.iter()
    }

    /// All node ids, in allocation order
    pub fn ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.types.len()).map(TypeId)
    }

    /// Namespaces, in creation order
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceModel> {
        self.namespaces.values()
    }

    /// Mutable namespaces
    pub fn namespaces_mut(&mut self) -> impl Iterator<Item = &mut NamespaceModel> {
        self.namespaces.values_mut()
    }

    /// Get a namespace by output name
    pub fn namespace(&self, output_name: &str) -> Option<&NamespaceModel> {
        self.namespaces.get(output_name)
    }

    /// Get or create the namespace `output_name`
    pub fn ensure_namespace(&mut self, output_name: &str, key: &NamespaceKey) -> &mut NamespaceModel {
        self.namespaces
            .entry(output_name.to_string())
            .or_insert_with(|| NamespaceModel::new(output_name, key.clone()))
    }

    /// Place a node in its namespace under its current name
    pub fn register(&mut self, id: TypeId) {
        let node = &self.types[id.0];
        let (namespace, name) = (node.namespace.clone(), node.name.clone());
        if let Some(ns) = self.namespaces.get_mut(&namespace) {
            ns.types.insert(name, id);
        }
    }

    /// Rename a node, keeping its namespace entry (and position) in sync
    pub fn rename(&mut self, id: TypeId, new_name: impl Into<String>) {
        let new_name = new_name.into();
        let node = &mut self.types[id.0];
        let old_name = std::mem::replace(&mut node.name, new_name.clone());
        if let Some(ns) = self.namespaces.get_mut(&node.namespace) {
            if let Some(index) = ns.types.get_index_of(&old_name) {
                ns.types.shift_remove_index(index);
                ns.types.shift_insert(index, new_name, id);
            }
        }
    }

    /// Find a node by namespace and name
    pub fn find(&self, namespace: &str, name: &str) -> Option<&TypeModel> {
        self.namespaces
            .get(namespace)
            .and_then(|ns| ns.types.get(name))
            .map(|&id| self.get(id))
    }

    /// Find the node built for a named schema construct
    ///
    /// Synthesized root classes and interfaces share no identity with the
    /// complex types, so the first node with a matching identity is the
    /// one built for the type itself.
    pub fn find_by_schema_identity(&self, qname: &QName) -> Option<&TypeModel> {
        self.types
            .iter()
            .find(|t| !t.is_anonymous && &t.schema_identity == qname)
    }

    /// Set `derived`'s base class, recording the inverse edge on `base`
    pub fn set_base_class(&mut self, derived: TypeId, base: TypeId) {
        if let Some(class) = self.types[derived.0].as_class_mut() {
            class.base_class = Some(base);
        }
        if let Some(class) = self.types[base.0].as_class_mut() {
            if !class.derived_types.contains(&derived) {
                class.derived_types.push(derived);
            }
        }
    }

    /// Record `implementer` as implementing `interface`, on both sides
    pub fn add_implementer(&mut self, interface: TypeId, implementer: TypeId) {
        if interface == implementer {
            return;
        }
        match &mut self.types[implementer.0].kind {
            TypeKind::Class(c) if !c.interfaces.contains(&interface) => c.interfaces.push(interface),
            TypeKind::Interface(i) if !i.interfaces.contains(&interface) => {
                i.interfaces.push(interface)
            }
            _ => {}
        }
        if let Some(i) = self.types[interface.0].as_interface_mut() {
            if !i.derived_types.contains(&implementer) {
                i.derived_types.push(implementer);
            }
        }
    }

    /// The base class chain of `id`, nearest first, excluding `id`
    pub fn ancestors(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).as_class().and_then(|c| c.base_class);
        while let Some(base) = current {
            if base == id || chain.contains(&base) {
                break;
            }
            chain.push(base);
            current = self.get(base).as_class().and_then(|c| c.base_class);
        }
        chain
    }

    /// Every class deriving from `id`, directly or through other classes
    pub fn descendants(&self, id: TypeId) -> Vec<TypeId> {
        let mut seen = Vec::new();
        let mut stack: Vec<TypeId> = self
            .get(id)
            .as_class()
            .map(|c| c.derived_types.clone())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            if next == id || seen.contains(&next) {
                continue;
            }
            seen.push(next);
            if let Some(class) = self.get(next).as_class() {
                stack.extend(class.derived_types.iter().copied());
            }
        }
        seen
    }

    /// Properties of `id` and all its ancestors, most derived first
    pub fn flattened_properties(&self, id: TypeId) -> Vec<&PropertyModel> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .flat_map(|t| self.get(t).properties().iter())
            .collect()
    }

    /// Every interface reachable from `id` through interface edges
    pub fn reachable_interfaces(&self, id: TypeId) -> Vec<TypeId> {
        let mut seen = Vec::new();
        let mut stack: Vec<TypeId> = self.get(id).interfaces().to_vec();
        while let Some(next) = stack.pop() {
            if next == id || seen.contains(&next) {
                continue;
            }
            seen.push(next);
            stack.extend(self.get(next).interfaces().iter().copied());
        }
        seen
    }
}
