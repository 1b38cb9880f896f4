//! The schema to type graph builder
//!
//! [`ModelBuilder`] walks a [`SchemaSet`] in dependency order and produces a
//! [`TypeGraph`]:
//!
//! - global complex types become classes, with base class edges resolved
//!   before their content is walked
//! - named groups and attribute groups become interfaces shared by every
//!   referencing type
//! - simple types become enums or restricted simple values
//! - top-level elements claim their types as roots, splitting shared types
//!   into an abstract base and one derived class per element
//!
//! Every named construct is built once: the node is placed in the identity
//! cache before its children are visited, which is also what terminates
//! self-referential and mutually recursive definitions. Substitution groups
//! are resolved once all elements are known, and [`postprocess`] finishes the
//! graph.

pub mod context;
pub mod ordering;
pub mod postprocess;
pub mod resolver;
pub mod restrictions;
pub mod substitutions;

mod complex;
mod elements;
mod groups;
mod simple;

pub use context::{BuildContext, CacheKey, ConstructKind, IdentityCache, ReservedNames, RootClaim};
pub use ordering::{build_order, build_order_locations};
pub use resolver::{mark_ambiguous, NamespacePolicy, NamespaceResolver};
pub use restrictions::{extract_restrictions, merge_restrictions};
pub use substitutions::{SubstitutionRegistry, SubstitutionSite};

use std::ptr;

use crate::config::{BuildOptions, Configuration};
use crate::error::{Error, Result};
use crate::model::{NamespaceKey, PropertyModel, PropertyType, RestrictionModel, TypeGraph, TypeId, TypeKind};
use crate::naming::NamingPolicy;
use crate::namespaces::QName;
use crate::schema::{
    builtins, Global, PrimitiveType, SchemaDocument, SchemaSet, TypeDefinition,
};

/// What a type reference resolved to
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedType {
    /// Graph node or primitive
    pub property_type: PropertyType,
    /// Restrictions of an inlined anonymous simple type
    pub restrictions: Vec<RestrictionModel>,
    /// A list of `property_type`
    pub is_list: bool,
}

impl ResolvedType {
    fn model(id: TypeId) -> Self {
        Self {
            property_type: PropertyType::Model(id),
            restrictions: Vec::new(),
            is_list: false,
        }
    }

    fn primitive(primitive: PrimitiveType) -> Self {
        Self {
            property_type: PropertyType::Primitive(primitive),
            restrictions: Vec::new(),
            is_list: false,
        }
    }
}

/// Builds a [`TypeGraph`] from a compiled schema set
pub struct ModelBuilder<'a> {
    set: &'a SchemaSet,
    options: BuildOptions,
    naming: &'a dyn NamingPolicy,
    resolver: NamespaceResolver,
    graph: TypeGraph,
    ctx: BuildContext,
    reserved: ReservedNames,
}

impl<'a> ModelBuilder<'a> {
    /// Create a builder
    pub fn new(
        set: &'a SchemaSet,
        options: BuildOptions,
        naming: &'a dyn NamingPolicy,
        resolver: NamespaceResolver,
    ) -> Self {
        let reserved = ReservedNames::new(set, naming, options.generate_interfaces);
        Self {
            set,
            options,
            naming,
            resolver,
            graph: TypeGraph::new(),
            ctx: BuildContext::new(),
            reserved,
        }
    }

    /// Create a builder from a configuration's options and namespace rules
    pub fn from_configuration(
        set: &'a SchemaSet,
        config: &Configuration,
        naming: &'a dyn NamingPolicy,
    ) -> Self {
        let resolver = NamespaceResolver::with_rules(config.rules());
        Self::new(set, config.options.clone(), naming, resolver)
    }

    /// Install a namespace generation policy
    pub fn with_namespace_policy(mut self, policy: impl NamespacePolicy + 'static) -> Self {
        self.resolver = std::mem::take(&mut self.resolver).with_policy(policy);
        self
    }

    /// Build the graph
    pub fn build(mut self) -> Result<TypeGraph> {
        let set = self.set;
        let order = build_order(set);
        tracing::trace!(
            "build order: {:?}",
            order
                .iter()
                .map(|&i| set.documents[i].location.as_str())
                .collect::<Vec<_>>()
        );

        for index in order {
            self.build_document(&set.documents[index])?;
        }

        self.resolve_substitutions();
        postprocess::run(&mut self.graph, &self.options);
        mark_ambiguous(&mut self.graph);

        tracing::info!(
            "built {} types in {} namespaces from {} documents",
            self.graph.len(),
            self.graph.namespaces().count(),
            set.documents.len()
        );
        Ok(self.graph)
    }

    fn build_document(&mut self, document: &'a SchemaDocument) -> Result<()> {
        let set = self.set;
        tracing::debug!("building document '{}'", document.location);

        for def in &document.types {
            let Some(name) = def.name() else {
                continue;
            };
            if !set.lookup_type(name).map_or(false, |g| ptr::eq(g.def, def)) {
                tracing::debug!("type {} redeclared in '{}', skipped", name, document.location);
                continue;
            }
            match def {
                TypeDefinition::Complex(def) => {
                    self.complex_type(Global { document, def }, None)?;
                }
                TypeDefinition::Simple(def) => {
                    self.named_simple_type(Global { document, def })?;
                }
            }
        }

        for decl in &document.elements {
            if !set.lookup_element(&decl.name).map_or(false, |g| ptr::eq(g.def, decl)) {
                tracing::debug!(
                    "element {} redeclared in '{}', skipped",
                    decl.name,
                    document.location
                );
                continue;
            }
            self.top_level_element(Global { document, def: decl })?;
        }
        Ok(())
    }

    /// Allocate a node and place it in its output namespace
    ///
    /// The XML namespace is the identity's, or the document's target
    /// namespace for constructs without one. `candidate` is suffixed until it
    /// is free in the namespace; for nodes without identity it must also not
    /// match (ignoring case) a name reserved for a global of the schema.
    fn new_node(
        &mut self,
        document: &SchemaDocument,
        identity: QName,
        candidate: String,
        kind: TypeKind,
        documentation: Vec<String>,
    ) -> Result<TypeId> {
        let xml_namespace = if identity.is_empty() {
            document.target_namespace.clone()
        } else {
            identity.namespace.clone()
        };
        let output = self.resolver.resolve(
            Some(&document.location),
            xml_namespace.as_deref().unwrap_or(""),
        )?;
        let key = NamespaceKey::new(Some(&document.location), xml_namespace.as_deref());
        self.graph.ensure_namespace(&output, &key);

        let name = self.unique_type_name(
            &output,
            candidate,
            xml_namespace.as_deref(),
            identity.is_empty(),
        );
        let label = kind.label();
        let id = self.graph.allocate(name, output, identity, kind);
        self.graph.get_mut(id).documentation = documentation;
        self.graph.register(id);
        tracing::debug!("{} {} created", label, self.graph.get(id).full_name());
        Ok(id)
    }

    fn unique_type_name(
        &self,
        namespace: &str,
        candidate: String,
        xml_namespace: Option<&str>,
        anonymous: bool,
    ) -> String {
        let taken = |name: &str| {
            self.graph
                .namespace(namespace)
                .map_or(false, |ns| ns.contains(name))
                || (anonymous && self.reserved.contains(xml_namespace, name))
        };
        if !taken(&candidate) {
            return candidate;
        }
        let mut suffix = 1;
        loop {
            let name = format!("{}{}", candidate, suffix);
            if !taken(&name) {
                return name;
            }
            suffix += 1;
        }
    }

    /// Add a property unless its name is already used by `owner` or an ancestor
    ///
    /// Returns whether the property was added.
    fn add_property(&mut self, owner: TypeId, mut property: PropertyModel) -> bool {
        let taken = self
            .graph
            .flattened_properties(owner)
            .iter()
            .any(|p| p.name == property.name);
        if taken {
            tracing::debug!(
                "duplicate property {} on {} dropped",
                property.name,
                self.graph.get(owner).full_name()
            );
            return false;
        }
        property.owning_type = owner;
        match self.graph.get_mut(owner).properties_mut() {
            Some(properties) => {
                properties.push(property);
                true
            }
            None => false,
        }
    }

    /// Resolve a named type: a built-in, or a global type built on demand
    fn resolve_named_type(&mut self, name: &QName, document: &SchemaDocument) -> Result<ResolvedType> {
        if name.is_xsd() {
            if let Some(primitive) = PrimitiveType::from_builtin(&name.local_name) {
                let mut resolved = ResolvedType::primitive(primitive);
                resolved.is_list = builtins::is_list_builtin(&name.local_name);
                return Ok(resolved);
            }
        }

        let set = self.set;
        let global = set
            .lookup_type(name)
            .ok_or_else(|| unresolved("type", name, document))?;
        let id = match global.def {
            TypeDefinition::Complex(def) => self.complex_type(
                Global {
                    document: global.document,
                    def,
                },
                None,
            )?,
            TypeDefinition::Simple(def) => self.named_simple_type(Global {
                document: global.document,
                def,
            })?,
        };
        Ok(ResolvedType::model(id))
    }
}

/// Build a graph from a configuration's options and namespace rules
pub fn build_graph(
    set: &SchemaSet,
    config: &Configuration,
    naming: &dyn NamingPolicy,
) -> Result<TypeGraph> {
    ModelBuilder::from_configuration(set, config, naming).build()
}

/// A reference to a construct absent from the schema set
fn unresolved(what: &str, name: &QName, document: &SchemaDocument) -> Error {
    Error::unsupported(format!(
        "unresolved {} reference {} in '{}'",
        what, name, document.location
    ))
}
