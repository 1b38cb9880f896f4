//! Complex types: classes and their content
//!
//! A class is cached before anything else is resolved. Its base type comes
//! next, so base class edges exist before the derived content is walked.
//! Only the declared content of a type is walked: an extension's particle is
//! the part it appends, and a restriction's restated elements and attributes
//! are skipped because the base already carries them.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{ClassModel, PropertyModel, PropertyType, TypeId, TypeKind};
use crate::namespaces::QName;
use crate::schema::{
    AttributeDecl, AttributeItem, AttributeUse, ComplexTypeDef, Derivation, DerivationMethod,
    ElementDecl, Form, Global, ModelGroup, ModelType, Occurs, Particle, PrimitiveType,
    SchemaDocument, Term, TypeDefinition, TypeRef, Wildcard,
};

use super::context::{CacheKey, ConstructKind};
use super::{unresolved, ModelBuilder, ResolvedType};

/// The class or interface whose content is being collected
#[derive(Debug)]
pub(super) struct ContentScope {
    pub owner: TypeId,
    pub owner_name: String,
    /// Target namespace of the owner's schema document
    pub target_namespace: Option<String>,
    /// (name, is attribute) of members a restriction restates
    pub restated: HashSet<(QName, bool)>,
    pub next_order: usize,
    /// An attribute group with an attribute wildcard was expanded
    pub any_attribute: bool,
}

impl ContentScope {
    pub(super) fn new(owner: TypeId, owner_name: String, target_namespace: Option<String>) -> Self {
        Self {
            owner,
            owner_name,
            target_namespace,
            restated: HashSet::new(),
            next_order: 0,
            any_attribute: false,
        }
    }

    fn explicit_namespace(&self, name: &QName) -> Option<String> {
        name.namespace
            .as_ref()
            .filter(|ns| Some(ns.as_str()) != self.target_namespace.as_deref())
            .cloned()
    }
}

impl<'a> ModelBuilder<'a> {
    /// Build (or fetch) the class of a complex type
    ///
    /// Anonymous types need the candidate name chosen by their declaration.
    pub(super) fn complex_type(
        &mut self,
        global: Global<'a, ComplexTypeDef>,
        anonymous_name: Option<String>,
    ) -> Result<TypeId> {
        match &global.def.name {
            Some(name) => {
                let key = CacheKey::new(ConstructKind::ComplexType, global.location(), name);
                let candidate = self.naming.type_name_from_complex_type(name, "");
                self.class_node(global, name.clone(), candidate, Some(key))
            }
            None => {
                let candidate = anonymous_name.ok_or_else(|| {
                    Error::unsupported("anonymous complex type without a declaration")
                })?;
                self.class_node(global, QName::default(), candidate, None)
            }
        }
    }

    /// Create a class, cache it under `key`, then build its content
    pub(super) fn class_node(
        &mut self,
        global: Global<'a, ComplexTypeDef>,
        identity: QName,
        candidate: String,
        key: Option<CacheKey>,
    ) -> Result<TypeId> {
        let Global { document, def } = global;
        if let Some(id) = key.as_ref().and_then(|k| self.ctx.cache.get(k)) {
            tracing::trace!("cache hit for {}", identity);
            return Ok(id);
        }
        if let Some(id) = self.ctx.inline_type(def) {
            tracing::trace!("inline type {} reused", self.graph.get(id).name);
            return Ok(id);
        }

        let class = ClassModel {
            is_abstract: def.is_abstract,
            is_mixed_content: def.mixed,
            ..Default::default()
        };
        let id = self.new_node(
            document,
            identity,
            candidate,
            TypeKind::Class(class),
            def.documentation.clone(),
        )?;
        if let Some(key) = key {
            self.ctx.cache.insert(key, id);
        }
        if def.name.is_none() {
            self.ctx.insert_inline_type(def, id);
        }

        self.class_content(id, global)?;
        Ok(id)
    }

    fn class_content(&mut self, id: TypeId, global: Global<'a, ComplexTypeDef>) -> Result<()> {
        let Global { document, def } = global;
        let owner_name = self.graph.get(id).name.clone();
        let mut scope = ContentScope::new(id, owner_name, document.target_namespace.clone());

        if let Some(derivation) = &def.derivation {
            self.derive(id, derivation, document)?;
            if derivation.method == DerivationMethod::Restriction {
                scope.restated = self
                    .graph
                    .ancestors(id)
                    .into_iter()
                    .flat_map(|a| self.graph.get(a).properties().iter())
                    .filter(|p| !p.is_wildcard)
                    .map(|p| (p.schema_name.clone(), p.is_attribute))
                    .collect();
            }
        }

        if let Some(simple_content) = &def.simple_content {
            let candidate = format!("{}Value", scope.owner_name);
            let resolved = self.resolve_type_ref(simple_content, document, candidate)?;
            self.set_text_value_type(id, resolved.property_type);
        }
        if def.mixed {
            let class = self.graph.get(id).as_class();
            if class.map_or(false, |c| c.text_value_type.is_none()) {
                self.set_text_value_type(id, PropertyType::Primitive(PrimitiveType::String));
            }
        }

        self.attributes(&mut scope, &def.attributes, document)?;
        if let Some(particle) = &def.particle {
            self.particle(&mut scope, particle, document, Occurs::once(), ModelType::Sequence)?;
        }
        if let Some(wildcard) = &def.any_attribute {
            self.any_attribute_property(&scope, wildcard);
        } else if scope.any_attribute {
            self.any_attribute_property(&scope, &Wildcard::default());
        }
        Ok(())
    }

    fn set_text_value_type(&mut self, id: TypeId, value_type: PropertyType) {
        if let Some(class) = self.graph.get_mut(id).as_class_mut() {
            class.text_value_type = Some(value_type);
        }
    }

    /// Resolve the base type of a derived class
    ///
    /// A complex base becomes the base class; a simple base (built-in or
    /// global) becomes the text value type. `xs:anyType` is no base at all.
    fn derive(&mut self, id: TypeId, derivation: &Derivation, document: &SchemaDocument) -> Result<()> {
        let base = &derivation.base;
        if base.is_xsd() {
            return match PrimitiveType::from_builtin(&base.local_name) {
                Some(PrimitiveType::AnyType) => Ok(()),
                Some(primitive) => {
                    self.set_text_value_type(id, PropertyType::Primitive(primitive));
                    Ok(())
                }
                None => Err(unresolved("base type", base, document)),
            };
        }

        let set = self.set;
        let global = set
            .lookup_type(base)
            .ok_or_else(|| unresolved("base type", base, document))?;
        match global.def {
            TypeDefinition::Complex(def) => {
                let base_id = self.complex_type(
                    Global {
                        document: global.document,
                        def,
                    },
                    None,
                )?;
                self.graph.set_base_class(id, base_id);
                let inherited = self.graph.get(base_id).as_class().and_then(|c| c.text_value_type);
                if let Some(text) = inherited {
                    self.set_text_value_type(id, text);
                }
            }
            TypeDefinition::Simple(def) => {
                let base_id = self.named_simple_type(Global {
                    document: global.document,
                    def,
                })?;
                self.set_text_value_type(id, PropertyType::Model(base_id));
            }
        }
        Ok(())
    }

    /// Resolve a type reference found on a declaration
    pub(super) fn resolve_type_ref(
        &mut self,
        type_ref: &'a TypeRef,
        document: &'a SchemaDocument,
        anonymous_name: String,
    ) -> Result<ResolvedType> {
        match type_ref {
            TypeRef::Named(name) => self.resolve_named_type(name, document),
            TypeRef::Anonymous(def) => match def.as_ref() {
                TypeDefinition::Complex(def) => {
                    let id = self.complex_type(Global { document, def }, Some(anonymous_name))?;
                    Ok(ResolvedType::model(id))
                }
                TypeDefinition::Simple(def) => {
                    self.anonymous_simple_type(Global { document, def }, anonymous_name)
                }
            },
        }
    }

    /// The type of a global element
    ///
    /// An inline type is built once per element and shared between the
    /// top-level element and every reference to it.
    pub(super) fn global_element_type(&mut self, global: Global<'a, ElementDecl>) -> Result<ResolvedType> {
        let Global { document, def: decl } = global;
        match &decl.type_ref {
            None => Ok(ResolvedType::primitive(PrimitiveType::AnyType)),
            Some(TypeRef::Named(name)) => self.resolve_named_type(name, document),
            Some(TypeRef::Anonymous(def)) => {
                let key = CacheKey::new(ConstructKind::ElementType, &document.location, &decl.name);
                if let Some(id) = self.ctx.cache.get(&key) {
                    return Ok(ResolvedType::model(id));
                }
                let candidate = self.naming.type_name_from_root_element(&decl.name, "");
                match def.as_ref() {
                    TypeDefinition::Complex(def) => {
                        let id = self.class_node(Global { document, def }, QName::default(), candidate, Some(key))?;
                        Ok(ResolvedType::model(id))
                    }
                    TypeDefinition::Simple(def) => {
                        let resolved = self.anonymous_simple_type(Global { document, def }, candidate)?;
                        if let PropertyType::Model(id) = resolved.property_type {
                            self.ctx.cache.insert(key, id);
                        }
                        Ok(resolved)
                    }
                }
            }
        }
    }

    /// Collect the properties of a particle into `scope`
    ///
    /// `outer` carries the occurrence bounds accumulated from enclosing
    /// particles; `compositor` is the model of the enclosing group.
    pub(super) fn particle(
        &mut self,
        scope: &mut ContentScope,
        particle: &'a Particle,
        document: &'a SchemaDocument,
        outer: Occurs,
        compositor: ModelType,
    ) -> Result<()> {
        let occurs = particle.occurs.nested_in(&outer);
        if occurs.is_empty() {
            return Ok(());
        }

        let set = self.set;
        match &particle.term {
            Term::Element(decl) => {
                self.element_property(scope, Global { document, def: decl }, occurs, compositor, false)
            }
            Term::ElementRef(name) => {
                let global = set
                    .lookup_element(name)
                    .ok_or_else(|| unresolved("element", name, document))?;
                self.element_property(scope, global, occurs, compositor, true)
            }
            Term::Any(wildcard) => {
                self.any_property(scope, wildcard, occurs);
                Ok(())
            }
            Term::GroupRef(name) => self.group_reference(scope, name, document, occurs),
            Term::Group(group) => self.model_group(scope, group, document, occurs),
        }
    }

    /// Collect the particles of a model group
    ///
    /// Children of a choice are optional whatever their own bounds.
    pub(super) fn model_group(
        &mut self,
        scope: &mut ContentScope,
        group: &'a ModelGroup,
        document: &'a SchemaDocument,
        occurs: Occurs,
    ) -> Result<()> {
        let inner = match group.model {
            ModelType::Choice => Occurs::new(0, occurs.max),
            ModelType::Sequence | ModelType::All => occurs,
        };
        for child in &group.particles {
            self.particle(scope, child, document, inner, group.model)?;
        }
        Ok(())
    }

    fn element_property(
        &mut self,
        scope: &mut ContentScope,
        global: Global<'a, ElementDecl>,
        occurs: Occurs,
        compositor: ModelType,
        is_reference: bool,
    ) -> Result<()> {
        let Global { document, def: decl } = global;
        if scope.restated.contains(&(decl.name.clone(), false)) {
            return Ok(());
        }

        let resolved = if is_reference {
            self.global_element_type(global)?
        } else {
            match &decl.type_ref {
                None => ResolvedType::primitive(PrimitiveType::AnyType),
                Some(type_ref) => {
                    let candidate = self.naming.name_from_element(&decl.name, &scope.owner_name);
                    self.resolve_type_ref(type_ref, document, candidate)?
                }
            }
        };

        let name = self
            .naming
            .property_name_from_element(&decl.name, &scope.owner_name);
        let is_collection = occurs.is_multiple() || resolved.is_list;
        let mut property = PropertyModel::new(scope.owner, name, decl.name.clone(), resolved.property_type);
        property.restrictions = resolved.restrictions;
        property.is_collection = is_collection;
        property.is_required = occurs.min > 0;
        property.is_nullable = !is_collection && occurs.min == 0;
        property.is_nillable = decl.nillable;
        property.default_value = decl.default.clone();
        property.fixed_value = decl.fixed.clone();
        property.form = if is_reference { Form::Qualified } else { decl.form };
        property.explicit_namespace = scope.explicit_namespace(&decl.name);
        property.documentation = decl.documentation.clone();
        if self.options.emit_order && compositor == ModelType::Sequence {
            property.order = Some(scope.next_order);
            scope.next_order += 1;
        }

        let added = self.add_property(scope.owner, property);
        if added && is_reference && !self.set.substitution_members(&decl.name).is_empty() {
            self.ctx.substitutions.add_site(scope.owner, decl.name.clone());
        }
        Ok(())
    }

    fn any_property(&mut self, scope: &ContentScope, wildcard: &Wildcard, occurs: Occurs) {
        let mut property = PropertyModel::new(
            scope.owner,
            "Any",
            QName::local("any"),
            PropertyType::Primitive(PrimitiveType::AnyType),
        );
        property.is_wildcard = true;
        property.is_collection = occurs.is_multiple();
        property.is_required = occurs.min > 0;
        property.is_nullable = !property.is_collection && occurs.min == 0;
        property.documentation = wildcard.documentation.clone();
        self.add_property(scope.owner, property);
    }

    /// Add the attribute wildcard property unless an ancestor declares one
    pub(super) fn any_attribute_property(&mut self, scope: &ContentScope, wildcard: &Wildcard) {
        let inherited = self.graph.ancestors(scope.owner).into_iter().any(|a| {
            self.graph
                .get(a)
                .properties()
                .iter()
                .any(|p| p.is_wildcard && p.is_attribute)
        });
        if inherited {
            tracing::debug!(
                "attribute wildcard of {} already declared by an ancestor",
                scope.owner_name
            );
            return;
        }

        let mut property = PropertyModel::new(
            scope.owner,
            "AnyAttribute",
            QName::local("anyAttribute"),
            PropertyType::Primitive(PrimitiveType::AnyType),
        );
        property.is_attribute = true;
        property.is_wildcard = true;
        property.is_collection = true;
        property.documentation = wildcard.documentation.clone();
        self.add_property(scope.owner, property);
    }

    /// Collect an attribute list into `scope`
    pub(super) fn attributes(
        &mut self,
        scope: &mut ContentScope,
        items: &'a [AttributeItem],
        document: &'a SchemaDocument,
    ) -> Result<()> {
        let set = self.set;
        for item in items {
            match item {
                AttributeItem::Attribute(decl) => {
                    self.attribute_property(scope, Global { document, def: decl }, false)?
                }
                AttributeItem::Ref(name) => {
                    let global = set
                        .lookup_attribute(name)
                        .ok_or_else(|| unresolved("attribute", name, document))?;
                    self.attribute_property(scope, global, true)?
                }
                AttributeItem::Group(name) => self.attribute_group_reference(scope, name, document)?,
            }
        }
        Ok(())
    }

    fn attribute_property(
        &mut self,
        scope: &mut ContentScope,
        global: Global<'a, AttributeDecl>,
        is_reference: bool,
    ) -> Result<()> {
        let Global { document, def: decl } = global;
        if decl.use_mode == AttributeUse::Prohibited
            || scope.restated.contains(&(decl.name.clone(), true))
        {
            return Ok(());
        }

        let resolved = match &decl.type_ref {
            None => ResolvedType::primitive(PrimitiveType::String),
            Some(type_ref) if is_reference => self.global_attribute_type(global, type_ref)?,
            Some(type_ref) => {
                let candidate = self.naming.name_from_attribute(&decl.name, &scope.owner_name);
                self.resolve_type_ref(type_ref, document, candidate)?
            }
        };

        let name = self
            .naming
            .property_name_from_attribute(&decl.name, &scope.owner_name);
        let is_required = decl.use_mode == AttributeUse::Required;
        let mut property = PropertyModel::new(scope.owner, name, decl.name.clone(), resolved.property_type);
        property.restrictions = resolved.restrictions;
        property.is_attribute = true;
        property.is_collection = resolved.is_list;
        property.is_required = is_required;
        property.is_nullable = !is_required && decl.default.is_none() && decl.fixed.is_none();
        property.default_value = decl.default.clone();
        property.fixed_value = decl.fixed.clone();
        property.form = if is_reference { Form::Qualified } else { decl.form };
        property.explicit_namespace = scope.explicit_namespace(&decl.name);
        property.documentation = decl.documentation.clone();
        self.add_property(scope.owner, property);
        Ok(())
    }

    /// The type of a global attribute; an inline enum is built once
    fn global_attribute_type(
        &mut self,
        global: Global<'a, AttributeDecl>,
        type_ref: &'a TypeRef,
    ) -> Result<ResolvedType> {
        let Global { document, def: decl } = global;
        let key = CacheKey::new(ConstructKind::AttributeType, &document.location, &decl.name);
        if let Some(id) = self.ctx.cache.get(&key) {
            return Ok(ResolvedType::model(id));
        }
        let candidate = self.naming.name_from_attribute(&decl.name, "");
        let resolved = self.resolve_type_ref(type_ref, document, candidate)?;
        if let (TypeRef::Anonymous(_), PropertyType::Model(id)) = (type_ref, resolved.property_type) {
            self.ctx.cache.insert(key, id);
        }
        Ok(resolved)
    }
}
