//! Model groups and attribute groups
//!
//! A group reference always expands the group's members into the referencing
//! type. With interfaces enabled it also records the referencing type as an
//! implementer of the group's interface, built once and shared by every
//! reference. Groups referencing other groups yield interfaces extending
//! interfaces.

use crate::error::Result;
use crate::model::{InterfaceModel, TypeId, TypeKind};
use crate::namespaces::QName;
use crate::schema::{AttributeGroupDef, Global, GroupDef, Occurs, SchemaDocument, Wildcard};

use super::complex::ContentScope;
use super::context::{CacheKey, ConstructKind};
use super::{unresolved, ModelBuilder};

impl<'a> ModelBuilder<'a> {
    pub(super) fn group_reference(
        &mut self,
        scope: &mut ContentScope,
        name: &QName,
        document: &SchemaDocument,
        occurs: Occurs,
    ) -> Result<()> {
        let set = self.set;
        let global = set
            .lookup_group(name)
            .ok_or_else(|| unresolved("group", name, document))?;

        if self.options.generate_interfaces {
            let interface = self.group_interface(global)?;
            self.graph.add_implementer(interface, scope.owner);
        }

        if self.ctx.is_expanding(name) {
            tracing::debug!("group {} references itself, not expanded again", name);
            return Ok(());
        }
        self.ctx.active_groups.push(name.clone());
        let result = self.model_group(scope, &global.def.group, global.document, occurs);
        self.ctx.active_groups.pop();
        result
    }

    /// Build (or fetch) the interface of a model group
    pub(super) fn group_interface(&mut self, global: Global<'a, GroupDef>) -> Result<TypeId> {
        let Global { document, def } = global;
        let key = CacheKey::new(ConstructKind::Group, &document.location, &def.name);
        if let Some(id) = self.ctx.cache.get(&key) {
            return Ok(id);
        }

        let candidate = self.naming.type_name_from_group(&def.name, "");
        let id = self.interface_node(document, &def.name, candidate, def.documentation.clone(), key)?;
        let mut scope = self.interface_scope(id, document);

        self.ctx.active_groups.push(def.name.clone());
        let result = self.model_group(&mut scope, &def.group, document, Occurs::once());
        self.ctx.active_groups.pop();
        result?;
        Ok(id)
    }

    pub(super) fn attribute_group_reference(
        &mut self,
        scope: &mut ContentScope,
        name: &QName,
        document: &SchemaDocument,
    ) -> Result<()> {
        let set = self.set;
        let global = set
            .lookup_attribute_group(name)
            .ok_or_else(|| unresolved("attribute group", name, document))?;

        if self.options.generate_interfaces {
            let interface = self.attribute_group_interface(global)?;
            self.graph.add_implementer(interface, scope.owner);
        }

        if self.ctx.is_expanding(name) {
            tracing::debug!("attribute group {} references itself, not expanded again", name);
            return Ok(());
        }
        self.ctx.active_groups.push(name.clone());
        let result = self.attributes(scope, &global.def.attributes, global.document);
        self.ctx.active_groups.pop();
        if global.def.any_attribute.is_some() {
            scope.any_attribute = true;
        }
        result
    }

    /// Build (or fetch) the interface of an attribute group
    pub(super) fn attribute_group_interface(
        &mut self,
        global: Global<'a, AttributeGroupDef>,
    ) -> Result<TypeId> {
        let Global { document, def } = global;
        let key = CacheKey::new(ConstructKind::AttributeGroup, &document.location, &def.name);
        if let Some(id) = self.ctx.cache.get(&key) {
            return Ok(id);
        }

        let candidate = self.naming.type_name_from_attribute_group(&def.name, "");
        let id = self.interface_node(document, &def.name, candidate, def.documentation.clone(), key)?;
        let mut scope = self.interface_scope(id, document);

        self.ctx.active_groups.push(def.name.clone());
        let result = self.attributes(&mut scope, &def.attributes, document);
        self.ctx.active_groups.pop();
        result?;

        if let Some(wildcard) = &def.any_attribute {
            self.any_attribute_property(&scope, wildcard);
        } else if scope.any_attribute {
            self.any_attribute_property(&scope, &Wildcard::default());
        }
        Ok(id)
    }

    fn interface_node(
        &mut self,
        document: &SchemaDocument,
        name: &QName,
        candidate: String,
        documentation: Vec<String>,
        key: CacheKey,
    ) -> Result<TypeId> {
        let id = self.new_node(
            document,
            name.clone(),
            candidate,
            TypeKind::Interface(InterfaceModel::default()),
            documentation,
        )?;
        self.ctx.cache.insert(key, id);
        Ok(id)
    }

    fn interface_scope(&self, id: TypeId, document: &SchemaDocument) -> ContentScope {
        ContentScope::new(
            id,
            self.graph.get(id).name.clone(),
            document.target_namespace.clone(),
        )
    }
}
