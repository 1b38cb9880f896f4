//! Top-level elements
//!
//! A top-level element claims its type as a root. The first element to claim
//! a class is recorded on it; when a second element claims the same class,
//! the class is demoted to an abstract base and each claimant gets its own
//! derived root class.

use crate::error::{BuildError, Result};
use crate::model::{ClassModel, PropertyType, Substitute, TypeId, TypeKind};
use crate::namespaces::QName;
use crate::schema::{ElementDecl, Global, PrimitiveType, SchemaDocument, TypeRef};

use super::context::{CacheKey, ConstructKind, RootClaim};
use super::ModelBuilder;

impl<'a> ModelBuilder<'a> {
    pub(super) fn top_level_element(&mut self, global: Global<'a, ElementDecl>) -> Result<()> {
        let Global { document, def: decl } = global;
        let resolved = self.global_element_type(global)?;

        if let Some(head) = &decl.substitution_group {
            self.ctx.substitutions.register(
                Substitute {
                    head: head.clone(),
                    member: decl.name.clone(),
                    resolved_type: resolved.property_type,
                },
                decl.is_abstract,
            );
        }

        let id = match resolved.property_type {
            PropertyType::Model(id) if self.graph.get(id).as_class().is_some() => id,
            PropertyType::Model(id) => {
                tracing::warn!(
                    "root element {} has non-class type {}, no root class created",
                    decl.name,
                    self.graph.get(id).full_name()
                );
                return Ok(());
            }
            PropertyType::Primitive(PrimitiveType::AnyType) => {
                tracing::debug!("root element {} has no type", decl.name);
                return Ok(());
            }
            PropertyType::Primitive(primitive) => {
                tracing::warn!(
                    "root element {} has simple type {}, no root class created",
                    decl.name,
                    primitive
                );
                return Ok(());
            }
        };

        if matches!(decl.type_ref, Some(TypeRef::Anonymous(_))) {
            self.graph.get_mut(id).root_element_name = Some(decl.name.clone());
            return Ok(());
        }
        self.claim_root(id, decl, document)
    }

    fn claim_root(&mut self, id: TypeId, decl: &ElementDecl, document: &SchemaDocument) -> Result<()> {
        if !self.graph.get(id).is_abstract_root {
            let Some(first) = self.ctx.roots.get(&id).cloned() else {
                self.graph.get_mut(id).root_element_name = Some(decl.name.clone());
                self.ctx.roots.insert(
                    id,
                    RootClaim {
                        element: decl.name.clone(),
                        location: document.location.clone(),
                    },
                );
                return Ok(());
            };

            tracing::debug!(
                "{} shared by root elements {} and {}, demoted to abstract base",
                self.graph.get(id).full_name(),
                first.element,
                decl.name
            );
            let node = self.graph.get_mut(id);
            node.is_abstract_root = true;
            node.root_element_name = None;
            if let Some(class) = node.as_class_mut() {
                class.is_abstract = true;
            }

            let set = self.set;
            let first_document = set.document(&first.location).ok_or_else(|| {
                BuildError::new("root element document not in the schema set")
                    .with_construct(first.element.to_string())
                    .with_location(first.location.clone())
            })?;
            self.root_class(id, &first.element, first_document)?;
        }
        self.root_class(id, &decl.name, document)?;
        Ok(())
    }

    /// A class deriving from `base` for the root element `element`
    fn root_class(&mut self, base: TypeId, element: &QName, document: &SchemaDocument) -> Result<TypeId> {
        let key = CacheKey::new(ConstructKind::RootElement, &document.location, element);
        if let Some(id) = self.ctx.cache.get(&key) {
            return Ok(id);
        }

        let base_name = self.graph.get(base).name.clone();
        let candidate = self.naming.type_name_from_root_element(element, &base_name);
        let id = self.new_node(
            document,
            QName::default(),
            candidate,
            TypeKind::Class(ClassModel::default()),
            Vec::new(),
        )?;
        let node = self.graph.get_mut(id);
        node.is_anonymous = false;
        node.root_element_name = Some(element.clone());

        self.ctx.cache.insert(key, id);
        self.graph.set_base_class(id, base);
        tracing::debug!(
            "root class {} created for element {}",
            self.graph.get(id).full_name(),
            element
        );
        Ok(id)
    }
}
