//! Simple types: enums and restricted values
//!
//! A simple type is classified before any node is created. It is an enum
//! when its restriction carries only enumeration facets, when an
//! enumerable (string-like) base carries at least one, when it restricts an
//! enum, or when it is a union whose every member is an enum. Anything else
//! is a value of a primitive type with its restrictions.

use crate::error::{BuildError, Error, Result};
use crate::model::{
    EnumModel, EnumValue, PropertyType, RestrictionModel, SimpleModel, TypeId, TypeKind,
};
use crate::namespaces::QName;
use crate::schema::facets::only_enumerations;
use crate::schema::{
    builtins, Facet, Global, PrimitiveType, SchemaDocument, SimpleContent, SimpleTypeDef,
    TypeRef,
};

use super::context::{CacheKey, ConstructKind};
use super::restrictions::{extract_restrictions, merge_restrictions};
use super::{unresolved, ModelBuilder, ResolvedType};

/// The classification of a simple type
#[derive(Debug, Clone, PartialEq)]
pub(super) enum SimpleShape<'a> {
    /// Enumeration facets, in declaration order
    Enum(Vec<&'a Facet>),
    /// A primitive value
    Value {
        value_type: PrimitiveType,
        restrictions: Vec<RestrictionModel>,
        is_list: bool,
    },
}

impl SimpleShape<'_> {
    fn value_type(&self) -> PrimitiveType {
        match self {
            SimpleShape::Enum(_) => PrimitiveType::String,
            SimpleShape::Value { value_type, .. } => *value_type,
        }
    }
}

impl<'a> ModelBuilder<'a> {
    /// Build (or fetch) the node of a named simple type
    pub(super) fn named_simple_type(&mut self, global: Global<'a, SimpleTypeDef>) -> Result<TypeId> {
        let Global { document, def } = global;
        let name = def
            .name
            .as_ref()
            .ok_or_else(|| Error::unsupported("global simple type without a name"))?;
        let key = CacheKey::new(ConstructKind::SimpleType, &document.location, name);
        if let Some(id) = self.ctx.cache.get(&key) {
            return Ok(id);
        }

        let shape = self.simple_shape(def, document, &mut vec![name.clone()])?;
        let id = match shape {
            SimpleShape::Enum(facets) => {
                let candidate = self.naming.type_name_from_enum(name, "");
                self.enum_node(document, name.clone(), candidate, &facets, def)?
            }
            SimpleShape::Value {
                value_type,
                restrictions,
                is_list,
            } => {
                let candidate = self.naming.type_name_from_simple_type(name, "");
                let simple = SimpleModel {
                    value_type,
                    restrictions,
                    is_list,
                };
                self.new_node(
                    document,
                    name.clone(),
                    candidate,
                    TypeKind::Simple(simple),
                    def.documentation.clone(),
                )?
            }
        };
        self.ctx.cache.insert(key, id);
        Ok(id)
    }

    /// Resolve an inline simple type
    ///
    /// Enums become nodes named `candidate`; other values are inlined as a
    /// primitive with their restrictions.
    pub(super) fn anonymous_simple_type(
        &mut self,
        global: Global<'a, SimpleTypeDef>,
        candidate: String,
    ) -> Result<ResolvedType> {
        let Global { document, def } = global;
        if let Some(id) = self.ctx.inline_type(def) {
            return Ok(ResolvedType::model(id));
        }
        match self.simple_shape(def, document, &mut Vec::new())? {
            SimpleShape::Enum(facets) => {
                let id = self.enum_node(document, QName::default(), candidate, &facets, def)?;
                self.ctx.insert_inline_type(def, id);
                Ok(ResolvedType::model(id))
            }
            SimpleShape::Value {
                value_type,
                restrictions,
                is_list,
            } => Ok(ResolvedType {
                property_type: PropertyType::Primitive(value_type),
                restrictions,
                is_list,
            }),
        }
    }

    fn enum_node(
        &mut self,
        document: &SchemaDocument,
        identity: QName,
        candidate: String,
        facets: &[&Facet],
        def: &SimpleTypeDef,
    ) -> Result<TypeId> {
        let id = self.new_node(
            document,
            identity,
            candidate,
            TypeKind::Enum(EnumModel::default()),
            def.documentation.clone(),
        )?;
        let enum_name = self.graph.get(id).name.clone();
        let values = self.enum_values(facets, &enum_name);
        if let TypeKind::Enum(model) = &mut self.graph.get_mut(id).kind {
            model.values = values;
        }
        Ok(id)
    }

    /// Enum values, deduplicated by literal
    ///
    /// Distinct literals whose member names collide get an incrementing
    /// numeric suffix: `Foo`, `Foo1`, `Foo2`.
    fn enum_values(&self, facets: &[&Facet], enum_name: &str) -> Vec<EnumValue> {
        let mut values: Vec<EnumValue> = Vec::new();
        for facet in facets {
            let Facet::Enumeration {
                value,
                documentation,
                deprecated,
            } = facet
            else {
                continue;
            };
            if values.iter().any(|v| &v.value == value) {
                continue;
            }
            let candidate = self.naming.enum_member_name(value, enum_name);
            let mut name = candidate.clone();
            let mut suffix = 1;
            while values.iter().any(|v| v.name == name) {
                name = format!("{}{}", candidate, suffix);
                suffix += 1;
            }
            values.push(EnumValue {
                name,
                value: value.clone(),
                is_deprecated: *deprecated,
                documentation: documentation.clone(),
            });
        }
        values
    }

    /// Classify a simple type definition
    ///
    /// `visiting` holds the named types whose derivation is being followed.
    pub(super) fn simple_shape(
        &self,
        def: &'a SimpleTypeDef,
        document: &'a SchemaDocument,
        visiting: &mut Vec<QName>,
    ) -> Result<SimpleShape<'a>> {
        match &def.content {
            SimpleContent::Restriction { base, facets } => {
                let enumerations: Vec<&'a Facet> =
                    facets.iter().filter(|f| f.is_enumeration()).collect();
                let base_shape = self.type_shape(base, document, visiting)?;

                match base_shape {
                    SimpleShape::Enum(inherited) => Ok(SimpleShape::Enum(if enumerations.is_empty() {
                        inherited
                    } else {
                        enumerations
                    })),
                    SimpleShape::Value {
                        value_type,
                        restrictions,
                        is_list,
                    } => {
                        if !enumerations.is_empty()
                            && !is_list
                            && (only_enumerations(facets) || value_type.is_enumerable())
                        {
                            return Ok(SimpleShape::Enum(enumerations));
                        }
                        let own = extract_restrictions(facets, value_type, self.options.annotation_mode);
                        Ok(SimpleShape::Value {
                            value_type,
                            restrictions: merge_restrictions(&restrictions, own),
                            is_list,
                        })
                    }
                }
            }
            SimpleContent::List { item } => {
                let item_shape = self.type_shape(item, document, visiting)?;
                Ok(SimpleShape::Value {
                    value_type: item_shape.value_type(),
                    restrictions: Vec::new(),
                    is_list: true,
                })
            }
            SimpleContent::Union { members } => {
                let mut shapes = Vec::with_capacity(members.len());
                for member in members {
                    shapes.push(self.type_shape(member, document, visiting)?);
                }

                if !shapes.is_empty() && shapes.iter().all(|s| matches!(s, SimpleShape::Enum(_))) {
                    let facets = shapes
                        .into_iter()
                        .flat_map(|s| match s {
                            SimpleShape::Enum(facets) => facets,
                            SimpleShape::Value { .. } => Vec::new(),
                        })
                        .collect();
                    return Ok(SimpleShape::Enum(facets));
                }

                let value_type = if self.options.map_union_to_widest_common_type {
                    let types: Vec<PrimitiveType> = shapes.iter().map(SimpleShape::value_type).collect();
                    PrimitiveType::widest_common(&types)
                } else {
                    PrimitiveType::String
                };
                Ok(SimpleShape::Value {
                    value_type,
                    restrictions: Vec::new(),
                    is_list: false,
                })
            }
        }
    }

    fn type_shape(
        &self,
        type_ref: &'a TypeRef,
        document: &'a SchemaDocument,
        visiting: &mut Vec<QName>,
    ) -> Result<SimpleShape<'a>> {
        let set = self.set;
        match type_ref {
            TypeRef::Named(name) if name.is_xsd() => {
                let value_type = PrimitiveType::from_builtin(&name.local_name)
                    .ok_or_else(|| Error::unsupported(name))?;
                Ok(SimpleShape::Value {
                    value_type,
                    restrictions: Vec::new(),
                    is_list: builtins::is_list_builtin(&name.local_name),
                })
            }
            TypeRef::Named(name) => {
                let global = set
                    .lookup_type(name)
                    .ok_or_else(|| unresolved("type", name, document))?;
                let def = global.def.as_simple().ok_or_else(|| {
                    Error::from(
                        BuildError::new("simple type derived from a complex type")
                            .with_construct(name.to_string())
                            .with_location(global.location()),
                    )
                })?;
                if visiting.contains(name) {
                    return Err(BuildError::new("circular simple type derivation")
                        .with_construct(name.to_string())
                        .with_location(global.location())
                        .into());
                }
                visiting.push(name.clone());
                let shape = self.simple_shape(def, global.document, visiting);
                visiting.pop();
                shape
            }
            TypeRef::Anonymous(def) => {
                let def = def
                    .as_simple()
                    .ok_or_else(|| Error::unsupported("anonymous complex type in a simple type derivation"))?;
                self.simple_shape(def, document, visiting)
            }
        }
    }
}
