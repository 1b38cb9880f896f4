//! Substitution group resolution
//!
//! Members register under their head element as top-level elements are
//! built. Properties referencing a head are remembered as sites and receive
//! their substitutes once every element is known.

use indexmap::IndexMap;
use std::collections::HashSet;

use crate::config::SubstitutionStrategy;
use crate::model::{PropertyModel, Substitute, TypeId};
use crate::namespaces::QName;

use super::ModelBuilder;

/// A property whose element heads a substitution group
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionSite {
    /// Class or interface declaring the property
    pub owner: TypeId,
    /// The head element
    pub head: QName,
}

/// Substitution group members by head
#[derive(Debug, Default)]
pub struct SubstitutionRegistry {
    members: IndexMap<QName, Vec<Substitute>>,
    abstract_members: HashSet<QName>,
    sites: Vec<SubstitutionSite>,
}

impl SubstitutionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member under its head
    ///
    /// Abstract members are traversed but never offered as substitutes.
    pub fn register(&mut self, substitute: Substitute, is_abstract: bool) {
        if is_abstract {
            self.abstract_members.insert(substitute.member.clone());
        }
        let members = self.members.entry(substitute.head.clone()).or_default();
        if !members.iter().any(|s| s.member == substitute.member) {
            members.push(substitute);
        }
    }

    /// Every element substitutable for `head`, directly or through nested groups
    ///
    /// The substitution relation is assumed acyclic; a member reached twice
    /// is listed once.
    pub fn get_substitutes(&self, head: &QName) -> Vec<Substitute> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        self.collect(head, &mut visited, &mut result);
        result
    }

    fn collect(&self, head: &QName, visited: &mut HashSet<QName>, result: &mut Vec<Substitute>) {
        for substitute in self.members.get(head).into_iter().flatten() {
            if !visited.insert(substitute.member.clone()) {
                continue;
            }
            if !self.abstract_members.contains(&substitute.member) {
                result.push(substitute.clone());
            }
            self.collect(&substitute.member, visited, result);
        }
    }

    /// Remember a property waiting for the substitutes of `head`
    pub fn add_site(&mut self, owner: TypeId, head: QName) {
        let site = SubstitutionSite { owner, head };
        if !self.sites.contains(&site) {
            self.sites.push(site);
        }
    }

    /// Take the recorded sites
    pub fn take_sites(&mut self) -> Vec<SubstitutionSite> {
        std::mem::take(&mut self.sites)
    }
}

impl<'a> ModelBuilder<'a> {
    /// Attach substitutes to every recorded site
    pub(super) fn resolve_substitutions(&mut self) {
        for site in self.ctx.substitutions.take_sites() {
            let substitutes = self.ctx.substitutions.get_substitutes(&site.head);
            if substitutes.is_empty() {
                continue;
            }
            match self.options.substitution_strategy {
                SubstitutionStrategy::Merge => self.merge_substitutes(&site, substitutes),
                SubstitutionStrategy::Separate => self.separate_substitutes(&site, substitutes),
            }
        }
    }

    fn merge_substitutes(&mut self, site: &SubstitutionSite, substitutes: Vec<Substitute>) {
        let owner = self.graph.get_mut(site.owner);
        let Some(properties) = owner.properties_mut() else {
            return;
        };
        if let Some(property) = properties
            .iter_mut()
            .find(|p| !p.is_attribute && !p.is_wildcard && p.schema_name == site.head)
        {
            tracing::debug!(
                "{} substitutes merged into {}",
                substitutes.len(),
                property.name
            );
            property.substitutes = substitutes;
        }
    }

    fn separate_substitutes(&mut self, site: &SubstitutionSite, substitutes: Vec<Substitute>) {
        let owner = self.graph.get(site.owner);
        let owner_name = owner.name.clone();
        let Some(head) = owner
            .properties()
            .iter()
            .find(|p| !p.is_attribute && !p.is_wildcard && p.schema_name == site.head)
            .cloned()
        else {
            return;
        };

        for substitute in substitutes {
            let name = self
                .naming
                .property_name_from_element(&substitute.member, &owner_name);
            let mut property = PropertyModel::new(
                site.owner,
                name,
                substitute.member.clone(),
                substitute.resolved_type,
            );
            property.is_collection = head.is_collection;
            property.is_nullable = !head.is_collection;
            property.form = head.form;
            property.order = head.order;
            property.explicit_namespace = head.explicit_namespace.clone();
            self.add_property(site.owner, property);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyType;
    use crate::schema::PrimitiveType;

    fn sub(head: &str, member: &str) -> Substitute {
        Substitute {
            head: QName::local(head),
            member: QName::local(member),
            resolved_type: PropertyType::Primitive(PrimitiveType::String),
        }
    }

    fn members(registry: &SubstitutionRegistry, head: &str) -> Vec<String> {
        registry
            .get_substitutes(&QName::local(head))
            .into_iter()
            .map(|s| s.member.local_name)
            .collect()
    }

    #[test]
    fn test_nested_groups_are_followed() {
        let mut registry = SubstitutionRegistry::new();
        registry.register(sub("shape", "circle"), false);
        registry.register(sub("shape", "polygon"), true);
        registry.register(sub("polygon", "square"), false);

        assert_eq!(members(&registry, "shape"), vec!["circle", "square"]);
        assert_eq!(members(&registry, "polygon"), vec!["square"]);
        assert!(members(&registry, "circle").is_empty());
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let mut registry = SubstitutionRegistry::new();
        registry.register(sub("shape", "circle"), false);
        registry.register(sub("shape", "circle"), false);
        assert_eq!(members(&registry, "shape"), vec!["circle"]);
    }

    #[test]
    fn test_sites_are_taken_once() {
        let mut registry = SubstitutionRegistry::new();
        registry.add_site(TypeId(0), QName::local("shape"));
        registry.add_site(TypeId(0), QName::local("shape"));
        assert_eq!(registry.take_sites().len(), 1);
        assert!(registry.take_sites().is_empty());
    }
}
