//! Post-processing passes
//!
//! Run once the whole graph is built, in this order:
//!
//! 1. [`propagate_renames`]: an interface property whose implementers named
//!    the same schema member differently takes the implementers' name
//! 2. [`prune_duplicate_properties`]: an interface drops properties already
//!    declared by an interface it extends
//! 3. [`disambiguate_roots`]: types whose name appears in several namespaces
//!    record their schema identity as root element name
//! 4. [`enforce_unique_names`]: with `unique_type_names_across_namespaces`,
//!    names are made unique across all namespaces

use std::collections::{HashMap, HashSet};

use crate::config::BuildOptions;
use crate::model::{TypeGraph, TypeId};

/// Run every pass
pub fn run(graph: &mut TypeGraph, options: &BuildOptions) {
    propagate_renames(graph);
    prune_duplicate_properties(graph);
    disambiguate_roots(graph);
    if options.unique_type_names_across_namespaces {
        enforce_unique_names(graph);
    }
}

fn interfaces(graph: &TypeGraph) -> Vec<TypeId> {
    graph
        .ids()
        .filter(|&id| graph.get(id).as_interface().is_some())
        .collect()
}

/// Align interface property names with their implementers
///
/// A rename is picked up from class implementers only, and applied to the
/// interface and every current implementer of it, or to none of them when
/// the new name is already used in one of their flattened property sets or
/// by a class deriving from one of them.
pub fn propagate_renames(graph: &mut TypeGraph) {
    for interface in interfaces(graph) {
        let implementers = graph
            .get(interface)
            .as_interface()
            .map(|i| i.derived_types.clone())
            .unwrap_or_default();

        for index in 0..graph.get(interface).properties().len() {
            let property = graph.get(interface).properties()[index].clone();
            let renamed = implementers
                .iter()
                .filter(|&&implementer| graph.get(implementer).as_class().is_some())
                .find_map(|&implementer| {
                    graph
                        .get(implementer)
                        .properties()
                        .iter()
                        .find(|p| p.same_schema_identity(&property) && p.name != property.name)
                        .map(|p| p.name.clone())
                });
            let Some(new_name) = renamed else {
                continue;
            };

            let targets: Vec<(TypeId, usize)> = std::iter::once((interface, index))
                .chain(implementers.iter().filter_map(|&implementer| {
                    graph
                        .get(implementer)
                        .properties()
                        .iter()
                        .position(|p| p.same_schema_identity(&property))
                        .map(|position| (implementer, position))
                }))
                .collect();
            if let Some(&(owner, _)) = targets
                .iter()
                .find(|&&(owner, position)| name_taken(graph, owner, position, &new_name))
            {
                tracing::debug!(
                    "{}.{} not renamed, {} is taken in {}",
                    graph.get(interface).full_name(),
                    property.name,
                    new_name,
                    graph.get(owner).full_name()
                );
                continue;
            }

            for (owner, position) in targets {
                if let Some(properties) = graph.get_mut(owner).properties_mut() {
                    properties[position].name = new_name.clone();
                }
            }
            tracing::debug!(
                "{}.{} renamed to {}",
                graph.get(interface).full_name(),
                property.name,
                new_name
            );
        }
    }
}

/// Whether a property other than `owner`'s `position` already uses `name`
///
/// Looks at the properties `owner` declares or inherits and at those of the
/// classes deriving from it.
fn name_taken(graph: &TypeGraph, owner: TypeId, position: usize, name: &str) -> bool {
    let declared = graph
        .get(owner)
        .properties()
        .iter()
        .enumerate()
        .any(|(i, p)| i != position && p.name == name);
    declared
        || graph
            .ancestors(owner)
            .into_iter()
            .chain(graph.descendants(owner))
            .any(|t| graph.get(t).properties().iter().any(|p| p.name == name))
}

/// Drop interface properties inherited from an extended interface
pub fn prune_duplicate_properties(graph: &mut TypeGraph) {
    for interface in interfaces(graph) {
        let inherited: HashSet<_> = graph
            .reachable_interfaces(interface)
            .into_iter()
            .flat_map(|i| graph.get(i).properties().iter())
            .map(|p| (p.name.clone(), p.property_type))
            .collect();
        if inherited.is_empty() {
            continue;
        }
        let removed = match graph.get_mut(interface).properties_mut() {
            Some(properties) => {
                let before = properties.len();
                properties.retain(|p| !inherited.contains(&(p.name.clone(), p.property_type)));
                before - properties.len()
            }
            None => 0,
        };
        if removed > 0 {
            tracing::debug!(
                "{} inherited properties pruned from {}",
                removed,
                graph.get(interface).full_name()
            );
        }
    }
}

/// Record the schema identity of types whose name is not unique across namespaces
pub fn disambiguate_roots(graph: &mut TypeGraph) {
    let mut namespaces_by_name: HashMap<&str, HashSet<&str>> = HashMap::new();
    for node in graph.types() {
        namespaces_by_name
            .entry(node.name.as_str())
            .or_default()
            .insert(node.namespace.as_str());
    }
    let shared: HashSet<String> = namespaces_by_name
        .into_iter()
        .filter(|(_, namespaces)| namespaces.len() > 1)
        .map(|(name, _)| name.to_string())
        .collect();
    if shared.is_empty() {
        return;
    }

    let ids: Vec<TypeId> = graph.ids().collect();
    for id in ids {
        let node = graph.get_mut(id);
        let eligible = shared.contains(&node.name)
            && !node.is_anonymous
            && !node.schema_identity.is_empty()
            && !node.is_abstract_root
            && node.root_element_name.is_none()
            && node.as_interface().is_none();
        if eligible {
            node.root_element_name = Some(node.schema_identity.clone());
        }
    }
}

/// Rename types so that no two namespaces hold the same name
///
/// Namespaces are visited in creation order; the first holder of a name
/// keeps it and later ones get the first free numeric suffix.
pub fn enforce_unique_names(graph: &mut TypeGraph) {
    let mut taken: HashSet<String> = graph.types().map(|t| t.name.clone()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let order: Vec<TypeId> = graph
        .namespaces()
        .flat_map(|ns| ns.types.values().copied())
        .collect();

    for id in order {
        let name = graph.get(id).name.clone();
        if seen.insert(name.clone()) {
            continue;
        }
        let mut suffix = 1;
        let unique = loop {
            let candidate = format!("{}{}", name, suffix);
            if !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        tracing::debug!("{} renamed to {} for global uniqueness", graph.get(id).full_name(), unique);
        taken.insert(unique.clone());
        seen.insert(unique.clone());
        graph.rename(id, unique);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ClassModel, InterfaceModel, NamespaceKey, PropertyModel, PropertyType, TypeKind,
    };
    use crate::namespaces::QName;
    use crate::schema::PrimitiveType;

    fn node(graph: &mut TypeGraph, namespace: &str, name: &str, kind: TypeKind) -> TypeId {
        graph.ensure_namespace(namespace, &NamespaceKey::for_namespace(namespace));
        let id = graph.allocate(name, namespace, QName::namespaced(namespace, name), kind);
        graph.register(id);
        id
    }

    fn class(graph: &mut TypeGraph, namespace: &str, name: &str) -> TypeId {
        node(graph, namespace, name, TypeKind::Class(ClassModel::default()))
    }

    fn interface(graph: &mut TypeGraph, namespace: &str, name: &str) -> TypeId {
        node(graph, namespace, name, TypeKind::Interface(InterfaceModel::default()))
    }

    fn add(graph: &mut TypeGraph, owner: TypeId, name: &str, element: &str) {
        let property = PropertyModel::new(
            owner,
            name,
            QName::local(element),
            PropertyType::Primitive(PrimitiveType::String),
        );
        graph.get_mut(owner).properties_mut().unwrap().push(property);
    }

    fn names(graph: &TypeGraph, id: TypeId) -> Vec<String> {
        graph.get(id).properties().iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_rename_reaches_interface_and_other_implementers() {
        let mut graph = TypeGraph::new();
        let group = interface(&mut graph, "T", "IName");
        let person = class(&mut graph, "T", "Person");
        let company = class(&mut graph, "T", "Company");
        add(&mut graph, group, "Name", "name");
        add(&mut graph, person, "Name1", "name");
        add(&mut graph, company, "Name", "name");
        graph.add_implementer(group, person);
        graph.add_implementer(group, company);

        propagate_renames(&mut graph);

        assert_eq!(names(&graph, group), vec!["Name1"]);
        assert_eq!(names(&graph, person), vec!["Name1"]);
        assert_eq!(names(&graph, company), vec!["Name1"]);
    }

    #[test]
    fn test_rename_skipped_when_name_taken() {
        let mut graph = TypeGraph::new();
        let group = interface(&mut graph, "T", "IGroup");
        let c = class(&mut graph, "T", "C");
        add(&mut graph, group, "Value", "value");
        add(&mut graph, group, "Value1", "other");
        add(&mut graph, c, "Value1", "value");
        graph.add_implementer(group, c);

        propagate_renames(&mut graph);

        assert_eq!(names(&graph, group), vec!["Value", "Value1"]);
    }

    #[test]
    fn test_rename_skipped_when_an_implementer_inherits_the_name() {
        let mut graph = TypeGraph::new();
        let group = interface(&mut graph, "T", "IG");
        let c = class(&mut graph, "T", "C");
        let e = class(&mut graph, "T", "E");
        let d = class(&mut graph, "T", "D");
        add(&mut graph, group, "C", "c");
        add(&mut graph, c, "CProperty", "c");
        add(&mut graph, e, "CProperty", "cProperty");
        add(&mut graph, d, "C", "c");
        graph.set_base_class(d, e);
        graph.add_implementer(group, c);
        graph.add_implementer(group, d);

        propagate_renames(&mut graph);

        assert_eq!(names(&graph, group), vec!["C"]);
        assert_eq!(names(&graph, c), vec!["CProperty"]);
        assert_eq!(names(&graph, d), vec!["C"]);
        let flattened: Vec<&str> = graph
            .flattened_properties(d)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(flattened, vec!["C", "CProperty"]);
    }

    #[test]
    fn test_rename_skipped_when_a_derived_class_uses_the_name() {
        let mut graph = TypeGraph::new();
        let group = interface(&mut graph, "T", "IName");
        let person = class(&mut graph, "T", "Person");
        let base = class(&mut graph, "T", "Base");
        let child = class(&mut graph, "T", "Child");
        add(&mut graph, group, "Name", "name");
        add(&mut graph, person, "Name1", "name");
        add(&mut graph, base, "Name", "name");
        add(&mut graph, child, "Name1", "alias");
        graph.set_base_class(child, base);
        graph.add_implementer(group, person);
        graph.add_implementer(group, base);

        propagate_renames(&mut graph);

        assert_eq!(names(&graph, group), vec!["Name"]);
        assert_eq!(names(&graph, base), vec!["Name"]);
        assert_eq!(names(&graph, child), vec!["Name1"]);
    }

    #[test]
    fn test_rename_stops_at_the_immediate_interface() {
        // Allocated outer first, as the builder does for nested groups
        let mut graph = TypeGraph::new();
        let outer = interface(&mut graph, "T", "IOuter");
        let inner = interface(&mut graph, "T", "IInner");
        let t = class(&mut graph, "T", "T");
        let u = class(&mut graph, "T", "U");
        add(&mut graph, inner, "Name", "name");
        add(&mut graph, outer, "Name", "name");
        add(&mut graph, t, "NameProperty", "name");
        add(&mut graph, u, "Name", "name");
        graph.add_implementer(inner, outer);
        graph.add_implementer(inner, u);
        graph.add_implementer(outer, t);

        propagate_renames(&mut graph);

        assert_eq!(names(&graph, outer), vec!["NameProperty"]);
        assert_eq!(names(&graph, t), vec!["NameProperty"]);
        assert_eq!(names(&graph, inner), vec!["Name"]);
        assert_eq!(names(&graph, u), vec!["Name"]);
    }

    #[test]
    fn test_prune_through_interface_chain() {
        let mut graph = TypeGraph::new();
        let base = interface(&mut graph, "T", "IBase");
        let middle = interface(&mut graph, "T", "IMiddle");
        let outer = interface(&mut graph, "T", "IOuter");
        add(&mut graph, base, "Id", "id");
        add(&mut graph, middle, "Id", "id");
        add(&mut graph, middle, "Label", "label");
        add(&mut graph, outer, "Id", "id");
        add(&mut graph, outer, "Label", "label");
        add(&mut graph, outer, "Extra", "extra");
        graph.add_implementer(base, middle);
        graph.add_implementer(middle, outer);

        prune_duplicate_properties(&mut graph);

        assert_eq!(names(&graph, base), vec!["Id"]);
        assert_eq!(names(&graph, middle), vec!["Label"]);
        assert_eq!(names(&graph, outer), vec!["Extra"]);
    }

    #[test]
    fn test_prune_keeps_same_name_with_other_type() {
        let mut graph = TypeGraph::new();
        let base = interface(&mut graph, "T", "IBase");
        let outer = interface(&mut graph, "T", "IOuter");
        add(&mut graph, base, "Id", "id");
        let mut id = PropertyModel::new(
            outer,
            "Id",
            QName::local("id"),
            PropertyType::Primitive(PrimitiveType::Int),
        );
        id.is_required = true;
        graph.get_mut(outer).properties_mut().unwrap().push(id);
        graph.add_implementer(base, outer);

        prune_duplicate_properties(&mut graph);

        assert_eq!(names(&graph, outer), vec!["Id"]);
    }

    #[test]
    fn test_disambiguate_roots() {
        let mut graph = TypeGraph::new();
        let a = class(&mut graph, "A", "Item");
        let b = class(&mut graph, "B", "Item");
        let group = interface(&mut graph, "B", "IItem");
        let c = class(&mut graph, "A", "IItem");
        let only = class(&mut graph, "A", "Only");

        disambiguate_roots(&mut graph);

        assert_eq!(graph.get(a).root_element_name, Some(QName::namespaced("A", "Item")));
        assert_eq!(graph.get(b).root_element_name, Some(QName::namespaced("B", "Item")));
        assert_eq!(graph.get(group).root_element_name, None);
        assert_eq!(graph.get(c).root_element_name, Some(QName::namespaced("A", "IItem")));
        assert_eq!(graph.get(only).root_element_name, None);
    }

    #[test]
    fn test_existing_root_is_kept() {
        let mut graph = TypeGraph::new();
        let a = class(&mut graph, "A", "Item");
        let _b = class(&mut graph, "B", "Item");
        graph.get_mut(a).root_element_name = Some(QName::namespaced("A", "item"));

        disambiguate_roots(&mut graph);

        assert_eq!(graph.get(a).root_element_name, Some(QName::namespaced("A", "item")));
    }

    #[test]
    fn test_enforce_unique_names() {
        let mut graph = TypeGraph::new();
        let a = class(&mut graph, "A", "Item");
        let b = class(&mut graph, "B", "Item");
        let _taken = class(&mut graph, "B", "Item1");
        let c = class(&mut graph, "C", "Item");

        enforce_unique_names(&mut graph);

        assert_eq!(graph.get(a).name, "Item");
        assert_eq!(graph.get(b).name, "Item2");
        assert_eq!(graph.get(c).name, "Item3");
        assert!(graph.find("B", "Item2").is_some());
        assert!(graph.find("B", "Item").is_none());
    }

    #[test]
    fn test_run_honours_unique_option() {
        let mut graph = TypeGraph::new();
        class(&mut graph, "A", "Item");
        let b = class(&mut graph, "B", "Item");

        run(&mut graph, &BuildOptions::default());
        assert_eq!(graph.get(b).name, "Item");

        let options = BuildOptions {
            unique_type_names_across_namespaces: true,
            ..Default::default()
        };
        run(&mut graph, &options);
        assert_eq!(graph.get(b).name, "Item1");
    }
}
