//! Shared fixtures for the integration tests

#![allow(dead_code)]

use xsd_typegraph::model::{PropertyModel, TypeGraph, TypeModel};
use xsd_typegraph::schema::{
    ComplexTypeDef, ElementDecl, ModelGroup, Occurs, Particle, SchemaDocument, SchemaSet, TypeRef,
};
use xsd_typegraph::{build_graph, BuildOptions, Configuration, PascalCaseNaming, QName, Result};

/// Target namespace of the fixture documents
pub const NS: &str = "urn:shop";

/// Output namespace every fixture namespace is mapped to
pub const OUT: &str = "Shop";

/// A name in the fixture namespace
pub fn q(name: &str) -> QName {
    QName::namespaced(NS, name)
}

/// A fixture document in [`NS`]
pub fn doc(location: &str) -> SchemaDocument {
    SchemaDocument::new(location, Some(NS))
}

/// A local element typed by an XSD built-in
pub fn xs_element(name: &str, builtin: &str) -> Particle {
    Particle::element(ElementDecl::new(q(name), TypeRef::xsd(builtin)))
}

/// A local element typed by a named type of [`NS`]
pub fn typed_element(name: &str, type_name: &str) -> Particle {
    Particle::element(ElementDecl::new(q(name), TypeRef::named(q(type_name))))
}

/// A named complex type with a sequence of particles
pub fn sequence_type(name: &str, particles: Vec<Particle>) -> ComplexTypeDef {
    ComplexTypeDef::named(q(name)).with_particle(Particle::group(ModelGroup::sequence(particles)))
}

/// A top-level element of a named type
pub fn root(name: &str, type_name: &str) -> ElementDecl {
    ElementDecl::new(q(name), TypeRef::named(q(type_name)))
}

/// `particle` repeated without bound
pub fn many(particle: Particle) -> Particle {
    particle.with_occurs(Occurs::zero_or_more())
}

/// Catch-all configuration mapping every namespace to [`OUT`]
pub fn config(options: BuildOptions) -> Configuration {
    let mut config = Configuration {
        options,
        ..Default::default()
    };
    config.namespaces.push(xsd_typegraph::NamespaceMapping {
        source: None,
        namespace: None,
        output: OUT.to_string(),
    });
    config
}

/// Build with default options
pub fn build(documents: Vec<SchemaDocument>) -> TypeGraph {
    build_with(documents, BuildOptions::default())
}

/// Build with `options`
pub fn build_with(documents: Vec<SchemaDocument>, options: BuildOptions) -> TypeGraph {
    try_build(documents, &config(options)).expect("build failed")
}

/// Build with an explicit configuration
pub fn try_build(documents: Vec<SchemaDocument>, config: &Configuration) -> Result<TypeGraph> {
    let set = SchemaSet::new(documents);
    build_graph(&set, config, &PascalCaseNaming::new())
}

/// The node `name` of [`OUT`]
pub fn node<'g>(graph: &'g TypeGraph, name: &str) -> &'g TypeModel {
    graph
        .find(OUT, name)
        .unwrap_or_else(|| panic!("no type {} in {}", name, OUT))
}

/// Declared property names of `node`
pub fn property_names(node: &TypeModel) -> Vec<&str> {
    node.properties().iter().map(|p| p.name.as_str()).collect()
}

/// The declared property `name` of `node`
pub fn property<'g>(node: &'g TypeModel, name: &str) -> &'g PropertyModel {
    node.properties()
        .iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("no property {} on {}", name, node.name))
}

/// Names of the types in [`OUT`], in creation order
pub fn type_names(graph: &TypeGraph) -> Vec<&str> {
    graph
        .namespace(OUT)
        .map(|ns| ns.types.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
