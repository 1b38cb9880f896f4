//! Dependency ordering of schema documents
//!
//! A depth-first walk over include and import edges that emits a document
//! only after everything it depends on. A document is marked seen when the
//! walk enters it, so cyclic includes terminate instead of recursing.

use std::collections::HashSet;

use crate::schema::SchemaSet;

/// Indices into `set.documents`, dependencies first
pub fn build_order(set: &SchemaSet) -> Vec<usize> {
    let mut order = Vec::with_capacity(set.documents.len());
    let mut seen = HashSet::new();
    for index in 0..set.documents.len() {
        visit(set, index, &mut seen, &mut order);
    }
    order
}

fn visit(set: &SchemaSet, index: usize, seen: &mut HashSet<usize>, order: &mut Vec<usize>) {
    if !seen.insert(index) {
        return;
    }
    let document = &set.documents[index];
    for location in document.dependencies() {
        match set.maps().documents.get(location) {
            Some(&dependency) => visit(set, dependency, seen, order),
            None => tracing::debug!(
                "'{}' depends on '{}', which is not part of the set",
                document.location,
                location
            ),
        }
    }
    order.push(index);
}

/// Document locations in build order
pub fn build_order_locations(set: &SchemaSet) -> Vec<&str> {
    build_order(set)
        .into_iter()
        .map(|index| set.documents[index].location.as_str())
        .collect()
}
