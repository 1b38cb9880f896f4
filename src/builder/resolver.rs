//! Namespace resolution
//!
//! Maps the (source document, XML namespace) of every construct onto an
//! output namespace name. Explicit rules are consulted through a fixed
//! fallback chain; when none matches, the injected [`NamespacePolicy`] gets a
//! chance, and its answer is remembered for the exact key.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::model::namespace::filename_of;
use crate::model::{NamespaceKey, TypeGraph};

/// Generates output namespace names the explicit rules do not cover
pub trait NamespacePolicy {
    /// Output name for `xml_namespace` referenced from `source`, if any
    fn namespace_name(&self, source: Option<&str>, xml_namespace: &str) -> Option<String>;
}

impl<F> NamespacePolicy for F
where
    F: Fn(Option<&str>, &str) -> Option<String>,
{
    fn namespace_name(&self, source: Option<&str>, xml_namespace: &str) -> Option<String> {
        self(source, xml_namespace)
    }
}

/// Resolves output namespace names
pub struct NamespaceResolver {
    rules: IndexMap<NamespaceKey, String>,
    generated: IndexMap<NamespaceKey, String>,
    policy: Option<Box<dyn NamespacePolicy>>,
}

impl fmt::Debug for NamespaceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceResolver")
            .field("rules", &self.rules)
            .field("generated", &self.generated)
            .field("policy", &self.policy.is_some())
            .finish()
    }
}

impl Default for NamespaceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceResolver {
    /// Create a resolver without rules or policy
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
            generated: IndexMap::new(),
            policy: None,
        }
    }

    /// Create a resolver from (key, output name) rules
    pub fn with_rules(rules: impl IntoIterator<Item = (NamespaceKey, String)>) -> Self {
        let mut resolver = Self::new();
        for (key, output) in rules {
            resolver.rules.entry(key).or_insert(output);
        }
        resolver
    }

    /// Add a rule; an existing rule for the same key is kept
    pub fn add_rule(&mut self, key: NamespaceKey, output: impl Into<String>) {
        self.rules.entry(key).or_insert_with(|| output.into());
    }

    /// Install the generation policy
    pub fn with_policy(mut self, policy: impl NamespacePolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Output names generated by the policy so far
    pub fn generated(&self) -> impl Iterator<Item = (&NamespaceKey, &String)> {
        self.generated.iter()
    }

    fn rule(&self, source: Option<&str>, xml_namespace: Option<&str>) -> Option<&String> {
        self.rules.get(&NamespaceKey::new(source, xml_namespace))
    }

    /// Resolve the output name for `xml_namespace` referenced from `source`
    ///
    /// Tries, in order: (document, namespace), (document, *), (filename,
    /// namespace), (filename, *), (*, namespace), (*, *), then the policy.
    pub fn resolve(&mut self, source: Option<&str>, xml_namespace: &str) -> Result<String> {
        let filename = source.and_then(filename_of);
        let ns = Some(xml_namespace);

        let mut found = None;
        if let Some(source) = source {
            found = self.rule(Some(source), ns).or_else(|| self.rule(Some(source), None));
        }
        if found.is_none() {
            if let Some(filename) = filename.as_deref() {
                found = self
                    .rule(Some(filename), ns)
                    .or_else(|| self.rule(Some(filename), None));
            }
        }
        if let Some(output) = found
            .or_else(|| self.rule(None, ns))
            .or_else(|| self.rule(None, None))
        {
            return Ok(output.clone());
        }

        let exact = NamespaceKey::new(source, ns);
        if let Some(output) = self.generated.get(&exact) {
            return Ok(output.clone());
        }

        let generated = self
            .policy
            .as_ref()
            .and_then(|policy| policy.namespace_name(source, xml_namespace));
        match generated {
            Some(output) => {
                tracing::debug!("namespace {} generated as '{}'", exact, output);
                self.generated.insert(exact, output.clone());
                Ok(output)
            }
            None => Err(Error::configuration(xml_namespace, source)),
        }
    }
}

/// Flag namespaces shadowed by a namespace nested within them
///
/// `N` is ambiguous when some `N.rest` has a segment in `rest` equal to the
/// first segment of `N`: inside `N.rest`, a reference starting with that
/// segment would bind to the nested namespace instead of `N`.
pub fn mark_ambiguous(graph: &mut TypeGraph) {
    let names: Vec<String> = graph.namespaces().map(|ns| ns.output_name.clone()).collect();
    let mut ambiguous = HashSet::new();

    for outer in &names {
        let first = outer.split('.').next().unwrap_or(outer);
        let prefix = format!("{}.", outer);
        let shadowed = names.iter().any(|inner| {
            inner
                .strip_prefix(&prefix)
                .map_or(false, |rest| rest.split('.').any(|segment| segment == first))
        });
        if shadowed {
            ambiguous.insert(outer.clone());
        }
    }

    for ns in graph.namespaces_mut() {
        if ambiguous.contains(&ns.output_name) {
            tracing::debug!("namespace '{}' is ambiguous", ns.output_name);
            ns.is_ambiguous = true;
        }
    }
}
