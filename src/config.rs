//! Build configuration
//!
//! [`BuildOptions`] switches the optional behaviours of the builder;
//! [`Configuration`] adds the explicit namespace mapping rules and is what the
//! CLI reads from a JSON file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::model::{AnnotationMode, NamespaceKey};

/// How members of a substitution group surface on the owning class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubstitutionStrategy {
    /// One property listing every member in its substitutes
    #[default]
    Merge,
    /// One discrete property per member
    Separate,
}

/// Optional builder behaviours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
    /// Group and attribute-group references yield interface models
    pub generate_interfaces: bool,
    /// Substitution group strategy
    pub substitution_strategy: SubstitutionStrategy,
    /// Suffix type names repeated across namespaces
    pub unique_type_names_across_namespaces: bool,
    /// Restriction fidelity
    pub annotation_mode: AnnotationMode,
    /// Record sequence positions on element properties
    pub emit_order: bool,
    /// Numeric unions get the widest member type instead of string
    pub map_union_to_widest_common_type: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            generate_interfaces: true,
            substitution_strategy: SubstitutionStrategy::Merge,
            unique_type_names_across_namespaces: false,
            annotation_mode: AnnotationMode::All,
            emit_order: false,
            map_union_to_widest_common_type: false,
        }
    }
}

/// An explicit namespace mapping rule
///
/// A rule without `source` matches the namespace from any document; one
/// without `namespace` matches every namespace of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceMapping {
    /// Source document identity
    #[serde(default)]
    pub source: Option<String>,
    /// XML namespace
    #[serde(default)]
    pub namespace: Option<String>,
    /// Output namespace name
    pub output: String,
}

impl NamespaceMapping {
    /// The resolver key of this rule
    pub fn key(&self) -> NamespaceKey {
        NamespaceKey::new(self.source.as_deref(), self.namespace.as_deref())
    }
}

/// Complete build configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Builder options
    pub options: BuildOptions,
    /// Namespace mapping rules, in priority order for equal keys
    pub namespaces: Vec<NamespaceMapping>,
}

impl Configuration {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Add a namespace-only mapping rule
    pub fn map_namespace(mut self, namespace: impl Into<String>, output: impl Into<String>) -> Self {
        self.namespaces.push(NamespaceMapping {
            source: None,
            namespace: Some(namespace.into()),
            output: output.into(),
        });
        self
    }

    /// Rules as (key, output name) pairs; the first rule for a key wins
    pub fn rules(&self) -> Vec<(NamespaceKey, String)> {
        let mut rules: Vec<(NamespaceKey, String)> = Vec::new();
        for mapping in &self.namespaces {
            let key = mapping.key();
            if !rules.iter().any(|(k, _)| *k == key) {
                rules.push((key, mapping.output.clone()));
            }
        }
        rules
    }
}
