//! Output namespaces
//!
//! A [`NamespaceKey`] identifies where a construct came from: the source
//! document and its XML namespace. A key missing one component acts as a
//! wildcard over it, which is what the resolver's fallback chain exploits.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use super::types::TypeId;

/// (source document, XML namespace) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceKey {
    /// Source document identity (URI or path)
    #[serde(default)]
    pub source: Option<String>,
    /// XML namespace
    #[serde(default)]
    pub xml_namespace: Option<String>,
}

impl NamespaceKey {
    /// Create a key with both components
    pub fn new(source: Option<&str>, xml_namespace: Option<&str>) -> Self {
        Self {
            source: source.map(str::to_string),
            xml_namespace: xml_namespace.map(str::to_string),
        }
    }

    /// A key matching any namespace of `source`
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            xml_namespace: None,
        }
    }

    /// A key matching `xml_namespace` from any document
    pub fn for_namespace(xml_namespace: impl Into<String>) -> Self {
        Self {
            source: None,
            xml_namespace: Some(xml_namespace.into()),
        }
    }

    /// The catch-all key
    pub fn any() -> Self {
        Self::default()
    }

    /// The source reduced to its final path segment
    ///
    /// The same file reached through different base URIs yields the same
    /// filename. Returns None when there is no source or it has no segment.
    pub fn source_filename(&self) -> Option<String> {
        self.source.as_deref().and_then(filename_of)
    }
}

/// Final path segment of a document identity, URL or file path
pub fn filename_of(source: &str) -> Option<String> {
    if let Ok(url) = Url::parse(source) {
        if let Some(last) = url.path_segments().and_then(|mut s| s.next_back()) {
            if !last.is_empty() {
                return Some(last.to_string());
            }
        }
    }
    source
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl fmt::Display for NamespaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            self.source.as_deref().unwrap_or("*"),
            self.xml_namespace.as_deref().unwrap_or("*")
        )
    }
}

/// An output namespace and the types placed in it
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceModel {
    /// Output name
    pub output_name: String,
    /// Key of the first construct that created the namespace
    pub key: NamespaceKey,
    /// Types by name, in creation order
    pub types: IndexMap<String, TypeId>,
    /// Requires fully qualified references (shadowed by a nested namespace)
    pub is_ambiguous: bool,
}

impl NamespaceModel {
    /// Create an empty namespace
    pub fn new(output_name: impl Into<String>, key: NamespaceKey) -> Self {
        Self {
            output_name: output_name.into(),
            key,
            types: IndexMap::new(),
            is_ambiguous: false,
        }
    }

    /// Whether a type of this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Whether a type of this name exists, ignoring case
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.types.keys().any(|k| k.eq_ignore_ascii_case(name))
    }
}
