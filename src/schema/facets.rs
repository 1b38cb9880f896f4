//! XSD constraining facets
//!
//! Facets as they arrive on a compiled simple type restriction. The builder
//! does not validate values against them; it classifies them (enumeration or
//! not) and hands the rest to the restriction extractor.

use serde::{Deserialize, Serialize};

/// White space handling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WhiteSpace {
    /// Preserve all white space
    Preserve,
    /// Replace tabs and newlines with spaces
    Replace,
    /// Replace and collapse multiple spaces
    Collapse,
}

/// A constraining facet of a simple type restriction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Facet {
    /// Exact length
    Length {
        /// Required length
        value: u64,
    },
    /// Minimum length
    MinLength {
        /// Minimum length
        value: u64,
    },
    /// Maximum length
    MaxLength {
        /// Maximum length
        value: u64,
    },
    /// Regular expression pattern
    Pattern {
        /// The XSD regular expression
        value: String,
    },
    /// One enumerated literal
    Enumeration {
        /// The literal value
        value: String,
        /// Documentation attached to the literal
        #[serde(default)]
        documentation: Vec<String>,
        /// Whether the literal is annotated as deprecated
        #[serde(default)]
        deprecated: bool,
    },
    /// White space handling
    WhiteSpace {
        /// The mode
        value: WhiteSpace,
    },
    /// Inclusive lower bound
    MinInclusive {
        /// Bound literal
        value: String,
    },
    /// Exclusive lower bound
    MinExclusive {
        /// Bound literal
        value: String,
    },
    /// Inclusive upper bound
    MaxInclusive {
        /// Bound literal
        value: String,
    },
    /// Exclusive upper bound
    MaxExclusive {
        /// Bound literal
        value: String,
    },
    /// Maximum number of digits
    TotalDigits {
        /// Digit count
        value: u32,
    },
    /// Maximum number of fraction digits
    FractionDigits {
        /// Digit count
        value: u32,
    },
}

impl Facet {
    /// Create an enumeration facet without annotations
    pub fn enumeration(value: impl Into<String>) -> Self {
        Facet::Enumeration {
            value: value.into(),
            documentation: Vec::new(),
            deprecated: false,
        }
    }

    /// Check if this is an enumeration facet
    pub fn is_enumeration(&self) -> bool {
        matches!(self, Facet::Enumeration { .. })
    }

    /// The facet's XSD element name
    pub fn name(&self) -> &'static str {
        match self {
            Facet::Length { .. } => "length",
            Facet::MinLength { .. } => "minLength",
            Facet::MaxLength { .. } => "maxLength",
            Facet::Pattern { .. } => "pattern",
            Facet::Enumeration { .. } => "enumeration",
            Facet::WhiteSpace { .. } => "whiteSpace",
            Facet::MinInclusive { .. } => "minInclusive",
            Facet::MinExclusive { .. } => "minExclusive",
            Facet::MaxInclusive { .. } => "maxInclusive",
            Facet::MaxExclusive { .. } => "maxExclusive",
            Facet::TotalDigits { .. } => "totalDigits",
            Facet::FractionDigits { .. } => "fractionDigits",
        }
    }
}

/// Whether every facet is an enumeration, and there is at least one
pub fn only_enumerations(facets: &[Facet]) -> bool {
    !facets.is_empty() && facets.iter().all(Facet::is_enumeration)
}
