//! XSD particles and model groups
//!
//! A particle is a content-model node (element, wildcard, group reference or
//! nested group) with occurrence bounds.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#p

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::namespaces::QName;

use super::elements::ElementDecl;

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
/// None for max means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    #[serde(default = "one")]
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    #[serde(default = "some_one")]
    pub max: Option<u32>,
}

fn one() -> u32 {
    1
}

fn some_one() -> Option<u32> {
    Some(1)
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// One or more (1, unbounded)
    pub fn one_or_more() -> Self {
        Self { min: 1, max: None }
    }

    /// Empty (0, 0)
    pub fn empty() -> Self {
        Self { min: 0, max: Some(0) }
    }

    /// Check if this particle can be empty (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if this particle is empty (maxOccurs == 0)
    pub fn is_empty(&self) -> bool {
        self.max == Some(0)
    }

    /// Check if particle can have multiple occurrences
    pub fn is_multiple(&self) -> bool {
        !self.is_empty() && self.max != Some(1)
    }

    /// Combine with the bounds of an enclosing particle
    ///
    /// Minimums and maximums multiply; unbounded absorbs everything but zero.
    pub fn nested_in(&self, outer: &Occurs) -> Occurs {
        let min = self.min.saturating_mul(outer.min);
        let max = match (self.max, outer.max) {
            (Some(0), _) | (_, Some(0)) => Some(0),
            (Some(a), Some(b)) => Some(a.saturating_mul(b)),
            _ => None,
        };
        Occurs { min, max }
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

/// Model group compositor type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelType {
    /// Ordered sequence of particles
    #[default]
    Sequence,
    /// One of multiple alternatives
    Choice,
    /// Unordered set of particles
    All,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => write!(f, "sequence"),
            Self::Choice => write!(f, "choice"),
            Self::All => write!(f, "all"),
        }
    }
}

/// How a wildcard's content is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcessContents {
    /// Must be validated
    #[default]
    Strict,
    /// Validate if a declaration is available
    Lax,
    /// No validation
    Skip,
}

/// An element or attribute wildcard (xs:any / xs:anyAttribute)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wildcard {
    /// Namespace constraint as written (`##any`, `##other`, a URI list)
    #[serde(default)]
    pub namespace: Option<String>,
    /// Processing mode
    #[serde(default)]
    pub process_contents: ProcessContents,
    /// Documentation annotations
    #[serde(default)]
    pub documentation: Vec<String>,
}

/// A model group (sequence, choice, all)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelGroup {
    /// Compositor
    #[serde(default)]
    pub model: ModelType,
    /// Child particles
    #[serde(default)]
    pub particles: Vec<Particle>,
}

impl ModelGroup {
    /// Create a new model group
    pub fn new(model: ModelType, particles: Vec<Particle>) -> Self {
        Self { model, particles }
    }

    /// Create a sequence
    pub fn sequence(particles: Vec<Particle>) -> Self {
        Self::new(ModelType::Sequence, particles)
    }

    /// Create a choice
    pub fn choice(particles: Vec<Particle>) -> Self {
        Self::new(ModelType::Choice, particles)
    }
}

/// The term of a particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Term {
    /// Local element declaration
    Element(ElementDecl),
    /// Reference to a global element declaration
    ElementRef(QName),
    /// Element wildcard
    Any(Wildcard),
    /// Reference to a named model group
    GroupRef(QName),
    /// Nested model group
    Group(ModelGroup),
}

/// A content-model particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// The particle's term
    pub term: Term,
    /// Occurrence bounds
    #[serde(default)]
    pub occurs: Occurs,
}

impl Particle {
    /// Create a new particle
    pub fn new(term: Term, occurs: Occurs) -> Self {
        Self { term, occurs }
    }

    /// A local element particle occurring once
    pub fn element(decl: ElementDecl) -> Self {
        Self::new(Term::Element(decl), Occurs::once())
    }

    /// A reference to a global element occurring once
    pub fn element_ref(name: QName) -> Self {
        Self::new(Term::ElementRef(name), Occurs::once())
    }

    /// A group reference occurring once
    pub fn group_ref(name: QName) -> Self {
        Self::new(Term::GroupRef(name), Occurs::once())
    }

    /// A nested model group occurring once
    pub fn group(group: ModelGroup) -> Self {
        Self::new(Term::Group(group), Occurs::once())
    }

    /// An `xs:any` wildcard occurring once
    pub fn any() -> Self {
        Self::new(Term::Any(Wildcard::default()), Occurs::once())
    }

    /// Replace the occurrence bounds
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }
}
