//! Validation metadata derived from restriction facets
//!
//! Each [`RestrictionModel`] declares the lowest [`AnnotationMode`] at which
//! it is emitted, so the extractor's eligibility check is one comparison.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::schema::PrimitiveType;

/// How much validation metadata the graph carries
///
/// Ordered: `None < Partial < All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnotationMode {
    /// No restrictions at all
    None,
    /// Combined ranges and patterns only
    Partial,
    /// Every facet, length bounds split
    #[default]
    All,
}

/// A parsed numeric or temporal bound
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    /// Integer bound
    Integer(i64),
    /// Decimal bound
    Decimal(Decimal),
    /// Float bound
    Float(f64),
    /// Non-numeric bound (dates, durations) or an unparsable literal
    Literal(String),
}

impl BoundValue {
    /// Parse a facet literal according to the type it bounds
    pub fn parse(literal: &str, value_type: PrimitiveType) -> Self {
        let trimmed = literal.trim();
        let parsed = if value_type.is_integral() {
            trimmed
                .parse::<i64>()
                .map(BoundValue::Integer)
                .or_else(|_| Decimal::from_str(trimmed).map(BoundValue::Decimal))
                .ok()
        } else {
            match value_type {
                PrimitiveType::Decimal => Decimal::from_str(trimmed).map(BoundValue::Decimal).ok(),
                PrimitiveType::Float | PrimitiveType::Double => parse_xsd_float(trimmed).map(BoundValue::Float),
                _ => None,
            }
        };
        parsed.unwrap_or_else(|| BoundValue::Literal(literal.to_string()))
    }
}

fn parse_xsd_float(s: &str) -> Option<f64> {
    match s {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => s.parse().ok(),
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Integer(i) => write!(f, "{}", i),
            BoundValue::Decimal(d) => write!(f, "{}", d),
            BoundValue::Float(v) => {
                if v.is_nan() {
                    write!(f, "NaN")
                } else if *v == f64::INFINITY {
                    write!(f, "INF")
                } else if *v == f64::NEG_INFINITY {
                    write!(f, "-INF")
                } else {
                    write!(f, "{}", v)
                }
            }
            BoundValue::Literal(s) => write!(f, "{}", s),
        }
    }
}

/// A bound together with the primitive type it was declared against
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    /// The bound
    pub value: BoundValue,
    /// The restricted primitive, for literal formatting downstream
    pub value_type: PrimitiveType,
}

impl Bound {
    /// Parse a facet literal as a bound of `value_type`
    pub fn parse(literal: &str, value_type: PrimitiveType) -> Self {
        Self {
            value: BoundValue::parse(literal, value_type),
            value_type,
        }
    }
}

/// Validation metadata for a simple type or property
#[derive(Debug, Clone, PartialEq)]
pub enum RestrictionModel {
    /// Minimum length
    MinLength(u64),
    /// Maximum length
    MaxLength(u64),
    /// Combined length range
    MinMaxLength {
        /// Minimum length (0 when only a maximum is declared)
        min: u64,
        /// Maximum length
        max: Option<u64>,
    },
    /// Maximum number of digits
    TotalDigits(u32),
    /// Maximum number of fraction digits
    FractionDigits(u32),
    /// Regular expression
    Pattern(String),
    /// Inclusive lower bound
    MinInclusive(Bound),
    /// Exclusive lower bound
    MinExclusive(Bound),
    /// Inclusive upper bound
    MaxInclusive(Bound),
    /// Exclusive upper bound
    MaxExclusive(Bound),
}

impl RestrictionModel {
    /// The lowest annotation mode at which this restriction is emitted
    pub fn minimum_annotation_mode(&self) -> AnnotationMode {
        match self {
            RestrictionModel::MinLength(_)
            | RestrictionModel::MaxLength(_)
            | RestrictionModel::TotalDigits(_)
            | RestrictionModel::FractionDigits(_) => AnnotationMode::All,
            RestrictionModel::MinMaxLength { .. }
            | RestrictionModel::Pattern(_)
            | RestrictionModel::MinInclusive(_)
            | RestrictionModel::MinExclusive(_)
            | RestrictionModel::MaxInclusive(_)
            | RestrictionModel::MaxExclusive(_) => AnnotationMode::Partial,
        }
    }

    /// Whether the restriction is emitted under `mode`
    pub fn is_supported(&self, mode: AnnotationMode) -> bool {
        mode >= self.minimum_annotation_mode()
    }

    /// Short kind name, as used in graph dumps
    pub fn kind(&self) -> &'static str {
        match self {
            RestrictionModel::MinLength(_) => "minLength",
            RestrictionModel::MaxLength(_) => "maxLength",
            RestrictionModel::MinMaxLength { .. } => "minMaxLength",
            RestrictionModel::TotalDigits(_) => "totalDigits",
            RestrictionModel::FractionDigits(_) => "fractionDigits",
            RestrictionModel::Pattern(_) => "pattern",
            RestrictionModel::MinInclusive(_) => "minInclusive",
            RestrictionModel::MinExclusive(_) => "minExclusive",
            RestrictionModel::MaxInclusive(_) => "maxInclusive",
            RestrictionModel::MaxExclusive(_) => "maxExclusive",
        }
    }

    /// The restriction's value rendered as a literal
    pub fn value_literal(&self) -> String {
        match self {
            RestrictionModel::MinLength(v) | RestrictionModel::MaxLength(v) => v.to_string(),
            RestrictionModel::MinMaxLength { min, max } => match max {
                Some(max) => format!("{}..{}", min, max),
                None => format!("{}..", min),
            },
            RestrictionModel::TotalDigits(v) | RestrictionModel::FractionDigits(v) => v.to_string(),
            RestrictionModel::Pattern(p) => p.clone(),
            RestrictionModel::MinInclusive(b)
            | RestrictionModel::MinExclusive(b)
            | RestrictionModel::MaxInclusive(b)
            | RestrictionModel::MaxExclusive(b) => b.value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_mode_ordering() {
        assert!(AnnotationMode::None < AnnotationMode::Partial);
        assert!(AnnotationMode::Partial < AnnotationMode::All);
    }

    #[test]
    fn test_restriction_eligibility() {
        let combined = RestrictionModel::MinMaxLength { min: 1, max: Some(5) };
        assert!(combined.is_supported(AnnotationMode::Partial));
        assert!(!combined.is_supported(AnnotationMode::None));
        assert!(!RestrictionModel::MinLength(1).is_supported(AnnotationMode::Partial));
        assert!(RestrictionModel::MinLength(1).is_supported(AnnotationMode::All));
    }

    #[test]
    fn test_bound_parsing_keeps_type() {
        let b = Bound::parse("10", PrimitiveType::Int);
        assert_eq!(b.value, BoundValue::Integer(10));
        assert_eq!(b.value_type, PrimitiveType::Int);

        let d = Bound::parse("1.50", PrimitiveType::Decimal);
        assert_eq!(d.value, BoundValue::Decimal(Decimal::from_str("1.50").unwrap()));
        assert_eq!(d.value.to_string(), "1.50");

        let f = Bound::parse("-INF", PrimitiveType::Double);
        assert_eq!(f.value.to_string(), "-INF");

        let date = Bound::parse("2024-01-01", PrimitiveType::Date);
        assert_eq!(date.value, BoundValue::Literal("2024-01-01".into()));
    }
}
