//! Facet to restriction mapping

use crate::model::{AnnotationMode, Bound, RestrictionModel};
use crate::schema::{Facet, PrimitiveType};

/// Map the facets of a restriction onto restriction models
///
/// Length facets become separate `MinLength`/`MaxLength` under
/// [`AnnotationMode::All`] and one `MinMaxLength` under
/// [`AnnotationMode::Partial`]; they are emitted ahead of the other facets.
/// Enumeration and whitespace facets carry no restriction.
pub fn extract_restrictions(
    facets: &[Facet],
    value_type: PrimitiveType,
    mode: AnnotationMode,
) -> Vec<RestrictionModel> {
    if mode == AnnotationMode::None {
        return Vec::new();
    }

    let mut min_length = None;
    let mut max_length = None;
    let mut others = Vec::new();

    for facet in facets {
        match facet {
            Facet::Length { value } => {
                min_length = Some(*value);
                max_length = Some(*value);
            }
            Facet::MinLength { value } => min_length = Some(*value),
            Facet::MaxLength { value } => max_length = Some(*value),
            Facet::Pattern { value } => others.push(RestrictionModel::Pattern(value.clone())),
            Facet::MinInclusive { value } => {
                others.push(RestrictionModel::MinInclusive(Bound::parse(value, value_type)))
            }
            Facet::MinExclusive { value } => {
                others.push(RestrictionModel::MinExclusive(Bound::parse(value, value_type)))
            }
            Facet::MaxInclusive { value } => {
                others.push(RestrictionModel::MaxInclusive(Bound::parse(value, value_type)))
            }
            Facet::MaxExclusive { value } => {
                others.push(RestrictionModel::MaxExclusive(Bound::parse(value, value_type)))
            }
            Facet::TotalDigits { value } => others.push(RestrictionModel::TotalDigits(*value)),
            Facet::FractionDigits { value } => {
                others.push(RestrictionModel::FractionDigits(*value))
            }
            Facet::Enumeration { .. } | Facet::WhiteSpace { .. } => {}
        }
    }

    let mut restrictions = Vec::new();
    if mode >= AnnotationMode::All {
        restrictions.extend(min_length.map(RestrictionModel::MinLength));
        restrictions.extend(max_length.map(RestrictionModel::MaxLength));
    } else if min_length.is_some() || max_length.is_some() {
        restrictions.push(RestrictionModel::MinMaxLength {
            min: min_length.unwrap_or(0),
            max: max_length,
        });
    }
    restrictions.extend(others);
    restrictions.retain(|r| r.is_supported(mode));
    restrictions
}

/// Layer `derived` restrictions over those inherited from a base type
///
/// A derived restriction replaces every inherited one of the same kind.
pub fn merge_restrictions(
    inherited: &[RestrictionModel],
    derived: Vec<RestrictionModel>,
) -> Vec<RestrictionModel> {
    let mut merged: Vec<RestrictionModel> = inherited
        .iter()
        .filter(|base| derived.iter().all(|r| r.kind() != base.kind()))
        .cloned()
        .collect();
    merged.extend(derived);
    merged
}
