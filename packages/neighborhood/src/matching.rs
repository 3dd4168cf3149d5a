//! Joins neighbourhood name sets across datasets.
//!
//! Both sides are normalized with [`canonical_name`] before comparison,
//! so "Ciutat Vella" in the listings matches "ciutat   vella" in a
//! boundary file. Names present in one source but absent from the other
//! are reported, not dropped; the caller decides how to degrade (skip a
//! polygon, fall back to a placeholder marker).

use std::collections::BTreeMap;

use rental_map_neighborhood_models::JoinReport;

use crate::normalize::canonical_name;

/// Joins aggregate-side names against boundary-side names.
///
/// Spellings that normalize to the same canonical form count as one
/// name; unmatched entries keep their original spelling so diagnostics
/// stay readable. Emits a warning when coverage is incomplete.
#[must_use]
pub fn join_names<'a, L, R>(aggregate_names: L, boundary_names: R) -> JoinReport
where
    L: IntoIterator<Item = &'a str>,
    R: IntoIterator<Item = &'a str>,
{
    let aggregate = canonical_index(aggregate_names);
    let boundary = canonical_index(boundary_names);

    let mut report = JoinReport::default();

    for (canonical, original) in &aggregate {
        if boundary.contains_key(canonical) {
            report.matched.push(canonical.clone());
        } else {
            report.aggregate_only.push(original.clone());
        }
    }

    for (canonical, original) in &boundary {
        if !aggregate.contains_key(canonical) {
            report.boundary_only.push(original.clone());
        }
    }

    report.aggregate_only.sort();
    report.boundary_only.sort();

    if report.is_complete() {
        log::debug!("Name join complete: {}", report.coverage());
    } else {
        log::warn!(
            "Name join incomplete: {} ({} unmatched)",
            report.coverage(),
            report.aggregate_only.len()
        );
    }

    report
}

/// Maps canonical form to the first original spelling seen for it.
/// Empty canonical forms (names that normalize away entirely) are
/// excluded from the join.
fn canonical_index<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, String> {
    let mut index = BTreeMap::new();
    for name in names {
        let canonical = canonical_name(name);
        if !canonical.is_empty() {
            index.entry(canonical).or_insert_with(|| name.to_string());
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_across_spellings() {
        let report = join_names(
            ["Ciutat Vella", "El Raval"],
            ["ciutat   vella", "Gràcia"],
        );

        assert_eq!(report.matched, vec!["ciutat vella".to_string()]);
        assert_eq!(report.aggregate_only, vec!["El Raval".to_string()]);
        assert_eq!(report.boundary_only, vec!["Gràcia".to_string()]);
        assert_eq!(report.coverage(), "1 of 2 neighbourhoods matched");
        assert!(!report.is_complete());
    }

    #[test]
    fn duplicate_spellings_collapse_to_one_name() {
        let report = join_names(["Sol", "SOL", "sol "], ["Sol"]);
        assert_eq!(report.matched_count(), 1);
        assert_eq!(report.aggregate_total(), 1);
        assert!(report.is_complete());
    }

    #[test]
    fn empty_sides_yield_empty_report() {
        let report = join_names(Vec::<&str>::new(), Vec::<&str>::new());
        assert_eq!(report.matched_count(), 0);
        assert_eq!(report.aggregate_total(), 0);
        assert!(report.is_complete());
        assert_eq!(report.coverage(), "0 of 0 neighbourhoods matched");
    }

    #[test]
    fn names_that_normalize_away_are_excluded() {
        let report = join_names(["???"], ["!!!"]);
        assert_eq!(report.matched_count(), 0);
        assert_eq!(report.aggregate_total(), 0);
    }
}
