//! Overlap resolution over start-sorted entity lists.
//!
//! Annotators linked against several knowledge bases routinely produce
//! nested and crossing spans ("SARS" inside "SARS-CoV-2"). Rendering
//! requires a non-overlapping cover, so overlapping spans are reduced to
//! the longest representative.

use crate::entity::Entity;

/// One resolution pass over a start-sorted list.
///
/// Walks adjacent pairs: a non-overlapping first element is kept and the
/// cursor advances by one; an overlapping pair keeps only the longer span
/// (character count of the surface text; ties go to the later element) and
/// the cursor advances by two.
///
/// A pass can end with the final element never having been compared. That
/// element is not dropped: it is checked against the most recently kept
/// entity: appended when disjoint, otherwise the longer of the two wins
/// (ties again to the trailing element). A singleton list is returned
/// unchanged.
///
/// A single pass only sees pairwise-adjacent overlaps; chains of three or
/// more mutually overlapping spans need repeated passes. Use
/// [`resolve_overlaps`] for the converged result.
#[must_use]
pub fn resolve_overlaps_once(entities: &[Entity]) -> Vec<Entity> {
    let mut kept: Vec<Entity> = Vec::with_capacity(entities.len());

    let mut idx = 0;
    while idx + 1 < entities.len() {
        let first = &entities[idx];
        let second = &entities[idx + 1];
        if !first.overlaps(second) {
            // No overlap: keep the first and move on to the next one
            kept.push(first.clone());
            idx += 1;
        } else {
            // Keep only the longest of the two
            if first.char_len() > second.char_len() {
                kept.push(first.clone());
            } else {
                kept.push(second.clone());
            }
            idx += 2;
        }
    }

    // Final element left uncompared by the pairwise walk: resolve it
    // against the last kept entity instead of silently dropping it.
    if idx < entities.len() {
        let trailing = &entities[idx];
        match kept.len().checked_sub(1) {
            Some(last) if kept[last].overlaps(trailing) => {
                if trailing.char_len() >= kept[last].char_len() {
                    kept[last] = trailing.clone();
                }
            }
            _ => kept.push(trailing.clone()),
        }
    }

    kept
}

/// Resolve a start-sorted entity list to a non-overlapping cover.
///
/// Repeats [`resolve_overlaps_once`] until a pass no longer shrinks the
/// list. Every continuing pass removes at least one entity, so the
/// iteration is bounded by the input length, with no hardcoded pass count.
///
/// On the converged list, adjacent entities `a`, `b` satisfy
/// `b.start_pos > a.end_pos`.
///
/// # Example
/// ```
/// use spanlight::{resolve_overlaps, Entity};
///
/// let resolved = resolve_overlaps(vec![
///     Entity::new("Hello", 0, vec![], vec![]),
///     Entity::new("lo wor", 3, vec![], vec![]),
/// ]);
/// assert_eq!(resolved.len(), 1);
/// assert_eq!(resolved[0].text, "lo wor");
/// ```
#[must_use]
pub fn resolve_overlaps(entities: Vec<Entity>) -> Vec<Entity> {
    let mut current = entities;
    loop {
        let next = resolve_overlaps_once(&current);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_sorted_entities() -> impl Strategy<Value = Vec<Entity>> {
        proptest::collection::vec((0usize..120, 1usize..12), 0..24).prop_map(|pairs| {
            let mut entities: Vec<Entity> = pairs
                .into_iter()
                .map(|(start, len)| Entity::new("x".repeat(len), start, vec![], vec![]))
                .collect();
            entities.sort_by_key(|e| e.start_pos);
            entities
        })
    }

    proptest! {
        #[test]
        fn converged_list_is_non_overlapping(entities in arb_sorted_entities()) {
            let resolved = resolve_overlaps(entities);
            for pair in resolved.windows(2) {
                prop_assert!(pair[1].start_pos > pair[0].end_pos);
            }
        }

        #[test]
        fn converged_list_stays_sorted(entities in arb_sorted_entities()) {
            let resolved = resolve_overlaps(entities);
            for pair in resolved.windows(2) {
                prop_assert!(pair[0].start_pos <= pair[1].start_pos);
            }
        }

        #[test]
        fn resolution_never_invents_entities(entities in arb_sorted_entities()) {
            let resolved = resolve_overlaps(entities.clone());
            prop_assert!(resolved.len() <= entities.len());
            for e in &resolved {
                prop_assert!(entities.contains(e));
            }
        }

        #[test]
        fn fixed_point_is_idempotent(entities in arb_sorted_entities()) {
            let once = resolve_overlaps(entities);
            let twice = resolve_overlaps(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
