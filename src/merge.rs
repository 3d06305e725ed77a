//! Duplicate-detection merging.
//!
//! The upstream annotator links the same surface span against several
//! knowledge bases, producing one detection per KB. Those duplicates are
//! collapsed into a single record whose `uris`/`labels` lists aggregate
//! every source.

use crate::entity::Entity;

/// Collapse duplicate detections (same text case-insensitively, same start
/// offset) into one entity per distinct span.
///
/// Entities are scanned in input order. When a duplicate of an already
/// accumulated entity is found, the duplicate's identifiers are
/// **prepended** ahead of the accumulated ones, so identifiers end up in
/// reverse discovery order. This is a contract, not an accident: callers
/// surfacing the primary pair (`uris[0]`/`labels[0]`) rely on the
/// most-recently-merged source coming first. The accumulated record keeps
/// its first-seen surface text.
///
/// Output preserves first-seen order of distinct (text, start) pairs; the
/// caller applies the stable sort by `start_pos` afterwards. The linear
/// scan per insertion is O(n²) in the number of distinct entities, fine at
/// whole-abstract scale; inputs orders of magnitude larger would want a
/// hash keyed on (lowercased text, start) instead, with identical
/// observable behavior.
///
/// # Example
/// ```
/// use spanlight::{merge_duplicates, Entity};
///
/// let merged = merge_duplicates(vec![
///     Entity::new("SARS-CoV", 10, vec!["U1".into()], vec!["L1".into()]),
///     Entity::new("sars-cov", 10, vec!["U2".into()], vec![String::new()]),
/// ]);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].text, "SARS-CoV");
/// assert_eq!(merged[0].uris, vec!["U2", "U1"]);
/// assert_eq!(merged[0].labels, vec!["", "L1"]);
/// ```
#[must_use]
pub fn merge_duplicates(entities: Vec<Entity>) -> Vec<Entity> {
    let mut merged: Vec<Entity> = Vec::with_capacity(entities.len());

    for entity in entities {
        let existing = merged.iter().position(|m| {
            m.start_pos == entity.start_pos
                && m.text.to_lowercase() == entity.text.to_lowercase()
        });
        match existing {
            Some(idx) => {
                let accumulated = &mut merged[idx];
                let previous_uris = std::mem::take(&mut accumulated.uris);
                let previous_labels = std::mem::take(&mut accumulated.labels);
                accumulated.uris = entity.uris.into_iter().chain(previous_uris).collect();
                accumulated.labels = entity.labels.into_iter().chain(previous_labels).collect();
            }
            None => merged.push(entity),
        }
    }

    merged
}
