//! Normalized entity records.
//!
//! Raw detections arrive from the annotation service in a heterogeneous
//! shape: one identifier and an optional label per detection, with an end
//! offset that cannot be trusted (different annotators disagree on whether
//! it is inclusive, exclusive, or accounts for a stripped prefix). The
//! [`Entity`] record is the canonical form every later stage works with:
//! identifier/label *lists* (so duplicate detections can be merged into a
//! single record) and an inclusive end offset recomputed from the surface
//! text.

use crate::ingest::RawEntityHit;
use serde::{Deserialize, Serialize};

/// A normalized named-entity span.
///
/// Offsets are 0-based **character** offsets into the source text;
/// `end_pos` is the index of the last character of the span (inclusive).
///
/// `uris` and `labels` are positionally paired: `labels[i]` is the label
/// for `uris[i]`. A detection without a label carries the empty string, so
/// the two lists always have equal length. `uris[0]`/`labels[0]` are the
/// primary pair surfaced to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text as reported by the annotator
    pub text: String,
    /// Character offset of the first character
    pub start_pos: usize,
    /// Character offset of the last character (inclusive)
    pub end_pos: usize,
    /// Knowledge-base identifiers, most recently merged first
    pub uris: Vec<String>,
    /// Labels paired with `uris`; absent labels are empty strings
    pub labels: Vec<String>,
}

impl Entity {
    /// Create an entity, recomputing `end_pos` from the text length.
    ///
    /// `text` is expected to be non-empty; the pipeline skips empty
    /// detections before they reach this point.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        start_pos: usize,
        uris: Vec<String>,
        labels: Vec<String>,
    ) -> Self {
        let text = text.into();
        let end_pos = start_pos.saturating_add(text.chars().count().saturating_sub(1));
        Self {
            text,
            start_pos,
            end_pos,
            uris,
            labels,
        }
    }

    /// Normalize one raw detection into canonical shape.
    ///
    /// The single identifier becomes a one-element `uris` list; a missing
    /// label degrades to the empty string rather than being omitted, so
    /// `uris` and `labels` stay positionally paired.
    #[must_use]
    pub fn from_hit(hit: RawEntityHit) -> Self {
        let label = hit.label.unwrap_or_default();
        Self::new(hit.text, hit.start_pos, vec![hit.uri], vec![label])
    }

    /// Length of the surface text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check whether another span starts within or before this span's
    /// inclusive end.
    ///
    /// Callers pass spans in ascending start order, so this is the only
    /// direction the resolver needs.
    #[must_use]
    pub fn overlaps(&self, later: &Entity) -> bool {
        later.start_pos <= self.end_pos
    }

    /// Primary identifier (`uris[0]`), if any.
    #[must_use]
    pub fn primary_uri(&self) -> Option<&str> {
        self.uris.first().map(String::as_str)
    }

    /// Primary label (`labels[0]`), if any.
    #[must_use]
    pub fn primary_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}
