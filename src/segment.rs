//! Segment output: the renderer-facing result of annotation.
//!
//! The engine hands the rendering layer an ordered list of segments that
//! concatenate back to the abstract exactly. What a highlight *looks* like
//! (pop-over, link, badge) is the renderer's business; a segment only
//! carries the text and the identifier/label data the renderer needs.

use crate::entity::Entity;
use crate::offset::CharMap;
use serde::{Deserialize, Serialize};

/// One contiguous run of output text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    /// Unannotated text between highlights. May be empty when two
    /// highlights are adjacent or one starts the text.
    Plain {
        /// Literal text of the run
        text: String,
    },
    /// A highlighted entity span.
    Entity {
        /// Display text, sliced from the source at the entity's span (the
        /// detection's own text may differ in case)
        text: String,
        /// Primary identifier (`uris[0]`), the pop-over link target
        uri: String,
        /// Primary label (`labels[0]`); empty when the KB had none
        label: String,
        /// All identifiers, most recently merged first
        uris: Vec<String>,
        /// Labels paired with `uris`
        labels: Vec<String>,
    },
}

impl Segment {
    /// The textual content of the segment, highlighting ignored.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Entity { text, .. } => text,
        }
    }

    /// True for highlighted entity segments.
    #[must_use]
    pub fn is_entity(&self) -> bool {
        matches!(self, Segment::Entity { .. })
    }
}

/// Walk a resolved, start-sorted, non-overlapping entity list against the
/// source text, producing the ordered segment sequence.
///
/// For each entity: the plain run since the previous highlight is emitted
/// (even when empty), then the highlight itself, with display text sliced
/// from the source at `[start_pos, end_pos]`. A final plain run covers the
/// remainder of the text. All offsets are character offsets, clamped to
/// the text bounds, so a span reaching past the end renders as whatever
/// text is actually there.
///
/// Concatenating the segments' texts reproduces `text` exactly.
///
/// # Example
/// ```
/// use spanlight::{annotate, Entity};
///
/// let segments = annotate("Hello world", &[Entity::new(
///     "world", 6,
///     vec!["http://www.wikidata.org/entity/Q16502".into()],
///     vec!["world".into()],
/// )]);
/// let texts: Vec<&str> = segments.iter().map(|s| s.text()).collect();
/// assert_eq!(texts, vec!["Hello ", "world", ""]);
/// ```
#[must_use]
pub fn annotate(text: &str, entities: &[Entity]) -> Vec<Segment> {
    let map = CharMap::new(text);
    let mut segments = Vec::with_capacity(entities.len() * 2 + 1);

    let mut cursor = 0usize;
    for entity in entities {
        segments.push(Segment::Plain {
            text: map.slice_to(cursor, entity.start_pos).to_string(),
        });
        segments.push(Segment::Entity {
            text: map.slice(entity.start_pos, entity.end_pos).to_string(),
            uri: entity.primary_uri().unwrap_or_default().to_string(),
            label: entity.primary_label().unwrap_or_default().to_string(),
            uris: entity.uris.clone(),
            labels: entity.labels.clone(),
        });
        cursor = entity.end_pos.saturating_add(1);
    }
    segments.push(Segment::Plain {
        text: map.slice_from(cursor).to_string(),
    });

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(text: &str, start: usize) -> Entity {
        Entity::new(text, start, vec!["U1".to_string()], vec!["L1".to_string()])
    }

    fn reassemble(segments: &[Segment]) -> String {
        segments.iter().map(Segment::text).collect()
    }

    #[test]
    fn no_entities_yields_single_plain_segment() {
        let segments = annotate("Just text.", &[]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], Segment::Plain { text: "Just text.".to_string() });
    }

    #[test]
    fn before_run_covers_text_up_to_the_entity() {
        let segments = annotate("Hello world", &[entity("lo wor", 3)]);
        let texts: Vec<&str> = segments.iter().map(Segment::text).collect();
        assert_eq!(texts, vec!["Hel", "lo wor", "ld"]);
    }

    #[test]
    fn entity_at_text_start_emits_empty_before_run() {
        let segments = annotate("Hello world", &[entity("Hello", 0)]);
        let texts: Vec<&str> = segments.iter().map(Segment::text).collect();
        assert_eq!(texts, vec!["", "Hello", " world"]);
    }

    #[test]
    fn display_text_comes_from_the_source() {
        // detection reported lowercased text; the highlight shows the
        // source's casing
        let segments = annotate("The SARS-CoV strain", &[entity("sars-cov", 4)]);
        assert_eq!(segments[1].text(), "SARS-CoV");
    }

    #[test]
    fn carries_primary_and_full_identifier_lists() {
        let e = Entity::new(
            "PCR",
            0,
            vec!["U2".to_string(), "U1".to_string()],
            vec![String::new(), "L1".to_string()],
        );
        let segments = annotate("PCR assay", &[e]);
        match &segments[1] {
            Segment::Entity { uri, label, uris, labels, .. } => {
                assert_eq!(uri, "U2");
                assert_eq!(label, "");
                assert_eq!(uris, &vec!["U2".to_string(), "U1".to_string()]);
                assert_eq!(labels.len(), 2);
            }
            other => panic!("expected entity segment, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_with_multiple_entities() {
        let text = "Coronaviruses use RNA genomes and PCR detects them.";
        let entities = vec![entity("Coronaviruses", 0), entity("RNA", 18), entity("PCR", 34)];
        let segments = annotate(text, &entities);
        assert_eq!(reassemble(&segments), text);
        assert_eq!(segments.iter().filter(|s| s.is_entity()).count(), 3);
    }

    #[test]
    fn round_trip_with_multibyte_text() {
        let text = "Le virus à ARN était étudié.";
        let entities = vec![entity("ARN", 11)];
        let segments = annotate(text, &entities);
        assert_eq!(segments[1].text(), "ARN");
        assert_eq!(reassemble(&segments), text);
    }

    #[test]
    fn span_past_text_end_clamps() {
        let segments = annotate("short", &[entity("shortandbeyond", 0)]);
        assert_eq!(segments[1].text(), "short");
        assert_eq!(reassemble(&segments), "short");
    }

    #[test]
    fn span_entirely_past_text_end_renders_empty_highlight() {
        let segments = annotate("tiny", &[entity("ghost", 40)]);
        assert_eq!(segments[1].text(), "");
        assert_eq!(reassemble(&segments), "tiny");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let segments = annotate("ab", &[]);
        let json = serde_json::to_string(&segments).unwrap();
        assert!(json.contains(r#""kind":"plain""#));
    }
}
