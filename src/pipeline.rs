//! The annotation pipeline: raw detections in, segments out.
//!
//! Stages run in a fixed order, each consuming the previous stage's
//! output: domain filter → normalize → merge duplicates → stable sort by
//! start offset → resolve overlaps to a fixed point → segment against the
//! text. The whole computation is pure and synchronous over one immutable
//! snapshot; re-running it on the same input yields identical output.

use crate::config::AnnotationConfig;
use crate::entity::Entity;
use crate::ingest::RawEntityHit;
use crate::merge::merge_duplicates;
use crate::overlap::resolve_overlaps;
use crate::segment::{annotate, Segment};

/// Annotation pipeline bound to one configuration.
///
/// # Example
/// ```
/// use spanlight::{AnnotationConfig, Pipeline, RawEntityHit};
///
/// let pipeline = Pipeline::new(AnnotationConfig::from_allow_list("wikidata.org"));
/// let segments = pipeline.run(
///     "Hello world",
///     vec![RawEntityHit {
///         text: "world".into(),
///         start_pos: 6,
///         uri: "http://www.wikidata.org/entity/Q16502".into(),
///         label: Some("world".into()),
///     }],
/// );
/// assert_eq!(segments.iter().map(|s| s.text()).collect::<String>(), "Hello world");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: AnnotationConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration.
    #[must_use]
    pub fn new(config: AnnotationConfig) -> Self {
        Self { config }
    }

    /// The pipeline's configuration.
    #[must_use]
    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    /// Run the full pipeline over one abstract snapshot.
    ///
    /// Empty or fully filtered input degrades to a single plain segment
    /// holding the whole text.
    #[must_use]
    pub fn run(&self, text: &str, hits: Vec<RawEntityHit>) -> Vec<Segment> {
        let entities = self.resolve(hits);
        annotate(text, &entities)
    }

    /// Run the entity stages only, without segmenting against a text.
    ///
    /// Returns the converged list: normalized, merged, sorted ascending by
    /// start offset, pairwise non-overlapping.
    #[must_use]
    pub fn resolve(&self, hits: Vec<RawEntityHit>) -> Vec<Entity> {
        let retrieved = hits.len();
        let entities: Vec<Entity> = hits
            .into_iter()
            .filter(|hit| {
                if hit.text.is_empty() {
                    log::warn!("skipping entity with empty text at offset {}", hit.start_pos);
                    return false;
                }
                self.config.accepts(&hit.uri)
            })
            .map(Entity::from_hit)
            .collect();
        log::debug!("retrieved {retrieved} hits, {} in accepted domains", entities.len());

        let mut merged = merge_duplicates(entities);
        merged.sort_by_key(|e| e.start_pos);
        log::debug!("grouped same entities, keeping {}", merged.len());

        let resolved = resolve_overlaps(merged);
        log::debug!("removed overlapping entities, keeping {}", resolved.len());

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(text: &str, start: usize, uri: &str, label: Option<&str>) -> RawEntityHit {
        RawEntityHit {
            text: text.to_string(),
            start_pos: start,
            uri: uri.to_string(),
            label: label.map(str::to_string),
        }
    }

    fn permissive() -> Pipeline {
        Pipeline::new(AnnotationConfig::permissive())
    }

    #[test]
    fn empty_input_degrades_to_whole_text() {
        let segments = permissive().run("No annotations available.", Vec::new());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text(), "No annotations available.");
    }

    #[test]
    fn domain_filter_applies_before_normalization() {
        let pipeline = Pipeline::new(AnnotationConfig::from_allow_list("wikidata.org"));
        let segments = pipeline.run(
            "Hello world",
            vec![
                hit("Hello", 0, "http://www.wikidata.org/entity/Q1", None),
                hit("world", 6, "http://rejected.example/Q2", None),
            ],
        );
        assert_eq!(segments.iter().filter(|s| s.is_entity()).count(), 1);
        assert_eq!(segments[1].text(), "Hello");
    }

    #[test]
    fn empty_text_hits_are_skipped() {
        let entities = permissive().resolve(vec![
            hit("", 3, "http://w/1", None),
            hit("ok", 0, "http://w/2", None),
        ]);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "ok");
    }

    #[test]
    fn resolve_output_is_sorted_and_non_overlapping() {
        let entities = permissive().resolve(vec![
            hit("genome", 22, "http://w/3", None),
            hit("RNA genome", 18, "http://w/2", None),
            hit("virus", 4, "http://w/1", None),
        ]);
        assert!(entities
            .windows(2)
            .all(|p| p[1].start_pos > p[0].end_pos));
        assert_eq!(entities[0].text, "virus");
        assert_eq!(entities[1].text, "RNA genome");
    }

    #[test]
    fn run_is_idempotent() {
        let pipeline = permissive();
        let hits = vec![
            hit("Hello", 0, "http://w/1", None),
            hit("lo wor", 3, "http://w/2", None),
        ];
        let first = pipeline.run("Hello world", hits.clone());
        let second = pipeline.run("Hello world", hits);
        assert_eq!(first, second);
    }

    #[test]
    fn merge_happens_before_overlap_resolution() {
        // Two duplicates plus one overlapping longer span: duplicates must
        // merge to one record before the resolver compares lengths.
        let entities = permissive().resolve(vec![
            hit("SARS", 4, "http://w/1", Some("a")),
            hit("sars", 4, "http://w/2", None),
            hit("SARS-CoV", 4, "http://w/3", None),
        ]);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "SARS-CoV");
    }
}
