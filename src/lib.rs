//! # spanlight
//!
//! Entity annotation engine for scientific-article abstracts.
//!
//! An upstream NER/linking service detects named entities in an abstract
//! and links them against several knowledge bases. Its output is noisy:
//! one record per KB per detection, untrustworthy end offsets, nested and
//! crossing spans. This crate turns that into something a renderer can
//! display: an ordered sequence of plain and highlighted segments that
//! reconstruct the abstract exactly.
//!
//! ## Pipeline
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | filter | raw hits | hits in accepted KB domains |
//! | normalize | one hit | [`Entity`] with recomputed inclusive end offset |
//! | merge | entities | one record per distinct (text, start) pair |
//! | resolve | start-sorted entities | non-overlapping cover, longest span wins |
//! | segment | text + resolved entities | ordered [`Segment`] sequence |
//!
//! ## Quick Start
//!
//! ```rust
//! use spanlight::{ingest, AnnotationConfig, Pipeline};
//!
//! let text = ingest::parse_article_metadata(
//!     r#"{"result": [{"abs": "SARS-CoV uses an RNA genome."}]}"#,
//! )?;
//! let hits = ingest::parse_named_entities(
//!     r#"{"result": [
//!         {"entityText": "SARS-CoV", "startPos": 0,
//!          "entityUri": "http://www.wikidata.org/entity/Q278567"},
//!         {"entityText": "RNA", "startPos": 17,
//!          "entityUri": "http://www.wikidata.org/entity/Q11053"}
//!     ]}"#,
//! )?;
//!
//! let pipeline = Pipeline::new(AnnotationConfig::from_allow_list("wikidata.org"));
//! let segments = pipeline.run(&text, hits);
//!
//! // Segments concatenate back to the abstract exactly.
//! let rebuilt: String = segments.iter().map(|s| s.text()).collect();
//! assert_eq!(rebuilt, text);
//! # Ok::<(), spanlight::Error>(())
//! ```
//!
//! ## Design Notes
//!
//! - **Pure and idempotent**: every stage produces a new list from an
//!   immutable snapshot; running the pipeline twice on the same input
//!   yields identical output.
//! - **Character offsets**: the service reports character offsets, so all
//!   slicing goes through a per-text [`offset::CharMap`] rather than byte
//!   indexing.
//! - **Tolerant intake**: one malformed detection is skipped with a
//!   warning, never aborting the batch.
//! - **Longest span wins**: overlapping detections resolve to the longest
//!   surface text, ties to the later detection, iterated to a fixed point.

#![warn(missing_docs)]

mod config;
mod entity;
mod error;
pub mod ingest;
mod merge;
pub mod offset;
mod overlap;
mod pipeline;
mod segment;

pub use config::AnnotationConfig;
pub use entity::Entity;
pub use error::{Error, Result};
pub use ingest::{parse_article_metadata, parse_named_entities, RawEntityHit, ResponseEnvelope};
pub use merge::merge_duplicates;
pub use overlap::{resolve_overlaps, resolve_overlaps_once};
pub use pipeline::Pipeline;
pub use segment::{annotate, Segment};

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use spanlight::prelude::*;
    //!
    //! let pipeline = Pipeline::new(AnnotationConfig::permissive());
    //! let segments = pipeline.run("plain text", vec![]);
    //! assert_eq!(segments.len(), 1);
    //! ```
    pub use crate::config::AnnotationConfig;
    pub use crate::entity::Entity;
    pub use crate::error::{Error, Result};
    pub use crate::ingest::RawEntityHit;
    pub use crate::pipeline::Pipeline;
    pub use crate::segment::Segment;
}
