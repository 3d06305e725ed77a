//! Intake of annotation-service responses.
//!
//! The fetch layer is an external collaborator; what this module owns is
//! the *shape* of what it delivers: the JSON envelope wrapping every
//! response, the raw entity records inside it, and the article metadata
//! record carrying the abstract text. Parsing is tolerant at the element
//! level: one malformed detection is skipped with a warning instead of
//! discarding the whole batch.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One raw entity detection, as delivered by the annotation service.
///
/// `start_pos` is a 0-based character offset into the abstract. The wire
/// record also carries an end offset, but annotators disagree on its
/// convention, so it is deliberately not deserialized: the normalizer
/// recomputes it from the surface text (see [`crate::Entity::from_hit`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntityHit {
    /// Surface text of the detection
    #[serde(rename = "entityText")]
    pub text: String,
    /// Character offset of the first character
    #[serde(rename = "startPos")]
    pub start_pos: usize,
    /// Knowledge-base identifier URI
    #[serde(rename = "entityUri")]
    pub uri: String,
    /// Human-readable label for the identifier, when the KB provides one
    #[serde(rename = "entityLabel", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Article metadata record; only the abstract text matters here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleMetadata {
    /// Abstract text, absent for articles without one
    #[serde(rename = "abs", default)]
    pub abstract_text: Option<String>,
}

/// Envelope wrapping every service response: `{ "result": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope<T> {
    /// Result rows; an empty list means "no data for this article"
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
}

impl<T> ResponseEnvelope<T> {
    /// True when the service returned no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Extract the abstract text from a metadata response.
///
/// Takes the first result row's `abs` field; an empty envelope or an
/// absent field degrades to the empty string. The leading `"Abstract "`
/// prefix some upstream records carry is stripped (see
/// [`strip_abstract_prefix`]).
pub fn parse_article_metadata(json: &str) -> Result<String> {
    let envelope: ResponseEnvelope<ArticleMetadata> = serde_json::from_str(json)?;
    let text = envelope
        .result
        .into_iter()
        .next()
        .and_then(|m| m.abstract_text)
        .unwrap_or_default();
    Ok(strip_abstract_prefix(&text).to_string())
}

/// Parse a named-entities response, skipping malformed elements.
///
/// Each array element is deserialized individually; elements missing a
/// required field or carrying a mistyped offset are logged and dropped so
/// a single bad detection cannot abort the whole batch.
pub fn parse_named_entities(json: &str) -> Result<Vec<RawEntityHit>> {
    let envelope: ResponseEnvelope<serde_json::Value> = serde_json::from_str(json)?;
    let total = envelope.result.len();
    let hits: Vec<RawEntityHit> = envelope
        .result
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(hit) => Some(hit),
            Err(err) => {
                log::warn!("skipping malformed entity record: {err}");
                None
            }
        })
        .collect();
    if hits.len() < total {
        log::debug!("kept {} of {} entity records", hits.len(), total);
    }
    Ok(hits)
}

/// Strip a leading `"Abstract "` prefix, case-insensitively.
///
/// Some upstream abstracts start with the literal word "Abstract" while
/// the entity offsets are computed against the text without it; stripping
/// realigns the offsets.
#[must_use]
pub fn strip_abstract_prefix(text: &str) -> &str {
    match text.get(..9) {
        Some(prefix) if prefix.eq_ignore_ascii_case("abstract ") => &text[9..],
        _ => text,
    }
}
