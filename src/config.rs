//! Pipeline configuration.
//!
//! The deployment configures which knowledge bases count as trustworthy
//! through a pipe-delimited allow-list of domain substrings, e.g.
//! `"wikidata.org|dbpedia.org"`. Only detections whose identifier URI
//! contains at least one listed substring enter the pipeline.

use serde::{Deserialize, Serialize};

/// Configuration for the annotation pipeline.
///
/// # Example
/// ```
/// use spanlight::AnnotationConfig;
///
/// let config = AnnotationConfig::from_allow_list("wikidata.org|dbpedia.org");
/// assert!(config.accepts("http://www.wikidata.org/entity/Q85438966"));
/// assert!(!config.accepts("http://example.org/entity/42"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// Domain substrings accepted in entity identifier URIs.
    ///
    /// An empty list accepts no identifier at all; use
    /// [`AnnotationConfig::permissive`] to disable filtering.
    pub domains: Vec<String>,
}

impl AnnotationConfig {
    /// Configuration with an empty allow-list (accepts nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a pipe-delimited allow-list, the form used in deployment
    /// configuration. Empty fragments (`"a||b"`) are ignored.
    #[must_use]
    pub fn from_allow_list(list: &str) -> Self {
        let domains = list
            .split('|')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
        Self { domains }
    }

    /// Accept every identifier, bypassing domain filtering.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            domains: vec![String::new()],
        }
    }

    /// Add one accepted domain substring.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains.push(domain.into());
        self
    }

    /// Check whether an identifier URI belongs to an accepted domain.
    #[must_use]
    pub fn accepts(&self, uri: &str) -> bool {
        self.domains.iter().any(|d| uri.contains(d.as_str()))
    }
}
