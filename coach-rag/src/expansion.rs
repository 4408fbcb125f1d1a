//! Query expansion: best-effort paraphrasing to broaden recall.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;

/// A generator of alternative phrasings for a query.
///
/// Implementations wrap an external model or service and may fail; the
/// [`QueryExpander`] recovers from every failure, so generators should
/// report errors honestly rather than returning empty output on failure.
#[async_trait]
pub trait ParaphraseGenerator: Send + Sync {
    /// Produce paraphrases of `query`, excluding the original.
    async fn paraphrase(&self, query: &str) -> Result<Vec<String>>;
}

/// Expands a query into itself plus best-effort paraphrases.
///
/// The first element of [`expand`](QueryExpander::expand) output is always
/// the original query unmodified. Paraphrase failures never propagate: the
/// expander logs them and degrades to the single original query.
pub struct QueryExpander {
    generator: Option<Arc<dyn ParaphraseGenerator>>,
}

impl QueryExpander {
    /// Create an expander backed by a paraphrase generator.
    pub fn new(generator: Arc<dyn ParaphraseGenerator>) -> Self {
        Self { generator: Some(generator) }
    }

    /// Create an expander with expansion disabled.
    ///
    /// [`expand`](QueryExpander::expand) returns only the original query.
    pub fn disabled() -> Self {
        Self { generator: None }
    }

    /// Whether a paraphrase generator is configured.
    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Expand `query` into a list of query strings.
    ///
    /// The original query is always first. Blank paraphrases and exact
    /// duplicates are dropped. This method cannot fail.
    pub async fn expand(&self, query: &str) -> Vec<String> {
        let mut queries = vec![query.to_string()];

        let Some(generator) = &self.generator else {
            return queries;
        };

        match generator.paraphrase(query).await {
            Ok(variants) => {
                for variant in variants {
                    let variant = variant.trim();
                    if !variant.is_empty() && !queries.iter().any(|q| q == variant) {
                        queries.push(variant.to_string());
                    }
                }
                debug!(query, variants = queries.len() - 1, "query expanded");
            }
            Err(e) => {
                warn!(query, error = %e, "query expansion failed, falling back to original query");
            }
        }

        queries
    }
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::disabled()
    }
}
