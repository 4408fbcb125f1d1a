//! Configuration for indexing and retrieval.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};

/// Configuration parameters for the retrieval pipeline.
///
/// Built once via [`RetrievalConfig::builder()`] and validated at
/// construction; invalid combinations never reach the chunker or store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    /// Directory containing the corpus of source documents.
    pub data_dir: PathBuf,
    /// Directory holding the persisted index artifacts.
    pub vector_db_path: PathBuf,
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Identifier of the embedding model, fixed across a build+query pair.
    pub embedding_model: String,
    /// Default number of results returned by retrieval.
    pub top_k_results: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            vector_db_path: PathBuf::from("./data/vector_db"),
            chunk_size: 1000,
            chunk_overlap: 200,
            embedding_model: "all-MiniLM-L6-v2".to_string(),
            top_k_results: 5,
        }
    }
}

impl RetrievalConfig {
    /// Create a new builder for constructing a [`RetrievalConfig`].
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    config: RetrievalConfig,
}

impl RetrievalConfigBuilder {
    /// Set the corpus directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Set the directory for persisted index artifacts.
    pub fn vector_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.vector_db_path = path.into();
        self
    }

    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the embedding model identifier.
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.config.embedding_model = model.into();
        self
    }

    /// Set the default number of retrieval results.
    pub fn top_k_results(mut self, k: usize) -> Self {
        self.config.top_k_results = k;
        self
    }

    /// Build the [`RetrievalConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if:
    /// - `chunk_size == 0`
    /// - `chunk_overlap >= chunk_size` (a non-terminating chunker otherwise)
    /// - `top_k_results == 0`
    pub fn build(self) -> Result<RetrievalConfig> {
        if self.config.chunk_size == 0 {
            return Err(RetrievalError::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RetrievalError::Config(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k_results == 0 {
            return Err(RetrievalError::Config(
                "top_k_results must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
