//! Retrieval pipeline orchestrator.
//!
//! The [`RetrievalPipeline`] coordinates the full index-and-query workflow
//! by composing a [`Chunker`], an [`EmbeddingProvider`], an [`IndexStore`]
//! and an optional [`ParaphraseGenerator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use coach_rag::{RetrievalConfig, RetrievalPipeline};
//!
//! let pipeline = RetrievalPipeline::builder()
//!     .config(RetrievalConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .build()?;
//!
//! pipeline.build_index_from_corpus().await?;
//! let results = pipeline.retrieve("how do I improve my resume?", 5).await?;
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::chunking::{Chunker, FixedSizeChunker};
use crate::config::RetrievalConfig;
use crate::corpus;
use crate::document::{ChunkMetadata, Document, IndexStats, RetrievalResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};
use crate::expansion::{ParaphraseGenerator, QueryExpander};
use crate::store::{IndexSnapshot, IndexStore};

/// The retrieval pipeline orchestrator.
///
/// Indexing (`build_index*`) runs chunk → embed → persist as one batch
/// operation. Retrieval (`retrieve*`) runs expand → embed → search →
/// merge → dedup → rank → truncate against an immutable index snapshot.
/// The snapshot is loaded on first use and cached; a rebuild through the
/// same pipeline invalidates the cache, and [`reload`](Self::reload)
/// forces a refresh after an external rebuild.
///
/// Construct one via [`RetrievalPipeline::builder()`].
pub struct RetrievalPipeline {
    config: RetrievalConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    chunker: Arc<dyn Chunker>,
    store: IndexStore,
    expander: QueryExpander,
    snapshot: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl RetrievalPipeline {
    /// Create a new [`RetrievalPipelineBuilder`].
    pub fn builder() -> RetrievalPipelineBuilder {
        RetrievalPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Return a reference to the index store.
    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Build the index from the given documents, fully replacing any
    /// previous index.
    ///
    /// Documents are chunked in order, all chunk texts are embedded as one
    /// batch, and the three index artifacts are swapped in atomically. The
    /// cached snapshot is invalidated so the next retrieval observes the
    /// rebuild.
    ///
    /// # Errors
    ///
    /// Propagates [`RetrievalError::Embedding`] from the provider and
    /// store errors from persistence.
    pub async fn build_index(&self, documents: &[Document]) -> Result<IndexStats> {
        let mut chunks = Vec::new();
        for document in documents {
            chunks.extend(self.chunker.chunk(document));
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let vectors = self
            .embedder
            .embed_batch(&texts)
            .await
            .inspect_err(|e| error!(error = %e, "embedding failed during index build"))?;
        if vectors.len() != texts.len() {
            return Err(RetrievalError::Embedding {
                provider: "embed_batch".to_string(),
                message: format!(
                    "provider returned {} vectors for {} texts",
                    vectors.len(),
                    texts.len()
                ),
            });
        }

        let metadata: Vec<ChunkMetadata> = chunks
            .iter()
            .map(|c| ChunkMetadata { file: c.document_id.clone(), chunk_id: c.sequence_index })
            .collect();
        let chunk_texts: Vec<String> = chunks.into_iter().map(|c| c.text).collect();

        let stats = IndexStats { documents: documents.len(), chunks: chunk_texts.len() };
        self.store
            .build(vectors, metadata, chunk_texts)
            .inspect_err(|e| error!(error = %e, "index persistence failed"))?;

        *self.snapshot.write().await = None;

        info!(documents = stats.documents, chunks = stats.chunks, "index built");
        Ok(stats)
    }

    /// Build the index from the configured corpus directory.
    ///
    /// Loads every document under `data_dir` (see [`corpus::load_documents`])
    /// and delegates to [`build_index`](Self::build_index).
    pub async fn build_index_from_corpus(&self) -> Result<IndexStats> {
        let documents = corpus::load_documents(&self.config.data_dir)?;
        self.build_index(&documents).await
    }

    /// Retrieve up to `top_k` chunks relevant to `query`.
    ///
    /// The query is expanded best-effort into paraphrases, each variant is
    /// embedded and searched independently, and the merged candidates are
    /// deduplicated by `(file, chunk_id)` keeping the lowest-distance
    /// occurrence. Output is ascending by distance and never longer than
    /// `top_k`; an empty index yields an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Propagates index load failures and [`RetrievalError::Embedding`].
    /// Expansion failures are always recovered internally.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievalResult>> {
        let snapshot = self.snapshot().await?;
        if top_k == 0 {
            return Ok(Vec::new());
        }
        if snapshot.is_empty() {
            info!(query, "retrieval against empty index");
            return Ok(Vec::new());
        }

        let queries = self.expander.expand(query).await;

        let mut merged = Vec::new();
        for variant in &queries {
            let vector = self
                .embedder
                .embed(variant)
                .await
                .inspect_err(|e| error!(query = %variant, error = %e, "query embedding failed"))?;
            for (score, position) in snapshot.search(&vector, top_k)? {
                // Positions come from the snapshot's own search, so the
                // entry lookup cannot miss.
                if let Some((metadata, chunk_text)) = snapshot.entry(position) {
                    merged.push(RetrievalResult {
                        score,
                        chunk_text: chunk_text.to_string(),
                        metadata: metadata.clone(),
                        source_query: variant.clone(),
                    });
                }
            }
        }

        // Stable sort: the lowest-distance occurrence of a chunk wins the
        // dedup below, and equal distances keep per-query insertion order.
        merged.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));

        let mut seen: HashSet<ChunkMetadata> = HashSet::new();
        let results: Vec<RetrievalResult> =
            merged.into_iter().filter(|r| seen.insert(r.metadata.clone())).take(top_k).collect();

        info!(query, variants = queries.len(), results = results.len(), "retrieval completed");
        Ok(results)
    }

    /// Retrieve using the configured default result count.
    pub async fn retrieve_default(&self, query: &str) -> Result<Vec<RetrievalResult>> {
        self.retrieve(query, self.config.top_k_results).await
    }

    /// Drop the cached snapshot and load the current on-disk index.
    ///
    /// Call after an index rebuild performed outside this pipeline.
    pub async fn reload(&self) -> Result<()> {
        let mut guard = self.snapshot.write().await;
        *guard = Some(Arc::new(self.store.load()?));
        Ok(())
    }

    /// The cached snapshot, loading it on first use.
    async fn snapshot(&self) -> Result<Arc<IndexSnapshot>> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let mut guard = self.snapshot.write().await;
        // Another task may have loaded while we waited for the write lock.
        if let Some(snapshot) = guard.as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        let snapshot = Arc::new(
            self.store.load().inspect_err(|e| error!(error = %e, "index load failed"))?,
        );
        *guard = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

/// Builder for constructing a [`RetrievalPipeline`].
///
/// `config` and `embedding_provider` are required. The chunker defaults to
/// a [`FixedSizeChunker`] derived from the config; the paraphrase
/// generator is optional and expansion is disabled without one.
#[derive(Default)]
pub struct RetrievalPipelineBuilder {
    config: Option<RetrievalConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    chunker: Option<Arc<dyn Chunker>>,
    paraphraser: Option<Arc<dyn ParaphraseGenerator>>,
}

impl RetrievalPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(provider);
        self
    }

    /// Override the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set an optional paraphrase generator to enable query expansion.
    pub fn paraphrase_generator(mut self, generator: Arc<dyn ParaphraseGenerator>) -> Self {
        self.paraphraser = Some(generator);
        self
    }

    /// Build the [`RetrievalPipeline`], validating that required fields
    /// are set.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if `config` or
    /// `embedding_provider` is missing.
    pub fn build(self) -> Result<RetrievalPipeline> {
        let config = self
            .config
            .ok_or_else(|| RetrievalError::Config("config is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| RetrievalError::Config("embedding_provider is required".to_string()))?;
        let chunker: Arc<dyn Chunker> = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(FixedSizeChunker::new(config.chunk_size, config.chunk_overlap)?),
        };
        let store = IndexStore::new(&config.vector_db_path);
        let expander = match self.paraphraser {
            Some(generator) => QueryExpander::new(generator),
            None => QueryExpander::disabled(),
        };

        Ok(RetrievalPipeline {
            config,
            embedder,
            chunker,
            store,
            expander,
            snapshot: RwLock::new(None),
        })
    }
}
