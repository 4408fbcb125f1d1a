//! # coach-rag
//!
//! Retrieval core for the career-guidance assistant: splits corpus
//! documents into overlapping chunks, embeds them into a vector space,
//! persists a flat exact nearest-neighbor index, and answers free-text
//! queries with a ranked, deduplicated result set — optionally broadened
//! by best-effort query paraphrasing.
//!
//! The enclosing chat application is a caller of this crate, not part of
//! it: it supplies a query and a result count, and consumes chunk text
//! plus `(file, chunk_id)` metadata for citation.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use coach_rag::{RetrievalConfig, RetrievalPipeline};
//!
//! let pipeline = RetrievalPipeline::builder()
//!     .config(RetrievalConfig::default())
//!     .embedding_provider(Arc::new(embedder))
//!     .build()?;
//!
//! pipeline.build_index_from_corpus().await?;
//! for result in pipeline.retrieve("how do I negotiate salary?", 5).await? {
//!     println!("[{}#{}] {:.3}", result.metadata.file, result.metadata.chunk_id, result.score);
//! }
//! ```

pub mod chunking;
pub mod config;
pub mod corpus;
pub mod document;
pub mod embedding;
pub mod error;
pub mod expansion;
pub mod retriever;
pub mod store;

#[cfg(feature = "openai")]
pub mod openai;

pub use chunking::{Chunker, FixedSizeChunker};
pub use config::{RetrievalConfig, RetrievalConfigBuilder};
pub use corpus::load_documents;
pub use document::{Chunk, ChunkMetadata, Document, IndexStats, RetrievalResult};
pub use embedding::EmbeddingProvider;
pub use error::{Result, RetrievalError};
pub use expansion::{ParaphraseGenerator, QueryExpander};
pub use retriever::{RetrievalPipeline, RetrievalPipelineBuilder};
pub use store::{FlatIndex, IndexSnapshot, IndexStore};

#[cfg(feature = "openai")]
pub use openai::{OpenAiEmbeddingProvider, OpenAiParaphraseGenerator};
