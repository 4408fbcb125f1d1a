//! Data types for documents, chunks, and retrieval results.

use serde::{Deserialize, Serialize};

/// A source document loaded from the corpus.
///
/// The `id` is the source file name. Documents exist only between corpus
/// loading and chunking; they are not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document (source file name).
    pub id: String,
    /// The text content of the document.
    pub text: String,
}

/// An overlapping window of a [`Document`], the atomic unit of retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// Position of this chunk within the parent document, starting at 0.
    pub sequence_index: usize,
    /// The text content of the chunk.
    pub text: String,
}

/// Per-position metadata persisted alongside the vector index.
///
/// The pair `(file, chunk_id)` identifies a chunk across the whole index
/// and is the deduplication key for multi-query retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChunkMetadata {
    /// Source file name of the chunk's parent document.
    pub file: String,
    /// The chunk's sequence index within that file.
    pub chunk_id: usize,
}

/// A retrieved chunk paired with its distance to the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Squared Euclidean distance to the query vector (lower = more similar).
    pub score: f32,
    /// The retrieved chunk text.
    pub chunk_text: String,
    /// Identity and citation metadata for the chunk.
    pub metadata: ChunkMetadata,
    /// The query string (original or paraphrase) that produced this hit.
    pub source_query: String,
}

/// Summary of a completed index build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of documents chunked into the index.
    pub documents: usize,
    /// Total number of chunks embedded and stored.
    pub chunks: usize,
}
