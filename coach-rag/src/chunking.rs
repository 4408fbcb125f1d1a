//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`FixedSizeChunker`],
//! which splits text into overlapping fixed-size character windows.

use crate::document::{Chunk, Document};
use crate::error::{Result, RetrievalError};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s ordered by `sequence_index`.
/// Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into fixed-size character windows with configurable overlap.
///
/// Starting at the beginning of the text, each window is `chunk_size`
/// characters long; consecutive windows share `overlap` characters. The
/// window that reaches the end of the text is the last one, so a final
/// chunk may be shorter than `chunk_size` but no chunk is ever emitted past
/// the end. Windows are measured in characters, never splitting inside a
/// multi-byte code point.
///
/// # Example
///
/// ```rust
/// use coach_rag::{Document, Chunker, FixedSizeChunker};
///
/// let chunker = FixedSizeChunker::new(1000, 200).unwrap();
/// let doc = Document { id: "guide.md".into(), text: "short".into() };
/// assert_eq!(chunker.chunk(&doc).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `overlap` — number of overlapping characters between consecutive chunks
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if `chunk_size == 0` or
    /// `overlap >= chunk_size`; those combinations would make the window
    /// fail to advance.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RetrievalError::Config("chunk_size must be greater than zero".to_string()));
        }
        if overlap >= chunk_size {
            return Err(RetrievalError::Config(format!(
                "chunk_overlap ({overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, overlap })
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        let text = &document.text;
        // Byte offset of every char boundary, plus the end of the text, so
        // windows can be addressed in characters and sliced in bytes.
        let boundaries: Vec<usize> =
            text.char_indices().map(|(i, _)| i).chain([text.len()]).collect();
        let total_chars = boundaries.len() - 1;
        // Constructor guarantees step >= 1.
        let step = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + self.chunk_size).min(total_chars);
            chunks.push(Chunk {
                document_id: document.id.clone(),
                sequence_index: chunks.len(),
                text: text[boundaries[start]..boundaries[end]].to_string(),
            });
            if end == total_chars {
                break;
            }
            start += step;
        }

        chunks
    }
}
