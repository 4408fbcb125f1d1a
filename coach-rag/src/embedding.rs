//! Embedding provider trait for mapping text to fixed-dimension vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that maps text (chunk or query) to a fixed-dimension vector.
///
/// This is an injected capability, not reimplemented here: implementations
/// wrap an external embedding model behind this interface and are
/// substitutable as long as dimensionality stays constant across an index
/// build and the queries against it. Output must be deterministic for a
/// fixed model version.
///
/// The default [`embed_batch`](EmbeddingProvider::embed_batch) calls
/// [`embed`](EmbeddingProvider::embed) sequentially; backends with native
/// batching should override it.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of texts, preserving order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
