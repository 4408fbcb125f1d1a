//! Shared test doubles for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use coach_rag::{EmbeddingProvider, ParaphraseGenerator, Result, RetrievalError};

/// Deterministic hash-based embedding provider.
///
/// Produces an L2-normalized vector whose direction depends only on the
/// input text, so tests get stable distances with no model involved.
pub struct HashEmbeddingProvider {
    dimensions: usize,
}

impl HashEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut embedding = vec![0.0f32; self.dimensions];
        for (i, value) in embedding.iter_mut().enumerate() {
            *value = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// An embedding provider that always fails.
pub struct FailingEmbeddingProvider;

#[async_trait]
impl EmbeddingProvider for FailingEmbeddingProvider {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RetrievalError::Embedding {
            provider: "failing-test".into(),
            message: "model unavailable".into(),
        })
    }

    fn dimensions(&self) -> usize {
        8
    }
}

/// A paraphrase generator returning fixed variants.
pub struct StaticParaphraseGenerator {
    pub variants: Vec<String>,
}

#[async_trait]
impl ParaphraseGenerator for StaticParaphraseGenerator {
    async fn paraphrase(&self, _query: &str) -> Result<Vec<String>> {
        Ok(self.variants.clone())
    }
}

/// A paraphrase generator that always fails.
pub struct FailingParaphraseGenerator;

#[async_trait]
impl ParaphraseGenerator for FailingParaphraseGenerator {
    async fn paraphrase(&self, _query: &str) -> Result<Vec<String>> {
        Err(RetrievalError::Expansion {
            generator: "failing-test".into(),
            message: "generator unavailable".into(),
        })
    }
}
