//! OpenAI-compatible embedding and paraphrase adapters.
//!
//! This module is only available when the `openai` feature is enabled.
//! Both adapters accept a custom base URL, so any server exposing the
//! OpenAI `/v1` surface (including local inference servers hosting
//! sentence-transformer models) can back them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{Result, RetrievalError};
use crate::expansion::ParaphraseGenerator;

/// The default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// The default embedding model.
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// The default dimensionality for `text-embedding-3-small`.
const DEFAULT_DIMENSIONS: usize = 1536;

/// The default chat model used for paraphrasing.
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// How many paraphrases to request per query.
const PARAPHRASE_COUNT: usize = 2;

/// An [`EmbeddingProvider`] backed by an OpenAI-compatible embeddings API.
///
/// # Example
///
/// ```rust,ignore
/// use coach_rag::openai::OpenAiEmbeddingProvider;
///
/// let provider = OpenAiEmbeddingProvider::new("sk-...")?
///     .with_model("text-embedding-3-large")
///     .with_dimensions(3072);
/// let embedding = provider.embed("hello world").await?;
/// ```
pub struct OpenAiEmbeddingProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbeddingProvider {
    /// Create a new provider with the given API key and the default model.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Embedding`] if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RetrievalError::Embedding {
                provider: "openai".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_EMBEDDING_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a new provider using the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| RetrievalError::Embedding {
            provider: "openai".into(),
            message: "OPENAI_API_KEY environment variable not set".into(),
        })?;
        Self::new(api_key)
    }

    /// Set the model identifier.
    ///
    /// When the model is not one of the known OpenAI models, also call
    /// [`with_dimensions`](Self::with_dimensions) to declare its output
    /// size.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Declare the dimensionality of the configured model's output.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Point the provider at an OpenAI-compatible server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

// ── API request/response types ─────────────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Extract a useful message from a non-success API response body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| RetrievalError::Embedding {
            provider: "openai".into(),
            message: "API returned empty response".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch_size = texts.len(), model = %self.model, "embedding batch");

        let request_body = EmbeddingRequest { model: &self.model, input: texts.to_vec() };
        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "embeddings request failed");
                RetrievalError::Embedding {
                    provider: "openai".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "embeddings API error");
            return Err(RetrievalError::Embedding {
                provider: "openai".into(),
                message: format!("API returned {status}: {}", error_detail(&body)),
            });
        }

        let embedding_response: EmbeddingResponse =
            response.json().await.map_err(|e| RetrievalError::Embedding {
                provider: "openai".into(),
                message: format!("failed to parse response: {e}"),
            })?;

        Ok(embedding_response.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ── ParaphraseGenerator implementation ─────────────────────────────

/// A [`ParaphraseGenerator`] backed by an OpenAI-compatible chat API.
///
/// Asks the model for a small number of rewordings of the query, one per
/// line. Errors surface as [`RetrievalError::Expansion`]; the query
/// expander recovers from them.
pub struct OpenAiParaphraseGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiParaphraseGenerator {
    /// Create a new generator with the given API key and the default model.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Expansion`] if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RetrievalError::Expansion {
                generator: "openai".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_CHAT_MODEL.into(),
        })
    }

    /// Create a new generator using the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| RetrievalError::Expansion {
            generator: "openai".into(),
            message: "OPENAI_API_KEY environment variable not set".into(),
        })?;
        Self::new(api_key)
    }

    /// Set the chat model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the generator at an OpenAI-compatible server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ParaphraseGenerator for OpenAiParaphraseGenerator {
    async fn paraphrase(&self, query: &str) -> Result<Vec<String>> {
        let prompt = format!(
            "Rewrite the following search query {PARAPHRASE_COUNT} different ways, \
             keeping the meaning. Reply with one rewording per line and nothing else.\n\n{query}"
        );
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: &prompt }],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RetrievalError::Expansion {
                generator: "openai".into(),
                message: format!("request failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Expansion {
                generator: "openai".into(),
                message: format!("API returned {status}: {}", error_detail(&body)),
            });
        }

        let chat_response: ChatResponse =
            response.json().await.map_err(|e| RetrievalError::Expansion {
                generator: "openai".into(),
                message: format!("failed to parse response: {e}"),
            })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        Ok(content
            .lines()
            .map(|line| line.trim().trim_start_matches(['-', '*', ' ']).to_string())
            .filter(|line| !line.is_empty())
            .take(PARAPHRASE_COUNT)
            .collect())
    }
}
