//! Error types for the `coach-rag` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// A configuration validation error. Fails fast at construction.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An index artifact was absent at load time.
    ///
    /// The recommended recovery is a full index rebuild.
    #[error("Index artifact not found: {path} (has the index been built?)")]
    IndexNotFound {
        /// The missing artifact path.
        path: PathBuf,
    },

    /// Persisted index artifacts are unreadable or mutually inconsistent.
    #[error("Index corruption: {0}")]
    Corruption(String),

    /// The embedding provider failed on a text or batch.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// Paraphrase generation failed.
    ///
    /// This variant never crosses the retrieval API boundary: the query
    /// expander recovers by falling back to the original query alone.
    #[error("Expansion error ({generator}): {message}")]
    Expansion {
        /// The paraphrase generator that produced the error.
        generator: String,
        /// A description of the failure.
        message: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path the operation was acting on.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;
