//! Flat on-disk vector index with exact nearest-neighbor search.
//!
//! An index is persisted as three parallel artifacts in one directory:
//! `vectors.json` (the embedding matrix), `metadata.json` (one
//! [`ChunkMetadata`] per position) and `chunks.json` (one chunk text per
//! position). Position `i` in all three refers to the same chunk. The
//! artifacts are written as a unit: a rebuild stages every file to a
//! temporary name and renames them into place only after all are fully
//! written, so concurrent readers never observe a partially written index.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::{cmp::Ordering, fs};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::document::ChunkMetadata;
use crate::error::{Result, RetrievalError};

/// File name of the persisted embedding matrix.
const VECTORS_FILE: &str = "vectors.json";
/// File name of the persisted metadata array.
const METADATA_FILE: &str = "metadata.json";
/// File name of the persisted chunk-text array.
const CHUNKS_FILE: &str = "chunks.json";

/// An exact nearest-neighbor index over uniform-dimension `f32` vectors.
///
/// Search is a full scan by squared Euclidean distance, computed
/// identically at every index size; there is no approximation tier.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build an index from a set of vectors.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Corruption`] if the vectors do not all
    /// share one dimensionality, or any vector is empty.
    pub fn new(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dimensions = vectors.first().map(Vec::len).unwrap_or(0);
        if !vectors.is_empty() && dimensions == 0 {
            return Err(RetrievalError::Corruption("index contains empty vectors".to_string()));
        }
        if let Some(position) = vectors.iter().position(|v| v.len() != dimensions) {
            return Err(RetrievalError::Corruption(format!(
                "vector at position {position} has dimension {}, expected {dimensions}",
                vectors[position].len()
            )));
        }
        Ok(Self { dimensions, vectors })
    }

    /// Number of vectors in the index.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimensionality of the indexed vectors (0 when empty).
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Find the `k` nearest vectors to `query`.
    ///
    /// Returns `(distance, position)` pairs ascending by squared Euclidean
    /// distance; equal distances keep insertion order. `k` is clamped to
    /// the index size.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Corruption`] if the query dimensionality
    /// does not match the index (an embedding model mismatch).
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(f32, usize)>> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimensions {
            return Err(RetrievalError::Corruption(format!(
                "query vector dimension {} does not match index dimension {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(f32, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| (squared_euclidean(query, vector), position))
            .collect();
        // Stable sort keeps insertion order on ties.
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

/// Squared Euclidean distance between two equal-length vectors.
fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// A loaded, immutable index generation: vectors plus parallel metadata
/// and chunk-text arrays of identical length.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    index: FlatIndex,
    metadata: Vec<ChunkMetadata>,
    chunk_texts: Vec<String>,
}

impl IndexSnapshot {
    /// Number of chunks in the snapshot.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the snapshot holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Dimensionality of the indexed vectors (0 when empty).
    pub fn dimensions(&self) -> usize {
        self.index.dimensions()
    }

    /// Find the `k` nearest chunks to `query`. See [`FlatIndex::search`].
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(f32, usize)>> {
        self.index.search(query, k)
    }

    /// The metadata and chunk text at `position`, if in range.
    pub fn entry(&self, position: usize) -> Option<(&ChunkMetadata, &str)> {
        Some((self.metadata.get(position)?, self.chunk_texts.get(position)?.as_str()))
    }
}

/// Reads and writes the three index artifacts in a configured directory.
///
/// # Example
///
/// ```rust,ignore
/// use coach_rag::IndexStore;
///
/// let store = IndexStore::new("./data/vector_db");
/// store.build(vectors, metadata, chunk_texts)?;
/// let snapshot = store.load()?;
/// let hits = snapshot.search(&query_vector, 5)?;
/// ```
#[derive(Debug, Clone)]
pub struct IndexStore {
    dir: PathBuf,
}

impl IndexStore {
    /// Create a store keyed by the given artifact directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The artifact directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether all three artifacts are present on disk.
    pub fn exists(&self) -> bool {
        [VECTORS_FILE, METADATA_FILE, CHUNKS_FILE]
            .iter()
            .all(|name| self.dir.join(name).is_file())
    }

    /// Persist a new index generation, fully replacing any previous one.
    ///
    /// All three artifacts are first written to temporary files in the
    /// artifact directory, then renamed into place once every write has
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Corruption`] if the three arrays disagree
    /// in length or the vectors are not uniform in dimension, and
    /// [`RetrievalError::Io`] on filesystem failure. On error no artifact
    /// has been replaced, or all have.
    pub fn build(
        &self,
        vectors: Vec<Vec<f32>>,
        metadata: Vec<ChunkMetadata>,
        chunk_texts: Vec<String>,
    ) -> Result<()> {
        if vectors.len() != metadata.len() || vectors.len() != chunk_texts.len() {
            return Err(RetrievalError::Corruption(format!(
                "refusing to write parallel arrays of mismatched length: \
                 {} vectors, {} metadata entries, {} chunk texts",
                vectors.len(),
                metadata.len(),
                chunk_texts.len()
            )));
        }
        // Validates uniform dimensionality before anything touches disk.
        let index = FlatIndex::new(vectors)?;

        fs::create_dir_all(&self.dir)
            .map_err(|source| RetrievalError::Io { path: self.dir.clone(), source })?;

        let staged = [
            self.stage(VECTORS_FILE, &index.vectors)?,
            self.stage(METADATA_FILE, &metadata)?,
            self.stage(CHUNKS_FILE, &chunk_texts)?,
        ];
        for (tmp, name) in staged.into_iter().zip([VECTORS_FILE, METADATA_FILE, CHUNKS_FILE]) {
            let path = self.dir.join(name);
            tmp.persist(&path)
                .map_err(|e| RetrievalError::Io { path, source: e.error })?;
        }

        info!(
            dir = %self.dir.display(),
            chunks = index.len(),
            dimensions = index.dimensions(),
            "index artifacts written"
        );
        Ok(())
    }

    /// Load the current index generation read-only.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::IndexNotFound`] if any artifact is
    /// missing, and [`RetrievalError::Corruption`] if an artifact fails to
    /// parse or the three arrays disagree in length after load.
    pub fn load(&self) -> Result<IndexSnapshot> {
        let vectors: Vec<Vec<f32>> = self.read_artifact(VECTORS_FILE)?;
        let metadata: Vec<ChunkMetadata> = self.read_artifact(METADATA_FILE)?;
        let chunk_texts: Vec<String> = self.read_artifact(CHUNKS_FILE)?;

        if vectors.len() != metadata.len() || vectors.len() != chunk_texts.len() {
            return Err(RetrievalError::Corruption(format!(
                "parallel arrays disagree in length after load: \
                 {} vectors, {} metadata entries, {} chunk texts",
                vectors.len(),
                metadata.len(),
                chunk_texts.len()
            )));
        }

        let index = FlatIndex::new(vectors)?;
        Ok(IndexSnapshot { index, metadata, chunk_texts })
    }

    /// Serialize `value` to a temporary file inside the artifact directory.
    fn stage<T: Serialize>(&self, name: &str, value: &T) -> Result<NamedTempFile> {
        let bytes = serde_json::to_vec(value).map_err(|e| {
            RetrievalError::Corruption(format!("failed to serialize {name}: {e}"))
        })?;
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|source| RetrievalError::Io { path: self.dir.clone(), source })?;
        tmp.write_all(&bytes)
            .map_err(|source| RetrievalError::Io { path: self.dir.join(name), source })?;
        Ok(tmp)
    }

    /// Read and parse one artifact, distinguishing "missing" from "unreadable".
    fn read_artifact<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(RetrievalError::IndexNotFound { path });
        }
        let contents =
            fs::read_to_string(&path).map_err(|source| RetrievalError::Io { path: path.clone(), source })?;
        serde_json::from_str(&contents).map_err(|e| {
            RetrievalError::Corruption(format!("failed to parse {}: {e}", path.display()))
        })
    }
}
