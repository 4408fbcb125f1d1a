//! Corpus loading: one [`Document`] per plain-text or markdown file.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::document::Document;
use crate::error::{Result, RetrievalError};

/// File extensions recognized as corpus documents.
const CORPUS_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Load all corpus documents from `data_dir`.
///
/// Each matching file becomes one [`Document`] keyed by its file name.
/// Documents are returned sorted by id so index rebuilds over an unchanged
/// corpus are deterministic. Subdirectories are not descended into.
///
/// # Errors
///
/// Returns [`RetrievalError::Io`] if the directory cannot be read or any
/// matching file cannot be read as UTF-8 text.
pub fn load_documents(data_dir: &Path) -> Result<Vec<Document>> {
    let entries = fs::read_dir(data_dir)
        .map_err(|source| RetrievalError::Io { path: data_dir.to_path_buf(), source })?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|source| RetrievalError::Io { path: data_dir.to_path_buf(), source })?;
        let path = entry.path();
        if !path.is_file() || !has_corpus_extension(&path) {
            continue;
        }

        let text = fs::read_to_string(&path)
            .map_err(|source| RetrievalError::Io { path: path.clone(), source })?;
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(file = %id, chars = text.chars().count(), "loaded corpus document");
        documents.push(Document { id, text });
    }

    documents.sort_by(|a, b| a.id.cmp(&b.id));
    info!(dir = %data_dir.display(), count = documents.len(), "corpus loaded");
    Ok(documents)
}

fn has_corpus_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CORPUS_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
