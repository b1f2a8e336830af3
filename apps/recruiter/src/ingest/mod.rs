//! Corpus ingestion — turns a directory of résumé files into a populated `VectorIndex`.
//!
//! A single bad document (unreadable, unparseable, or failing to embed) is logged and
//! skipped; ingestion carries on with the rest. Only an unreadable directory is fatal here.
//! An empty result is reported by the caller.

mod extract;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::index::{DistanceMetric, DocumentMetadata, IndexError, VectorIndex};
use crate::llm_client::{EmbeddingProvider, LlmError};
use extract::SourceFormat;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Cannot read resume directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from {}: {message}", .path.display())]
    Extraction { path: PathBuf, message: String },

    #[error("Failed to embed resume '{name}': {source}")]
    Embedding {
        name: String,
        #[source]
        source: LlmError,
    },

    #[error("Failed to index resumes: {0}")]
    Index(#[from] IndexError),
}

/// A résumé as plain text, before embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub name: String,
    pub text: String,
}

/// Reads every supported file in `dir` (non-recursive), in file-name order.
/// The document name is the file stem.
pub fn load_corpus(dir: &Path) -> Result<Vec<SourceDocument>, IngestError> {
    let io_err = |source| IngestError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(io_err)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        let Some(format) = SourceFormat::from_path(&path) else {
            continue;
        };
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match extract::extract_text(&path, format) {
            Ok(text) if text.is_empty() => {
                warn!("Skipping {}: no extractable text", path.display());
            }
            Ok(text) => documents.push(SourceDocument { name, text }),
            Err(e) => warn!("Skipping resume: {e}"),
        }
    }

    info!(
        "Loaded {} resume(s) from {}",
        documents.len(),
        dir.display()
    );
    Ok(documents)
}

/// Embeds each document and stores the successful ones under ids "1", "2", … in order.
pub async fn build_index(
    documents: Vec<SourceDocument>,
    embedder: &dyn EmbeddingProvider,
    metric: DistanceMetric,
) -> Result<VectorIndex, IngestError> {
    let mut ids = Vec::with_capacity(documents.len());
    let mut texts = Vec::with_capacity(documents.len());
    let mut metadata = Vec::with_capacity(documents.len());
    let mut embeddings = Vec::with_capacity(documents.len());

    for document in documents {
        match embedder.embed(&document.text).await {
            Ok(embedding) => {
                ids.push((ids.len() + 1).to_string());
                metadata.push(DocumentMetadata::named(document.name));
                texts.push(document.text);
                embeddings.push(embedding);
            }
            Err(source) => {
                let err = IngestError::Embedding {
                    name: document.name,
                    source,
                };
                warn!("Skipping resume: {err}");
            }
        }
    }

    let mut index = VectorIndex::new(metric);
    index.add(ids, texts, metadata, embeddings)?;
    info!(
        "Indexed {} resume(s) using {} distance",
        index.len(),
        index.metric()
    );
    Ok(index)
}
