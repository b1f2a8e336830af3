//! Candidate Retriever — embeds a job description and pulls the nearest résumés from the index.

use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::index::VectorIndex;
use crate::llm_client::EmbeddingProvider;
use crate::models::Candidate;

/// Name used when a stored document carries no `name` metadata.
pub const UNKNOWN_CANDIDATE: &str = "Unknown";

pub struct CandidateRetriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: VectorIndex,
}

impl CandidateRetriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: VectorIndex) -> Self {
        Self { embedder, index }
    }

    /// Returns up to `k` candidates, best match first.
    ///
    /// An empty result is not an error; the caller reports "no candidates found".
    /// An embedding failure is fatal for this search and propagates.
    pub async fn search(
        &self,
        job_description: &str,
        k: usize,
    ) -> Result<Vec<Candidate>, AppError> {
        let job_embedding = self.embedder.embed(job_description).await?;
        let hits = self.index.query(&job_embedding, k)?;

        let candidates: Vec<Candidate> = hits
            .into_iter()
            .map(|hit| Candidate {
                name: hit
                    .metadata
                    .name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string()),
                text: hit.document.to_string(),
                distance: hit.distance,
            })
            .collect();

        info!(
            "Search returned {} candidate(s) for k={} over {} indexed resume(s)",
            candidates.len(),
            k,
            self.index.len()
        );
        Ok(candidates)
    }
}
