//! Evaluator — one generative-model assessment per candidate, then a decision.
//!
//! Model failures never abort a batch: the failing candidate's evaluation becomes
//! `Error in generating evaluation: <message>`, which carries no score and ranks as 0.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::evaluation::decision::decide;
use crate::evaluation::prompts::{
    build_evaluation_prompt, EVALUATION_ERROR_PREFIX, EVALUATION_SYSTEM,
};
use crate::evaluation::score::extract_score;
use crate::llm_client::ChatModel;
use crate::models::{Candidate, Evaluation, ScoredCandidate};

#[derive(Clone)]
pub struct Evaluator {
    chat: Arc<dyn ChatModel>,
    /// Max model calls in flight. 1 evaluates strictly one after another.
    concurrency: usize,
}

impl Evaluator {
    pub fn new(chat: Arc<dyn ChatModel>, concurrency: usize) -> Self {
        Self {
            chat,
            concurrency: concurrency.max(1),
        }
    }

    /// Assesses one candidate. Never fails; upstream errors are encoded in the returned text.
    pub async fn evaluate(
        &self,
        job_description: &str,
        candidate_name: &str,
        candidate_text: &str,
    ) -> String {
        evaluate_with(
            self.chat.as_ref(),
            job_description,
            candidate_name,
            candidate_text,
        )
        .await
    }

    /// Evaluates every candidate and decides. Evaluations come back in input order.
    pub async fn evaluate_many(
        &self,
        job_description: &str,
        candidates: &[Candidate],
    ) -> (Vec<Evaluation>, String) {
        info!(
            "Evaluating {} candidate(s) (concurrency {})",
            candidates.len(),
            self.concurrency
        );

        let texts = if self.concurrency == 1 || candidates.len() <= 1 {
            let mut texts = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                texts.push(
                    self.evaluate(job_description, &candidate.name, &candidate.text)
                        .await,
                );
            }
            texts
        } else {
            self.evaluate_pooled(job_description, candidates).await
        };

        let mut evaluations = Vec::with_capacity(candidates.len());
        let mut scored = Vec::with_capacity(candidates.len());
        for (candidate, evaluation) in candidates.iter().zip(texts) {
            let score = extract_score(&evaluation);
            if score.is_none() {
                warn!(
                    "No match score found in evaluation for {}; ranking as 0",
                    candidate.name
                );
            }
            scored.push(ScoredCandidate {
                name: candidate.name.clone(),
                score: score.unwrap_or(0),
                distance: candidate.distance,
                text: candidate.text.clone(),
            });
            evaluations.push(Evaluation {
                name: candidate.name.clone(),
                evaluation,
                distance: candidate.distance,
            });
        }

        let decision = decide(&scored);
        (evaluations, decision)
    }

    /// Spawns one task per candidate, bounded by a semaphore. Handles are awaited in input
    /// order, so result `i` always belongs to candidate `i`.
    async fn evaluate_pooled(&self, job_description: &str, candidates: &[Candidate]) -> Vec<String> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let job_description: Arc<str> = Arc::from(job_description);

        let handles: Vec<_> = candidates
            .iter()
            .map(|candidate| {
                let chat = Arc::clone(&self.chat);
                let permits = Arc::clone(&permits);
                let job_description = Arc::clone(&job_description);
                let name = candidate.name.clone();
                let text = candidate.text.clone();
                tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await;
                    evaluate_with(chat.as_ref(), &job_description, &name, &text).await
                })
            })
            .collect();

        let mut texts = Vec::with_capacity(handles.len());
        for (candidate, handle) in candidates.iter().zip(handles) {
            let text = match handle.await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Evaluation task for {} failed: {e}", candidate.name);
                    format!("{EVALUATION_ERROR_PREFIX}{e}")
                }
            };
            texts.push(text);
        }
        texts
    }
}

async fn evaluate_with(
    chat: &dyn ChatModel,
    job_description: &str,
    candidate_name: &str,
    candidate_text: &str,
) -> String {
    let prompt = build_evaluation_prompt(job_description, candidate_name, candidate_text);
    match chat.complete(EVALUATION_SYSTEM, &prompt).await {
        Ok(evaluation) => evaluation,
        Err(e) => {
            warn!("Evaluation of {candidate_name} failed: {e}");
            format!("{EVALUATION_ERROR_PREFIX}{e}")
        }
    }
}
