//! Test doubles for the upstream seams. No network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::{ChatModel, EmbeddingProvider, LlmError};

/// Embeds text as keyword counts over a fixed vocabulary, plus a constant bias dimension
/// so no vector is all zeros.
pub struct KeywordEmbedder {
    vocabulary: Vec<&'static str>,
    fail_on: Option<&'static str>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(vocabulary: &[&'static str]) -> Self {
        Self {
            vocabulary: vocabulary.to_vec(),
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Any text containing `marker` fails to embed.
    pub fn failing_on(mut self, marker: &'static str) -> Self {
        self.fail_on = Some(marker);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(marker) = self.fail_on {
            if text.contains(marker) {
                return Err(LlmError::Api {
                    status: 500,
                    message: "embedding backend unavailable".to_string(),
                });
            }
        }

        let lower = text.to_lowercase();
        let mut vector: Vec<f32> = self
            .vocabulary
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect();
        vector.push(0.1);
        Ok(vector)
    }
}

/// Replies with a canned evaluation chosen by the candidate name in the user prompt.
/// Names without a script, or scripted as failures, get an upstream error.
pub struct ScriptedChat {
    replies: HashMap<String, Result<String, String>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl ScriptedChat {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            delays: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn reply(mut self, candidate: &str, text: &str) -> Self {
        self.replies
            .insert(candidate.to_string(), Ok(text.to_string()));
        self
    }

    pub fn fail(mut self, candidate: &str, message: &str) -> Self {
        self.replies
            .insert(candidate.to_string(), Err(message.to_string()));
        self
    }

    pub fn delay(mut self, candidate: &str, delay: Duration) -> Self {
        self.delays.insert(candidate.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let name = user
            .lines()
            .find_map(|line| line.strip_prefix("Candidate Name: "))
            .unwrap_or_default()
            .trim();

        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }

        match self.replies.get(name) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(LlmError::Api {
                status: 503,
                message: message.clone(),
            }),
            None => Err(LlmError::EmptyContent),
        }
    }
}
