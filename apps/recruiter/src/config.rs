use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::index::DistanceMetric;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

/// Application configuration loaded from environment variables.
/// Fails at startup if the API key is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub resume_dir: PathBuf,
    pub embedding_model: String,
    pub chat_model: String,
    pub temperature: f32,
    pub search_top_k: usize,
    pub evaluation_concurrency: usize,
    pub request_timeout: Duration,
    /// Retries after the first attempt; 0 means a single attempt.
    pub max_retries: u32,
    pub distance_metric: DistanceMetric,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .or_else(|| lookup("OPENAI_KEY"))
            .filter(|k| !k.trim().is_empty())
            .context("Required environment variable 'OPENAI_API_KEY' is not set")?;

        let search_top_k: usize = parse_or(&lookup, "SEARCH_TOP_K", 3)?;
        if search_top_k == 0 {
            bail!("SEARCH_TOP_K must be at least 1");
        }

        let evaluation_concurrency: usize = parse_or(&lookup, "EVALUATION_CONCURRENCY", 1)?;
        if evaluation_concurrency == 0 {
            bail!("EVALUATION_CONCURRENCY must be at least 1");
        }

        let distance_metric = match lookup("DISTANCE_METRIC") {
            Some(raw) => raw.parse::<DistanceMetric>().map_err(anyhow::Error::msg)?,
            None => DistanceMetric::Cosine,
        };

        Ok(Config {
            openai_api_key,
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            resume_dir: lookup("RESUME_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("resume_collection")),
            embedding_model: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chat_model: lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            temperature: parse_or(&lookup, "TEMPERATURE", 0.7)?,
            search_top_k,
            evaluation_concurrency,
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 120)?),
            max_retries: parse_or(&lookup, "MAX_RETRIES", 3)?,
            distance_metric,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
