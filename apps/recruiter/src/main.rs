mod config;
mod errors;
mod evaluation;
mod index;
mod ingest;
mod llm_client;
mod models;
mod repl;
mod retrieval;
mod session;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::evaluation::Evaluator;
use crate::ingest::{build_index, load_corpus};
use crate::llm_client::LlmClient;
use crate::retrieval::CandidateRetriever;
use crate::session::Session;

const EMPTY_CORPUS_MESSAGE: &str =
    "No resume content found. Add PDFs to the resume_collection directory.";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging; stderr keeps the conversation on stdout clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting recruiter v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(&config)?);
    info!(
        "LLM client initialized (chat model: {}, embedding model: {})",
        llm.chat_model(),
        llm.embedding_model()
    );

    // Extract resume text (blocking PDF parsing off the async workers)
    let resume_dir = config.resume_dir.clone();
    let documents = tokio::task::spawn_blocking(move || load_corpus(&resume_dir)).await??;
    if documents.is_empty() {
        println!("{EMPTY_CORPUS_MESSAGE}");
        return Ok(());
    }

    // Build the vector index
    let index = build_index(documents, llm.as_ref(), config.distance_metric).await?;
    if index.is_empty() {
        println!("{EMPTY_CORPUS_MESSAGE}");
        return Ok(());
    }

    let retriever = CandidateRetriever::new(llm.clone(), index);
    let evaluator = Evaluator::new(llm, config.evaluation_concurrency);
    let mut session = Session::new(retriever, evaluator, config.search_top_k);
    info!(session = %session.id(), "Session started");

    let stdin = BufReader::new(tokio::io::stdin());
    repl::run(&mut session, stdin, &mut std::io::stdout()).await
}
