//! Session Controller — holds the conversation state and dispatches user commands.
//!
//! State invariants:
//! - changing the job description clears candidates, evaluations and decision
//! - every search replaces the candidates and clears evaluations and decision
//!
//! A failed precondition leaves the state untouched.

use std::io::Write;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::Evaluator;
use crate::models::{Candidate, Evaluation};
use crate::retrieval::CandidateRetriever;

pub const HELP_TEXT: &str = "Available commands:
  set job: Set or update the job description (inline: set job <text>)
  show job: Show the current job description
  search [k]: Perform a semantic search of candidates
  evaluate: Evaluate the top candidates
  decision: Show the final candidate decision
  help: Show this list
  quit/exit: End the conversation";

/// A parsed line of user input. Matching is case-insensitive on the command word(s).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `set job` with the description inline, or `None` to prompt for it.
    SetJob(Option<String>),
    ShowJob,
    Search(Option<usize>),
    Evaluate,
    Decision,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if let Some(prefix) = trimmed.get(..7) {
            let rest = &trimmed[7..];
            if prefix.eq_ignore_ascii_case("set job")
                && (rest.is_empty() || rest.starts_with(char::is_whitespace))
            {
                let rest = rest.trim();
                return Command::SetJob((!rest.is_empty()).then(|| rest.to_string()));
            }
        }

        let lower = trimmed.to_lowercase();
        let mut words = lower.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("quit" | "exit"), None, _) => Command::Quit,
            (Some("help"), None, _) => Command::Help,
            (Some("show"), Some("job"), None) => Command::ShowJob,
            (Some("search"), None, _) => Command::Search(None),
            (Some("search"), Some(k), None) => match k.parse::<usize>() {
                Ok(k) => Command::Search(Some(k)),
                Err(_) => Command::Unknown(trimmed.to_string()),
            },
            (Some("evaluate"), None, _) => Command::Evaluate,
            (Some("decision"), None, _) => Command::Decision,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Read the job description from the user, then call `set_job_description`.
    PromptJobDescription,
    Quit,
}

#[derive(Debug, Default, Clone)]
pub struct SessionState {
    /// Empty means unset.
    pub job_description: String,
    pub cached_candidates: Vec<Candidate>,
    pub cached_evaluations: Option<Vec<Evaluation>>,
    pub cached_decision: Option<String>,
}

impl SessionState {
    fn invalidate_evaluations(&mut self) {
        self.cached_evaluations = None;
        self.cached_decision = None;
    }
}

pub struct Session {
    id: Uuid,
    retriever: CandidateRetriever,
    evaluator: Evaluator,
    default_top_k: usize,
    state: SessionState,
}

impl Session {
    pub fn new(retriever: CandidateRetriever, evaluator: Evaluator, default_top_k: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            retriever,
            evaluator,
            default_top_k: default_top_k.max(1),
            state: SessionState::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs one command, writing everything user-facing to `out`.
    /// Precondition and provider failures come back as `Err`; the session stays usable.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Flow, AppError> {
        match command {
            Command::SetJob(Some(text)) => self.set_job_description(text, out)?,
            Command::SetJob(None) => return Ok(Flow::PromptJobDescription),
            Command::ShowJob => self.show_job_description(out)?,
            Command::Search(k) => self.search(k.unwrap_or(self.default_top_k), out).await?,
            Command::Evaluate => self.evaluate(out).await?,
            Command::Decision => self.show_decision(out).await?,
            Command::Help => writeln!(out, "{HELP_TEXT}")?,
            Command::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Quit);
            }
            Command::Unknown(_) => {
                writeln!(out, "Unrecognized command. Type 'help' for a list of commands.")?
            }
        }
        Ok(Flow::Continue)
    }

    pub fn set_job_description<W: Write>(
        &mut self,
        text: String,
        out: &mut W,
    ) -> Result<(), AppError> {
        info!(session = %self.id, "Job description updated ({} chars)", text.len());
        self.state = SessionState {
            job_description: text,
            ..SessionState::default()
        };
        writeln!(out, "Job description updated.")?;
        Ok(())
    }

    pub fn show_job_description<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        if self.state.job_description.is_empty() {
            writeln!(out, "No job description set yet. Use 'set job' to define one.")?;
        } else {
            writeln!(
                out,
                "\nCurrent Job Description:\n{}",
                self.state.job_description
            )?;
        }
        Ok(())
    }

    pub async fn search<W: Write>(&mut self, k: usize, out: &mut W) -> Result<(), AppError> {
        if self.state.job_description.is_empty() {
            return Err(AppError::precondition(
                "Please set a job description first using 'set job'.",
            ));
        }
        if k == 0 {
            return Err(AppError::precondition(
                "The number of candidates to search for must be at least 1.",
            ));
        }

        writeln!(out, "Searching for top candidates...\n")?;
        let candidates = self
            .retriever
            .search(&self.state.job_description, k)
            .await?;

        self.state.cached_candidates = candidates;
        self.state.invalidate_evaluations();

        if self.state.cached_candidates.is_empty() {
            writeln!(out, "No candidates found for this job description.")?;
        } else {
            for (i, c) in self.state.cached_candidates.iter().enumerate() {
                writeln!(out, "{}. {} (distance={:.4})", i + 1, c.name, c.distance)?;
            }
        }
        Ok(())
    }

    pub async fn evaluate<W: Write>(&mut self, out: &mut W) -> Result<(), AppError> {
        self.check_evaluation_preconditions()?;

        writeln!(out, "Evaluating candidates...\n")?;
        self.run_evaluation().await;

        if let Some(evaluations) = &self.state.cached_evaluations {
            for (idx, e) in evaluations.iter().enumerate() {
                writeln!(out, "\n--- Candidate {} ---", idx + 1)?;
                writeln!(out, "Name: {}, Distance: {:.4}", e.name, e.distance)?;
                writeln!(out, "Evaluation:\n{}", e.evaluation)?;
                writeln!(out, "----------------------")?;
            }
        }
        writeln!(out, "\nTo see the best candidate, type 'decision'.")?;
        Ok(())
    }

    /// Reports the cached decision, evaluating first if none is cached.
    pub async fn show_decision<W: Write>(&mut self, out: &mut W) -> Result<(), AppError> {
        if self.state.cached_candidates.is_empty() {
            return Err(AppError::precondition(
                "No candidates are currently cached. Run 'search' and then 'evaluate' first.",
            ));
        }

        if self.state.cached_decision.is_none() {
            self.check_evaluation_preconditions()?;
            writeln!(out, "Evaluating candidates to determine the best candidate...")?;
            self.run_evaluation().await;
        }

        if let Some(decision) = &self.state.cached_decision {
            writeln!(out, "\nFinal Decision:\n{decision}")?;
        }
        Ok(())
    }

    fn check_evaluation_preconditions(&self) -> Result<(), AppError> {
        if self.state.cached_candidates.is_empty() {
            return Err(AppError::precondition(
                "No cached candidates to evaluate. Run 'search' first.",
            ));
        }
        if self.state.job_description.is_empty() {
            return Err(AppError::precondition(
                "No job description is set. Use 'set job' first.",
            ));
        }
        Ok(())
    }

    async fn run_evaluation(&mut self) {
        info!(
            session = %self.id,
            "Evaluating {} cached candidate(s)",
            self.state.cached_candidates.len()
        );
        let (evaluations, decision) = self
            .evaluator
            .evaluate_many(&self.state.job_description, &self.state.cached_candidates)
            .await;
        self.state.cached_evaluations = Some(evaluations);
        self.state.cached_decision = Some(decision);
    }
}
