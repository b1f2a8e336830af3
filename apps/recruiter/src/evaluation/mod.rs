// Candidate evaluation: per-candidate LLM assessment, score extraction, final decision.
// All model calls go through the `ChatModel` seam, never the HTTP client directly.

pub mod decision;
pub mod evaluator;
pub mod prompts;
pub mod score;

pub use evaluator::Evaluator;
