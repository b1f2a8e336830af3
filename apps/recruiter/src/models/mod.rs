pub mod candidate;

pub use candidate::{Candidate, Evaluation, ScoredCandidate};
