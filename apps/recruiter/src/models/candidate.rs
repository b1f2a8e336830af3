/// A résumé retrieved for a job description. Lives only in the session cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub text: String,
    /// Non-negative; smaller = more similar to the job description.
    pub distance: f32,
}

/// Free-text assessment of one candidate, in the same order as the candidates evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub name: String,
    pub evaluation: String,
    pub distance: f32,
}

/// Input to the decision step. `score` is 0 when the evaluation carried no parseable score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub name: String,
    pub score: u8,
    pub distance: f32,
    pub text: String,
}
