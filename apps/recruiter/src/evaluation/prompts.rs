// Prompt constants for candidate evaluation.
// The `Match Score: X/10` line is parsed back by `score::extract_score`; change both together.

/// System prompt casting the model as the hiring manager.
pub const EVALUATION_SYSTEM: &str = "You are an experienced hiring manager tasked with evaluating \
    candidates for an open position. Each candidate has a résumé, and you are provided with the \
    job description. For each candidate, provide:\n\
    1. Relevant skills related to the requirements of the job description.\n\
    2. Specific accomplishments demonstrating experience in these areas.\n\
    3. Gaps in their qualifications for the role.\n\
    4. A match score from 0 to 10, with 10 being the most ideal match, written on its own line \
    in EXACTLY this form: Match Score: X/10\n\
    Focus on clarity and actionable insights to help make a final decision.";

/// Per-candidate prompt. Replace: {job_description}, {candidate_name}, {candidate_text}
pub const EVALUATION_PROMPT_TEMPLATE: &str = "Job Description:
{job_description}

Candidate Name: {candidate_name}
Candidate Résumé:
{candidate_text}";

/// Prefix of the evaluation text recorded when the model call fails.
pub const EVALUATION_ERROR_PREFIX: &str = "Error in generating evaluation: ";

pub fn build_evaluation_prompt(
    job_description: &str,
    candidate_name: &str,
    candidate_text: &str,
) -> String {
    EVALUATION_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{candidate_name}", candidate_name)
        .replace("{candidate_text}", candidate_text)
}
