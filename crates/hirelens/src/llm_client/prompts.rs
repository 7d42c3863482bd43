// Prompt constants for the generative ranking collaborator.

/// System prompt for candidate ranking. The JSON schema is restated in the
/// user prompt; the parser still tolerates fenced or prose output because
/// the collaborator honors no output contract.
pub const RANKING_SYSTEM: &str =
    "You are a recruiter assistant. Evaluate job candidates based on their \
    resumes and a job description. Provide a ranking, overview, pros, and \
    cons for each candidate. \
    You MUST respond with a valid JSON array only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

/// Ranking prompt template. Replace `{job_description}` before sending; one
/// `Resume:` block per candidate is appended after the template.
pub const RANKING_PROMPT_TEMPLATE: &str = r#"Job Description: {job_description}

Evaluate each candidate based on their resume and the job description. Provide a ranking, overview, pros, and cons for each candidate in the following JSON format:

[
    {
        "ranking": "1",
        "overview": "Candidate's overview",
        "pros": ["List of pros"],
        "cons": ["List of cons"]
    },
    {
        "ranking": "2",
        "overview": "Candidate's overview",
        "pros": ["List of pros"],
        "cons": ["List of cons"]
    }
]

Ensure the response is a valid JSON array."#;

/// Builds the full ranking prompt: job description template plus one
/// `Resume:` block per extracted candidate.
pub fn build_ranking_prompt(job_description: &str, resumes: &[String]) -> String {
    let mut prompt = RANKING_PROMPT_TEMPLATE.replace("{job_description}", job_description);
    for resume in resumes {
        prompt.push_str("\n\nResume: ");
        prompt.push_str(resume);
    }
    prompt
}
