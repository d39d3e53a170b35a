//! Prompt templates for résumé tailoring.

pub const TAILOR_SYSTEM: &str = "You are an expert resume writer. You rewrite resume content to \
match a specific job description while staying strictly truthful to the candidate's actual \
history. You respond with JSON only — no prose, no markdown fences.";

/// Builds the tailoring prompt from the candidate's current experiences and
/// projects plus the target job description. The required output shape is
/// spelled out verbatim because the response is parsed, not interpreted:
/// exactly three experiences and exactly three projects, or the whole
/// result is discarded.
pub fn build_tailor_prompt(resume_json: &str, job_description: &str) -> String {
    format!(
        r#"Rewrite the following resume content so it targets the job description below.

RULES:
- Select and reorder the 3 experiences and 3 projects most relevant to the job.
- Rewrite each experience's "detailed_experience" as 3-4 bullet lines, one per line, each starting with "•". Emphasize impact and keywords from the job description. Never invent employers, titles, dates, or technologies the candidate did not list.
- Rewrite each project's "description" the same way.
- Keep every other field exactly as given.
- If the resume has fewer than 3 experiences or projects, repeat the most relevant ones to reach 3.

OUTPUT: a single JSON object, nothing else, in exactly this shape:
{{
  "experiences": [
    {{"title": "...", "company": "...", "location": "...", "start_date": "...", "end_date": "...", "isEndPresent": false, "detailed_experience": "• ...\n• ...\n• ..."}}
  ],
  "projects": [
    {{"name": "...", "language": "...", "github": "...", "description": "• ...\n• ...\n• ..."}}
  ]
}}
with exactly 3 entries in each array.

RESUME CONTENT:
{resume_json}

JOB DESCRIPTION:
{job_description}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_inputs() {
        let prompt = build_tailor_prompt("{\"experiences\":[]}", "Senior Rust Engineer");
        assert!(prompt.contains("{\"experiences\":[]}"));
        assert!(prompt.contains("Senior Rust Engineer"));
        assert!(prompt.contains("exactly 3 entries"));
    }
}
