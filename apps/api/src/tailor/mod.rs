//! AI tailoring pipeline.
//!
//! Sends the current experiences and projects plus a job description to the
//! LLM, then treats the response as untrusted input: it must parse as JSON,
//! carry exactly three experiences and exactly three projects, and every
//! bullet field is re-normalized before it reaches the document. Identity
//! fields the model must not touch (company names, project links) are
//! overwritten from the originals by index. Any failure anywhere in that
//! chain falls back to the unmodified originals, flagged so the caller can
//! tell the user nothing was tailored.

pub mod client;
pub mod handlers;
pub mod prompts;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::layout::bullets::join_bullets;
use crate::layout::normalize_bullets;
use crate::models::{Experience, Project, ResumeDocument};

pub use client::{strip_json_fences, LlmClient, LlmError, TailorBackend};
pub use prompts::{build_tailor_prompt, TAILOR_SYSTEM};

pub const REQUIRED_EXPERIENCES: usize = 3;
pub const REQUIRED_PROJECTS: usize = 3;

#[derive(Debug, Error)]
pub enum TailorError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected {expected} {entity} entries, got {got}")]
    WrongCount {
        entity: &'static str,
        expected: usize,
        got: usize,
    },
}

/// What the model is asked to return. Lenient on extra/missing fields —
/// the count check and sanitization are the real gate.
#[derive(Debug, Deserialize)]
struct TailoredContent {
    #[serde(default)]
    experiences: Vec<TailoredExperience>,
    #[serde(default)]
    projects: Vec<TailoredProject>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TailoredExperience {
    title: String,
    company: String,
    location: String,
    start_date: String,
    end_date: String,
    #[serde(rename = "isEndPresent")]
    is_end_present: bool,
    detailed_experience: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TailoredProject {
    name: String,
    language: String,
    github: String,
    description: String,
}

#[derive(Debug)]
pub struct TailorOutcome {
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    /// True when tailoring failed and the originals were returned instead.
    pub fallback: bool,
}

/// Runs the full pipeline. Never fails: on any error the outcome carries
/// the original sequences with `fallback` set.
pub async fn tailor_resume(
    doc: &ResumeDocument,
    job_description: &str,
    backend: &dyn TailorBackend,
) -> TailorOutcome {
    match try_tailor(doc, job_description, backend).await {
        Ok((experience, projects)) => TailorOutcome {
            experience,
            projects,
            fallback: false,
        },
        Err(e) => {
            warn!("tailoring failed, keeping original content: {e}");
            TailorOutcome {
                experience: doc.experience.clone(),
                projects: doc.projects.clone(),
                fallback: true,
            }
        }
    }
}

async fn try_tailor(
    doc: &ResumeDocument,
    job_description: &str,
    backend: &dyn TailorBackend,
) -> Result<(Vec<Experience>, Vec<Project>), TailorError> {
    let resume_json = serde_json::to_string_pretty(&json!({
        "experiences": doc.experience,
        "projects": doc.projects,
    }))?;
    let prompt = build_tailor_prompt(&resume_json, job_description);
    let raw = backend.complete(TAILOR_SYSTEM, &prompt).await?;
    validate_response(&raw, doc)
}

/// Parses and sanitizes the model output. Split from the async call so the
/// whole gate is testable without a backend.
pub fn validate_response(
    raw: &str,
    doc: &ResumeDocument,
) -> Result<(Vec<Experience>, Vec<Project>), TailorError> {
    let parsed: TailoredContent = serde_json::from_str(strip_json_fences(raw))?;

    if parsed.experiences.len() != REQUIRED_EXPERIENCES {
        return Err(TailorError::WrongCount {
            entity: "experience",
            expected: REQUIRED_EXPERIENCES,
            got: parsed.experiences.len(),
        });
    }
    if parsed.projects.len() != REQUIRED_PROJECTS {
        return Err(TailorError::WrongCount {
            entity: "project",
            expected: REQUIRED_PROJECTS,
            got: parsed.projects.len(),
        });
    }

    let experience = parsed
        .experiences
        .into_iter()
        .enumerate()
        .map(|(i, e)| {
            let original = doc.experience.get(i);
            Experience {
                title: e.title,
                // Identity fields come from the originals; the model only
                // rewrites descriptive content.
                company: original
                    .map(|o| o.company.clone())
                    .unwrap_or(e.company),
                location: e.location,
                start_date: e.start_date,
                end_date: e.end_date,
                is_end_present: e.is_end_present,
                detailed_experience: sanitize_bullets(
                    &e.detailed_experience,
                    original.and_then(|o| o.detailed_experience.as_deref()),
                ),
            }
        })
        .collect();

    let projects = parsed
        .projects
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            let original = doc.projects.get(i);
            Project {
                name: p.name,
                language: p.language,
                github: original.map(|o| o.github.clone()).unwrap_or(p.github),
                description: sanitize_bullets(
                    &p.description,
                    original.and_then(|o| o.description.as_deref()),
                ),
            }
        })
        .collect();

    Ok((experience, projects))
}

/// Re-normalizes a rewritten bullet source. A response field that
/// normalizes to nothing is replaced by the original source at the same
/// index, so tailoring can never blank out a section.
fn sanitize_bullets(rewritten: &str, original: Option<&str>) -> Option<String> {
    let bullets = normalize_bullets(rewritten);
    if bullets.is_empty() {
        original.map(str::to_string)
    } else {
        let lines: Vec<String> = bullets.iter().map(|b| format!("• {b}")).collect();
        Some(join_bullets(&lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubBackend {
        response: Result<String, ()>,
    }

    #[async_trait]
    impl TailorBackend for StubBackend {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            self.response
                .clone()
                .map_err(|_| LlmError::EmptyContent)
        }
    }

    fn doc_with_content() -> ResumeDocument {
        let mut doc = ResumeDocument::blank();
        doc.experience = (0..3)
            .map(|i| Experience {
                title: format!("Engineer {i}"),
                company: format!("Original Co {i}"),
                detailed_experience: Some(format!("• did thing {i}")),
                ..Experience::default()
            })
            .collect();
        doc.projects = (0..3)
            .map(|i| Project {
                name: format!("Project {i}"),
                github: format!("https://github.com/me/p{i}"),
                description: Some(format!("• built {i}")),
                ..Project::default()
            })
            .collect();
        doc
    }

    fn well_formed_response() -> String {
        let entry = |i: usize| {
            format!(
                r#"{{"title": "Tailored {i}", "company": "Model Co", "location": "Remote",
                    "start_date": "2020", "end_date": "2021", "isEndPresent": false,
                    "detailed_experience": "• improved X\n• shipped Y"}}"#
            )
        };
        let project = |i: usize| {
            format!(
                r#"{{"name": "Tailored P{i}", "language": "Rust", "github": "https://evil.example",
                    "description": "• rewrote it in Rust"}}"#
            )
        };
        format!(
            r#"{{"experiences": [{}, {}, {}], "projects": [{}, {}, {}]}}"#,
            entry(0),
            entry(1),
            entry(2),
            project(0),
            project(1),
            project(2)
        )
    }

    #[test]
    fn test_well_formed_response_accepted() {
        let doc = doc_with_content();
        let (exp, proj) = validate_response(&well_formed_response(), &doc).unwrap();
        assert_eq!(exp.len(), 3);
        assert_eq!(proj.len(), 3);
        assert_eq!(exp[0].title, "Tailored 0");
    }

    #[test]
    fn test_identity_fields_overwritten_from_originals() {
        let doc = doc_with_content();
        let (exp, proj) = validate_response(&well_formed_response(), &doc).unwrap();
        for i in 0..3 {
            assert_eq!(exp[i].company, format!("Original Co {i}"));
            assert_eq!(proj[i].github, format!("https://github.com/me/p{i}"));
        }
    }

    #[test]
    fn test_wrong_count_rejected() {
        let doc = doc_with_content();
        let short = r#"{"experiences": [{"title": "only one"}],
                        "projects": [{}, {}, {}]}"#;
        let err = validate_response(short, &doc).unwrap_err();
        assert!(matches!(
            err,
            TailorError::WrongCount {
                entity: "experience",
                expected: 3,
                got: 1
            }
        ));
    }

    #[test]
    fn test_fenced_response_accepted() {
        let doc = doc_with_content();
        let fenced = format!("```json\n{}\n```", well_formed_response());
        assert!(validate_response(&fenced, &doc).is_ok());
    }

    #[test]
    fn test_bullets_renormalized() {
        let doc = doc_with_content();
        let mut response = well_formed_response();
        // Model returns a messy bullet block with blanks and bare glyphs.
        response = response.replace(
            "• improved X\\n• shipped Y",
            "• improved X\\n\\n•\\n• shipped Y",
        );
        let (exp, _) = validate_response(&response, &doc).unwrap();
        assert_eq!(
            exp[0].detailed_experience.as_deref(),
            Some("• improved X\n• shipped Y")
        );
    }

    #[test]
    fn test_empty_bullets_fall_back_to_original_source() {
        let doc = doc_with_content();
        let response = well_formed_response().replace("• rewrote it in Rust", "");
        let (_, proj) = validate_response(&response, &doc).unwrap();
        for (i, p) in proj.iter().enumerate() {
            assert_eq!(p.description.as_deref(), Some(format!("• built {i}").as_str()));
        }
    }

    #[tokio::test]
    async fn test_backend_error_falls_back_to_originals() {
        let doc = doc_with_content();
        let backend = StubBackend { response: Err(()) };
        let outcome = tailor_resume(&doc, "any job", &backend).await;
        assert!(outcome.fallback);
        assert_eq!(outcome.experience, doc.experience);
        assert_eq!(outcome.projects, doc.projects);
    }

    #[tokio::test]
    async fn test_garbage_response_falls_back_to_originals() {
        let doc = doc_with_content();
        let backend = StubBackend {
            response: Ok("I cannot help with that.".to_string()),
        };
        let outcome = tailor_resume(&doc, "any job", &backend).await;
        assert!(outcome.fallback);
        assert_eq!(outcome.experience, doc.experience);
    }

    #[tokio::test]
    async fn test_successful_pipeline_not_flagged() {
        let doc = doc_with_content();
        let backend = StubBackend {
            response: Ok(well_formed_response()),
        };
        let outcome = tailor_resume(&doc, "Rust role", &backend).await;
        assert!(!outcome.fallback);
        assert_eq!(outcome.experience[0].title, "Tailored 0");
    }
}
