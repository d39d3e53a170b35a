//! The update dispatcher — the single write path shared by every editable
//! view (overlay, form).
//!
//! One call mutates exactly one field of exactly one record, or nothing at
//! all: the record and field are resolved before any assignment, so a bad
//! index or field name leaves the document untouched. Field names are the
//! wire names the views carry (`isEndPresent`, not `is_end_present`).
//! Concurrent edits resolve last-write-wins at call granularity.

use thiserror::Error;

use crate::models::{EntityType, ResumeDocument};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("{entity} index {index} out of range (len {len})")]
    IndexOutOfRange {
        entity: &'static str,
        index: usize,
        len: usize,
    },

    #[error("unknown field '{field}' for entity {entity}")]
    UnknownField {
        entity: &'static str,
        field: String,
    },

    #[error("field '{field}' expects a boolean, got '{value}'")]
    InvalidValue { field: String, value: String },
}

/// Applies `(entity, index, field, value)` to the document.
pub fn apply_update(
    doc: &mut ResumeDocument,
    entity: EntityType,
    index: usize,
    field: &str,
    value: &str,
) -> Result<(), UpdateError> {
    let out_of_range = |len: usize| UpdateError::IndexOutOfRange {
        entity: entity.as_str(),
        index,
        len,
    };
    let unknown = || UpdateError::UnknownField {
        entity: entity.as_str(),
        field: field.to_string(),
    };

    match entity {
        EntityType::Personal => {
            let len = doc.personal.len();
            let record = doc.personal.get_mut(index).ok_or_else(|| out_of_range(len))?;
            let slot = match field {
                "name" => &mut record.name,
                "email" => &mut record.email,
                "phone" => &mut record.phone,
                "city" => &mut record.city,
                "state" => &mut record.state,
                "github" => &mut record.github,
                "linkedin" => &mut record.linkedin,
                "website" => &mut record.website,
                _ => return Err(unknown()),
            };
            *slot = value.to_string();
        }
        EntityType::Education => {
            let len = doc.education.len();
            let record = doc.education.get_mut(index).ok_or_else(|| out_of_range(len))?;
            let slot = match field {
                "university" => &mut record.university,
                "major" => &mut record.major,
                "gpa" => &mut record.gpa,
                "level" => &mut record.level,
                "graduation_date" => &mut record.graduation_date,
                "coursework" => &mut record.coursework,
                _ => return Err(unknown()),
            };
            *slot = value.to_string();
        }
        EntityType::Experience => {
            let len = doc.experience.len();
            let record = doc.experience.get_mut(index).ok_or_else(|| out_of_range(len))?;
            match field {
                "title" => record.title = value.to_string(),
                "company" => record.company = value.to_string(),
                "start_date" => record.start_date = value.to_string(),
                "end_date" => record.end_date = value.to_string(),
                "location" => record.location = value.to_string(),
                "detailed_experience" => record.detailed_experience = Some(value.to_string()),
                "isEndPresent" => {
                    let parsed = value.parse::<bool>().map_err(|_| UpdateError::InvalidValue {
                        field: field.to_string(),
                        value: value.to_string(),
                    })?;
                    record.is_end_present = parsed;
                }
                _ => return Err(unknown()),
            }
        }
        EntityType::Project => {
            let len = doc.projects.len();
            let record = doc.projects.get_mut(index).ok_or_else(|| out_of_range(len))?;
            match field {
                "name" => record.name = value.to_string(),
                "language" => record.language = value.to_string(),
                "github" => record.github = value.to_string(),
                "description" => record.description = Some(value.to_string()),
                _ => return Err(unknown()),
            }
        }
        EntityType::Skill => {
            let len = doc.skills.len();
            let record = doc.skills.get_mut(index).ok_or_else(|| out_of_range(len))?;
            let slot = match field {
                "languages" => &mut record.languages,
                "frameworks" => &mut record.frameworks,
                _ => return Err(unknown()),
            };
            *slot = value.to_string();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Experience;

    fn doc_with_three_experiences() -> ResumeDocument {
        let mut doc = ResumeDocument::blank();
        doc.experience = (0..3)
            .map(|i| Experience {
                title: format!("Title {i}"),
                company: format!("Company {i}"),
                detailed_experience: Some(String::new()),
                ..Experience::default()
            })
            .collect();
        doc
    }

    #[test]
    fn test_index_isolation() {
        let before = doc_with_three_experiences();
        let mut after = before.clone();

        apply_update(&mut after, EntityType::Experience, 1, "title", "X").unwrap();

        assert_eq!(after.experience[1].title, "X");
        // Every other record and sequence is structurally unchanged.
        assert_eq!(after.experience[0], before.experience[0]);
        assert_eq!(after.experience[2], before.experience[2]);
        assert_eq!(after.experience[1].company, before.experience[1].company);
        assert_eq!(after.personal, before.personal);
        assert_eq!(after.education, before.education);
        assert_eq!(after.projects, before.projects);
        assert_eq!(after.skills, before.skills);
    }

    #[test]
    fn test_unknown_field_mutates_nothing() {
        let before = doc_with_three_experiences();
        let mut after = before.clone();
        let err = apply_update(&mut after, EntityType::Experience, 0, "salary", "1M").unwrap_err();
        assert!(matches!(err, UpdateError::UnknownField { .. }));
        assert_eq!(after, before);
    }

    #[test]
    fn test_out_of_range_index_mutates_nothing() {
        let before = ResumeDocument::blank();
        let mut after = before.clone();
        let err = apply_update(&mut after, EntityType::Skill, 4, "languages", "Rust").unwrap_err();
        assert_eq!(
            err,
            UpdateError::IndexOutOfRange {
                entity: "skill",
                index: 4,
                len: 1
            }
        );
        assert_eq!(after, before);
    }

    #[test]
    fn test_is_end_present_parses_booleans() {
        let mut doc = ResumeDocument::blank();
        apply_update(&mut doc, EntityType::Experience, 0, "isEndPresent", "true").unwrap();
        assert!(doc.experience[0].is_end_present);

        apply_update(&mut doc, EntityType::Experience, 0, "isEndPresent", "false").unwrap();
        assert!(!doc.experience[0].is_end_present);

        let err =
            apply_update(&mut doc, EntityType::Experience, 0, "isEndPresent", "yes").unwrap_err();
        assert!(matches!(err, UpdateError::InvalidValue { .. }));
    }

    #[test]
    fn test_bullet_source_update_replaces_option() {
        let mut doc = ResumeDocument::blank();
        doc.projects[0].description = None;
        apply_update(&mut doc, EntityType::Project, 0, "description", "• built it").unwrap();
        assert_eq!(doc.projects[0].description.as_deref(), Some("• built it"));
    }

    #[test]
    fn test_per_field_updates_apply_in_issue_order() {
        let mut doc = ResumeDocument::blank();
        for value in ["a", "ab", "abc"] {
            apply_update(&mut doc, EntityType::Personal, 0, "name", value).unwrap();
        }
        assert_eq!(doc.personal[0].name, "abc");
    }
}
