//! Conventional form view of the document — the narrow-viewport fallback
//! where an absolutely positioned overlay is impractical.
//!
//! The form renders the same fields as the overlay, grouped by section as
//! labeled inputs, and edits route through the same dispatch contract:
//! every `FormInput` names the exact `(entity, index, field)` triple the
//! dispatcher expects, so the two editable views cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::models::{EntityType, ResumeDocument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub field: String,
    pub label: String,
    pub value: String,
    pub multiline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormRecord {
    pub index: usize,
    pub inputs: Vec<FormInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    pub entity: EntityType,
    pub title: String,
    pub records: Vec<FormRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormView {
    pub sections: Vec<FormSection>,
}

fn input(field: &str, label: &str, value: &str) -> FormInput {
    FormInput {
        field: field.to_string(),
        label: label.to_string(),
        value: value.to_string(),
        multiline: false,
    }
}

fn textarea(field: &str, label: &str, value: Option<&str>) -> FormInput {
    FormInput {
        field: field.to_string(),
        label: label.to_string(),
        value: value.unwrap_or_default().to_string(),
        multiline: true,
    }
}

/// Builds the grouped form view from a document snapshot.
pub fn form_from_document(doc: &ResumeDocument) -> FormView {
    let personal = FormSection {
        entity: EntityType::Personal,
        title: "Personal Info".to_string(),
        records: doc
            .personal
            .iter()
            .enumerate()
            .map(|(index, p)| FormRecord {
                index,
                inputs: vec![
                    input("name", "Name", &p.name),
                    input("email", "Email", &p.email),
                    input("phone", "Phone", &p.phone),
                    input("city", "City", &p.city),
                    input("state", "State", &p.state),
                    input("github", "GitHub", &p.github),
                    input("linkedin", "LinkedIn", &p.linkedin),
                    input("website", "Website", &p.website),
                ],
            })
            .collect(),
    };

    let education = FormSection {
        entity: EntityType::Education,
        title: "Education".to_string(),
        records: doc
            .education
            .iter()
            .enumerate()
            .map(|(index, e)| FormRecord {
                index,
                inputs: vec![
                    input("university", "University", &e.university),
                    input("major", "Major", &e.major),
                    input("gpa", "GPA", &e.gpa),
                    input("level", "Level", &e.level),
                    input("graduation_date", "Graduation Date", &e.graduation_date),
                    input("coursework", "Coursework", &e.coursework),
                ],
            })
            .collect(),
    };

    let experience = FormSection {
        entity: EntityType::Experience,
        title: "Work Experience".to_string(),
        records: doc
            .experience
            .iter()
            .enumerate()
            .map(|(index, e)| FormRecord {
                index,
                inputs: vec![
                    input("title", "Title", &e.title),
                    input("company", "Company", &e.company),
                    input("location", "Location", &e.location),
                    input("start_date", "Start Date", &e.start_date),
                    input("end_date", "End Date", &e.end_date),
                    input(
                        "isEndPresent",
                        "Currently Employed",
                        if e.is_end_present { "true" } else { "false" },
                    ),
                    textarea(
                        "detailed_experience",
                        "Details",
                        e.detailed_experience.as_deref(),
                    ),
                ],
            })
            .collect(),
    };

    let projects = FormSection {
        entity: EntityType::Project,
        title: "Projects".to_string(),
        records: doc
            .projects
            .iter()
            .enumerate()
            .map(|(index, p)| FormRecord {
                index,
                inputs: vec![
                    input("name", "Name", &p.name),
                    input("language", "Technologies", &p.language),
                    input("github", "Link", &p.github),
                    textarea("description", "Description", p.description.as_deref()),
                ],
            })
            .collect(),
    };

    let skills = FormSection {
        entity: EntityType::Skill,
        title: "Skills".to_string(),
        records: doc
            .skills
            .iter()
            .enumerate()
            .map(|(index, s)| FormRecord {
                index,
                inputs: vec![
                    input("languages", "Languages", &s.languages),
                    input("frameworks", "Frameworks", &s.frameworks),
                ],
            })
            .collect(),
    };

    FormView {
        sections: vec![personal, education, experience, projects, skills],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::dispatch::apply_update;

    #[test]
    fn test_form_covers_all_five_sections_in_order() {
        let view = form_from_document(&ResumeDocument::blank());
        let entities: Vec<EntityType> = view.sections.iter().map(|s| s.entity).collect();
        assert_eq!(entities, EntityType::ALL.to_vec());
    }

    #[test]
    fn test_bullet_sources_are_textareas() {
        let view = form_from_document(&ResumeDocument::blank());
        let experience = &view.sections[2];
        let details = experience.records[0]
            .inputs
            .iter()
            .find(|i| i.field == "detailed_experience")
            .unwrap();
        assert!(details.multiline);
    }

    #[test]
    fn test_every_form_field_is_dispatchable() {
        // The form and the dispatcher share a contract: each input's
        // (entity, index, field) triple must be accepted by apply_update.
        let doc = ResumeDocument::blank();
        let view = form_from_document(&doc);
        for section in &view.sections {
            for record in &section.records {
                for form_input in &record.inputs {
                    let mut copy = doc.clone();
                    apply_update(
                        &mut copy,
                        section.entity,
                        record.index,
                        &form_input.field,
                        // "true" parses for the boolean field and is a
                        // plain string everywhere else.
                        "true",
                    )
                    .unwrap_or_else(|e| {
                        panic!(
                            "form field {:?}.{} not dispatchable: {e}",
                            section.entity, form_input.field
                        )
                    });
                }
            }
        }
    }
}
