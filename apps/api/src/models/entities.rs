//! Résumé entity records.
//!
//! Every entity is a closed struct with all fields declared — the update
//! dispatcher addresses records by `(entity, index, field)` and a closed
//! field set keeps that contract checkable at one `match` site
//! (`document::dispatch`). Sequence order is display order everywhere:
//! the document, the render tree, and the overlay all address the same
//! record through the same index.

use serde::{Deserialize, Serialize};

/// The five editable entity kinds addressed by the update dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Personal,
    Education,
    Experience,
    Project,
    Skill,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        EntityType::Personal,
        EntityType::Education,
        EntityType::Experience,
        EntityType::Project,
        EntityType::Skill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Personal => "personal",
            EntityType::Education => "education",
            EntityType::Experience => "experience",
            EntityType::Project => "project",
            EntityType::Skill => "skill",
        }
    }
}

/// Contact block. Singleton by convention: index 0 of the personal sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personal {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub gpa: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub graduation_date: String,
    /// Free text, comma-separated by convention. Never parsed into a list.
    #[serde(default)]
    pub coursework: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Raw multi-line bullet source. `None` means the field is missing from
    /// the stored document — the renderer shows a placeholder instead of
    /// running the normalizer.
    #[serde(default)]
    pub detailed_experience: Option<String>,
    /// True forces the rendered end date to the literal string "Present",
    /// regardless of what `end_date` holds.
    #[serde(default, rename = "isEndPresent")]
    pub is_end_present: bool,
    #[serde(default)]
    pub location: String,
}

impl Experience {
    /// The end date as rendered: "Present" wins over the stored value.
    pub fn display_end_date(&self) -> &str {
        if self.is_end_present {
            "Present"
        } else {
            &self.end_date
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    /// Raw multi-line bullet source; `None` renders a placeholder.
    #[serde(default)]
    pub description: Option<String>,
    /// Main technologies, shown next to the name.
    #[serde(default)]
    pub language: String,
    /// Link target for the rendered "GitHub" anchor.
    #[serde(default)]
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Comma-separated, rendered verbatim after the "Languages:" label.
    #[serde(default)]
    pub languages: String,
    /// Comma-separated, rendered verbatim after the "Frameworks:" label.
    #[serde(default)]
    pub frameworks: String,
}

/// Splits a comma-separated skill field into trimmed, non-empty items.
pub fn split_items(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins skill items back into the stored comma-separated form.
pub fn join_items(items: &[String]) -> String {
    items.join(", ")
}

/// The full editable document: all five entity sequences.
///
/// This is the unit of persistence (one JSONB document per user) and the
/// input to the renderer. Mutation happens only through the named methods
/// here and the dispatcher in `document::dispatch` — readers get snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default, rename = "personalData")]
    pub personal: Vec<Personal>,
    #[serde(default, rename = "educationData")]
    pub education: Vec<Education>,
    #[serde(default, rename = "experienceData")]
    pub experience: Vec<Experience>,
    #[serde(default, rename = "projectData")]
    pub projects: Vec<Project>,
    #[serde(default, rename = "skillsData")]
    pub skills: Vec<Skill>,
}

impl ResumeDocument {
    /// A first-load document: one blank record per entity type.
    pub fn blank() -> Self {
        ResumeDocument {
            personal: vec![Personal::default()],
            education: vec![Education::default()],
            experience: vec![Experience {
                detailed_experience: Some(String::new()),
                ..Experience::default()
            }],
            projects: vec![Project {
                description: Some(String::new()),
                ..Project::default()
            }],
            skills: vec![Skill::default()],
        }
    }

    pub fn len_of(&self, entity: EntityType) -> usize {
        match entity {
            EntityType::Personal => self.personal.len(),
            EntityType::Education => self.education.len(),
            EntityType::Experience => self.experience.len(),
            EntityType::Project => self.projects.len(),
            EntityType::Skill => self.skills.len(),
        }
    }

    /// Appends one blank record to the given sequence.
    pub fn append_blank(&mut self, entity: EntityType) {
        match entity {
            EntityType::Personal => self.personal.push(Personal::default()),
            EntityType::Education => self.education.push(Education::default()),
            EntityType::Experience => self.experience.push(Experience {
                detailed_experience: Some(String::new()),
                ..Experience::default()
            }),
            EntityType::Project => self.projects.push(Project {
                description: Some(String::new()),
                ..Project::default()
            }),
            EntityType::Skill => self.skills.push(Skill::default()),
        }
    }

    /// Removes the record at `index` (splice semantics). Returns false when
    /// the index is out of range; the sequence is untouched in that case.
    pub fn remove_at(&mut self, entity: EntityType, index: usize) -> bool {
        if index >= self.len_of(entity) {
            return false;
        }
        match entity {
            EntityType::Personal => {
                self.personal.remove(index);
            }
            EntityType::Education => {
                self.education.remove(index);
            }
            EntityType::Experience => {
                self.experience.remove(index);
            }
            EntityType::Project => {
                self.projects.remove(index);
            }
            EntityType::Skill => {
                self.skills.remove(index);
            }
        }
        true
    }

    /// Clears every record of one entity type. Immediate, not undoable.
    pub fn clear(&mut self, entity: EntityType) {
        match entity {
            EntityType::Personal => self.personal.clear(),
            EntityType::Education => self.education.clear(),
            EntityType::Experience => self.experience.clear(),
            EntityType::Project => self.projects.clear(),
            EntityType::Skill => self.skills.clear(),
        }
    }

    /// Replaces the experience and project sequences in one step — the
    /// landing point for an accepted tailoring result. Other sequences are
    /// untouched.
    pub fn replace_tailored(&mut self, experience: Vec<Experience>, projects: Vec<Project>) {
        self.experience = experience;
        self.projects = projects;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_document_has_one_record_per_entity() {
        let doc = ResumeDocument::blank();
        for entity in EntityType::ALL {
            assert_eq!(doc.len_of(entity), 1, "{entity:?} should seed one record");
        }
    }

    #[test]
    fn test_display_end_date_present_override() {
        let exp = Experience {
            end_date: "Dec 2023".to_string(),
            is_end_present: true,
            ..Experience::default()
        };
        assert_eq!(exp.display_end_date(), "Present");
    }

    #[test]
    fn test_display_end_date_without_override() {
        let exp = Experience {
            end_date: "Dec 2023".to_string(),
            is_end_present: false,
            ..Experience::default()
        };
        assert_eq!(exp.display_end_date(), "Dec 2023");
    }

    #[test]
    fn test_split_join_items_round_trip() {
        let items = split_items("React,Node.js");
        assert_eq!(items, vec!["React".to_string(), "Node.js".to_string()]);
        assert_eq!(join_items(&items), "React, Node.js");
        // Round trip is stable under re-splitting.
        assert_eq!(split_items(&join_items(&items)), items);
    }

    #[test]
    fn test_split_items_trims_and_drops_empty_tokens() {
        assert_eq!(
            split_items(" Rust , , Go ,"),
            vec!["Rust".to_string(), "Go".to_string()]
        );
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut doc = ResumeDocument::blank();
        assert!(!doc.remove_at(EntityType::Education, 5));
        assert_eq!(doc.education.len(), 1);
    }

    #[test]
    fn test_clear_empties_only_one_sequence() {
        let mut doc = ResumeDocument::blank();
        doc.clear(EntityType::Project);
        assert!(doc.projects.is_empty());
        assert_eq!(doc.experience.len(), 1);
    }

    #[test]
    fn test_replace_tailored_touches_only_experience_and_projects() {
        // Tailoring merges into the live document, which may have moved on
        // since the snapshot the tailoring ran against.
        let mut live = ResumeDocument::blank();
        live.personal[0].name = "Edited Mid-Flight".to_string();
        live.skills[0].languages = "Rust".to_string();
        live.education[0].university = "Somewhere".to_string();

        live.replace_tailored(
            vec![Experience {
                title: "Tailored".to_string(),
                ..Experience::default()
            }],
            vec![Project {
                name: "Tailored Project".to_string(),
                ..Project::default()
            }],
        );

        assert_eq!(live.experience[0].title, "Tailored");
        assert_eq!(live.projects[0].name, "Tailored Project");
        // Everything else keeps its post-snapshot edits.
        assert_eq!(live.personal[0].name, "Edited Mid-Flight");
        assert_eq!(live.skills[0].languages, "Rust");
        assert_eq!(live.education[0].university, "Somewhere");
    }

    #[test]
    fn test_missing_bullet_source_deserializes_to_none() {
        let exp: Experience =
            serde_json::from_str(r#"{"title":"Engineer","company":"Acme"}"#).unwrap();
        assert!(exp.detailed_experience.is_none());
    }

    #[test]
    fn test_is_end_present_uses_original_wire_name() {
        let exp: Experience = serde_json::from_str(r#"{"isEndPresent":true}"#).unwrap();
        assert!(exp.is_end_present);
    }
}
