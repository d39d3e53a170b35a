pub mod entities;
pub mod style;

pub use entities::{
    Education, EntityType, Experience, Personal, Project, ResumeDocument, Skill,
};
pub use style::{Margins, StyleColors, StyleParameters, StyleUpdate};
