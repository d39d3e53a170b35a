//! The render tree: the structured output of the document renderer.
//!
//! A `Page` is a flat list of absolutely positioned text runs and
//! horizontal rules on a fixed LETTER-sized canvas. It is the single
//! source of geometry for both consumers: the PDF serializer draws it,
//! and the editable overlay derives its field rectangles from the runs'
//! bindings — which is what keeps the two views coincident by
//! construction.

use serde::{Deserialize, Serialize};

use crate::models::EntityType;

/// LETTER page, 1pt = 1px at 72dpi — the logical page dimensions shared
/// by the renderer, the overlay, and the PDF output.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

/// Ties a rendered run back to the data-model field it displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub entity: EntityType,
    pub index: usize,
    pub field: String,
}

impl FieldRef {
    pub fn new(entity: EntityType, index: usize, field: &str) -> Self {
        FieldRef {
            entity,
            index,
            field: field.to_string(),
        }
    }
}

/// One positioned piece of text. `y` is the baseline, measured from the
/// top of the page; `x` is the left edge of the first glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub underline: bool,
    /// Hex color, e.g. "#000000".
    pub color: String,
    pub text: String,
    /// URI target when this run is a clickable link.
    pub link: Option<String>,
    /// Set when the run displays an editable data-model field.
    pub binding: Option<FieldRef>,
}

/// A 1pt horizontal rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub color: String,
}

/// A single laid-out page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub font: crate::layout::FontFamily,
    pub runs: Vec<TextRun>,
    pub rules: Vec<Rule>,
}
