//! Editable overlay: per-field rectangles over the rendered page.
//!
//! The overlay is not positioned independently — it is derived from the
//! render tree's field bindings, so every input rectangle coincides with
//! the text the renderer placed, for any font, size, or margin choice.
//! Wrapped lines and multi-bullet sources share one binding and merge into
//! a single multiline rectangle (one textarea per bullet field, exactly as
//! the form it replaces behaves).
//!
//! Presentation (transparent until hover/focus) is the client's concern;
//! the geometry and the dispatch routing below are the contract.

use serde::{Deserialize, Serialize};

use crate::layout::get_metrics;
use crate::render::tree::{FieldRef, Page};

/// Minimum width of an input over an empty field, so blank records stay
/// clickable.
const MIN_FIELD_WIDTH: f32 = 80.0;
/// Extra height under the baseline for descenders.
const DESCENT_RATIO: f32 = 0.25;

/// One editable input, absolutely positioned on the page canvas.
/// `x`/`y` are the rect's top-left corner in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayField {
    #[serde(flatten)]
    pub field: FieldRef,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub bold: bool,
    /// True when the field spans multiple rendered lines (bullet sources,
    /// wrapped text) and wants a textarea rather than a single-line input.
    pub multiline: bool,
}

/// The full overlay: page dimensions plus one entry per editable field,
/// in render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayView {
    pub width: f32,
    pub height: f32,
    pub fields: Vec<OverlayField>,
}

/// Collects the bound runs of a laid-out page into field rectangles.
pub fn overlay_from_page(page: &Page) -> OverlayView {
    let metrics = get_metrics(page.font);
    let mut fields: Vec<(FieldRef, OverlayField, usize)> = Vec::new();

    for run in &page.runs {
        let Some(binding) = &run.binding else {
            continue;
        };
        let run_width = metrics.measure_pt(&run.text, run.size);
        let top = run.y - run.size;
        let bottom = run.y + run.size * DESCENT_RATIO;
        let left = run.x;
        let right = run.x + run_width;

        match fields.iter_mut().find(|(key, _, _)| key == binding) {
            Some((_, field, run_count)) => {
                // Extend the rect to cover this run too.
                let field_right = field.x + field.width;
                field.x = field.x.min(left);
                field.width = field_right.max(right) - field.x;
                let field_bottom = field.y + field.height;
                field.y = field.y.min(top);
                field.height = field_bottom.max(bottom) - field.y;
                *run_count += 1;
                field.multiline = *run_count > 1;
            }
            None => {
                fields.push((
                    binding.clone(),
                    OverlayField {
                        field: binding.clone(),
                        x: left,
                        y: top,
                        width: (right - left).max(MIN_FIELD_WIDTH),
                        height: bottom - top,
                        font_size: run.size,
                        bold: run.bold,
                        multiline: false,
                    },
                    1,
                ));
            }
        }
    }

    OverlayView {
        width: page.width,
        height: page.height,
        fields: fields.into_iter().map(|(_, field, _)| field).collect(),
    }
}
