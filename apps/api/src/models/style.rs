//! Style parameters — the typography inputs to the renderer.
//!
//! A `StyleParameters` value is always complete: partial updates arrive as
//! `StyleUpdate` (all fields optional) and merge into the existing set, so
//! no consumer ever sees an undefined font, color, or margin.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;

pub const MIN_FONT_SIZE: f32 = 8.0;
pub const MAX_FONT_SIZE: f32 = 14.0;
pub const MIN_MARGIN: f32 = 0.0;
pub const MAX_MARGIN: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleColors {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    fn clamped(self) -> Self {
        Margins {
            top: self.top.clamp(MIN_MARGIN, MAX_MARGIN),
            right: self.right.clamp(MIN_MARGIN, MAX_MARGIN),
            bottom: self.bottom.clamp(MIN_MARGIN, MAX_MARGIN),
            left: self.left.clamp(MIN_MARGIN, MAX_MARGIN),
        }
    }
}

/// Complete typography settings for the rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleParameters {
    pub font: FontFamily,
    #[serde(rename = "fontSize")]
    pub font_size: f32,
    pub colors: StyleColors,
    pub margins: Margins,
}

impl Default for StyleParameters {
    /// Fixed defaults: Carlito 10.5pt, black on grey rules, 30px margins.
    fn default() -> Self {
        StyleParameters {
            font: FontFamily::Carlito,
            font_size: 10.5,
            colors: StyleColors {
                primary: "#000000".to_string(),
                secondary: "#666666".to_string(),
            },
            margins: Margins {
                top: 30.0,
                right: 30.0,
                bottom: 30.0,
                left: 30.0,
            },
        }
    }
}

impl StyleParameters {
    /// Merges a partial update, clamping numeric fields into their bounds.
    /// Fields absent from the update keep their current value, so the
    /// result is always a complete parameter set.
    pub fn merge(&mut self, update: StyleUpdate) {
        if let Some(font) = update.font {
            self.font = font;
        }
        if let Some(size) = update.font_size {
            self.font_size = snap_half_step(size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE));
        }
        if let Some(primary) = update.primary_color {
            self.colors.primary = primary;
        }
        if let Some(secondary) = update.secondary_color {
            self.colors.secondary = secondary;
        }
        if let Some(margins) = update.margins {
            self.margins = margins.clamped();
        }
    }
}

/// Font size moves on a 0.5pt grid (slider step in the layout controls).
fn snap_half_step(size: f32) -> f32 {
    (size * 2.0).round() / 2.0
}

/// A partial style change: every field optional, merged by
/// [`StyleParameters::merge`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StyleUpdate {
    #[serde(default)]
    pub font: Option<FontFamily>,
    #[serde(default, rename = "fontSize")]
    pub font_size: Option<f32>,
    #[serde(default, rename = "primaryColor")]
    pub primary_color: Option<String>,
    #[serde(default, rename = "secondaryColor")]
    pub secondary_color: Option<String>,
    #[serde(default)]
    pub margins: Option<Margins>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let style = StyleParameters::default();
        assert_eq!(style.font, FontFamily::Carlito);
        assert!((style.font_size - 10.5).abs() < 1e-6);
        assert_eq!(style.colors.primary, "#000000");
        assert_eq!(style.colors.secondary, "#666666");
        assert!((style.margins.top - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_merge_partial_update_keeps_set_complete() {
        let mut style = StyleParameters::default();
        style.merge(StyleUpdate {
            font_size: Some(12.0),
            ..StyleUpdate::default()
        });
        // Only fontSize changed; everything else still defined and unchanged.
        assert!((style.font_size - 12.0).abs() < 1e-6);
        assert_eq!(style.font, FontFamily::Carlito);
        assert_eq!(style.colors.secondary, "#666666");
        assert!((style.margins.left - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_merge_sequence_of_partials() {
        let mut style = StyleParameters::default();
        style.merge(StyleUpdate {
            font: Some(FontFamily::Roboto),
            ..StyleUpdate::default()
        });
        style.merge(StyleUpdate {
            primary_color: Some("#111111".to_string()),
            ..StyleUpdate::default()
        });
        style.merge(StyleUpdate {
            margins: Some(Margins {
                top: 10.0,
                right: 10.0,
                bottom: 10.0,
                left: 10.0,
            }),
            ..StyleUpdate::default()
        });
        assert_eq!(style.font, FontFamily::Roboto);
        assert_eq!(style.colors.primary, "#111111");
        assert_eq!(style.colors.secondary, "#666666");
        assert!((style.font_size - 10.5).abs() < 1e-6);
    }

    #[test]
    fn test_font_size_clamped_and_snapped() {
        let mut style = StyleParameters::default();
        style.merge(StyleUpdate {
            font_size: Some(99.0),
            ..StyleUpdate::default()
        });
        assert!((style.font_size - MAX_FONT_SIZE).abs() < 1e-6);

        style.merge(StyleUpdate {
            font_size: Some(10.3),
            ..StyleUpdate::default()
        });
        assert!((style.font_size - 10.5).abs() < 1e-6, "snaps to 0.5 grid");
    }

    #[test]
    fn test_margins_clamped() {
        let mut style = StyleParameters::default();
        style.merge(StyleUpdate {
            margins: Some(Margins {
                top: -5.0,
                right: 200.0,
                bottom: 20.0,
                left: 0.0,
            }),
            ..StyleUpdate::default()
        });
        assert!((style.margins.top - MIN_MARGIN).abs() < 1e-6);
        assert!((style.margins.right - MAX_MARGIN).abs() < 1e-6);
        assert!((style.margins.bottom - 20.0).abs() < 1e-6);
    }
}
