//! Static font-metric tables for the four supported résumé fonts.
//!
//! Character widths are in em units (relative to font size). These are
//! approximations taken from the fonts' advance-width tables — good enough
//! for greedy word-wrap and right-alignment on a single résumé page, where
//! ±1–2% of line width is invisible. The renderer never needs exact glyph
//! shaping; it needs the same answer for the same input every time, which
//! static tables guarantee.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// The four selectable résumé font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Default template font — metric-compatible with Calibri.
    Carlito,
    Roboto,
    Arial,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
}

impl FontFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Carlito => "Carlito",
            FontFamily::Roboto => "Roboto",
            FontFamily::Arial => "Arial",
            FontFamily::TimesNewRoman => "Times New Roman",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one font family.
///
/// `widths[i]` = em width of ASCII character `(i + 32)`, covering 0x20
/// (space) through 0x7E (~). Non-ASCII characters fall back to
/// `average_char_width`.
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Measures a string in points at the given font size.
    pub fn measure_pt(&self, s: &str, font_size: f32) -> f32 {
        self.measure_str(s) * font_size
    }

    /// Greedy word-wrap: breaks `text` into lines no wider than
    /// `max_width_pt` at `font_size`. A word wider than the line gets a
    /// line of its own rather than being split. Empty input yields no
    /// lines.
    pub fn wrap(&self, text: &str, font_size: f32, max_width_pt: f32) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return vec![];
        }

        let space_w = self.space_width * font_size;
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in words {
            let word_w = self.measure_pt(word, font_size);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width_pt {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }
        lines.push(current);
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Carlito — Calibri-compatible humanist sans (default template font).
static CARLITO_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Carlito,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.226, 0.326, 0.401, 0.498, 0.507, 0.715, 0.682, 0.221, 0.303, 0.303, 0.498, 0.498, 0.250, 0.306, 0.252, 0.386,
        // 0      1      2      3      4      5      6      7      8      9
        0.507, 0.507, 0.507, 0.507, 0.507, 0.507, 0.507, 0.507, 0.507, 0.507,
        // :      ;      <      =      >      ?      @
        0.268, 0.268, 0.498, 0.498, 0.498, 0.463, 0.894,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.579, 0.544, 0.533, 0.615, 0.488, 0.459, 0.631, 0.623, 0.252, 0.319, 0.520, 0.420, 0.855,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.646, 0.662, 0.517, 0.673, 0.543, 0.459, 0.487, 0.642, 0.567, 0.890, 0.519, 0.487, 0.468,
        // [      \      ]      ^      _      `
        0.307, 0.386, 0.307, 0.498, 0.498, 0.291,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.479, 0.525, 0.423, 0.525, 0.498, 0.305, 0.471, 0.525, 0.229, 0.239, 0.455, 0.229, 0.799,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.525, 0.527, 0.525, 0.525, 0.349, 0.391, 0.335, 0.525, 0.452, 0.715, 0.433, 0.453, 0.395,
        // {      |      }      ~
        0.314, 0.460, 0.314, 0.498,
    ],
    average_char_width: 0.479,
    space_width: 0.226,
};

/// Roboto — neo-grotesque sans. Slightly narrower than Arial overall.
static ROBOTO_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Roboto,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.248, 0.257, 0.320, 0.616, 0.562, 0.732, 0.622, 0.174, 0.342, 0.348, 0.431, 0.567, 0.196, 0.276, 0.263, 0.412,
        // 0      1      2      3      4      5      6      7      8      9
        0.562, 0.562, 0.562, 0.562, 0.562, 0.562, 0.562, 0.562, 0.562, 0.562,
        // :      ;      <      =      >      ?      @
        0.242, 0.211, 0.509, 0.549, 0.523, 0.472, 0.898,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.652, 0.623, 0.651, 0.656, 0.568, 0.553, 0.681, 0.713, 0.272, 0.552, 0.627, 0.538, 0.874,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.713, 0.688, 0.631, 0.688, 0.616, 0.593, 0.597, 0.648, 0.636, 0.888, 0.627, 0.600, 0.599,
        // [      \      ]      ^      _      `
        0.265, 0.410, 0.265, 0.418, 0.451, 0.309,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.544, 0.561, 0.524, 0.564, 0.530, 0.347, 0.561, 0.551, 0.243, 0.239, 0.507, 0.243, 0.876,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.552, 0.570, 0.561, 0.568, 0.338, 0.516, 0.327, 0.551, 0.484, 0.751, 0.496, 0.473, 0.496,
        // {      |      }      ~
        0.339, 0.244, 0.339, 0.680,
    ],
    average_char_width: 0.513,
    space_width: 0.248,
};

/// Arial — Helvetica-metric grotesque sans.
static ARIAL_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Arial,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.513,
    space_width: 0.278,
};

/// Times New Roman — transitional serif, Times-metric.
static TIMES_NEW_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::TimesNewRoman,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.443,
    space_width: 0.250,
};

/// Returns the static metric table for a font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Carlito => &CARLITO_TABLE,
        FontFamily::Roboto => &ROBOTO_TABLE,
        FontFamily::Arial => &ARIAL_TABLE,
        FontFamily::TimesNewRoman => &TIMES_NEW_ROMAN_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFamily::Carlito).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_space() {
        let metrics = get_metrics(FontFamily::Arial);
        assert!((metrics.measure_str(" ") - 0.278).abs() < 1e-4);
    }

    #[test]
    fn test_measure_pt_scales_with_size() {
        let metrics = get_metrics(FontFamily::Carlito);
        let at_10 = metrics.measure_pt("Engineer", 10.0);
        let at_14 = metrics.measure_pt("Engineer", 14.0);
        assert!((at_14 / at_10 - 1.4).abs() < 1e-4);
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(FontFamily::Roboto);
        assert!((metrics.measure_str("é") - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_empty_yields_no_lines() {
        let metrics = get_metrics(FontFamily::Carlito);
        assert!(metrics.wrap("", 10.5, 550.0).is_empty());
        assert!(metrics.wrap("   ", 10.5, 550.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let metrics = get_metrics(FontFamily::Carlito);
        let lines = metrics.wrap("Built a parser", 10.5, 550.0);
        assert_eq!(lines, vec!["Built a parser".to_string()]);
    }

    #[test]
    fn test_wrap_long_text_multiple_lines() {
        let metrics = get_metrics(FontFamily::Carlito);
        let text = "word ".repeat(60);
        let lines = metrics.wrap(text.trim(), 10.5, 200.0);
        assert!(lines.len() > 1, "60 words must wrap at 200pt");
        for line in &lines {
            assert!(
                metrics.measure_pt(line, 10.5) <= 200.0 + 1e-3,
                "line {line:?} exceeds the wrap width"
            );
        }
    }

    #[test]
    fn test_wrap_preserves_all_words_in_order() {
        let metrics = get_metrics(FontFamily::TimesNewRoman);
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let lines = metrics.wrap(text, 12.0, 80.0);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_oversized_word_gets_its_own_line() {
        let metrics = get_metrics(FontFamily::Arial);
        let lines = metrics.wrap("a Supercalifragilisticexpialidocious b", 12.0, 40.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Supercalifragilisticexpialidocious");
    }

    #[test]
    fn test_serif_narrower_than_grotesque_for_lowercase() {
        let text = "engineering experience";
        let times = get_metrics(FontFamily::TimesNewRoman).measure_str(text);
        let arial = get_metrics(FontFamily::Arial).measure_str(text);
        assert!(times < arial);
    }

    #[test]
    fn test_font_family_wire_names() {
        assert_eq!(
            serde_json::to_string(&FontFamily::TimesNewRoman).unwrap(),
            "\"Times New Roman\""
        );
        let font: FontFamily = serde_json::from_str("\"Carlito\"").unwrap();
        assert_eq!(font, FontFamily::Carlito);
    }
}
