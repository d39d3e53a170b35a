//! Bullet-point normalization.
//!
//! Free-form multi-line text fields (detailed experience, project
//! description) arrive with stray blank lines, bare `•` lines, and
//! redundant leading glyphs — both from user paste and from LLM output.
//! `normalize_bullets` turns them into a clean ordered bullet list; the
//! renderer and the tailoring validator both run every bullet source
//! through it, so no empty or glyph-only line ever reaches the page.

const BULLET: char = '•';

/// Normalizes a raw multi-line bullet source into display bullets.
///
/// Rules, in order, per `\n`-separated line:
/// - trim surrounding whitespace
/// - drop the line if empty or a bare bullet glyph
/// - strip one leading `•` together with the whitespace after it
///
/// Original line order is preserved. Idempotent: normalizing the rejoined
/// output yields the same sequence.
pub fn normalize_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "•")
        .map(|line| match line.strip_prefix(BULLET) {
            Some(rest) => rest.trim_start().to_string(),
            None => line.to_string(),
        })
        .collect()
}

/// Normalizes an optional bullet source. `None` means the stored field is
/// missing entirely — callers render a placeholder instead of bullets.
pub fn normalize_optional(source: Option<&str>) -> Option<Vec<String>> {
    source.map(normalize_bullets)
}

/// Rejoins normalized bullets into the stored single-string form.
pub fn join_bullets(bullets: &[String]) -> String {
    bullets.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_glyphs_and_blank_lines() {
        assert_eq!(
            normalize_bullets("• First\n\n•\nSecond"),
            vec!["First".to_string(), "Second".to_string()]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(normalize_bullets("").is_empty());
    }

    #[test]
    fn test_whitespace_only_lines_dropped() {
        assert!(normalize_bullets("   \n\t\n  ").is_empty());
    }

    #[test]
    fn test_leading_glyph_stripped_with_following_whitespace() {
        assert_eq!(
            normalize_bullets("•   Shipped the thing"),
            vec!["Shipped the thing".to_string()]
        );
    }

    #[test]
    fn test_glyph_inside_line_preserved() {
        assert_eq!(
            normalize_bullets("Shipped • the thing"),
            vec!["Shipped • the thing".to_string()]
        );
    }

    #[test]
    fn test_order_preserved() {
        let bullets = normalize_bullets("• c\n• a\n• b");
        assert_eq!(bullets, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_idempotent_over_rejoin() {
        let inputs = [
            "• First\n\n•\nSecond",
            "plain line\n• bulleted line",
            "",
            "  • spaced •\n\n\n• x",
        ];
        for input in inputs {
            let once = normalize_bullets(input);
            let twice = normalize_bullets(&join_bullets(&once));
            assert_eq!(once, twice, "normalize must be idempotent for {input:?}");
        }
    }

    #[test]
    fn test_missing_source_is_no_content() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(
            normalize_optional(Some("• a")),
            Some(vec!["a".to_string()])
        );
    }
}
