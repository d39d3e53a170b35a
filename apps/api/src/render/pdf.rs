//! Minimal deterministic PDF serializer for the render tree.
//!
//! Emits a single-page PDF 1.4 document: one content stream of text and
//! rectangle operators, two Type1 font resources (regular/bold mapped to
//! the closest base-14 face), and one link annotation per clickable run.
//! No timestamps, no document IDs, no compression — serialization is a
//! pure function of the page, so equal render trees produce byte-equal
//! files. That property is load-bearing: exports are cached and diffed by
//! content.

use crate::layout::get_metrics;
use crate::layout::font_metrics::FontFamily;
use crate::render::tree::{Page, Rule, TextRun};

/// Thickness of section rules and link underlines.
const RULE_THICKNESS: f32 = 1.0;

/// Base-14 faces standing in for the web fonts. Carlito and Roboto are
/// sans faces with Helvetica-class metrics; Times New Roman maps to
/// Times-Roman.
fn base_fonts(font: FontFamily) -> (&'static str, &'static str) {
    match font {
        FontFamily::Carlito | FontFamily::Roboto | FontFamily::Arial => {
            ("Helvetica", "Helvetica-Bold")
        }
        FontFamily::TimesNewRoman => ("Times-Roman", "Times-Bold"),
    }
}

/// Serializes a laid-out page to PDF bytes. Pure and infallible.
pub fn serialize_pdf(page: &Page) -> Vec<u8> {
    let (regular, bold) = base_fonts(page.font);
    let content = content_stream(page);
    let links: Vec<&TextRun> = page
        .runs
        .iter()
        .filter(|r| r.link.is_some() && !r.text.is_empty())
        .collect();

    let mut writer = PdfWriter::new();

    // Object numbers are fixed: 1 catalog, 2 pages, 3 page, 4 content,
    // 5 regular font, 6 bold font, 7.. link annotations.
    let annot_refs: Vec<String> = (0..links.len()).map(|i| format!("{} 0 R", 7 + i)).collect();
    let annots = if annot_refs.is_empty() {
        String::new()
    } else {
        format!(" /Annots [{}]", annot_refs.join(" "))
    };

    writer.object(1, "<< /Type /Catalog /Pages 2 0 R >>");
    writer.object(2, "<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    writer.object(
        3,
        &format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 5 0 R /F2 6 0 R >> >> /Contents 4 0 R{} >>",
            fmt(page.width),
            fmt(page.height),
            annots
        ),
    );
    writer.stream_object(4, content.as_bytes());
    writer.object(
        5,
        &format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{regular} /Encoding /WinAnsiEncoding >>"
        ),
    );
    writer.object(
        6,
        &format!("<< /Type /Font /Subtype /Type1 /BaseFont /{bold} /Encoding /WinAnsiEncoding >>"),
    );

    let metrics = get_metrics(page.font);
    for (i, run) in links.iter().enumerate() {
        let width = metrics.measure_pt(&run.text, run.size);
        let x1 = run.x;
        let y1 = page.height - run.y - run.size * 0.25;
        let x2 = run.x + width;
        let y2 = page.height - run.y + run.size;
        let uri = run.link.as_deref().unwrap_or_default();
        writer.object(
            7 + i,
            &format!(
                "<< /Type /Annot /Subtype /Link /Rect [{} {} {} {}] /Border [0 0 0] \
                 /A << /S /URI /URI ({}) >> >>",
                fmt(x1),
                fmt(y1),
                fmt(x2),
                fmt(y2),
                escape_string(uri)
            ),
        );
    }

    writer.finish()
}

/// Builds the page content stream: rules as filled rectangles, runs as
/// positioned `Tj` text. Coordinates flip from top-left page space to
/// PDF's bottom-left space here and nowhere else.
fn content_stream(page: &Page) -> String {
    let metrics = get_metrics(page.font);
    let mut ops = String::new();

    for rule in &page.rules {
        push_rule(&mut ops, page.height, rule);
    }

    for run in &page.runs {
        if run.text.is_empty() {
            continue;
        }
        let (r, g, b) = parse_hex(&run.color);
        let font = if run.bold { "/F2" } else { "/F1" };
        let baseline = page.height - run.y;
        ops.push_str(&format!(
            "BT {font} {} Tf {} {} {} rg {} {} Td ({}) Tj ET\n",
            fmt(run.size),
            fmt(r),
            fmt(g),
            fmt(b),
            fmt(run.x),
            fmt(baseline),
            escape_string(&run.text),
        ));
        if run.underline {
            let width = metrics.measure_pt(&run.text, run.size);
            push_rule(
                &mut ops,
                page.height,
                &Rule {
                    x: run.x,
                    y: run.y + 1.5,
                    width,
                    color: run.color.clone(),
                },
            );
        }
    }

    ops
}

fn push_rule(ops: &mut String, page_height: f32, rule: &Rule) {
    let (r, g, b) = parse_hex(&rule.color);
    ops.push_str(&format!(
        "{} {} {} rg {} {} {} {} re f\n",
        fmt(r),
        fmt(g),
        fmt(b),
        fmt(rule.x),
        fmt(page_height - rule.y),
        fmt(rule.width),
        fmt(RULE_THICKNESS),
    ));
}

/// Fixed two-decimal formatting keeps the byte output independent of any
/// float display heuristics.
fn fmt(v: f32) -> String {
    format!("{v:.2}")
}

/// Parses `#rrggbb` into unit RGB. Malformed colors — wrong length,
/// non-hex characters, multibyte input — fall back to black rather than
/// failing the export. Colors are user input and arrive unvalidated.
fn parse_hex(color: &str) -> (f32, f32, f32) {
    let hex = color.trim_start_matches('#').as_bytes();
    if hex.len() != 6 || !hex.iter().all(|b| b.is_ascii_hexdigit()) {
        return (0.0, 0.0, 0.0);
    }
    let channel = |i: usize| {
        let high = (hex[i] as char).to_digit(16).unwrap_or(0);
        let low = (hex[i + 1] as char).to_digit(16).unwrap_or(0);
        (high * 16 + low) as f32 / 255.0
    };
    (channel(0), channel(2), channel(4))
}

/// Escapes a PDF literal string. The content stream is one byte per
/// character under /WinAnsiEncoding, so the U+0080–U+00FF range is emitted
/// as a single octal-escaped byte, never as multi-byte UTF-8. Characters
/// outside Latin-1 become '?' — the base-14 fonts cannot encode them.
fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 128 => out.push(c),
            c if (c as u32) < 256 => out.push_str(&format!("\\{:03o}", c as u32)),
            '•' => out.push_str("\\267"), // WinAnsi middle-dot stand-in
            _ => out.push('?'),
        }
    }
    out
}

/// Object-by-object PDF writer that records byte offsets for the xref
/// table.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn new() -> Self {
        PdfWriter {
            buf: b"%PDF-1.4\n".to_vec(),
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, number: usize, body: &str) {
        self.offsets.push((number, self.buf.len()));
        self.buf
            .extend_from_slice(format!("{number} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn stream_object(&mut self, number: usize, data: &[u8]) {
        self.offsets.push((number, self.buf.len()));
        self.buf.extend_from_slice(
            format!("{number} 0 obj\n<< /Length {} >>\nstream\n", data.len()).as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"endstream\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        self.offsets.sort_by_key(|(number, _)| *number);
        let count = self.offsets.len() + 1;
        let xref_start = self.buf.len();

        let mut xref = format!("xref\n0 {count}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf.extend_from_slice(
            format!(
                "trailer\n<< /Size {count} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n"
            )
            .as_bytes(),
        );
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResumeDocument, StyleParameters};
    use crate::render::document::layout_document;

    fn sample_page_doc() -> ResumeDocument {
        let mut doc = ResumeDocument::blank();
        doc.personal[0].name = "Byte Reproducible".to_string();
        doc.projects[0].name = "Exporter".to_string();
        doc.projects[0].github = "https://example.com/(repo)".to_string();
        doc
    }

    fn sample_page() -> Page {
        layout_document(&sample_page_doc(), &StyleParameters::default())
    }

    #[test]
    fn test_export_is_byte_reproducible() {
        let page = sample_page();
        assert_eq!(serialize_pdf(&page), serialize_pdf(&page));
    }

    #[test]
    fn test_header_and_trailer_present() {
        let bytes = serialize_pdf(&sample_page());
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_link_annotation_escapes_parentheses() {
        let bytes = serialize_pdf(&sample_page());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/S /URI /URI (https://example.com/\\(repo\\))"));
    }

    #[test]
    fn test_times_font_selected_for_times_new_roman() {
        let mut style = StyleParameters::default();
        style.font = crate::layout::FontFamily::TimesNewRoman;
        let page = layout_document(&ResumeDocument::blank(), &style);
        let bytes = serialize_pdf(&page);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/BaseFont /Times-Roman"));
        assert!(text.contains("/BaseFont /Times-Bold"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = serialize_pdf(&sample_page());
        let text = String::from_utf8_lossy(&bytes);
        // Every non-free xref entry must point at an "N 0 obj" header.
        let xref_at = text.rfind("xref\n").unwrap();
        for line in text[xref_at..].lines().skip(2) {
            let Some(offset_str) = line.strip_suffix(" 00000 n ") else {
                break;
            };
            let offset: usize = offset_str.trim().parse().unwrap();
            assert!(text[offset..].contains("obj"));
            assert!(text[offset..offset + 12].contains(" 0 obj"));
        }
    }

    #[test]
    fn test_parse_hex_channels() {
        assert_eq!(parse_hex("#000000"), (0.0, 0.0, 0.0));
        let (r, g, b) = parse_hex("#ff8000");
        assert!((r - 1.0).abs() < 1e-6);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert!(b.abs() < 1e-6);
        assert_eq!(parse_hex("nonsense"), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_multibyte_color_falls_back_to_black() {
        // A six-byte color holding a multibyte char must not slice mid
        // character; it is malformed and renders black.
        assert_eq!(parse_hex("#a\u{2022}cd"), (0.0, 0.0, 0.0));
        assert_eq!(parse_hex("#gg5500"), (0.0, 0.0, 0.0));

        let mut style = StyleParameters::default();
        style.colors.primary = "#a\u{2022}cd".to_string();
        let page = layout_document(&sample_page_doc(), &style);
        let bytes = serialize_pdf(&page);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("0.00 0.00 0.00 rg"));
    }

    #[test]
    fn test_latin1_text_emits_single_winansi_bytes() {
        assert_eq!(escape_string("résumé"), "r\\351sum\\351");
        assert_eq!(escape_string("plain"), "plain");
        // Outside Latin-1 still degrades to '?'.
        assert_eq!(escape_string("汉"), "?");
    }

    #[test]
    fn test_empty_runs_skipped_in_content() {
        // A blank document has many empty bound runs; none should emit Tj.
        let page = layout_document(&ResumeDocument::blank(), &StyleParameters::default());
        let stream = content_stream(&page);
        for line in stream.lines() {
            if line.contains("Tj") {
                assert!(!line.contains("() Tj"), "empty text run leaked: {line}");
            }
        }
    }
}
