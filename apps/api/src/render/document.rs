//! The document renderer: five entity sequences + style parameters → one
//! laid-out LETTER page.
//!
//! Layout is a pure function — no I/O, no clock, no randomness — so two
//! calls with equal inputs produce structurally identical trees. That
//! purity is what makes PDF export byte-reproducible and lets the overlay
//! trust the geometry it derives from the runs.
//!
//! Template (fixed, typography parametrized): header block with a
//! right-aligned contact column, then Education, Work Experience,
//! Projects, and Skills sections, each introduced by a secondary-colored
//! label and rule.

use crate::layout::bullets::normalize_optional;
use crate::layout::font_metrics::{get_metrics, FontMetricTable};
use crate::models::{
    Education, EntityType, Experience, Personal, Project, ResumeDocument, Skill, StyleParameters,
};
use crate::render::tree::{FieldRef, Page, Rule, TextRun, PAGE_HEIGHT, PAGE_WIDTH};

/// Fixed size of the personal-name header.
const NAME_SIZE: f32 = 22.0;
/// Fixed size of section labels ("Education", "Skills", ...).
const SECTION_LABEL_SIZE: f32 = 14.0;
/// In-row sub-headers (university, job title, project name) relative to body.
const SUB_HEADER_DELTA: f32 = 1.5;
/// Vertical gap after each text line.
const LINE_GAP: f32 = 2.0;
/// Vertical gap after each section and after the header block.
const SECTION_GAP: f32 = 5.0;
/// Gap between a bullet glyph and its text, and between contact-row items.
const INLINE_GAP: f32 = 4.0;
/// Indent of bullet text past the glyph.
const BULLET_TEXT_GAP: f32 = 5.0;
/// Gap between a section label and the start of its rule.
const RULE_GAP: f32 = 5.0;

/// Shown when a bullet-source field is missing from the stored record.
pub const MISSING_EXPERIENCE_TEXT: &str = "No detailed experience available";
pub const MISSING_DESCRIPTION_TEXT: &str = "No project description available";

/// Line advance for a given font size.
fn line_height(size: f32) -> f32 {
    size * 1.15 + LINE_GAP
}

/// Lays out the full document. Pure; never panics on missing data —
/// absent records simply render nothing and absent fields render empty.
pub fn layout_document(doc: &ResumeDocument, style: &StyleParameters) -> Page {
    let mut ctx = LayoutContext::new(style);

    ctx.header(doc.personal.first());

    ctx.section_label("Education");
    for (index, education) in doc.education.iter().enumerate() {
        ctx.education_row(index, education);
    }
    ctx.end_section();

    ctx.section_label("Work Experience");
    for (index, experience) in doc.experience.iter().enumerate() {
        ctx.experience_row(index, experience);
    }
    ctx.end_section();

    ctx.section_label("Projects");
    for (index, project) in doc.projects.iter().enumerate() {
        ctx.project_row(index, project);
    }
    ctx.end_section();

    ctx.section_label("Skills");
    for (index, skill) in doc.skills.iter().enumerate() {
        ctx.skill_row(index, skill);
    }

    ctx.finish()
}

/// Cursor-based layout state for one page.
struct LayoutContext<'a> {
    style: &'a StyleParameters,
    metrics: &'static FontMetricTable,
    /// Current vertical cursor, measured from the page top.
    y: f32,
    left: f32,
    right: f32,
    runs: Vec<TextRun>,
    rules: Vec<Rule>,
}

impl<'a> LayoutContext<'a> {
    fn new(style: &'a StyleParameters) -> Self {
        LayoutContext {
            style,
            metrics: get_metrics(style.font),
            y: style.margins.top,
            left: style.margins.left,
            right: PAGE_WIDTH - style.margins.right,
            runs: Vec::new(),
            rules: Vec::new(),
        }
    }

    fn content_width(&self) -> f32 {
        self.right - self.left
    }

    fn body_size(&self) -> f32 {
        self.style.font_size
    }

    fn sub_header_size(&self) -> f32 {
        self.style.font_size + SUB_HEADER_DELTA
    }

    fn primary(&self) -> String {
        self.style.colors.primary.clone()
    }

    fn secondary(&self) -> String {
        self.style.colors.secondary.clone()
    }

    fn push_run(
        &mut self,
        x: f32,
        baseline: f32,
        size: f32,
        bold: bool,
        text: &str,
        binding: Option<FieldRef>,
    ) {
        self.runs.push(TextRun {
            x,
            y: baseline,
            size,
            bold,
            underline: false,
            color: self.primary(),
            text: text.to_string(),
            link: None,
            binding,
        });
    }

    fn measure(&self, text: &str, size: f32) -> f32 {
        self.metrics.measure_pt(text, size)
    }

    // ── Header block ────────────────────────────────────────────────────

    /// Name, contact row, and the right-aligned website/github/linkedin
    /// column. The personal record is a singleton at index 0; a missing
    /// record renders an empty (but still editable) header.
    fn header(&mut self, personal: Option<&Personal>) {
        let blank = Personal::default();
        let p = personal.unwrap_or(&blank);
        let body = self.body_size();

        // Large bold name.
        let name_baseline = self.y + NAME_SIZE;
        self.push_run(
            self.left,
            name_baseline,
            NAME_SIZE,
            true,
            &p.name,
            Some(FieldRef::new(EntityType::Personal, 0, "name")),
        );

        // Horizontal contact row: phone, "city,", state, email.
        let contact_baseline = name_baseline + LINE_GAP + body;
        let city_display = format!("{},", p.city);
        let mut x = self.left;
        let items: [(&str, &str); 4] = [
            (&p.phone, "phone"),
            (&city_display, "city"),
            (&p.state, "state"),
            (&p.email, "email"),
        ];
        for (text, field) in items {
            self.push_run(
                x,
                contact_baseline,
                body,
                false,
                text,
                Some(FieldRef::new(EntityType::Personal, 0, field)),
            );
            x += self.measure(text, body) + INLINE_GAP;
        }

        // Right-aligned column: website, github, linkedin.
        let mut right_baseline = self.y + body;
        for (text, field) in [
            (&p.website, "website"),
            (&p.github, "github"),
            (&p.linkedin, "linkedin"),
        ] {
            let x = self.right - self.measure(text, body);
            self.push_run(
                x,
                right_baseline,
                body,
                false,
                text,
                Some(FieldRef::new(EntityType::Personal, 0, field)),
            );
            right_baseline += line_height(body);
        }

        let left_bottom = contact_baseline + LINE_GAP;
        let right_bottom = self.y + 3.0 * line_height(body);
        self.y = left_bottom.max(right_bottom) + SECTION_GAP;
    }

    // ── Sections ────────────────────────────────────────────────────────

    /// Bold secondary label followed by a rule running to the right margin.
    fn section_label(&mut self, label: &str) {
        let baseline = self.y + SECTION_LABEL_SIZE;
        self.runs.push(TextRun {
            x: self.left,
            y: baseline,
            size: SECTION_LABEL_SIZE,
            bold: true,
            underline: false,
            color: self.secondary(),
            text: label.to_string(),
            link: None,
            binding: None,
        });
        let rule_x = self.left + self.measure(label, SECTION_LABEL_SIZE) + RULE_GAP;
        self.rules.push(Rule {
            x: rule_x,
            y: baseline,
            width: (self.right - rule_x).max(0.0),
            color: self.secondary(),
        });
        self.y = baseline + LINE_GAP * 2.0;
    }

    fn end_section(&mut self) {
        self.y += SECTION_GAP;
    }

    /// A start/middle/end row: left text at the margin, middle text
    /// centered, right text against the right margin. The row takes the
    /// height of its largest member (the left sub-header).
    fn top_line(
        &mut self,
        left: (&str, f32, bool, FieldRef),
        middle: (&str, f32, bool, FieldRef),
        right_runs: Vec<(String, f32, bool, Option<FieldRef>)>,
    ) {
        let row_size = left.1;
        let baseline = self.y + row_size;

        let (text, size, bold, binding) = left;
        self.push_run(self.left, baseline, size, bold, text, Some(binding));

        let (text, size, bold, binding) = middle;
        let mid_x = self.left + (self.content_width() - self.measure(text, size)) / 2.0;
        self.push_run(mid_x, baseline, size, bold, text, Some(binding));

        // Right group laid out right-to-left so it ends at the margin.
        let total: f32 = right_runs
            .iter()
            .map(|(text, size, _, _)| self.measure(text, *size))
            .sum::<f32>()
            + INLINE_GAP * (right_runs.len().saturating_sub(1)) as f32;
        let mut x = self.right - total;
        for (text, size, bold, binding) in right_runs {
            self.push_run(x, baseline, size, bold, &text, binding);
            x += self.measure(&text, size) + INLINE_GAP;
        }

        self.y = baseline + LINE_GAP;
    }

    /// Body text wrapped to an arbitrary column. Every wrapped line carries
    /// the same binding so the overlay can merge them into one field rect.
    fn wrapped_text(&mut self, x: f32, width: f32, text: &str, binding: Option<FieldRef>) {
        let body = self.body_size();
        let lines = self.metrics.wrap(text, body, width.max(1.0));
        if lines.is_empty() {
            // Keep empty fields on the page so they stay editable.
            let baseline = self.y + body;
            self.push_run(x, baseline, body, false, "", binding);
            self.y = baseline + LINE_GAP;
            return;
        }
        for line in lines {
            let baseline = self.y + body;
            self.push_run(x, baseline, body, false, &line, binding.clone());
            self.y = baseline + LINE_GAP;
        }
    }

    /// Bullet list: one glyph run + wrapped text per normalized bullet.
    /// `None` source renders the placeholder instead.
    fn bullet_block(
        &mut self,
        source: Option<&str>,
        placeholder: &'static str,
        binding: FieldRef,
    ) {
        let body = self.body_size();
        let Some(bullets) = normalize_optional(source) else {
            self.wrapped_text(self.left, self.content_width(), placeholder, None);
            return;
        };
        let glyph_w = self.measure("•", body);
        let text_x = self.left + glyph_w + BULLET_TEXT_GAP;
        let text_w = self.right - text_x;
        for bullet in bullets {
            let glyph_baseline = self.y + body;
            self.push_run(self.left, glyph_baseline, body, false, "•", None);
            self.wrapped_text(text_x, text_w, &bullet, Some(binding.clone()));
        }
    }

    // ── Rows ────────────────────────────────────────────────────────────

    fn education_row(&mut self, index: usize, education: &Education) {
        let body = self.body_size();
        let major_level = format!("{}, {}", education.major, education.level);
        self.top_line(
            (
                &education.university,
                self.sub_header_size(),
                true,
                FieldRef::new(EntityType::Education, index, "university"),
            ),
            (
                &major_level,
                body,
                true,
                FieldRef::new(EntityType::Education, index, "major"),
            ),
            vec![(
                education.graduation_date.clone(),
                body,
                false,
                Some(FieldRef::new(
                    EntityType::Education,
                    index,
                    "graduation_date",
                )),
            )],
        );
        let coursework = format!("Coursework: {}", education.coursework);
        self.wrapped_text(
            self.left,
            self.content_width(),
            &coursework,
            Some(FieldRef::new(EntityType::Education, index, "coursework")),
        );
    }

    fn experience_row(&mut self, index: usize, experience: &Experience) {
        let body = self.body_size();
        let end_display = experience.display_end_date().to_string();
        let mut right_runs: Vec<(String, f32, bool, Option<FieldRef>)> = vec![
            (
                experience.start_date.clone(),
                body,
                false,
                Some(FieldRef::new(EntityType::Experience, index, "start_date")),
            ),
            ("-".to_string(), body, false, None),
        ];
        // "Present" is an override display, not the stored value — only a
        // real end date is editable in place.
        right_runs.push((
            end_display,
            body,
            false,
            if experience.is_end_present {
                None
            } else {
                Some(FieldRef::new(EntityType::Experience, index, "end_date"))
            },
        ));

        self.top_line(
            (
                &experience.title,
                self.sub_header_size(),
                true,
                FieldRef::new(EntityType::Experience, index, "title"),
            ),
            (
                &experience.company,
                body,
                true,
                FieldRef::new(EntityType::Experience, index, "company"),
            ),
            right_runs,
        );

        self.bullet_block(
            experience.detailed_experience.as_deref(),
            MISSING_EXPERIENCE_TEXT,
            FieldRef::new(EntityType::Experience, index, "detailed_experience"),
        );
    }

    fn project_row(&mut self, index: usize, project: &Project) {
        let body = self.body_size();
        let sub = self.sub_header_size();
        let baseline = self.y + sub;

        let name_display = format!("{} -", project.name);
        self.push_run(
            self.left,
            baseline,
            sub,
            true,
            &name_display,
            Some(FieldRef::new(EntityType::Project, index, "name")),
        );
        let lang_x = self.left + self.measure(&name_display, sub) + INLINE_GAP;
        self.push_run(
            lang_x,
            baseline,
            body,
            false,
            &project.language,
            Some(FieldRef::new(EntityType::Project, index, "language")),
        );

        // Right-aligned underlined link labeled "GitHub".
        let label = "GitHub";
        let link_x = self.right - self.measure(label, body);
        self.runs.push(TextRun {
            x: link_x,
            y: baseline,
            size: body,
            bold: false,
            underline: true,
            color: self.primary(),
            text: label.to_string(),
            link: Some(project.github.clone()),
            binding: None,
        });
        self.y = baseline + LINE_GAP;

        self.bullet_block(
            project.description.as_deref(),
            MISSING_DESCRIPTION_TEXT,
            FieldRef::new(EntityType::Project, index, "description"),
        );
    }

    /// Two label/value pairs; labels occupy a fixed 25% column, values wrap
    /// in the remaining 75%.
    fn skill_row(&mut self, index: usize, skill: &Skill) {
        let body = self.body_size();
        let value_x = self.left + self.content_width() * 0.25;
        let value_w = self.right - value_x;

        for (label, value, field) in [
            ("Languages:", &skill.languages, "languages"),
            ("Frameworks:", &skill.frameworks, "frameworks"),
        ] {
            let baseline = self.y + body;
            self.push_run(self.left, baseline, body, true, label, None);
            self.wrapped_text(
                value_x,
                value_w,
                value,
                Some(FieldRef::new(EntityType::Skill, index, field)),
            );
        }
    }

    fn finish(self) -> Page {
        Page {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            font: self.style.font,
            runs: self.runs,
            rules: self.rules,
        }
    }
}
