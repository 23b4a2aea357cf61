//! Document layout engine: validated record → paginated [`Document`].
//!
//! Layout is a pure function of the record, the form and the generation date.
//! Content flows down a single cursor on A4 pages; a new page is started only
//! between sections, once the cursor has passed [`PAGE_BREAK_Y_MM`]. The
//! footer is stamped on every page after all content has been placed.
//!
//! ```text
//!  y=25  ClearCue                     (brand, page 1 only)
//!  y=35  Skin Diagnosis Report        (title)
//!  y=45  Generated on: 3/14/2025
//!  y=55  ┌ disclaimer / skin type + goals
//!        │ SECTION TITLE
//!        │ body …
//!  y=280 └ footer                     (every page)
//! ```

pub mod document;
pub mod pdf;
pub mod sections;
pub mod wrap;

use crate::error::ClearCueError;
use crate::record::{FormData, Mode, RenderRequest, SkincareForm};
use chrono::{Local, NaiveDate};
use document::{Document, Page, TextColor, TextRun, TextStyle};
use sections::{sections_for, SectionContent};
use tracing::debug;
use wrap::{line_capacity, wrap_text};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_LEFT_MM: f32 = 20.0;
pub const CONTENT_WIDTH_MM: f32 = 170.0;

/// Cursor position where body content starts on page 1.
pub const CONTENT_START_Y_MM: f32 = 55.0;
/// A section starting below this line goes to a fresh page.
pub const PAGE_BREAK_Y_MM: f32 = 250.0;
/// Cursor position on continuation pages.
pub const CONTINUATION_Y_MM: f32 = 20.0;
pub const FOOTER_Y_MM: f32 = 280.0;
/// Vertical advance per wrapped line.
pub const LINE_STEP_MM: f32 = 4.0;

pub const BRAND_MARK: &str = "ClearCue";
pub const DISCLAIMER_HEADING: &str = "IMPORTANT MEDICAL DISCLAIMER";
pub const DISCLAIMER_TEXT: &str = "This AI analysis is for informational purposes only and should not replace professional medical advice. For persistent, severe, or concerning skin conditions, please consult a qualified dermatologist or healthcare provider.";

const BRAND_STYLE: TextStyle = TextStyle::bold(20.0).with_color(TextColor::BRAND_INDIGO);
const TITLE_STYLE: TextStyle = TextStyle::regular(14.0);
const DATE_STYLE: TextStyle = TextStyle::regular(9.0).with_color(TextColor::MUTED_GREY);
const DISCLAIMER_HEADING_STYLE: TextStyle =
    TextStyle::bold(11.0).with_color(TextColor::WARNING_AMBER);
const DISCLAIMER_STYLE: TextStyle = TextStyle::regular(8.0);
const META_STYLE: TextStyle = TextStyle::regular(10.0);
const SECTION_TITLE_STYLE: TextStyle = TextStyle::bold(12.0);
const BODY_STYLE: TextStyle = TextStyle::regular(9.0);
const FOOTER_STYLE: TextStyle = TextStyle::regular(7.0).with_color(TextColor::FOOTER_GREY);

/// Closing line printed at the bottom of every page.
pub fn footer_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Diagnosis => "This comprehensive analysis is generated by ClearCue AI. Always consult healthcare professionals for medical concerns.",
        Mode::SkincarePlan => "This personalized skincare plan is generated by ClearCue AI. Results may vary based on individual skin conditions.",
    }
}

/// Lay out `request`, dated today in local time.
pub fn render(request: &RenderRequest) -> Result<Document, ClearCueError> {
    render_on(request, Local::now().date_naive())
}

/// Lay out `request` with an explicit generation date.
///
/// # Errors
/// [`ClearCueError::Render`] when the record or the form belongs to a
/// different mode than `request.mode`.
pub fn render_on(request: &RenderRequest, date: NaiveDate) -> Result<Document, ClearCueError> {
    let mode = request.mode;
    if request.record.mode() != mode {
        return Err(ClearCueError::Render {
            detail: format!("{} record supplied for a {mode} report", request.record.mode()),
        });
    }
    if request.form.mode() != mode {
        return Err(ClearCueError::Render {
            detail: format!("{} form supplied for a {mode} report", request.form.mode()),
        });
    }

    let mut composer = Composer::new();

    // ── Header (page 1 only) ─────────────────────────────────────────────
    composer.place(BRAND_MARK, 25.0, BRAND_STYLE);
    composer.place(mode.document_title(), 35.0, TITLE_STYLE);
    composer.place(
        &format!("Generated on: {}", date.format("%-m/%-d/%Y")),
        45.0,
        DATE_STYLE,
    );
    composer.y = CONTENT_START_Y_MM;

    // ── Mode preamble ────────────────────────────────────────────────────
    match &request.form {
        FormData::Diagnosis(_) => {
            composer.line(DISCLAIMER_HEADING, DISCLAIMER_HEADING_STYLE);
            composer.advance(8.0);
            let lines = composer.wrapped(DISCLAIMER_TEXT, DISCLAIMER_STYLE);
            composer.advance_lines(lines, 10.0);
        }
        FormData::Skincare(form) => skincare_metadata(&mut composer, form),
    }

    // ── Sections ─────────────────────────────────────────────────────────
    for section in sections_for(&request.record) {
        if composer.y > PAGE_BREAK_Y_MM {
            composer.new_page();
        }
        composer.line(section.title, SECTION_TITLE_STYLE);
        composer.advance(8.0);

        match section.content {
            SectionContent::Paragraph(text) => {
                let lines = composer.wrapped(text, BODY_STYLE);
                composer.advance_lines(lines, 0.0);
            }
            SectionContent::List { items, style } => {
                for (i, item) in items.iter().enumerate() {
                    let entry = format!("{}{}", style.prefix(i), item);
                    let lines = composer.wrapped(&entry, BODY_STYLE);
                    composer.advance_lines(lines, 2.0);
                }
            }
        }
        composer.advance(8.0);
    }

    let mut pages = composer.finish();

    // ── Footer (every page) ──────────────────────────────────────────────
    let footer = wrap_text(
        footer_text(mode),
        line_capacity(CONTENT_WIDTH_MM, FOOTER_STYLE.size_pt),
    );
    for page in &mut pages {
        for (i, line) in footer.iter().enumerate() {
            page.runs.push(TextRun {
                text: line.clone(),
                x_mm: MARGIN_LEFT_MM,
                y_mm: FOOTER_Y_MM + i as f32 * LINE_STEP_MM,
                style: FOOTER_STYLE,
            });
        }
    }

    debug!(%mode, pages = pages.len(), "Report laid out");
    Ok(Document {
        title: mode.document_title().to_string(),
        pages,
    })
}

fn skincare_metadata(composer: &mut Composer, form: &SkincareForm) {
    composer.line(&format!("Skin Type: {}", form.skin_type), META_STYLE);
    composer.advance(6.0);

    if !form.goals.is_empty() {
        let goals = format!("Goals: {}", form.goals.join(", "));
        let lines = composer.wrapped(&goals, META_STYLE);
        composer.advance_lines(lines, 8.0);
    }
}

/// Single-cursor page builder.
struct Composer {
    finished: Vec<Page>,
    current: Page,
    y: f32,
}

impl Composer {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Page::default(),
            y: CONTENT_START_Y_MM,
        }
    }

    fn place(&mut self, text: &str, y_mm: f32, style: TextStyle) {
        self.current.runs.push(TextRun {
            text: text.to_string(),
            x_mm: MARGIN_LEFT_MM,
            y_mm,
            style,
        });
    }

    /// One unwrapped line at the cursor. Does not move the cursor.
    fn line(&mut self, text: &str, style: TextStyle) {
        self.place(text, self.y, style);
    }

    /// Wrapped text starting at the cursor. Returns the line count; the cursor
    /// is left for the caller to advance.
    fn wrapped(&mut self, text: &str, style: TextStyle) -> usize {
        let lines = wrap_text(text, line_capacity(CONTENT_WIDTH_MM, style.size_pt));
        let top = self.y;
        for (i, line) in lines.iter().enumerate() {
            self.place(line, top + i as f32 * LINE_STEP_MM, style);
        }
        lines.len()
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    fn advance_lines(&mut self, lines: usize, gap_mm: f32) {
        self.y += lines as f32 * LINE_STEP_MM + gap_mm;
    }

    fn new_page(&mut self) {
        let done = std::mem::take(&mut self.current);
        self.finished.push(done);
        self.y = CONTINUATION_Y_MM;
    }

    fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.current);
        self.finished
    }
}
