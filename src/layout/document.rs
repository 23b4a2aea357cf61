//! Laid-out document model.
//!
//! A [`Document`] is a list of pages, each a list of positioned text runs in
//! page coordinates (millimetres, y measured down from the top edge). It is
//! independent of any PDF library, which keeps layout testable without
//! parsing PDF bytes.

/// RGB fill colour of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColor(pub u8, pub u8, pub u8);

impl TextColor {
    pub const BLACK: TextColor = TextColor(0, 0, 0);
    pub const BRAND_INDIGO: TextColor = TextColor(99, 102, 241);
    pub const WARNING_AMBER: TextColor = TextColor(245, 158, 11);
    pub const MUTED_GREY: TextColor = TextColor(100, 100, 100);
    pub const FOOTER_GREY: TextColor = TextColor(150, 150, 150);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Font size, weight and colour applied to a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_pt: f32,
    pub weight: FontWeight,
    pub color: TextColor,
}

impl TextStyle {
    pub const fn regular(size_pt: f32) -> Self {
        Self {
            size_pt,
            weight: FontWeight::Regular,
            color: TextColor::BLACK,
        }
    }

    pub const fn bold(size_pt: f32) -> Self {
        Self {
            size_pt,
            weight: FontWeight::Bold,
            color: TextColor::BLACK,
        }
    }

    pub const fn with_color(mut self, color: TextColor) -> Self {
        self.color = color;
        self
    }
}

/// One line of text with its baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

impl Page {
    /// `true` if any run on this page contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.runs.iter().any(|run| run.text.contains(needle))
    }

    /// First run whose text equals `text` exactly.
    pub fn find_run(&self, text: &str) -> Option<&TextRun> {
        self.runs.iter().find(|run| run.text == text)
    }
}

/// A fully laid-out report, ready for PDF encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All runs in reading order across pages.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|page| page.runs.iter())
    }

    /// Number of pages on which some run contains `needle`.
    pub fn pages_containing(&self, needle: &str) -> usize {
        self.pages
            .iter()
            .filter(|page| page.contains_text(needle))
            .count()
    }
}
