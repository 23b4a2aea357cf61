//! Per-mode section tables.
//!
//! Each mode prints its record as a fixed sequence of titled sections. Whether
//! a list is numbered is declared here alongside the title instead of being
//! inferred from the title text.

use crate::record::{DiagnosisRecord, Record, SkincarePlanRecord};

/// How list entries are prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// `1. `, `2. `, … for step-by-step routines.
    Numbered,
    /// `• ` for unordered advice.
    Bulleted,
}

impl ListStyle {
    /// Prefix for the entry at zero-based `index`.
    pub fn prefix(self, index: usize) -> String {
        match self {
            ListStyle::Numbered => format!("{}. ", index + 1),
            ListStyle::Bulleted => "• ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionContent<'a> {
    Paragraph(&'a str),
    List { items: &'a [String], style: ListStyle },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub title: &'static str,
    pub content: SectionContent<'a>,
}

impl<'a> Section<'a> {
    fn paragraph(title: &'static str, text: &'a str) -> Self {
        Self {
            title,
            content: SectionContent::Paragraph(text),
        }
    }

    fn list(title: &'static str, items: &'a [String], style: ListStyle) -> Self {
        Self {
            title,
            content: SectionContent::List { items, style },
        }
    }
}

/// Sections of `record` in print order.
pub fn sections_for(record: &Record) -> Vec<Section<'_>> {
    match record {
        Record::Diagnosis(r) => diagnosis_sections(r),
        Record::SkincarePlan(r) => skincare_sections(r),
    }
}

fn diagnosis_sections(r: &DiagnosisRecord) -> Vec<Section<'_>> {
    use ListStyle::Bulleted;
    vec![
        Section::paragraph("DIAGNOSIS", &r.diagnosis),
        Section::paragraph("POSSIBLE CAUSE", &r.cause),
        Section::list("TREATMENT PLAN", &r.treatment, Bulleted),
        Section::list("PREVENTION TIPS", &r.prevention, Bulleted),
        Section::list("PRESCRIBED MEDICINES", &r.medicines, Bulleted),
        Section::list("NATURAL REMEDIES", &r.natural_remedies, Bulleted),
        Section::list("RECOMMENDED PRODUCTS", &r.products, Bulleted),
    ]
}

fn skincare_sections(r: &SkincarePlanRecord) -> Vec<Section<'_>> {
    use ListStyle::{Bulleted, Numbered};
    vec![
        Section::paragraph("SKIN ANALYSIS", &r.skin_analysis),
        Section::list("MORNING ROUTINE", &r.morning_routine, Numbered),
        Section::list("EVENING ROUTINE", &r.evening_routine, Numbered),
        Section::list("PRODUCT RECOMMENDATIONS", &r.product_recommendations, Bulleted),
        Section::list("DIET TIPS", &r.diet_tips, Bulleted),
        Section::list("LIFESTYLE TIPS", &r.lifestyle_tips, Bulleted),
    ]
}
