//! Record schema shared by the extraction and layout engines.
//!
//! A [`Record`] is the only thing the two engines have in common: the
//! extraction engine produces one per model reply, the layout engine consumes
//! it without re-validating. Wire names are camelCase because the browser
//! front end reads these objects verbatim.

use crate::error::ClearCueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which consultation is active for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Photo-based diagnosis of a skin condition.
    #[serde(rename = "diagnosis")]
    Diagnosis,
    /// Personalised morning/evening skincare routine.
    #[serde(rename = "skincare")]
    SkincarePlan,
}

impl Mode {
    /// Wire tag accepted at the HTTP and CLI boundaries.
    pub fn tag(self) -> &'static str {
        match self {
            Mode::Diagnosis => "diagnosis",
            Mode::SkincarePlan => "skincare",
        }
    }

    /// Title printed under the brand mark on page 1.
    pub fn document_title(self) -> &'static str {
        match self {
            Mode::Diagnosis => "Skin Diagnosis Report",
            Mode::SkincarePlan => "Personalized Skincare Plan",
        }
    }

    /// Suggested download filename for the rendered report.
    pub fn report_filename(self) -> &'static str {
        match self {
            Mode::Diagnosis => "clearcue-diagnosis-report.pdf",
            Mode::SkincarePlan => "clearcue-skincare-plan.pdf",
        }
    }
}

impl FromStr for Mode {
    type Err = ClearCueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "diagnosis" => Ok(Mode::Diagnosis),
            "skincare" => Ok(Mode::SkincarePlan),
            other => Err(ClearCueError::mode_mismatch(format!(
                "unknown mode '{other}' (expected 'diagnosis' or 'skincare')"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ── Records ──────────────────────────────────────────────────────────────

/// Structured result of a diagnosis consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRecord {
    pub diagnosis: String,
    pub cause: String,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
    pub medicines: Vec<String>,
    pub natural_remedies: Vec<String>,
    pub products: Vec<String>,
}

/// Structured result of a skincare-plan consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkincarePlanRecord {
    pub skin_analysis: String,
    pub morning_routine: Vec<String>,
    pub evening_routine: Vec<String>,
    pub product_recommendations: Vec<String>,
    pub diet_tips: Vec<String>,
    pub lifestyle_tips: Vec<String>,
}

/// A validated record of either mode.
///
/// Serialised untagged: the JSON is the bare record object, which is what
/// the front end expects back from the analyze endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Diagnosis(DiagnosisRecord),
    SkincarePlan(SkincarePlanRecord),
}

impl Record {
    pub fn mode(&self) -> Mode {
        match self {
            Record::Diagnosis(_) => Mode::Diagnosis,
            Record::SkincarePlan(_) => Mode::SkincarePlan,
        }
    }
}

// ── Form data ────────────────────────────────────────────────────────────

/// Free-text answers from the diagnosis questionnaire. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosisForm {
    pub appearance: Option<String>,
    pub issue: Option<String>,
    pub started: Option<String>,
    pub symptoms: Option<String>,
    pub triggers: Option<String>,
    pub skin_type: Option<String>,
}

/// Skin type, goal tags and custom goal from the skincare-plan form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkincareForm {
    pub skin_type: String,
    /// Goal tags such as `tan`, `acne-marks`, `oil-control`.
    pub goals: Vec<String>,
    pub custom_goal: Option<String>,
}

/// Mode-specific form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormData {
    Diagnosis(DiagnosisForm),
    Skincare(SkincareForm),
}

impl FormData {
    pub fn mode(&self) -> Mode {
        match self {
            FormData::Diagnosis(_) => Mode::Diagnosis,
            FormData::Skincare(_) => Mode::SkincarePlan,
        }
    }

    /// Empty form for `mode`, used when a caller renders without form input.
    pub fn empty(mode: Mode) -> Self {
        match mode {
            Mode::Diagnosis => FormData::Diagnosis(DiagnosisForm::default()),
            Mode::SkincarePlan => FormData::Skincare(SkincareForm::default()),
        }
    }

    /// Parse the form JSON blob the front end posts for `mode`.
    pub fn from_json(mode: Mode, json: &str) -> Result<Self, ClearCueError> {
        let invalid =
            |e: serde_json::Error| ClearCueError::InvalidRequest(format!("{mode} form JSON: {e}"));
        Ok(match mode {
            Mode::Diagnosis => FormData::Diagnosis(serde_json::from_str(json).map_err(invalid)?),
            Mode::SkincarePlan => FormData::Skincare(serde_json::from_str(json).map_err(invalid)?),
        })
    }
}

/// Everything the layout engine needs to produce a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub mode: Mode,
    pub record: Record,
    pub form: FormData,
}
