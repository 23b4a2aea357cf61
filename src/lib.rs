//! # clearcue
//!
//! Skin consultations with a vision model: photos and questionnaire answers
//! in, a validated structured record and a paginated PDF report out.
//!
//! ## Why this crate?
//!
//! A vision model asked for JSON does not reliably return JSON. Replies come
//! wrapped in Markdown fences, preceded by chatter, truncated, or shaped
//! differently from what was asked. This crate treats the reply as untrusted
//! text: it recovers the payload span, checks every field explicitly, and
//! substitutes a fixed fallback record when anything is off. Downstream code,
//! the PDF layout included, only ever sees a well-formed record.
//!
//! ## Pipeline Overview
//!
//! ```text
//! form + photos
//!  │
//!  ├─ 1. Encode    uploads → base64 attachments (per-mode image budget)
//!  ├─ 2. Prompt    mode-specific instructions + form answers
//!  ├─ 3. Model     injected ReplyGenerator (edgequake-llm in production)
//!  ├─ 4. Extract   fence strip → payload span → field check → fallback
//!  ├─ 5. Layout    record → A4 pages of positioned text runs
//!  └─ 6. Encode    pages → PDF bytes (printpdf)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clearcue::{analyze, generate_report, AnalysisConfig, AnalysisRequest,
//!     FormData, LlmReplyGenerator, Mode, RenderRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from GEMINI_API_KEY / OPENAI_API_KEY / …
//!     let config = AnalysisConfig::default();
//!     let generator = LlmReplyGenerator::from_config(&config)?;
//!
//!     let form = FormData::from_json(Mode::SkincarePlan, r#"{"skinType":"oily","goals":["tan"]}"#)?;
//!     let request = AnalysisRequest::new(Mode::SkincarePlan, form.clone(), Vec::new());
//!     let record = analyze(&request, &generator, &config).await?;
//!
//!     let report = generate_report(&RenderRequest { mode: Mode::SkincarePlan, record, form })?;
//!     std::fs::write(report.filename, &report.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `clearcue` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod prompts;
pub mod record;
pub mod report;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze, AnalysisRequest};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ServerConfig};
pub use error::{ClearCueError, PayloadError};
pub use layout::document::Document;
pub use layout::{render, render_on};
pub use pipeline::encode::UploadedImage;
pub use pipeline::extract::extract;
pub use pipeline::llm::{CannedReplyGenerator, LlmReplyGenerator, ReplyGenerator};
pub use record::{
    DiagnosisForm, DiagnosisRecord, FormData, Mode, Record, RenderRequest, SkincareForm,
    SkincarePlanRecord,
};
pub use report::{generate_report, generate_report_on, write_report, RenderedReport};
