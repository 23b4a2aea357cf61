//! Consultation entry point: form + images → validated record.
//!
//! [`analyze`] runs the whole model-facing half of the pipeline. It fails only
//! when the request itself is unusable or the model cannot be reached; an
//! unusable *reply* still yields the mode's fallback record.

use crate::config::AnalysisConfig;
use crate::error::ClearCueError;
use crate::pipeline::encode::{encode_uploads, UploadedImage};
use crate::pipeline::extract::extract;
use crate::pipeline::llm::ReplyGenerator;
use crate::prompts::build_prompt;
use crate::record::{FormData, Mode, Record};
use std::time::Instant;
use tracing::{debug, info};

/// One consultation as submitted by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub mode: Mode,
    pub form: FormData,
    /// Uploads in submission order. Extras beyond the mode's budget are ignored.
    pub images: Vec<UploadedImage>,
}

impl AnalysisRequest {
    pub fn new(mode: Mode, form: FormData, images: Vec<UploadedImage>) -> Self {
        Self { mode, form, images }
    }
}

/// Run a consultation against `generator`.
///
/// # Errors
/// - [`ClearCueError::ModeMismatch`] if `request.form` belongs to the other mode
/// - [`ClearCueError::InvalidRequest`] for an unreadable upload
/// - [`ClearCueError::UpstreamUnavailable`] when the model call fails
pub async fn analyze(
    request: &AnalysisRequest,
    generator: &dyn ReplyGenerator,
    config: &AnalysisConfig,
) -> Result<Record, ClearCueError> {
    let start = Instant::now();
    let mode = request.mode;
    if request.form.mode() != mode {
        return Err(ClearCueError::mode_mismatch(format!(
            "{} form submitted for a {} consultation",
            request.form.mode(),
            mode
        )));
    }
    info!(%mode, uploads = request.images.len(), "Starting consultation");

    // ── Step 1: Encode images ────────────────────────────────────────────
    let attachments = encode_uploads(&request.images, mode, config)?;

    // ── Step 2: Build prompt ─────────────────────────────────────────────
    let prompt = build_prompt(&request.form, attachments.len());
    debug!(
        "Prompt: {} chars, {} images attached",
        prompt.len(),
        attachments.len()
    );

    // ── Step 3: Call the model ───────────────────────────────────────────
    let reply = generator.generate(&prompt, &attachments).await?;

    // ── Step 4: Extract record ───────────────────────────────────────────
    let record = extract(reply.trim(), mode);
    info!(%mode, "Consultation finished in {}ms", start.elapsed().as_millis());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fallback::fallback_record;
    use crate::pipeline::llm::CannedReplyGenerator;
    use crate::record::SkincareForm;

    fn skincare_request() -> AnalysisRequest {
        AnalysisRequest::new(
            Mode::SkincarePlan,
            FormData::Skincare(SkincareForm {
                skin_type: "oily".into(),
                goals: vec!["tan".into()],
                custom_goal: None,
            }),
            Vec::new(),
        )
    }

    #[test]
    fn mismatched_form_is_rejected_before_the_model_call() {
        let mut request = skincare_request();
        request.mode = Mode::Diagnosis;
        let generator = CannedReplyGenerator::failing("should not be called");
        let err = tokio_test::block_on(analyze(&request, &generator, &AnalysisConfig::default()))
            .unwrap_err();
        assert!(matches!(err, ClearCueError::ModeMismatch { .. }));
    }

    #[test]
    fn prose_reply_yields_fallback() {
        let generator = CannedReplyGenerator::new("Sorry, I can't see the photo.");
        let record = tokio_test::block_on(analyze(
            &skincare_request(),
            &generator,
            &AnalysisConfig::default(),
        ))
        .unwrap();
        assert_eq!(record, fallback_record(Mode::SkincarePlan));
    }

    #[test]
    fn upstream_failure_propagates() {
        let generator = CannedReplyGenerator::failing("connection reset");
        let err = tokio_test::block_on(analyze(
            &skincare_request(),
            &generator,
            &AnalysisConfig::default(),
        ))
        .unwrap_err();
        assert!(matches!(err, ClearCueError::UpstreamUnavailable { .. }));
    }
}
