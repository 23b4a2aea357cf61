//! Report generation: render request → PDF bytes, and PDF bytes → file.

use crate::error::ClearCueError;
use crate::layout::{self, pdf::encode_pdf};
use crate::record::RenderRequest;
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// An encoded report and the metadata a download needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    /// Suggested download filename, e.g. `clearcue-skincare-plan.pdf`.
    pub filename: &'static str,
    pub content_type: &'static str,
    pub page_count: usize,
}

/// Lay out and encode `request`, dated today.
pub fn generate_report(request: &RenderRequest) -> Result<RenderedReport, ClearCueError> {
    let document = layout::render(request)?;
    finish(request, &document)
}

/// Lay out and encode `request` with an explicit generation date.
pub fn generate_report_on(
    request: &RenderRequest,
    date: NaiveDate,
) -> Result<RenderedReport, ClearCueError> {
    let document = layout::render_on(request, date)?;
    finish(request, &document)
}

fn finish(
    request: &RenderRequest,
    document: &layout::document::Document,
) -> Result<RenderedReport, ClearCueError> {
    let bytes = encode_pdf(document)?;
    debug!(
        mode = %request.mode,
        pages = document.page_count(),
        "Encoded report → {} bytes",
        bytes.len()
    );
    Ok(RenderedReport {
        bytes,
        filename: request.mode.report_filename(),
        content_type: PDF_CONTENT_TYPE,
        page_count: document.page_count(),
    })
}

/// Write `report` to `path` atomically: temp file in the same directory,
/// then rename over the target.
pub fn write_report(report: &RenderedReport, path: &Path) -> Result<(), ClearCueError> {
    let write_failed = |source: std::io::Error| ClearCueError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_failed)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_failed)?;
    tmp.write_all(&report.bytes).map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;

    info!("Wrote {} ({} pages) to {}", report.filename, report.page_count, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fallback::fallback_record;
    use crate::record::{FormData, Mode};

    fn request(mode: Mode) -> RenderRequest {
        RenderRequest {
            mode,
            record: fallback_record(mode),
            form: FormData::empty(mode),
        }
    }

    #[test]
    fn report_carries_pdf_metadata() {
        let report = generate_report(&request(Mode::SkincarePlan)).unwrap();
        assert_eq!(report.filename, "clearcue-skincare-plan.pdf");
        assert_eq!(report.content_type, "application/pdf");
        assert!(report.bytes.starts_with(b"%PDF-"));
        assert!(report.page_count >= 1);
    }

    #[test]
    fn write_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.pdf");
        let report = generate_report(&request(Mode::Diagnosis)).unwrap();
        write_report(&report, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), report.bytes);
    }
}
