//! Request handlers.

use super::error::ApiError;
use super::AppState;
use crate::analyze::{analyze as run_analysis, AnalysisRequest};
use crate::config::MAX_IMAGES;
use crate::error::ClearCueError;
use crate::pipeline::encode::UploadedImage;
use crate::record::{FormData, Mode, Record, RenderRequest};
use crate::report::generate_report;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

// ── POST /api/analyze ────────────────────────────────────────────────────

/// Fields collected from the multipart body before validation.
#[derive(Default)]
struct AnalyzeFields {
    mode: Option<String>,
    description: Option<String>,
    skincare_form: Option<String>,
    images: Vec<(usize, UploadedImage)>,
}

/// `POST /api/analyze`: multipart form with `mode`, the mode's form JSON
/// (`description` or `skincareForm`) and `image0`..`image3`.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Record>, ApiError> {
    let fields = read_fields(multipart).await.map_err(ApiError::analyze)?;
    let request = analysis_request(fields).map_err(ApiError::analyze)?;
    let record = run_analysis(&request, state.generator.as_ref(), &state.config)
        .await
        .map_err(ApiError::analyze)?;
    Ok(Json(record))
}

async fn read_fields(mut multipart: Multipart) -> Result<AnalyzeFields, ClearCueError> {
    let bad_multipart =
        |e: axum::extract::multipart::MultipartError| ClearCueError::InvalidRequest(e.to_string());
    let mut fields = AnalyzeFields::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "mode" => fields.mode = Some(field.text().await.map_err(bad_multipart)?),
            "description" => fields.description = Some(field.text().await.map_err(bad_multipart)?),
            "skincareForm" => {
                fields.skincare_form = Some(field.text().await.map_err(bad_multipart)?)
            }
            other => match image_slot(other) {
                Some(slot) => {
                    let declared = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(bad_multipart)?;
                    fields
                        .images
                        .push((slot, UploadedImage::new(bytes.to_vec(), declared)));
                }
                None => debug!("Ignoring multipart field '{}'", other),
            },
        }
    }

    fields.images.sort_by_key(|(slot, _)| *slot);
    Ok(fields)
}

/// `image0`..`image3` → slot index.
fn image_slot(name: &str) -> Option<usize> {
    name.strip_prefix("image")
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|&n| n < MAX_IMAGES)
}

fn analysis_request(fields: AnalyzeFields) -> Result<AnalysisRequest, ClearCueError> {
    let mode: Mode = fields
        .mode
        .as_deref()
        .ok_or_else(|| ClearCueError::mode_mismatch("mode field missing"))?
        .parse()?;

    let (form_field, form_json) = match mode {
        Mode::Diagnosis => ("description", fields.description),
        Mode::SkincarePlan => ("skincareForm", fields.skincare_form),
    };
    let form_json = form_json
        .ok_or_else(|| ClearCueError::InvalidRequest(format!("{form_field} field missing")))?;
    let form = FormData::from_json(mode, &form_json)?;

    let images = fields.images.into_iter().map(|(_, img)| img).collect();
    Ok(AnalysisRequest::new(mode, form, images))
}

// ── POST /api/generate-pdf ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePdfBody {
    mode: String,
    analysis: Option<Value>,
    skincare_result: Option<Value>,
    description: Option<Value>,
    skincare_form: Option<Value>,
}

/// `POST /api/generate-pdf`: JSON body → `application/pdf` attachment.
pub async fn generate_pdf(body: Bytes) -> Result<Response, ApiError> {
    let request = render_request(&body).map_err(ApiError::report)?;

    let report = tokio::task::spawn_blocking(move || generate_report(&request))
        .await
        .map_err(|e| ApiError::report(ClearCueError::Internal(format!("render task: {e}"))))?
        .map_err(ApiError::report)?;

    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, report.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

fn render_request(body: &[u8]) -> Result<RenderRequest, ClearCueError> {
    let body: GeneratePdfBody = serde_json::from_slice(body)
        .map_err(|e| ClearCueError::InvalidRequest(format!("request body: {e}")))?;
    let mode: Mode = body.mode.parse()?;

    let (record, form) = match mode {
        Mode::Diagnosis => (
            Record::Diagnosis(required(body.analysis, "analysis")?),
            FormData::Diagnosis(optional(body.description, "description")?),
        ),
        Mode::SkincarePlan => (
            Record::SkincarePlan(required(body.skincare_result, "skincareResult")?),
            FormData::Skincare(optional(body.skincare_form, "skincareForm")?),
        ),
    };

    Ok(RenderRequest { mode, record, form })
}

/// The mode's record. Absent is the client's mistake; present but not of the
/// mode's shape is a record/mode mismatch and fails the render.
fn required<T: DeserializeOwned>(value: Option<Value>, field: &str) -> Result<T, ClearCueError> {
    match value {
        Some(v) if !v.is_null() => decode(v, field).map_err(|e| ClearCueError::Render {
            detail: format!("record does not match mode: {e}"),
        }),
        _ => Err(ClearCueError::InvalidRequest(format!("{field} is required"))),
    }
}

fn optional<T: DeserializeOwned + Default>(
    value: Option<Value>,
    field: &str,
) -> Result<T, ClearCueError> {
    match value {
        Some(v) if !v.is_null() => decode(v, field),
        _ => Ok(T::default()),
    }
}

/// Decode an object, or a string holding the object's JSON (the multipart
/// front end posts forms as strings).
fn decode<T: DeserializeOwned>(value: Value, field: &str) -> Result<T, ClearCueError> {
    let invalid = |e: serde_json::Error| ClearCueError::InvalidRequest(format!("{field}: {e}"));
    match value {
        Value::String(s) => serde_json::from_str(&s).map_err(invalid),
        other => serde_json::from_value(other).map_err(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_slots() {
        assert_eq!(image_slot("image0"), Some(0));
        assert_eq!(image_slot("image3"), Some(3));
        assert_eq!(image_slot("image4"), None);
        assert_eq!(image_slot("imageX"), None);
        assert_eq!(image_slot("avatar"), None);
    }

    #[test]
    fn skincare_request_needs_its_own_form_field() {
        let fields = AnalyzeFields {
            mode: Some("skincare".into()),
            description: Some("{}".into()),
            ..Default::default()
        };
        let err = analysis_request(fields).unwrap_err();
        assert!(matches!(err, ClearCueError::InvalidRequest(_)));
    }

    #[test]
    fn form_may_arrive_as_json_string() {
        let body = br#"{"mode":"skincare",
            "skincareResult":{"skinAnalysis":"Dry","morningRoutine":[],"eveningRoutine":[],
              "productRecommendations":[],"dietTips":[],"lifestyleTips":[]},
            "skincareForm":"{\"skinType\":\"dry\",\"goals\":[\"hydration\"]}"}"#;
        let request = render_request(body).unwrap();
        match request.form {
            FormData::Skincare(form) => assert_eq!(form.goals, vec!["hydration"]),
            other => panic!("unexpected form {other:?}"),
        }
    }

    #[test]
    fn record_of_other_mode_is_a_render_error() {
        let body = br#"{"mode":"diagnosis",
            "analysis":{"skinAnalysis":"Dry","morningRoutine":[],"eveningRoutine":[],
              "productRecommendations":[],"dietTips":[],"lifestyleTips":[]}}"#;
        let err = render_request(body).unwrap_err();
        assert!(matches!(err, ClearCueError::Render { .. }), "got {err:?}");
    }

    #[test]
    fn missing_record_is_invalid_request() {
        let err = render_request(br#"{"mode":"diagnosis"}"#).unwrap_err();
        assert!(matches!(err, ClearCueError::InvalidRequest(_)));
    }
}
