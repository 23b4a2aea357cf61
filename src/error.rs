//! Error types for the clearcue library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ClearCueError`] — **Boundary**: the request cannot be served at all
//!   (unknown mode tag, model unreachable, layout invariant broken). Returned
//!   as `Err(ClearCueError)` from the analysis, report and server entry points
//!   and mapped to an HTTP status by [`crate::server`].
//!
//! * [`PayloadError`] — **Absorbed**: the model replied, but its text did not
//!   contain a usable record. Produced inside [`crate::pipeline::extract`],
//!   logged, and replaced by the mode's fallback record. It never reaches a
//!   caller of [`crate::pipeline::extract::extract`].

use std::path::PathBuf;
use thiserror::Error;

/// All boundary errors returned by the clearcue library.
///
/// Extraction failures use [`PayloadError`] and are resolved to a fallback
/// record rather than propagated here.
#[derive(Debug, Error)]
pub enum ClearCueError {
    // ── Client input errors ───────────────────────────────────────────────
    /// The mode tag is unknown, or the supplied form/record belongs to the
    /// other mode.
    #[error("Mode mismatch: {detail}")]
    ModeMismatch { detail: String },

    /// The request is malformed (bad form JSON, unreadable upload, …).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // ── Upstream model errors ─────────────────────────────────────────────
    /// The external model call failed or timed out.
    #[error("Model service unavailable: {reason}\nPlease try again shortly.")]
    UpstreamUnavailable { reason: String },

    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// The record or form handed to the layout engine does not match the mode.
    #[error("Cannot render report: {detail}")]
    Render { detail: String },

    /// printpdf could not serialise the laid-out document.
    #[error("PDF encoding failed: {0}")]
    PdfEncoding(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output report file.
    #[error("Failed to write report file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP listener could not be bound or crashed while serving.
    #[error("HTTP server on {addr} failed: {source}")]
    ServerFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClearCueError {
    /// `true` when the caller sent something wrong, `false` for server-side
    /// failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClearCueError::ModeMismatch { .. } | ClearCueError::InvalidRequest(_)
        )
    }

    pub(crate) fn mode_mismatch(detail: impl Into<String>) -> Self {
        ClearCueError::ModeMismatch {
            detail: detail.into(),
        }
    }
}

/// Why a model reply could not be turned into a record.
///
/// Every variant routes to the same fallback record; the distinction exists
/// only for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// No `{` … `}` span in the cleaned reply.
    #[error("no structured payload found in model reply")]
    NoPayloadSpan,

    /// The span exists but is not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    Malformed(String),

    /// The span parsed, but to an array/scalar instead of an object.
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// A required field is absent or `null`.
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    /// A required text field is the empty string.
    #[error("required field '{0}' is empty")]
    EmptyField(&'static str),

    /// A required field has the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}
