//! Extraction engine: raw model reply → validated [`Record`].
//!
//! [`extract`] never fails. A reply that yields no payload span, does not
//! parse, or does not match the mode's schema is replaced by the mode's
//! fallback record. The reason is logged together with the raw text and is
//! otherwise invisible to the caller.

use crate::error::PayloadError;
use crate::pipeline::fallback::fallback_record;
use crate::pipeline::payload::{payload_span, strip_fence_markers};
use crate::pipeline::validate::validate;
use crate::record::{Mode, Record};
use serde_json::Value;
use tracing::{debug, warn};

/// Recover a record for `mode` from `raw_text`, substituting the fallback
/// on any failure.
pub fn extract(raw_text: &str, mode: Mode) -> Record {
    match try_extract(raw_text, mode) {
        Ok(record) => {
            debug!(%mode, reply_len = raw_text.len(), "model reply validated");
            record
        }
        Err(reason) => {
            warn!(%mode, %reason, raw = raw_text, "unusable model reply, using fallback record");
            fallback_record(mode)
        }
    }
}

/// The fallible core of [`extract`], exposed so callers and tests can see
/// why a reply was rejected.
pub fn try_extract(raw_text: &str, mode: Mode) -> Result<Record, PayloadError> {
    let cleaned = strip_fence_markers(raw_text);
    let span = payload_span(&cleaned).ok_or(PayloadError::NoPayloadSpan)?;
    let value: Value =
        serde_json::from_str(span).map_err(|e| PayloadError::Malformed(e.to_string()))?;
    validate(&value, mode)
}
