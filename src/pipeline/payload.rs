//! Payload isolation: cut the candidate JSON object out of a model reply.
//!
//! Models are told to return bare JSON, yet replies routinely arrive as
//! "Sure, here is the analysis:" followed by a ```` ```json ```` fence. These
//! rules strip the decoration without trying to understand it:
//!
//! 1. Remove every fence marker, wherever it occurs and however many there are.
//! 2. Take the span from the first `{` to the last `}` inclusive.
//!
//! No brace matching is attempted. A stray `}` after the payload widens the
//! span and the parse fails; that reply then falls back like any other
//! unusable one.

use once_cell::sync::Lazy;
use regex::Regex;

// ── Rule 1: Strip fence markers ──────────────────────────────────────────────

static RE_JSON_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```json\s*").unwrap());
static RE_BARE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```\s*").unwrap());

/// Remove all ```` ```json ```` and ```` ``` ```` markers plus the whitespace
/// that follows each one.
pub fn strip_fence_markers(input: &str) -> String {
    let s = RE_JSON_FENCE.replace_all(input, "");
    RE_BARE_FENCE.replace_all(&s, "").into_owned()
}

// ── Rule 2: Outermost brace span ─────────────────────────────────────────────

/// First `{` through last `}`, or `None` when either is missing or they are
/// out of order.
pub fn payload_span(cleaned: &str) -> Option<&str> {
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&cleaned[start..=end])
}
