//! Pipeline stages from uploaded form to validated record.
//!
//! Each submodule implements exactly one step, so each is testable on its
//! own and the model client can be swapped without touching the rest.
//!
//! ## Data Flow
//!
//! ```text
//! encode ──▶ llm ──▶ payload ──▶ validate ──▶ extract
//! (base64)  (VLM)   (span)      (schema)     (fallback)
//! ```
//!
//! 1. [`encode`]   — uploaded image bytes → base64 attachments, budgeted per mode
//! 2. [`llm`]      — the injected [`llm::ReplyGenerator`]; the only stage with
//!    network I/O
//! 3. [`payload`]  — strip fence markers, cut the outermost `{ … }` span
//! 4. [`validate`] — explicit per-mode field check → typed record
//! 5. [`extract`]  — orchestrates 3–4 and substitutes [`fallback`] records

pub mod encode;
pub mod extract;
pub mod fallback;
pub mod llm;
pub mod payload;
pub mod validate;
