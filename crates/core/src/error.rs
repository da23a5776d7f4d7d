//! Error taxonomy (spec ch. 7).
//!
//! Two tiers: [`CompleterError`] is the narrow contract a `TextCompleter`
//! implementation reports through; [`ParodyError`] is what the engine
//! itself can surface. Refinement failures and validation rejections are
//! deliberately *not* part of either enum — per spec they are never
//! surfaced, only logged and treated as no-ops.

use thiserror::Error;

/// Failure kinds a [`crate::completer::TextCompleter`] may report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompleterError {
    #[error("completion backend is unavailable")]
    Unavailable,
    #[error("model not installed: {0}")]
    ModelMissing(String),
    #[error("transport error: {0}")]
    TransportError(String),
    #[error("completion request timed out")]
    Timeout,
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Fatal errors the engine surfaces to its caller.
#[derive(Debug, Error)]
pub enum ParodyError {
    #[error("completion backend unavailable: {0}")]
    CompleterUnavailable(#[source] CompleterError),

    #[error("line {line_index}: initial generation failed: {detail}")]
    CompleterFailed { line_index: usize, detail: String },

    #[error("no non-blank input lines")]
    EmptyInput,

    #[error("generation cancelled")]
    Cancelled,
}

/// Error surfaced by the keyword-generation use case.
#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("keyword generation produced no usable keyword: definition pairs")]
    ParseEmpty,

    #[error("completion backend failed: {0}")]
    CompleterFailed(#[from] CompleterError),
}
