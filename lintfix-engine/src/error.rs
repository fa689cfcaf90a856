//! Error types for lintfix-engine.
//!
//! Every variant is local to one fixable entry: the applier logs it and treats the entry as
//! "no change". None of them abort a file or a run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixError {
    /// A `{{name}}` placeholder survived variable substitution.
    #[error("unresolved placeholder in template: before={before:?} after={after:?}")]
    UnresolvedPlaceholder { before: String, after: String },

    /// A line-scope entry points outside the current buffer.
    #[error("line index {index} out of range for {len} lines")]
    LineOutOfRange { index: i64, len: usize },

    /// A transform was written for the other scope.
    #[error("{rule}: transform works on {actual} scope, rule declares {declared}")]
    ScopeMismatch {
        rule: String,
        actual: &'static str,
        declared: &'static str,
    },

    #[error("variable evaluation failed: {0:#}")]
    Variables(#[source] anyhow::Error),

    #[error("transform failed: {0:#}")]
    Transform(#[source] anyhow::Error),

    #[error("transform panicked: {message}")]
    TransformPanicked { message: String },
}
