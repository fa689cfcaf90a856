//! Shared DTOs (schemas-as-code) for the lintfix workspace.
//!
//! # Design constraints
//! - These types are read from and written to analyzer report files.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod report;
pub mod severity;

pub use report::{DiagnosticReport, FileReport, Summary, Violation};
pub use severity::{Severity, SeverityCounts};

/// Schema identifiers.
pub mod schema {
    pub const LINTFIX_REPORT_V1: &str = "lintfix.report.v1";
}
