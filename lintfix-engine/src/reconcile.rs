//! Writes fix outcomes back into a report.

use crate::selector::FixableEntry;
use lintfix_types::DiagnosticReport;
use std::collections::HashSet;

/// Accumulates changed entries across files, then finalizes the summary once.
#[derive(Debug, Default)]
pub struct Reconciler {
    fixed_total: u64,
    fixed_ids: Vec<String>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the violations behind `changed` as fixed and bump the per-severity counters.
    ///
    /// Entries without a backing violation (trigger entries) and violations that are already
    /// fixed only contribute to the run totals.
    pub fn record(&mut self, report: &mut DiagnosticReport, file: &str, changed: &[FixableEntry]) {
        for entry in changed {
            self.fixed_total += 1;
            self.fixed_ids.push(entry.id.clone());

            let Some(file_report) = report.files.get_mut(file) else {
                continue;
            };
            let Some(violation) = file_report
                .violations
                .iter_mut()
                .find(|v| v.id == entry.id)
            else {
                continue;
            };
            if violation.fixed {
                continue;
            }
            violation.fixed = true;
            report.summary.fixed.increment(violation.severity);
        }
    }

    /// Derive `remaining` and store the run totals.
    pub fn finish(self, report: &mut DiagnosticReport) {
        let summary = &mut report.summary;
        summary.remaining = summary.found.saturating_sub(&summary.fixed);
        summary.fixed_errors_number = self.fixed_total;

        let mut seen = HashSet::new();
        summary.fixed_error_ids = self
            .fixed_ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
    }
}
