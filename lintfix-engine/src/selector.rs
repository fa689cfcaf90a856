//! Fixable-violation selection.
//!
//! Per file, in violation order:
//! 1. keep a violation when it passes the id filter, its rule has a descriptor, it passes the
//!    rule filter, and it is not already fixed;
//! 2. append one synthetic entry per rule in the descriptor's `triggers` (rules missing from
//!    the catalog or outside the rule filter are skipped);
//! 3. drop a non-unitary file-scope entry if the file already has an entry for that rule;
//! 4. stable-sort by ascending priority.

use lintfix_catalog::{FixDescriptor, RuleCatalog};
use lintfix_types::{DiagnosticReport, Violation};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// Appended to the originating violation id for synthesized trigger entries.
pub const TRIGGER_SUFFIX: &str = "_triggered";

/// Restrictions applied while selecting.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    /// Only these violation ids (`None` = all).
    pub ids: Option<BTreeSet<String>>,
    /// Only these rule names (`None` = all).
    pub rules: Option<BTreeSet<String>>,
}

impl SelectOptions {
    fn id_allowed(&self, id: &str) -> bool {
        self.ids.as_ref().is_none_or(|ids| ids.contains(id))
    }

    fn rule_allowed(&self, rule: &str) -> bool {
        self.rules.as_ref().is_none_or(|rules| rules.contains(rule))
    }
}

/// One fix to attempt on one file.
#[derive(Debug, Clone)]
pub struct FixableEntry {
    pub id: String,
    pub rule_name: String,
    pub line: Option<u64>,
    pub message: String,
    pub descriptor: Arc<FixDescriptor>,
}

impl FixableEntry {
    fn from_violation(violation: &Violation, descriptor: Arc<FixDescriptor>) -> Self {
        Self {
            id: violation.id.clone(),
            rule_name: violation.rule.clone(),
            line: violation.line,
            message: violation.message.clone(),
            descriptor,
        }
    }

    fn triggered(&self, rule_name: &str, descriptor: Arc<FixDescriptor>) -> Self {
        Self {
            id: format!("{}{}", self.id, TRIGGER_SUFFIX),
            rule_name: rule_name.to_string(),
            line: self.line,
            message: self.message.clone(),
            descriptor,
        }
    }

    /// 0-based line index, or -1 when the entry has no line.
    pub fn line_index(&self) -> i64 {
        match self.line {
            Some(line) => line as i64 - 1,
            None => -1,
        }
    }
}

/// Select fixable entries for every file of the report.
pub fn select_fixable(
    report: &DiagnosticReport,
    opts: &SelectOptions,
    catalog: &dyn RuleCatalog,
) -> BTreeMap<String, Vec<FixableEntry>> {
    report
        .files
        .iter()
        .map(|(path, file)| {
            let entries = select_file(&file.violations, opts, catalog);
            debug!(file = path.as_str(), entries = entries.len(), "selected fixable entries");
            (path.clone(), entries)
        })
        .collect()
}

/// Select fixable entries for one file's violations.
pub fn select_file(
    violations: &[Violation],
    opts: &SelectOptions,
    catalog: &dyn RuleCatalog,
) -> Vec<FixableEntry> {
    let mut entries: Vec<FixableEntry> = Vec::new();

    for violation in violations {
        if violation.fixed || !opts.id_allowed(&violation.id) {
            continue;
        }
        let Some(descriptor) = catalog.descriptor(&violation.rule) else {
            continue;
        };
        if !opts.rule_allowed(&violation.rule) {
            continue;
        }

        let entry = FixableEntry::from_violation(violation, descriptor.clone());
        let triggered: Vec<FixableEntry> = descriptor
            .triggers
            .iter()
            .filter(|name| opts.rule_allowed(name))
            .filter_map(|name| {
                catalog
                    .descriptor(name)
                    .map(|d| entry.triggered(name, d))
            })
            .collect();

        push_dedup(&mut entries, entry);
        for t in triggered {
            push_dedup(&mut entries, t);
        }
    }

    // `sort_by_key` is stable: equal priorities keep discovery order.
    entries.sort_by_key(|e| e.descriptor.priority);
    entries
}

fn push_dedup(entries: &mut Vec<FixableEntry>, entry: FixableEntry) {
    if entry.descriptor.dedup_per_file() && entries.iter().any(|e| e.rule_name == entry.rule_name)
    {
        return;
    }
    entries.push(entry);
}
