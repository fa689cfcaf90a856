use crate::severity::{Severity, SeverityCounts};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Analyzer output for a set of files, plus aggregate counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    #[serde(default = "default_schema")]
    pub schema: String,

    #[serde(default)]
    pub files: BTreeMap<String, FileReport>,

    #[serde(default)]
    pub summary: Summary,
}

fn default_schema() -> String {
    crate::schema::LINTFIX_REPORT_V1.to_string()
}

impl Default for DiagnosticReport {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            files: BTreeMap::new(),
            summary: Summary::default(),
        }
    }
}

impl DiagnosticReport {
    /// Build a report from per-file violations, counting `found` from them.
    pub fn from_files(files: BTreeMap<String, FileReport>) -> Self {
        let mut report = Self {
            files,
            ..Self::default()
        };
        report.summary.found = report.count_violations();
        report
    }

    /// Count every violation in the report per severity.
    pub fn count_violations(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for violation in self.files.values().flat_map(|f| f.violations.iter()) {
            counts.increment(violation.severity);
        }
        counts
    }

    pub fn violation(&self, file: &str, id: &str) -> Option<&Violation> {
        self.files
            .get(file)?
            .violations
            .iter()
            .find(|v| v.id == id)
    }
}

/// Violations reported for one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    #[serde(default)]
    pub violations: Vec<Violation>,

    /// Rewritten text, set when fixes changed the file but it was not saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_source: Option<String>,
}

impl FileReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self {
            violations,
            updated_source: None,
        }
    }
}

/// A single rule infraction, located at a line or on the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Unique within its file. Analyzers emit either strings or integers.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub rule: String,

    /// 1-based line; absent for file-level findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,

    pub message: String,

    pub severity: Severity,

    #[serde(default)]
    pub fixed: bool,
}

impl Violation {
    pub fn new(
        id: impl Into<String>,
        rule: impl Into<String>,
        line: Option<u64>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            rule: rule.into(),
            line,
            message: message.into(),
            severity,
            fixed: false,
        }
    }
}

/// Aggregate counters for a report.
///
/// `remaining` is derived as `found - fixed` once a fix run completes; it is never
/// updated mid-run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub found: SeverityCounts,

    #[serde(default)]
    pub fixed: SeverityCounts,

    #[serde(default)]
    pub remaining: SeverityCounts,

    /// Number of fix applications that changed content, triggered ones included.
    #[serde(default)]
    pub fixed_errors_number: u64,

    /// De-duplicated ids of every entry that changed content, in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_error_ids: Vec<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}
