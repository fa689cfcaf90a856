use serde::{Deserialize, Serialize};

/// Severity of a reported violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// Per-severity counter triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub error: u64,
    #[serde(default)]
    pub warning: u64,
    #[serde(default)]
    pub info: u64,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.error + self.warning + self.info
    }

    /// Per-severity `self - other`, clamped at zero.
    pub fn saturating_sub(&self, other: &SeverityCounts) -> SeverityCounts {
        SeverityCounts {
            error: self.error.saturating_sub(other.error),
            warning: self.warning.saturating_sub(other.warning),
            info: self.info.saturating_sub(other.info),
        }
    }
}
