//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use lintfix_engine::SourceLines;

/// Source of file content, keyed by the path used in the diagnostic report.
///
/// On-disk and in-memory sources go through the same port so they behave identically.
pub trait SourceAccessor: Send + Sync {
    fn read_lines(&self, path: &str) -> anyhow::Result<SourceLines>;
}

/// File-system write operations.
pub trait WritePort: Send + Sync {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}
