//! Default port implementations.

use crate::ports::{SourceAccessor, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use lintfix_engine::SourceLines;
use std::collections::BTreeMap;
use tracing::debug;

fn abs_path(root: &Utf8Path, rel: &Utf8Path) -> Utf8PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    }
}

/// Reads report paths from disk, relative to `root`.
#[derive(Debug, Clone)]
pub struct FsSourceAccessor {
    root: Utf8PathBuf,
}

impl FsSourceAccessor {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }
}

impl SourceAccessor for FsSourceAccessor {
    fn read_lines(&self, path: &str) -> anyhow::Result<SourceLines> {
        let abs = abs_path(&self.root, Utf8Path::new(path));
        let text = fs::read_to_string(&abs).with_context(|| format!("read {}", abs))?;
        Ok(SourceLines::parse(&text))
    }
}

/// In-memory sources for embedding and testing.
///
/// A `single` source answers for every path, which is how a linter fed a source string
/// (rather than files) reports it.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceAccessor {
    sources: BTreeMap<String, String>,
    fallback: Option<String>,
}

impl InMemorySourceAccessor {
    pub fn new(sources: BTreeMap<String, String>) -> Self {
        Self {
            sources,
            fallback: None,
        }
    }

    pub fn single(source: impl Into<String>) -> Self {
        Self {
            sources: BTreeMap::new(),
            fallback: Some(source.into()),
        }
    }

    pub fn with_source(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.insert(path.into(), text.into());
        self
    }
}

impl SourceAccessor for InMemorySourceAccessor {
    fn read_lines(&self, path: &str) -> anyhow::Result<SourceLines> {
        let text = self
            .sources
            .get(path)
            .or(self.fallback.as_ref())
            .with_context(|| format!("no in-memory source for {path}"))?;
        Ok(SourceLines::parse(text))
    }
}

/// Filesystem write operations, relative to `root`.
#[derive(Debug, Clone)]
pub struct FsWritePort {
    root: Utf8PathBuf,
}

impl FsWritePort {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }
}

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        let abs = abs_path(&self.root, path);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create parent dir for {}", abs))?;
        }
        debug!(path = %abs, bytes = contents.len(), "writing fixed file");
        fs::write(&abs, contents).with_context(|| format!("write {}", abs))
    }
}
