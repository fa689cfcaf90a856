//! Core fix pipeline.
//!
//! The entry point is I/O-agnostic: sources are read and fixed files written through the port
//! traits. Files are fixed concurrently, one blocking task per file, and the report is only
//! touched after every task has been joined.

use crate::ports::{SourceAccessor, WritePort};
use crate::settings::FixSettings;
use anyhow::Context;
use camino::Utf8Path;
use lintfix_catalog::{Catalog, RegexVariableEvaluator, RuleCatalog, VariableEvaluator};
use lintfix_engine::{FixApplier, FixableEntry, Reconciler, SelectOptions, SourceLines, select_fixable};
use lintfix_types::DiagnosticReport;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Error type for pipeline results.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{path}: {message}")]
    File { path: String, message: String },
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// A file whose task failed; its violations are left untouched.
#[derive(Debug)]
pub struct FileFailure {
    pub path: String,
    pub error: ToolError,
}

/// A file whose content was changed by the run.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: String,
    pub fixes_applied: usize,
    pub saved: bool,
    pub before: String,
    pub after: String,
}

/// Outcome of [`FixEngine::run`].
#[derive(Debug)]
pub struct FixOutcome {
    pub report: DiagnosticReport,
    /// Changed files, ordered by path.
    pub files: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
}

impl FixOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Runs select -> apply -> reconcile over a private copy of a diagnostic report.
pub struct FixEngine {
    report: DiagnosticReport,
    settings: FixSettings,
    catalog: Arc<dyn RuleCatalog>,
    evaluator: Arc<dyn VariableEvaluator>,
    sources: Arc<dyn SourceAccessor>,
    writer: Arc<dyn WritePort>,
}

impl FixEngine {
    /// Clone `report` and resolve the catalog: the settings' catalog file if set, the built-in
    /// catalog otherwise.
    pub fn new(
        report: &DiagnosticReport,
        settings: FixSettings,
        sources: Arc<dyn SourceAccessor>,
        writer: Arc<dyn WritePort>,
    ) -> anyhow::Result<Self> {
        let catalog = match &settings.catalog {
            Some(path) => lintfix_catalog::load_catalog(path).context("load rule catalog")?,
            None => Catalog::builtin(),
        };
        Ok(Self {
            report: report.clone(),
            settings,
            catalog: Arc::new(catalog),
            evaluator: Arc::new(RegexVariableEvaluator),
            sources,
            writer,
        })
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn RuleCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn VariableEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Fix every selectable violation, optionally restricted to `ids`.
    pub async fn run(self, ids: Option<&[String]>) -> Result<FixOutcome, ToolError> {
        let FixEngine {
            mut report,
            settings,
            catalog,
            evaluator,
            sources,
            writer,
        } = self;

        let opts = SelectOptions {
            ids: ids.map(|ids| ids.iter().cloned().collect()),
            rules: settings.fix_rules.allow_list(),
        };
        let selected = select_fixable(&report, &opts, catalog.as_ref());

        let mut handles = Vec::new();
        for (path, entries) in selected {
            if entries.is_empty() {
                continue;
            }
            let task = FileTask {
                path: path.clone(),
                entries,
                save: settings.save,
                verbose: settings.verbose,
                sources: Arc::clone(&sources),
                evaluator: Arc::clone(&evaluator),
                writer: Arc::clone(&writer),
            };
            handles.push((path, tokio::task::spawn_blocking(move || task.run())));
        }

        let mut done = Vec::new();
        let mut failures = Vec::new();
        for (path, handle) in handles {
            match handle.await {
                Ok(Ok(fixed)) => done.push((path, fixed)),
                Ok(Err(err)) => {
                    warn!(file = path.as_str(), error = %format!("{err:#}"), "file not fixed");
                    failures.push(FileFailure {
                        error: ToolError::File {
                            path: path.clone(),
                            message: format!("{err:#}"),
                        },
                        path,
                    });
                }
                Err(join_err) => {
                    warn!(file = path.as_str(), error = %join_err, "fix task aborted");
                    failures.push(FileFailure {
                        error: ToolError::Internal(anyhow::anyhow!("fix task aborted: {join_err}")),
                        path,
                    });
                }
            }
        }

        let mut reconciler = Reconciler::new();
        let mut files = Vec::new();
        for (path, fixed) in done {
            reconciler.record(&mut report, &path, &fixed.changed);
            if fixed.changed.is_empty() {
                continue;
            }
            if !fixed.saved
                && let Some(file_report) = report.files.get_mut(&path)
            {
                file_report.updated_source = Some(fixed.after.clone());
            }
            files.push(FileOutcome {
                fixes_applied: fixed.changed.len(),
                saved: fixed.saved,
                before: fixed.before,
                after: fixed.after,
                path,
            });
        }
        reconciler.finish(&mut report);

        info!(
            files_changed = files.len(),
            files_failed = failures.len(),
            fixed = report.summary.fixed.total(),
            remaining = report.summary.remaining.total(),
            "fix run complete"
        );

        Ok(FixOutcome {
            report,
            files,
            failures,
        })
    }
}

struct FileTask {
    path: String,
    entries: Vec<FixableEntry>,
    save: bool,
    verbose: bool,
    sources: Arc<dyn SourceAccessor>,
    evaluator: Arc<dyn VariableEvaluator>,
    writer: Arc<dyn WritePort>,
}

struct FileFix {
    changed: Vec<FixableEntry>,
    saved: bool,
    before: String,
    after: String,
}

impl FileTask {
    fn run(self) -> anyhow::Result<FileFix> {
        let source = self
            .sources
            .read_lines(&self.path)
            .with_context(|| format!("read source {}", self.path))?;
        let before = source.join();

        let applier = FixApplier::new(self.evaluator.as_ref(), self.verbose);
        let applied = applier.apply(&self.path, &self.entries, source.lines);
        let after = SourceLines::from_lines(applied.lines, source.line_ending).join();

        debug!(
            file = self.path.as_str(),
            attempted = self.entries.len(),
            changed = applied.changed.len(),
            "file processed"
        );

        let saved = self.save && !applied.changed.is_empty();
        if saved {
            self.writer
                .write_file(Utf8Path::new(&self.path), after.as_bytes())
                .with_context(|| format!("save {}", self.path))?;
        }

        Ok(FileFix {
            changed: applied.changed,
            saved,
            before,
            after,
        })
    }
}
