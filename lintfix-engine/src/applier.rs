//! Replays a file's fixable entries against its line buffer.

use crate::error::FixError;
use crate::selector::FixableEntry;
use crate::template::{has_placeholder, substitute};
use lintfix_catalog::{
    FixScope, FixStrategy, Template, Transform, VariableEvaluator, Variables,
};
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Synthetic variable bound to the entry's 0-based line index.
pub const LINE_NB_VARIABLE: &str = "lineNb";

/// Result of applying one file's entries.
#[derive(Debug, Clone, Default)]
pub struct AppliedFixes {
    pub lines: Vec<String>,
    /// Entries that changed content, in application order.
    pub changed: Vec<FixableEntry>,
}

impl AppliedFixes {
    pub fn is_changed(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Applies entries strictly in order, re-reading the current buffer before each one.
pub struct FixApplier<'a> {
    evaluator: &'a dyn VariableEvaluator,
    verbose: bool,
}

impl<'a> FixApplier<'a> {
    pub fn new(evaluator: &'a dyn VariableEvaluator, verbose: bool) -> Self {
        Self { evaluator, verbose }
    }

    pub fn apply(&self, file: &str, entries: &[FixableEntry], lines: Vec<String>) -> AppliedFixes {
        let mut current = lines;
        let mut changed = Vec::new();

        for entry in entries {
            let outcome = match entry.descriptor.scope {
                FixScope::File => self.apply_file_scope(entry, &current),
                FixScope::Line => self.apply_line_scope(entry, &current),
            };

            match outcome {
                Ok(Some(next)) => {
                    debug!(file, rule = entry.rule_name.as_str(), id = entry.id.as_str(), "fix applied");
                    current = next;
                    changed.push(entry.clone());
                }
                Ok(None) => {}
                Err(err) => {
                    if self.verbose {
                        debug!(
                            file,
                            rule = entry.rule_name.as_str(),
                            id = entry.id.as_str(),
                            line = ?entry.line,
                            error = %err,
                            "fix not applied"
                        );
                    }
                }
            }
        }

        AppliedFixes {
            lines: current,
            changed,
        }
    }

    /// `Ok(None)` when the fix ran but produced identical content.
    fn apply_file_scope(
        &self,
        entry: &FixableEntry,
        lines: &[String],
    ) -> Result<Option<Vec<String>>, FixError> {
        let vars = self.resolve_variables(entry)?;
        let next = match &entry.descriptor.fix {
            FixStrategy::Template(t) => replace_in_file(t, &vars, lines)?,
            FixStrategy::Transform(Transform::File(f)) => {
                guarded(|| f.transform_file(lines, &vars))?
            }
            FixStrategy::Transform(Transform::Line(_)) => {
                return Err(scope_mismatch(entry, FixScope::Line));
            }
        };
        Ok((next.as_slice() != lines).then_some(next))
    }

    fn apply_line_scope(
        &self,
        entry: &FixableEntry,
        lines: &[String],
    ) -> Result<Option<Vec<String>>, FixError> {
        let index = entry.line_index();
        let line = usize::try_from(index)
            .ok()
            .and_then(|i| lines.get(i).map(|l| (i, l)));
        let Some((i, line)) = line else {
            return Err(FixError::LineOutOfRange {
                index,
                len: lines.len(),
            });
        };

        let vars = self.resolve_variables(entry)?;
        let fixed = match &entry.descriptor.fix {
            FixStrategy::Template(t) => replace_in_line(t, &vars, line)?,
            FixStrategy::Transform(Transform::Line(f)) => {
                guarded(|| f.transform_line(line, &vars))?
            }
            FixStrategy::Transform(Transform::File(_)) => {
                return Err(scope_mismatch(entry, FixScope::File));
            }
        };

        if fixed == *line {
            return Ok(None);
        }
        let mut next = lines.to_vec();
        next[i] = fixed;
        Ok(Some(next))
    }

    fn resolve_variables(&self, entry: &FixableEntry) -> Result<Variables, FixError> {
        let mut vars = self
            .evaluator
            .evaluate(&entry.descriptor.variables, &entry.message)
            .map_err(FixError::Variables)?;
        vars.insert(LINE_NB_VARIABLE, entry.line_index().to_string());
        Ok(vars)
    }
}

/// Run a rule-supplied transform, turning both its error and a panic into a [`FixError`].
fn guarded<T>(transform: impl FnOnce() -> anyhow::Result<T>) -> Result<T, FixError> {
    match panic::catch_unwind(AssertUnwindSafe(transform)) {
        Ok(result) => result.map_err(FixError::Transform),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            Err(FixError::TransformPanicked { message })
        }
    }
}

fn resolve_template(t: &Template, vars: &Variables) -> Result<(String, String), FixError> {
    let before = substitute(&t.before, vars);
    let after = substitute(&t.after, vars);
    if has_placeholder(&before) || has_placeholder(&after) {
        return Err(FixError::UnresolvedPlaceholder { before, after });
    }
    Ok((before, after))
}

fn replace_in_line(t: &Template, vars: &Variables, line: &str) -> Result<String, FixError> {
    let (before, after) = resolve_template(t, vars)?;
    Ok(line.replacen(&before, &after, 1))
}

/// A file-scope template rewrites the first line containing `before`.
fn replace_in_file(
    t: &Template,
    vars: &Variables,
    lines: &[String],
) -> Result<Vec<String>, FixError> {
    let (before, after) = resolve_template(t, vars)?;
    let mut next = lines.to_vec();
    if let Some(line) = next.iter_mut().find(|l| l.contains(&before)) {
        *line = line.replacen(&before, &after, 1);
    }
    Ok(next)
}

fn scope_mismatch(entry: &FixableEntry, actual: FixScope) -> FixError {
    FixError::ScopeMismatch {
        rule: entry.rule_name.clone(),
        actual: actual.as_str(),
        declared: entry.descriptor.scope.as_str(),
    }
}
