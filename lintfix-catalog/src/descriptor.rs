use crate::variables::Variables;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Whether a fix rewrites one line or the whole file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixScope {
    #[default]
    Line,
    File,
}

impl FixScope {
    pub fn as_str(self) -> &'static str {
        match self {
            FixScope::Line => "line",
            FixScope::File => "file",
        }
    }
}

/// Declaration of a named value extracted from a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    pub regex: String,
    /// Capture group holding the value.
    #[serde(default = "default_group")]
    pub group: usize,
}

fn default_group() -> usize {
    1
}

impl VariableDecl {
    pub fn new(name: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regex: regex.into(),
            group: default_group(),
        }
    }

    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }
}

/// Templated `before` -> `after` substitution. `{{name}}` placeholders are resolved from the
/// evaluated variables before matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub before: String,
    pub after: String,
}

/// Custom rewrite of a single line.
pub trait LineTransform: Send + Sync {
    fn transform_line(&self, line: &str, vars: &Variables) -> anyhow::Result<String>;
}

/// Custom rewrite of a whole file's lines.
pub trait FileTransform: Send + Sync {
    fn transform_file(&self, lines: &[String], vars: &Variables) -> anyhow::Result<Vec<String>>;
}

impl<F> LineTransform for F
where
    F: Fn(&str, &Variables) -> anyhow::Result<String> + Send + Sync,
{
    fn transform_line(&self, line: &str, vars: &Variables) -> anyhow::Result<String> {
        self(line, vars)
    }
}

impl<F> FileTransform for F
where
    F: Fn(&[String], &Variables) -> anyhow::Result<Vec<String>> + Send + Sync,
{
    fn transform_file(&self, lines: &[String], vars: &Variables) -> anyhow::Result<Vec<String>> {
        self(lines, vars)
    }
}

/// A rule-supplied rewrite function, shaped for the scope it operates on.
#[derive(Clone)]
pub enum Transform {
    Line(Arc<dyn LineTransform>),
    File(Arc<dyn FileTransform>),
}

impl Transform {
    pub fn line(f: impl LineTransform + 'static) -> Self {
        Transform::Line(Arc::new(f))
    }

    pub fn file(f: impl FileTransform + 'static) -> Self {
        Transform::File(Arc::new(f))
    }

    pub fn scope(&self) -> FixScope {
        match self {
            Transform::Line(_) => FixScope::Line,
            Transform::File(_) => FixScope::File,
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Line(_) => f.write_str("Transform::Line(..)"),
            Transform::File(_) => f.write_str("Transform::File(..)"),
        }
    }
}

/// How a rule repairs its violation.
#[derive(Debug, Clone)]
pub enum FixStrategy {
    Template(Template),
    Transform(Transform),
}

impl FixStrategy {
    pub fn replace(before: impl Into<String>, after: impl Into<String>) -> Self {
        FixStrategy::Template(Template {
            before: before.into(),
            after: after.into(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FixStrategy::Template(_) => "replace",
            FixStrategy::Transform(_) => "transform",
        }
    }
}

/// Everything the engine needs to know to fix one rule.
#[derive(Debug, Clone)]
pub struct FixDescriptor {
    pub scope: FixScope,
    /// Lower runs first.
    pub priority: i32,
    /// File-scope only: apply once per violation instead of once per file.
    pub unitary: bool,
    pub variables: Vec<VariableDecl>,
    pub fix: FixStrategy,
    /// Rules whose fixes are also attempted at the same location.
    pub triggers: Vec<String>,
    pub description: Option<String>,
}

impl FixDescriptor {
    pub fn new(scope: FixScope, priority: i32, fix: FixStrategy) -> Self {
        Self {
            scope,
            priority,
            unitary: false,
            variables: vec![],
            fix,
            triggers: vec![],
            description: None,
        }
    }

    pub fn line(priority: i32, fix: FixStrategy) -> Self {
        Self::new(FixScope::Line, priority, fix)
    }

    pub fn file(priority: i32, fix: FixStrategy) -> Self {
        Self::new(FixScope::File, priority, fix)
    }

    pub fn unitary(mut self) -> Self {
        self.unitary = true;
        self
    }

    pub fn with_variable(mut self, decl: VariableDecl) -> Self {
        self.variables.push(decl);
        self
    }

    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers = triggers.into_iter().map(Into::into).collect();
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// File-scope rules that are not unitary collapse to one application per file.
    pub fn dedup_per_file(&self) -> bool {
        self.scope == FixScope::File && !self.unitary
    }
}
