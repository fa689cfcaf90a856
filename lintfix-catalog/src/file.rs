//! Catalog files: a TOML replacement for the built-in catalog.
//!
//! ```toml
//! [rules.UnnecessaryDefInVariableDeclaration]
//! scope = "line"
//! priority = 5
//! fix = { type = "replace", before = "def {{TYPE}}", after = "{{TYPE}}" }
//! variables = [{ name = "TYPE", regex = "type (\\w+)" }]
//! triggers = ["TrailingWhitespace"]
//!
//! [rules.NoTabCharacter]
//! scope = "file"
//! fix = { type = "transform", name = "expand_tabs" }
//! ```

use crate::builtin::builtin_transform;
use crate::catalog::Catalog;
use crate::descriptor::{FixDescriptor, FixScope, FixStrategy, Template, VariableDecl};
use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Semantic problems in a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog TOML: {message}")]
    Parse { message: String },

    #[error("rule {rule}: unknown transform '{name}'")]
    UnknownTransform { rule: String, name: String },

    #[error("rule {rule}: transform '{name}' works on {actual} scope, rule declares {declared}")]
    ScopeMismatch {
        rule: String,
        name: String,
        actual: &'static str,
        declared: &'static str,
    },

    #[error("rule {rule}: variable {variable} has an invalid regex: {message}")]
    InvalidRegex {
        rule: String,
        variable: String,
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    rules: BTreeMap<String, RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    #[serde(default)]
    scope: FixScope,
    #[serde(default)]
    priority: i32,
    #[serde(default)]
    unitary: bool,
    #[serde(default)]
    variables: Vec<VariableDecl>,
    fix: FixSpec,
    #[serde(default)]
    triggers: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum FixSpec {
    Replace { before: String, after: String },
    Transform { name: String },
}

/// Load a catalog file from disk.
pub fn load_catalog(path: &Utf8Path) -> anyhow::Result<Catalog> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read catalog file {}", path))?;
    let catalog = parse_catalog(&contents).with_context(|| format!("parse catalog {}", path))?;
    debug!(path = %path, rules = catalog.len(), "loaded catalog file");
    Ok(catalog)
}

/// Parse a catalog from TOML text.
pub fn parse_catalog(contents: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = toml::from_str(contents).map_err(|e| CatalogError::Parse {
        message: e.to_string(),
    })?;

    let mut catalog = Catalog::empty();
    for (rule, entry) in file.rules {
        let descriptor = into_descriptor(&rule, entry)?;
        catalog.insert(rule, descriptor);
    }
    Ok(catalog)
}

fn into_descriptor(rule: &str, entry: RuleEntry) -> Result<FixDescriptor, CatalogError> {
    for decl in &entry.variables {
        Regex::new(&decl.regex).map_err(|e| CatalogError::InvalidRegex {
            rule: rule.to_string(),
            variable: decl.name.clone(),
            message: e.to_string(),
        })?;
    }

    let fix = match entry.fix {
        FixSpec::Replace { before, after } => FixStrategy::Template(Template { before, after }),
        FixSpec::Transform { name } => {
            let transform =
                builtin_transform(&name).ok_or_else(|| CatalogError::UnknownTransform {
                    rule: rule.to_string(),
                    name: name.clone(),
                })?;
            if transform.scope() != entry.scope {
                return Err(CatalogError::ScopeMismatch {
                    rule: rule.to_string(),
                    name,
                    actual: transform.scope().as_str(),
                    declared: entry.scope.as_str(),
                });
            }
            FixStrategy::Transform(transform)
        }
    };

    Ok(FixDescriptor {
        scope: entry.scope,
        priority: entry.priority,
        unitary: entry.unitary,
        variables: entry.variables,
        fix,
        triggers: entry.triggers,
        description: entry.description,
    })
}
