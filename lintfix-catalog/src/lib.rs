//! Rule catalog for lintfix.
//!
//! This crate owns *which* rules can be fixed and *what* their remedy is. It does not own how
//! remedies are sequenced against a file; that's the `lintfix-engine` crate.
//!
//! - [`FixDescriptor`]: scope, priority, variables, triggers and the fix strategy of one rule.
//! - [`RuleCatalog`]: read-only lookup from rule name to descriptor.
//! - [`VariableEvaluator`]: extracts named values from a diagnostic message.
//! - [`Catalog::builtin`]: the default set of text rules.
//! - [`load_catalog`]: replaces the built-in set with a TOML catalog file.

mod builtin;
mod catalog;
mod descriptor;
mod file;
mod variables;

pub use builtin::{BUILTIN_TRANSFORMS, builtin_transform};
pub use catalog::{Catalog, RuleCatalog};
pub use descriptor::{
    FileTransform, FixDescriptor, FixScope, FixStrategy, LineTransform, Template, Transform,
    VariableDecl,
};
pub use file::{CatalogError, load_catalog, parse_catalog};
pub use variables::{RegexVariableEvaluator, VariableEvaluator, Variables};
