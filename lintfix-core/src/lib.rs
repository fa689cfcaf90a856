//! Embeddable core library for lintfix.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking into a linter front
//! end or other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`SourceAccessor`](ports::SourceAccessor): read a file's content as lines
//! - [`WritePort`](ports::WritePort): write fixed files back
//!
//! The [`adapters`] module provides filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`FixEngine::run`](pipeline::FixEngine::run): select, apply and reconcile fixes
//! - [`render_patch`](patch::render_patch): unified diff of the files a run changed

pub mod adapters;
pub mod patch;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the pieces embedders need so they don't depend on every crate directly.
pub use lintfix_catalog::{Catalog, RuleCatalog};
pub use lintfix_types::DiagnosticReport;
