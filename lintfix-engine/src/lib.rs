//! Fix engine for lintfix.
//!
//! Responsibilities:
//! - Select the fixable violations of a report, expanding triggers and de-duplicating
//!   whole-file rules ([`select_fixable`]).
//! - Replay each file's ordered entries against its line buffer ([`FixApplier`]).
//! - Write fix outcomes back into the report's counters ([`Reconciler`]).
//!
//! Nothing here performs I/O; sources arrive as [`SourceLines`] and leave as text.

mod applier;
mod error;
mod lines;
mod reconcile;
mod selector;
mod template;

pub use applier::{AppliedFixes, FixApplier, LINE_NB_VARIABLE};
pub use error::FixError;
pub use lines::{LineEnding, SourceLines};
pub use reconcile::Reconciler;
pub use selector::{FixableEntry, SelectOptions, TRIGGER_SUFFIX, select_file, select_fixable};
pub use template::{has_placeholder, substitute};
