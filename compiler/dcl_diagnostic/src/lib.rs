//! Diagnostics for `::` left-hand-side checking.
//!
//! - [`DiagnosticKind`] names what was found; names are the observable contract
//! - [`Diagnostic`] adds where (a [`Span`](dcl_ir::Span)) and which [`Engine`]
//! - [`DiagnosticSet`] holds the per-span result of a check
//! - [`markers`] renders and parses the inline `<!KIND!>` format
//! - [`emitter`] renders terminal and JSON reports

mod diagnostic;
pub mod emitter;
mod kind;
pub mod markers;
mod set;
pub mod span_utils;

pub use diagnostic::Diagnostic;
pub use kind::{DiagnosticKind, Engine, Severity};
pub use set::DiagnosticSet;
