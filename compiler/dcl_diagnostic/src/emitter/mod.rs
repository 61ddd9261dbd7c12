//! Diagnostic Emitters
//!
//! Output formats for checked units:
//! - Terminal: human-readable, optionally colored
//! - JSON: machine-readable output for tooling
//!
//! Inline marker output is not an emitter; see [`crate::markers::render`].

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write;

use crate::span_utils::SourceFile;
use crate::Diagnostic;

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic reported in `file`.
    fn emit(&mut self, file: &SourceFile, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics from one file.
    fn emit_all(&mut self, file: &SourceFile, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(file, diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors and notes.
    fn emit_summary(&mut self, error_count: usize, note_count: usize);
}

/// Escape a string for JSON output.
pub(crate) fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(result, "\\u{:04x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}
