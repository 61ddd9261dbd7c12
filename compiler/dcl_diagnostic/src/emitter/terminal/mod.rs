//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use crate::span_utils::SourceFile;
use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
///
/// Each diagnostic renders as a header and a location line:
///
/// ```text
/// error[UNSAFE_CALL] (OI): only safe access is allowed on a receiver of nullable type
///   --> units/nullable.dcl:4:20: `foo`
/// ```
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl TerminalEmitter<io::Stdout> {
    /// Create a terminal emitter for stdout.
    pub fn stdout(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stdout(), mode, is_tty)
    }
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// `is_tty` is consulted for `ColorMode::Auto` only.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, file: &SourceFile, diagnostic: &Diagnostic) {
        // Header: severity[KIND] (TAG): message
        self.write_severity(diagnostic.kind.severity());
        self.write_code(diagnostic.kind.as_str());
        if let Some(engine) = diagnostic.engine {
            let _ = write!(self.writer, " ({engine})");
        }
        let _ = writeln!(self.writer, ": {}", diagnostic.kind.message());

        let (line, col) = file.line_col(diagnostic.span);
        let _ = write!(self.writer, "  --> {}:{line}:{col}: ", file.path());
        let snippet = file.snippet(diagnostic.span);
        if snippet.is_empty() {
            self.write_colored("(empty)", colors::SECONDARY);
        } else {
            self.write_colored(&format!("`{snippet}`"), colors::SECONDARY);
        }
        let _ = writeln!(self.writer);
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, note_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if note_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {note_count} note{} emitted",
                    plural_s(note_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if note_count > 0 {
            self.write_colored("note", colors::NOTE);
            let _ = writeln!(
                self.writer,
                ": {note_count} note{} emitted",
                plural_s(note_count)
            );
        }
    }
}
