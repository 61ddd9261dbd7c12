//! The `check` and `markers` commands: analyze one unit and print its
//! diagnostics.

use std::io::{self, Write};

use dcl_check::check_source;
use dcl_diagnostic::emitter::{DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use dcl_diagnostic::markers;
use dcl_diagnostic::span_utils::SourceFile;
use dcl_ir::StringInterner;

use super::{read_file, CliOptions, OutputFormat};

/// Check a unit and print its diagnostics in `options.format`.
///
/// Exits with status 1 when an error-severity diagnostic was reported. The
/// `markers` format always exits 0: its output is the result.
pub fn check_file(path: &str, options: &CliOptions) {
    let content = read_file(path);
    let interner = StringInterner::new();
    let report = check_source(&content, &interner, options.engines);
    tracing::debug!(
        path,
        engines = %report.config.engines,
        references = report.references,
        diagnostics = report.diagnostics.len(),
        "checked"
    );

    let errors = report.diagnostics.error_count();
    let notes = report.diagnostics.len() - errors;

    match options.format {
        OutputFormat::Markers => {
            let mut out = io::stdout().lock();
            let _ = out.write_all(markers::render(&content, &report.diagnostics).as_bytes());
            let _ = out.flush();
            return;
        }
        OutputFormat::Json => {
            let file = SourceFile::new(path, content);
            let mut emitter = JsonEmitter::new(io::stdout());
            emitter.begin();
            emitter.emit_all(&file, &report.diagnostics.to_vec());
            emitter.end();
            emitter.flush();
        }
        OutputFormat::Text => {
            let file = SourceFile::new(path, content);
            let is_tty = std::io::IsTerminal::is_terminal(&io::stdout());
            let mut emitter = TerminalEmitter::stdout(options.color, is_tty);
            emitter.emit_all(&file, &report.diagnostics.to_vec());
            if report.diagnostics.is_empty() {
                println!(
                    "OK: {path} ({} references, engines: {})",
                    report.references, report.config.engines
                );
            } else {
                emitter.emit_summary(errors, notes);
            }
            emitter.flush();
        }
    }

    if errors > 0 {
        std::process::exit(1);
    }
}
