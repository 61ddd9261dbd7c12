//! JSON Emitter
//!
//! Machine-readable diagnostic output in JSON format.

use std::io::Write;

use crate::span_utils::SourceFile;
use crate::Diagnostic;

use super::{escape_json, DiagnosticEmitter};

/// JSON emitter for machine-readable output.
///
/// Emits one array of objects; callers bracket the run with
/// [`begin`](Self::begin) and [`end`](Self::end).
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        let _ = writeln!(self.writer, "\n]");
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, file: &SourceFile, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        let (line, column) = file.line_col(diagnostic.span);
        let engine = match diagnostic.engine {
            Some(engine) => format!("\"{}\"", engine.tag()),
            None => "null".to_string(),
        };

        // Build JSON manually (to avoid serde dependency)
        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(
            self.writer,
            "    \"kind\": \"{}\",",
            diagnostic.kind.as_str()
        );
        let _ = writeln!(
            self.writer,
            "    \"severity\": \"{}\",",
            diagnostic.kind.severity()
        );
        let _ = writeln!(self.writer, "    \"engine\": {engine},");
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(diagnostic.kind.message())
        );
        let _ = writeln!(
            self.writer,
            "    \"file\": \"{}\",",
            escape_json(file.path())
        );
        let _ = writeln!(self.writer, "    \"start\": {},", diagnostic.span.start);
        let _ = writeln!(self.writer, "    \"end\": {},", diagnostic.span.end);
        let _ = writeln!(self.writer, "    \"line\": {line},");
        let _ = writeln!(self.writer, "    \"column\": {column},");
        let _ = writeln!(
            self.writer,
            "    \"text\": \"{}\"",
            escape_json(file.snippet(diagnostic.span))
        );
        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _note_count: usize) {
        // Counts are derivable from the array.
    }
}
