//! The diagnostic value.

use std::fmt;

use dcl_ir::Span;

use crate::{DiagnosticKind, Engine};

/// A diagnostic: what, where, and which engine reported it.
///
/// `engine == None` means the diagnostic is engine-agnostic (a primary
/// diagnostic, or a secondary one both engines agree on) and is reported
/// once, untagged.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub engine: Option<Engine>,
}

impl Diagnostic {
    /// An untagged diagnostic.
    pub const fn new(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic {
            kind,
            span,
            engine: None,
        }
    }

    /// A diagnostic reported by one engine only.
    pub const fn tagged(kind: DiagnosticKind, span: Span, engine: Engine) -> Self {
        Diagnostic {
            kind,
            span,
            engine: Some(engine),
        }
    }

    /// The same diagnostic with its engine tag replaced.
    pub const fn with_engine(self, engine: Option<Engine>) -> Self {
        Diagnostic {
            kind: self.kind,
            span: self.span,
            engine,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind.severity() == crate::Severity::Error
    }

    /// Sort key inside one marker: untagged first, then `OI`, then `NI`;
    /// alphabetical by kind name within each group.
    pub fn presentation_key(&self) -> (u8, &'static str) {
        let rank = match self.engine {
            None => 0,
            Some(Engine::Old) => 1,
            Some(Engine::New) => 2,
        };
        (rank, self.kind.as_str())
    }

    /// Marker entry text: `KIND` or `TAG;KIND`.
    pub fn marker_entry(&self) -> String {
        match self.engine {
            Some(engine) => format!("{};{}", engine.tag(), self.kind.as_str()),
            None => self.kind.as_str().to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.marker_entry(), self.span)
    }
}
