//! The new inference engine (`NI`).

use dcl_diagnostic::{Diagnostic, DiagnosticKind, Engine};
use dcl_ir::{ReferenceExpr, Spanned};

use super::ResolverEngine;

/// Reports receiver problems as a mismatch of the whole reference.
#[derive(Copy, Clone, Debug, Default)]
pub struct NewEngine;

impl NewEngine {
    fn mismatch(reference: &ReferenceExpr) -> Diagnostic {
        Diagnostic::tagged(DiagnosticKind::TypeMismatch, reference.span(), Engine::New)
    }
}

impl ResolverEngine for NewEngine {
    fn engine(&self) -> Engine {
        Engine::New
    }

    fn unresolved_receiver(&self, reference: &ReferenceExpr) -> Diagnostic {
        NewEngine::mismatch(reference)
    }

    fn nullable_receiver(&self, reference: &ReferenceExpr) -> Diagnostic {
        NewEngine::mismatch(reference)
    }
}
