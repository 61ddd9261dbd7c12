//! The old inference engine (`OI`).

use dcl_diagnostic::{Diagnostic, DiagnosticKind, Engine};
use dcl_ir::ReferenceExpr;

use super::ResolverEngine;

/// Reports receiver problems on the member (or `class` keyword).
#[derive(Copy, Clone, Debug, Default)]
pub struct OldEngine;

impl ResolverEngine for OldEngine {
    fn engine(&self) -> Engine {
        Engine::Old
    }

    fn unresolved_receiver(&self, reference: &ReferenceExpr) -> Diagnostic {
        Diagnostic::tagged(
            DiagnosticKind::DebugInfoMissingUnresolved,
            reference.target_span(),
            Engine::Old,
        )
    }

    fn nullable_receiver(&self, reference: &ReferenceExpr) -> Diagnostic {
        Diagnostic::tagged(
            DiagnosticKind::UnsafeCall,
            reference.target_span(),
            Engine::Old,
        )
    }
}
