//! Degraded resolution, once per engine.
//!
//! Both engines share the resolution driver ([`ResolverEngine::resolve`])
//! and differ only in how they report a receiver they cannot use: the hooks
//! [`ResolverEngine::unresolved_receiver`] and
//! [`ResolverEngine::nullable_receiver`]. Every diagnostic an engine
//! produces is tagged with that engine; the merger decides what is shown
//! untagged.

mod new;
mod old;

pub use new::NewEngine;
pub use old::OldEngine;

use dcl_diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSet, Engine};
use dcl_ir::{ExprKind, ReferenceExpr, Span, TypeNode};

use crate::oracle::{Declaration, ResolutionOracle};
use crate::reserved::Detection;

/// One engine's view of one reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// The declaration the degraded left-hand side resolved to.
    pub resolved: Option<Declaration>,
    /// Diagnostics from resolution, tagged with the engine.
    pub secondary: DiagnosticSet,
}

/// A resolution engine.
pub trait ResolverEngine {
    fn engine(&self) -> Engine;

    /// Companion diagnostic for a receiver with no declaration. The driver
    /// reports `UNRESOLVED_REFERENCE` itself.
    fn unresolved_receiver(&self, reference: &ReferenceExpr) -> Diagnostic;

    /// Diagnostic for a nullable receiver of a non-safe callable reference.
    fn nullable_receiver(&self, reference: &ReferenceExpr) -> Diagnostic;

    /// Resolve the degraded left-hand side of `reference`.
    ///
    /// `detection` is `None` for a reference without a left-hand side.
    fn resolve(
        &self,
        oracle: &dyn ResolutionOracle,
        reference: &ReferenceExpr,
        detection: Option<&Detection<'_>>,
    ) -> ResolutionOutcome {
        let engine = self.engine();
        let mut outcome = ResolutionOutcome::default();
        let report = |outcome: &mut ResolutionOutcome, diag: Diagnostic| {
            outcome.secondary.insert(diag.with_engine(Some(engine)));
        };

        let Some(detection) = detection else {
            // `::member`: a top-level function reference.
            if let ReferenceExpr::CallableReference {
                member,
                member_span,
                ..
            } = reference
            {
                if !oracle.resolve_function(*member) {
                    report(
                        &mut outcome,
                        Diagnostic::new(DiagnosticKind::UnresolvedReference, *member_span),
                    );
                }
            }
            return outcome;
        };

        for arg in &detection.type_args {
            for span in unresolved_type_names(oracle, arg) {
                report(
                    &mut outcome,
                    Diagnostic::new(DiagnosticKind::UnresolvedReference, span),
                );
            }
        }

        let leaf = detection.degraded;
        let declaration = match leaf.kind {
            ExprKind::Identifier(name) => oracle.resolve(name),
            _ => None,
        };
        let Some(declaration) = declaration else {
            tracing::trace!(%engine, "receiver unresolved");
            report(
                &mut outcome,
                Diagnostic::new(DiagnosticKind::UnresolvedReference, leaf.span),
            );
            report(&mut outcome, self.unresolved_receiver(reference));
            return outcome;
        };
        outcome.resolved = Some(declaration);

        let nullable = detection.nullable || declaration.ty.nullable;
        match reference {
            ReferenceExpr::ClassLiteral { .. } => {
                if nullable {
                    report(
                        &mut outcome,
                        Diagnostic::new(
                            DiagnosticKind::ExpressionOfNullableTypeInClassLiteralLhs,
                            detection.anchor,
                        ),
                    );
                }
            }
            ReferenceExpr::CallableReference {
                member,
                member_span,
                ..
            } => {
                if nullable && !reference.is_safe() {
                    report(&mut outcome, self.nullable_receiver(reference));
                }
                if !oracle.has_member(declaration.ty, *member) {
                    report(
                        &mut outcome,
                        Diagnostic::new(DiagnosticKind::UnresolvedReference, *member_span),
                    );
                }
            }
        }
        tracing::trace!(%engine, secondary = outcome.secondary.len(), "resolved");
        outcome
    }
}

/// Spans of type names in `ty` (nested arguments included) that do not
/// resolve.
fn unresolved_type_names(oracle: &dyn ResolutionOracle, ty: &TypeNode) -> Vec<Span> {
    let mut spans = Vec::new();
    ty.walk(&mut |node| {
        if !oracle.resolve_type(node.name) {
            spans.push(node.name_span);
        }
    });
    spans
}

#[cfg(test)]
mod tests;
