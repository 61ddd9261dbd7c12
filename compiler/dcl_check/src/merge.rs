//! Combining primary diagnostics with per-engine outcomes.

use dcl_diagnostic::{Diagnostic, DiagnosticSet, Engine};

/// Merge primary diagnostics with each engine's secondary set.
///
/// A secondary diagnostic every engine reports at the same span is shown
/// once, untagged; one that only some engines report keeps its tag. With a
/// single engine nothing is tagged.
pub fn merge(primary: &[Diagnostic], secondary: &[(Engine, &DiagnosticSet)]) -> DiagnosticSet {
    let mut merged: DiagnosticSet = primary.iter().map(|d| d.with_engine(None)).collect();

    if let [(_, only)] = secondary {
        merged.extend(only.iter().map(|d| d.with_engine(None)));
        return merged;
    }

    for (engine, set) in secondary {
        for diag in set.iter() {
            let agreed = secondary
                .iter()
                .filter(|(other, _)| other != engine)
                .all(|(other, other_set)| other_set.contains(diag.kind, diag.span, Some(*other)));
            let engine = if agreed { None } else { Some(*engine) };
            merged.insert(diag.with_engine(engine));
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcl_diagnostic::DiagnosticKind;
    use dcl_ir::Span;
    use pretty_assertions::assert_eq;

    fn set(engine: Engine, diags: &[(DiagnosticKind, Span)]) -> DiagnosticSet {
        diags
            .iter()
            .map(|(kind, span)| Diagnostic::tagged(*kind, *span, engine))
            .collect()
    }

    #[test]
    fn test_agreement_is_untagged_divergence_is_tagged() {
        let whole = Span::new(0, 7);
        let lhs = Span::new(0, 1);
        let member = Span::new(4, 7);
        let old = set(
            Engine::Old,
            &[
                (DiagnosticKind::UnresolvedReference, lhs),
                (DiagnosticKind::DebugInfoMissingUnresolved, member),
            ],
        );
        let new = set(
            Engine::New,
            &[
                (DiagnosticKind::UnresolvedReference, lhs),
                (DiagnosticKind::TypeMismatch, whole),
            ],
        );

        let merged = merge(&[], &[(Engine::Old, &old), (Engine::New, &new)]);
        let expected: DiagnosticSet = [
            Diagnostic::tagged(DiagnosticKind::TypeMismatch, whole, Engine::New),
            Diagnostic::new(DiagnosticKind::UnresolvedReference, lhs),
            Diagnostic::tagged(DiagnosticKind::DebugInfoMissingUnresolved, member, Engine::Old),
        ]
        .into_iter()
        .collect();
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_primary_is_untagged_and_absorbs_agreeing_secondary() {
        let lhs = Span::new(0, 1);
        let primary = [Diagnostic::new(
            DiagnosticKind::ExpressionOfNullableTypeInClassLiteralLhs,
            lhs,
        )];
        let old = set(
            Engine::Old,
            &[(DiagnosticKind::ExpressionOfNullableTypeInClassLiteralLhs, lhs)],
        );
        let merged = merge(&primary, &[(Engine::Old, &old), (Engine::New, &DiagnosticSet::new())]);
        assert_eq!(merged.to_vec(), primary.to_vec());
    }

    #[test]
    fn test_single_engine_is_untagged() {
        let member = Span::new(4, 7);
        let old = set(Engine::Old, &[(DiagnosticKind::UnsafeCall, member)]);
        let merged = merge(&[], &[(Engine::Old, &old)]);
        assert!(merged.contains(DiagnosticKind::UnsafeCall, member, None));
        assert_eq!(merged.len(), 1);
    }
}
