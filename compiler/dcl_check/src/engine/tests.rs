use super::*;
use crate::oracle::SymbolTable;
use crate::reserved::detect;
use crate::shape::classify;
use dcl_diagnostic::Engine;
use dcl_ir::{Span, StringInterner};
use dcl_parse::parse_unit;
use pretty_assertions::assert_eq;

const DECLS: &str = "\nclass a<T> { foo }\nclass b<T1, T2> { foo }\nfun Int.foo()\nval a: Int\nval b: Int?\ntype T\nfun top()";

/// Resolve `fun t() = <text>` (reference at offset 10) with `engine`.
fn outcome(engine: &dyn ResolverEngine, text: &str) -> ResolutionOutcome {
    let interner = StringInterner::new();
    let source = format!("fun t() = {text}{DECLS}");
    let unit = parse_unit(&source, &interner);
    assert!(unit.errors.is_empty(), "{source}: {:?}", unit.errors);
    let table = SymbolTable::from_unit(&unit, &interner);
    let reference = &unit.checks[0].reference;
    let detection = reference
        .lhs()
        .map(|lhs| detect(classify(lhs), reference.is_class_literal()));
    engine.resolve(&table, reference, detection.as_ref())
}

fn entries(outcome: &ResolutionOutcome) -> Vec<String> {
    outcome.secondary.iter().map(ToString::to_string).collect()
}

#[test]
fn test_clean_resolution_has_no_secondary() {
    for engine in [&OldEngine as &dyn ResolverEngine, &NewEngine] {
        let out = outcome(engine, "a<T>::foo");
        assert!(out.secondary.is_empty(), "{:?}", entries(&out));
        assert_eq!(
            out.resolved.map(|d| d.kind),
            Some(crate::oracle::DeclarationKind::Value)
        );
    }
}

#[test]
fn test_unresolved_receiver_companions_differ() {
    let old = outcome(&OldEngine, "unresolved<T>::foo");
    assert_eq!(
        entries(&old),
        vec!["OI;UNRESOLVED_REFERENCE at 10..20", "OI;DEBUG_INFO_MISSING_UNRESOLVED at 25..28"]
    );
    assert_eq!(old.resolved, None);

    let new = outcome(&NewEngine, "unresolved<T>::foo");
    assert_eq!(
        entries(&new),
        vec!["NI;TYPE_MISMATCH at 10..28", "NI;UNRESOLVED_REFERENCE at 10..20"]
    );
}

#[test]
fn test_unresolved_class_literal_marks_keyword() {
    let old = outcome(&OldEngine, "unresolved::class");
    assert!(old.secondary.contains(
        DiagnosticKind::DebugInfoMissingUnresolved,
        Span::new(22, 27),
        Some(Engine::Old)
    ));
}

#[test]
fn test_nullable_receiver() {
    for text in ["b?::foo", "b<T, Any>::foo"] {
        let old = outcome(&OldEngine, text);
        let new = outcome(&NewEngine, text);
        let end = 10 + u32::try_from(text.len()).unwrap_or(0);
        let member = Span::new(end - 3, end);
        assert!(old.secondary.contains(DiagnosticKind::UnsafeCall, member, Some(Engine::Old)));
        assert_eq!(old.secondary.len(), 1);
        assert!(new.secondary.contains(
            DiagnosticKind::TypeMismatch,
            Span::new(10, end),
            Some(Engine::New)
        ));
        assert_eq!(new.secondary.len(), 1);
    }
}

#[test]
fn test_safe_access_accepts_nullable_receiver() {
    let interner = StringInterner::new();
    let b = interner.intern("b");
    let reference = ReferenceExpr::CallableReference {
        lhs: Some(dcl_ir::ExprNode::identifier(b, Span::new(0, 1))),
        member: interner.intern("foo"),
        member_span: Span::new(4, 7),
        safe: true,
        span: Span::new(0, 7),
    };
    let unit = parse_unit("fun Int.foo()\nval b: Int?", &interner);
    let table = SymbolTable::from_unit(&unit, &interner);
    let detection = reference
        .lhs()
        .map(|lhs| detect(classify(lhs), false));
    for engine in [&OldEngine as &dyn ResolverEngine, &NewEngine] {
        let out = engine.resolve(&table, &reference, detection.as_ref());
        assert!(out.secondary.is_empty());
    }
}

#[test]
fn test_plain_access_on_declared_nullable_receiver() {
    let interner = StringInterner::new();
    let reference = ReferenceExpr::CallableReference {
        lhs: Some(dcl_ir::ExprNode::identifier(interner.intern("b"), Span::new(0, 1))),
        member: interner.intern("foo"),
        member_span: Span::new(3, 6),
        safe: false,
        span: Span::new(0, 6),
    };
    let unit = parse_unit("fun Int.foo()\nval b: Int?", &interner);
    let table = SymbolTable::from_unit(&unit, &interner);
    let detection = reference
        .lhs()
        .map(|lhs| detect(classify(lhs), false));
    let out = OldEngine.resolve(&table, &reference, detection.as_ref());
    assert!(out.secondary.contains(
        DiagnosticKind::UnsafeCall,
        Span::new(3, 6),
        Some(Engine::Old)
    ));
    assert_eq!(out.secondary.len(), 1);
}

#[test]
fn test_nullable_class_literal_anchor() {
    let out = outcome(&OldEngine, "b<T, Any>::class");
    assert_eq!(
        entries(&out),
        vec!["OI;EXPRESSION_OF_NULLABLE_TYPE_IN_CLASS_LITERAL_LHS at 10..19"]
    );
}

#[test]
fn test_unresolved_type_argument_and_member() {
    let out = outcome(&NewEngine, "a<unresolved>::bar");
    assert_eq!(
        entries(&out),
        vec!["NI;UNRESOLVED_REFERENCE at 12..22", "NI;UNRESOLVED_REFERENCE at 25..28"]
    );
}

#[test]
fn test_reference_without_lhs() {
    assert!(outcome(&OldEngine, "::top").secondary.is_empty());
    let out = outcome(&OldEngine, "::missing");
    assert_eq!(entries(&out), vec!["OI;UNRESOLVED_REFERENCE at 12..19"]);
}
