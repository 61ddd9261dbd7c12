use super::*;
use dcl_diagnostic::markers;
use dcl_diagnostic::{Diagnostic, DiagnosticKind};
use dcl_ir::Span;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const HEADER: &str = "// !WITH_NEW_INFERENCE
class a<T> { foo }
class b<T1, T2> { foo }
fun Int.foo() {}
type T
val a: Int
val b: Int?
";

/// Check `HEADER` plus one annotated check item and compare the result with
/// the item's markers.
fn assert_markers(annotated_reference: &str) {
    let annotated = format!("{HEADER}fun test() = {annotated_reference}\n");
    let parsed = match markers::parse(&annotated) {
        Ok(parsed) => parsed,
        Err(err) => panic!("{annotated_reference}: {err}"),
    };
    let interner = StringInterner::new();
    let report = check_source(&parsed.source, &interner, None);
    assert_eq!(
        markers::render(&parsed.source, &report.diagnostics),
        annotated,
        "{annotated_reference}"
    );
    assert_eq!(report.diagnostics, parsed.expected);
}

#[test]
fn test_callable_references() {
    assert_markers("<!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>a<T><!>::foo");
    assert_markers(
        "<!NI;TYPE_MISMATCH!><!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<!>?::<!OI;UNSAFE_CALL!>foo<!><!>",
    );
    assert_markers(
        "<!NI;TYPE_MISMATCH!><!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<T, Any><!>::<!OI;UNSAFE_CALL!>foo<!><!>",
    );
    assert_markers(
        "<!NI;TYPE_MISMATCH!><!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<T><!>?::<!OI;UNSAFE_CALL!>foo<!><!>",
    );
}

#[test]
fn test_class_literals() {
    assert_markers("<!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>a<T><!>::class");
    assert_markers(
        "<!EXPRESSION_OF_NULLABLE_TYPE_IN_CLASS_LITERAL_LHS, RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<!>?::class",
    );
    assert_markers(
        "<!EXPRESSION_OF_NULLABLE_TYPE_IN_CLASS_LITERAL_LHS, RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<T, Any><!>::class",
    );
}

#[test]
fn test_unresolved() {
    assert_markers(
        "<!NI;TYPE_MISMATCH!><!UNRESOLVED_REFERENCE!>unresolved<!><T>::<!OI;DEBUG_INFO_MISSING_UNRESOLVED!>foo<!><!>",
    );
    assert_markers(
        "<!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>a<<!UNRESOLVED_REFERENCE!>unresolved<!>><!>::foo",
    );
    assert_markers("a<<!SYNTAX!><!>>::foo");
    assert_markers(
        "<!NI;TYPE_MISMATCH!><!UNRESOLVED_REFERENCE!>unresolved<!>?::<!OI;DEBUG_INFO_MISSING_UNRESOLVED!>foo<!><!>",
    );
}

#[test]
fn test_plain_references_are_clean() {
    assert_markers("a::foo");
    assert_markers("Int::foo");
    assert_markers("a::class");
    assert_markers("::<!UNRESOLVED_REFERENCE!>nothing<!>");
}

#[test]
fn test_malformed_nullable_application() {
    assert_markers(
        "<!NI;TYPE_MISMATCH!><!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<<!SYNTAX!><!>><!>?::<!OI;UNSAFE_CALL!>foo<!><!>",
    );
}

#[test]
fn test_single_engine_reports_untagged() {
    let source = format!("{HEADER}fun test() = b?::foo\n");
    let interner = StringInterner::new();
    let report = check_source(&source, &interner, Some(EngineMode::OldOnly));
    assert_eq!(report.config.engines, EngineMode::OldOnly);
    let kinds: Vec<(DiagnosticKind, Option<Engine>)> = report
        .diagnostics
        .iter()
        .map(|d| (d.kind, d.engine))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (DiagnosticKind::ReservedSyntaxInCallableReferenceLhs, None),
            (DiagnosticKind::UnsafeCall, None),
        ]
    );
}

#[test]
fn test_language_directive_selects_engine() {
    let source = format!("// !LANGUAGE: +NewInference\n{HEADER}fun test() = b?::foo\n");
    let interner = StringInterner::new();
    let report = check_source(&source, &interner, None);
    assert_eq!(report.config.engines, EngineMode::NewOnly);
    assert_eq!(report.diagnostics.count_kind(DiagnosticKind::TypeMismatch), 1);
    assert_eq!(report.diagnostics.count_kind(DiagnosticKind::UnsafeCall), 0);
}

#[test]
fn test_suppression() {
    let source = format!("// !DIAGNOSTICS: -TYPE_MISMATCH -UNUSED_VARIABLE\n{HEADER}fun test() = b?::foo\n");
    let interner = StringInterner::new();
    let report = check_source(&source, &interner, None);
    assert_eq!(report.diagnostics.count_kind(DiagnosticKind::TypeMismatch), 0);
    assert_eq!(report.diagnostics.count_kind(DiagnosticKind::UnsafeCall), 1);
    assert_eq!(report.references, 1);
}

#[test]
fn test_parse_errors_become_syntax() {
    let source = format!("{HEADER}fun test() = a<T::foo\nfun ok() = a::foo\n");
    let interner = StringInterner::new();
    let report = check_source(&source, &interner, None);
    assert_eq!(report.parse_errors, 1);
    assert_eq!(report.references, 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics.count_kind(DiagnosticKind::Syntax), 1);
}

#[test]
fn test_analysis_keeps_per_engine_outcomes() {
    let interner = StringInterner::new();
    let unit = parse_unit(&format!("{HEADER}fun test() = unresolved?::foo\n"), &interner);
    let table = SymbolTable::from_unit(&unit, &interner);
    let analysis = analyze_reference(&unit.checks[0].reference, &table, EngineMode::Both);

    assert_eq!(
        analysis.detection.as_ref().map(|d| d.shape),
        Some(crate::shape::ShapeKind::Unresolved)
    );
    let engines: Vec<Engine> = analysis.outcomes.iter().map(|(e, _)| *e).collect();
    assert_eq!(engines, vec![Engine::Old, Engine::New]);
    assert!(analysis.outcomes.iter().all(|(_, o)| o.resolved.is_none()));

    let suppressed = CheckConfig::default().suppress(DiagnosticKind::UnresolvedReference);
    let diagnostics = analysis.diagnostics(&suppressed);
    assert_eq!(diagnostics.count_kind(DiagnosticKind::UnresolvedReference), 0);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_check_reference_on_hand_built_tree() {
    let interner = StringInterner::new();
    let unit = parse_unit(HEADER, &interner);
    let table = SymbolTable::from_unit(&unit, &interner);
    // `zzz::foo` where `zzz` was left as an identifier by the caller.
    let reference = ReferenceExpr::CallableReference {
        lhs: Some(dcl_ir::ExprNode::identifier(
            interner.intern("zzz"),
            Span::new(0, 3),
        )),
        member: interner.intern("foo"),
        member_span: Span::new(5, 8),
        safe: false,
        span: Span::new(0, 8),
    };
    let set = check_reference(&reference, &table, &CheckConfig::default());
    assert_eq!(
        set.to_vec(),
        vec![
            Diagnostic::tagged(DiagnosticKind::TypeMismatch, Span::new(0, 8), Engine::New),
            Diagnostic::new(DiagnosticKind::UnresolvedReference, Span::new(0, 3)),
            Diagnostic::tagged(
                DiagnosticKind::DebugInfoMissingUnresolved,
                Span::new(5, 8),
                Engine::Old
            ),
        ]
    );
}

fn arb_reference() -> impl Strategy<Value = String> {
    let base = prop_oneof![
        Just("a"),
        Just("b"),
        Just("Int"),
        Just("unresolved")
    ];
    let args = prop_oneof![
        Just(""),
        Just("<T>"),
        Just("<>"),
        Just("<T, Any>"),
        Just("<unresolved>"),
        Just("<1>")
    ];
    let nullable = prop_oneof![Just(""), Just("?"), Just("??")];
    let target = prop_oneof![Just("foo"), Just("class"), Just("bar")];
    (base, args, nullable, target).prop_map(|(b, a, n, t)| format!("{b}{a}{n}::{t}"))
}

proptest! {
    #[test]
    fn prop_checking_is_idempotent(reference in arb_reference()) {
        let source = format!("{HEADER}fun test() = {reference}\n");
        let interner = StringInterner::new();
        let first = check_source(&source, &interner, None);
        let second = check_source(&source, &interner, None);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            markers::render(&source, &first.diagnostics),
            markers::render(&source, &second.diagnostics)
        );
    }

    #[test]
    fn prop_reserved_iff_well_formed_wrapper(reference in arb_reference()) {
        let source = format!("{HEADER}fun test() = {reference}\n");
        let interner = StringInterner::new();
        let report = check_source(&source, &interner, None);
        let reserved = report
            .diagnostics
            .count_kind(DiagnosticKind::ReservedSyntaxInCallableReferenceLhs);

        let lhs = reference.split("::").next().unwrap_or_default();
        let unresolved = lhs.starts_with("unresolved");
        let nullable = lhs.ends_with('?');
        let well_formed_args = lhs.contains("<T") || lhs.contains("<unresolved>");
        let expected = usize::from(!unresolved && (nullable || well_formed_args));
        prop_assert_eq!(reserved, expected);

        // Never both engine companions in one engine.
        for engine in [Engine::Old, Engine::New] {
            let debug = report.diagnostics.iter().any(|d| {
                d.kind == DiagnosticKind::DebugInfoMissingUnresolved && d.engine == Some(engine)
            });
            let mismatch = report.diagnostics.iter().any(|d| {
                d.kind == DiagnosticKind::TypeMismatch && d.engine == Some(engine)
            });
            prop_assert!(!(debug && mismatch));
        }
    }
}
