use super::*;
use pretty_assertions::assert_eq;

const RESERVED: DiagnosticKind = DiagnosticKind::ReservedSyntaxInCallableReferenceLhs;

fn set_of(diags: &[Diagnostic]) -> DiagnosticSet {
    diags.iter().copied().collect()
}

#[test]
fn test_render_nested_markers() {
    let source = "b?::foo";
    let set = set_of(&[
        Diagnostic::tagged(DiagnosticKind::TypeMismatch, Span::new(0, 7), Engine::New),
        Diagnostic::new(RESERVED, Span::new(0, 1)),
        Diagnostic::tagged(DiagnosticKind::UnsafeCall, Span::new(4, 7), Engine::Old),
    ]);
    assert_eq!(
        render(source, &set),
        "<!NI;TYPE_MISMATCH!><!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<!>?::<!OI;UNSAFE_CALL!>foo<!><!>"
    );
}

#[test]
fn test_render_multiple_entries_share_a_marker() {
    let source = "b?::class";
    let set = set_of(&[
        Diagnostic::new(RESERVED, Span::new(0, 1)),
        Diagnostic::new(
            DiagnosticKind::ExpressionOfNullableTypeInClassLiteralLhs,
            Span::new(0, 1),
        ),
    ]);
    assert_eq!(
        render(source, &set),
        "<!EXPRESSION_OF_NULLABLE_TYPE_IN_CLASS_LITERAL_LHS, RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<!>?::class"
    );
}

#[test]
fn test_render_empty_span() {
    let set = set_of(&[Diagnostic::new(DiagnosticKind::Syntax, Span::point(2))]);
    assert_eq!(render("a<>::foo", &set), "a<<!SYNTAX!><!>>::foo");
}

#[test]
fn test_render_without_diagnostics_is_identity() {
    assert_eq!(render("a::foo", &DiagnosticSet::new()), "a::foo");
    assert_eq!(render("", &DiagnosticSet::new()), "");
}

#[test]
fn test_render_span_at_end_of_source() {
    let set = set_of(&[Diagnostic::new(DiagnosticKind::UnresolvedReference, Span::new(2, 5))]);
    assert_eq!(render("::zap", &set), "::<!UNRESOLVED_REFERENCE!>zap<!>");
}

#[test]
fn test_parse_recovers_source_and_spans() {
    let parsed = match parse(
        "<!NI;TYPE_MISMATCH!><!UNRESOLVED_REFERENCE!>unresolved<!><T>::<!OI;DEBUG_INFO_MISSING_UNRESOLVED!>foo<!><!>",
    ) {
        Ok(parsed) => parsed,
        Err(err) => panic!("marker text should parse: {err}"),
    };
    assert_eq!(parsed.source, "unresolved<T>::foo");
    let expected = set_of(&[
        Diagnostic::tagged(DiagnosticKind::TypeMismatch, Span::new(0, 18), Engine::New),
        Diagnostic::new(DiagnosticKind::UnresolvedReference, Span::new(0, 10)),
        Diagnostic::tagged(
            DiagnosticKind::DebugInfoMissingUnresolved,
            Span::new(15, 18),
            Engine::Old,
        ),
    ]);
    assert_eq!(parsed.expected, expected);
}

#[test]
fn test_parse_then_render_reproduces_text() {
    let lines = [
        "<!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>a<T><!>::foo",
        "<!NI;TYPE_MISMATCH!><!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<T, Any><!>::<!OI;UNSAFE_CALL!>foo<!><!>",
        "<!EXPRESSION_OF_NULLABLE_TYPE_IN_CLASS_LITERAL_LHS, RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<T, Any><!>::class",
        "<!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>a<<!UNRESOLVED_REFERENCE!>unresolved<!>><!>::foo",
        "a<<!SYNTAX!><!>>::foo",
        "fun test() = a::foo",
    ];
    for line in lines {
        let parsed = match parse(line) {
            Ok(parsed) => parsed,
            Err(err) => panic!("{line}: {err}"),
        };
        assert_eq!(render(&parsed.source, &parsed.expected), line);
    }
}

#[test]
fn test_parse_tolerates_spacing_and_case() {
    let Ok(parsed) = parse("<! ni ; type_mismatch ,UNSAFE_CALL!>x<!>") else {
        panic!("spacing should be tolerated");
    };
    assert_eq!(parsed.source, "x");
    assert!(parsed.expected.contains(
        DiagnosticKind::TypeMismatch,
        Span::new(0, 1),
        Some(Engine::New)
    ));
    assert!(parsed
        .expected
        .contains(DiagnosticKind::UnsafeCall, Span::new(0, 1), None));
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        parse("a<!>"),
        Err(MarkerError::UnbalancedClose { offset: 1 })
    );
    assert_eq!(
        parse("<!UNSAFE_CALL!>a"),
        Err(MarkerError::Unclosed { offset: 0 })
    );
    assert_eq!(
        parse("x<!UNSAFE_CALL"),
        Err(MarkerError::Unterminated { offset: 1 })
    );
    assert_eq!(parse("<! !>a<!>"), Err(MarkerError::Empty { offset: 0 }));
    assert_eq!(
        parse("<!NOPE!>a<!>"),
        Err(MarkerError::UnknownKind {
            name: "NOPE".to_string(),
            offset: 0
        })
    );
    assert_eq!(
        parse("<!XI;SYNTAX!>a<!>"),
        Err(MarkerError::UnknownEngine {
            tag: "XI".to_string(),
            offset: 0
        })
    );
}

#[test]
fn test_marker_error_display() {
    let err = MarkerError::UnknownKind {
        name: "NOPE".to_string(),
        offset: 3,
    };
    assert_eq!(err.to_string(), "unknown diagnostic `NOPE` at offset 3");
}
