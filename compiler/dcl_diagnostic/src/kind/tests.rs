use super::*;

#[test]
fn test_all_kinds_round_trip() {
    for kind in DiagnosticKind::ALL {
        assert_eq!(kind.as_str().parse::<DiagnosticKind>(), Ok(*kind));
        assert_eq!(kind.to_string(), kind.as_str());
    }
    assert_eq!(DiagnosticKind::ALL.len(), 7);
}

#[test]
fn test_kind_parse_is_case_insensitive() {
    assert_eq!(
        "unsafe_call".parse::<DiagnosticKind>(),
        Ok(DiagnosticKind::UnsafeCall)
    );
    assert!("UNUSED_VARIABLE".parse::<DiagnosticKind>().is_err());
}

#[test]
fn test_only_debug_info_is_a_note() {
    for kind in DiagnosticKind::ALL {
        let expected = if *kind == DiagnosticKind::DebugInfoMissingUnresolved {
            Severity::Note
        } else {
            Severity::Error
        };
        assert_eq!(kind.severity(), expected, "{kind}");
    }
}

#[test]
fn test_syntactic_kinds() {
    assert!(DiagnosticKind::ReservedSyntaxInCallableReferenceLhs.is_syntactic());
    assert!(DiagnosticKind::Syntax.is_syntactic());
    assert!(!DiagnosticKind::TypeMismatch.is_syntactic());
    assert!(!DiagnosticKind::UnresolvedReference.is_syntactic());
}

#[test]
fn test_engine_tags() {
    assert_eq!(Engine::Old.tag(), "OI");
    assert_eq!(Engine::New.tag(), "NI");
    assert_eq!("ni".parse::<Engine>(), Ok(Engine::New));
    assert!("XI".parse::<Engine>().is_err());
    assert_eq!(Engine::Old.other(), Engine::New);
    assert_eq!(Engine::New.other(), Engine::Old);
}

#[test]
fn test_every_kind_is_documented() {
    for kind in DiagnosticKind::ALL {
        assert!(!kind.message().is_empty());
        assert!(kind.explanation().len() > kind.message().len());
    }
}
