// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Marker-file fixtures.
//!
//! Every `.dcl` file under `tests/testdata/` carries its expected
//! diagnostics inline; checking the stripped source must reproduce the
//! file byte for byte.

use std::path::{Path, PathBuf};

use dcl_check::{check_source, EngineMode};
use dcl_diagnostic::{markers, DiagnosticKind};
use dcl_ir::StringInterner;
use dclc::verify::{verify_file, verify_path, Outcome, VerifyConfig};
use pretty_assertions::assert_eq;

fn testdata() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/testdata")
}

fn assert_passes(name: &str) {
    let interner = StringInterner::new();
    let outcome = verify_file(&testdata().join(name), &interner, None);
    match outcome.outcome {
        Outcome::Passed => {}
        Outcome::Mismatch { expected, actual } => assert_eq!(actual, expected, "{name}"),
        Outcome::Error(err) => panic!("{name}: {err}"),
    }
}

#[test]
fn reserved_expression_syntax() {
    assert_passes("reservedExpressionSyntax.dcl");
}

#[test]
fn resolved_receivers() {
    assert_passes("resolvedReceivers.dcl");
}

#[test]
fn old_inference_only() {
    assert_passes("oldInferenceOnly.dcl");
}

#[test]
fn new_inference_only() {
    assert_passes("newInferenceOnly.dcl");
}

#[test]
fn whole_directory_in_parallel_and_sequentially() {
    for parallel in [true, false] {
        let summary = verify_path(
            &testdata(),
            &VerifyConfig {
                engines: None,
                parallel,
            },
        );
        assert_eq!(summary.files.len(), 4);
        assert_eq!(summary.failed(), 0, "{:?}", summary.files);
    }
}

#[test]
fn reserved_fixture_counts() {
    let text = std::fs::read_to_string(testdata().join("reservedExpressionSyntax.dcl")).unwrap();
    let parsed = markers::parse(&text).unwrap();
    let interner = StringInterner::new();
    let report = check_source(&parsed.source, &interner, None);

    assert_eq!(report.references, 11);
    assert_eq!(report.parse_errors, 0);
    assert_eq!(report.config.engines, EngineMode::Both);
    assert_eq!(
        report
            .diagnostics
            .count_kind(DiagnosticKind::ReservedSyntaxInCallableReferenceLhs),
        8
    );
    assert_eq!(report.diagnostics.count_kind(DiagnosticKind::Syntax), 1);
}

#[test]
fn engine_override_breaks_two_engine_fixture() {
    let interner = StringInterner::new();
    let outcome = verify_file(
        &testdata().join("reservedExpressionSyntax.dcl"),
        &interner,
        Some(EngineMode::NewOnly),
    );
    let Outcome::Mismatch { actual, .. } = outcome.outcome else {
        panic!("expected a mismatch, got {:?}", outcome.outcome);
    };
    assert!(!actual.contains("NI;"));
    assert!(!actual.contains("OI;"));
    assert!(!actual.contains("UNSAFE_CALL"));
}
