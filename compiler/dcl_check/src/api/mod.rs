//! Public API for checking references and units.
//!
//! ```text
//! ReferenceExpr -> classify -> detect (primary) -> OLD / NEW resolve (secondary) -> merge
//! ```
//!
//! Each engine sees the same detection and oracle and shares no state with
//! the other; only [`merge`](crate::merge::merge) combines their results.

use dcl_diagnostic::{DiagnosticSet, Engine};
use dcl_ir::{ReferenceExpr, Spanned, StringInterner};
use dcl_parse::{parse_unit, SourceUnit};
use smallvec::SmallVec;

use crate::config::{CheckConfig, EngineMode};
use crate::engine::{NewEngine, OldEngine, ResolutionOutcome, ResolverEngine};
use crate::merge::merge;
use crate::oracle::{ResolutionOracle, SymbolTable};
use crate::reserved::{detect, Detection};
use crate::shape::classify;

/// The checked diagnostics of one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitReport {
    pub diagnostics: DiagnosticSet,
    /// Number of references checked.
    pub references: usize,
    /// Number of items skipped because they did not parse.
    pub parse_errors: usize,
    /// The configuration the unit was checked with.
    pub config: CheckConfig,
}

fn engine_for(engine: Engine) -> &'static dyn ResolverEngine {
    match engine {
        Engine::Old => &OldEngine,
        Engine::New => &NewEngine,
    }
}

/// Detection plus each engine's outcome for one reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceAnalysis<'a> {
    /// `None` for a reference without a left-hand side.
    pub detection: Option<Detection<'a>>,
    pub outcomes: SmallVec<[(Engine, ResolutionOutcome); 2]>,
}

impl ReferenceAnalysis<'_> {
    /// Merge into the reported set, honoring suppressions.
    pub fn diagnostics(&self, config: &CheckConfig) -> DiagnosticSet {
        let primary = match &self.detection {
            Some(detection) => detection.primary.as_slice(),
            None => &[],
        };
        let secondary: SmallVec<[(Engine, &DiagnosticSet); 2]> = self
            .outcomes
            .iter()
            .map(|(engine, outcome)| (*engine, &outcome.secondary))
            .collect();
        let mut merged = merge(primary, &secondary);
        merged.retain(|d| !config.is_suppressed(d.kind));
        merged
    }
}

/// Classify, detect and run every engine in `engines` on `reference`.
pub fn analyze_reference<'a>(
    reference: &'a ReferenceExpr,
    oracle: &dyn ResolutionOracle,
    engines: EngineMode,
) -> ReferenceAnalysis<'a> {
    let detection = reference
        .lhs()
        .map(|lhs| detect(classify(lhs), reference.is_class_literal()));
    if let Some(detection) = &detection {
        tracing::debug!(shape = %detection.shape, primary = detection.primary.len(), "classified");
    }
    let outcomes = engines
        .engines()
        .iter()
        .map(|&engine| {
            let outcome = engine_for(engine).resolve(oracle, reference, detection.as_ref());
            (engine, outcome)
        })
        .collect();
    ReferenceAnalysis {
        detection,
        outcomes,
    }
}

/// Check one reference.
#[tracing::instrument(level = "debug", skip_all, fields(span = %reference.span()))]
pub fn check_reference(
    reference: &ReferenceExpr,
    oracle: &dyn ResolutionOracle,
    config: &CheckConfig,
) -> DiagnosticSet {
    analyze_reference(reference, oracle, config.engines).diagnostics(config)
}

/// Check every reference in a parsed unit. Parse errors become `SYNTAX`
/// diagnostics.
#[tracing::instrument(level = "debug", skip_all, fields(checks = unit.checks.len()))]
pub fn check_unit(unit: &SourceUnit, interner: &StringInterner, config: &CheckConfig) -> UnitReport {
    let table = SymbolTable::from_unit(unit, interner);
    let mut diagnostics: DiagnosticSet = unit.errors.iter().map(|e| e.to_diagnostic()).collect();
    for check in &unit.checks {
        diagnostics.extend_from(&check_reference(&check.reference, &table, config));
    }
    diagnostics.retain(|d| !config.is_suppressed(d.kind));

    UnitReport {
        diagnostics,
        references: unit.checks.len(),
        parse_errors: unit.errors.len(),
        config: config.clone(),
    }
}

/// Parse and check a unit's source text.
///
/// The unit's directives choose the engines unless `engines` overrides them.
pub fn check_source(
    source: &str,
    interner: &StringInterner,
    engines: Option<EngineMode>,
) -> UnitReport {
    let unit = parse_unit(source, interner);
    let mut config = CheckConfig::from_directives(&unit.directives);
    if let Some(engines) = engines {
        config = config.with_engines(engines);
    }
    check_unit(&unit, interner, &config)
}

#[cfg(test)]
mod tests;
