//! Per-span diagnostic sets.
//!
//! A [`DiagnosticSet`] maps each span to the diagnostics reported there.
//! Membership is what matters: entries are deduplicated by kind and engine,
//! and iteration follows presentation order (outer spans before inner, then
//! untagged, `OI`, `NI`), independent of insertion order.

use dcl_ir::Span;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{Diagnostic, DiagnosticKind, Engine};

type Entries = SmallVec<[Diagnostic; 2]>;

/// Diagnostics keyed by source span.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticSet {
    /// Entries at each span, kept sorted by `Diagnostic::presentation_key`.
    by_span: FxHashMap<Span, Entries>,
}

impl DiagnosticSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    ///
    /// An untagged entry subsumes tagged entries of the same kind at the same
    /// span: inserting it removes them, and inserting a tagged entry next to
    /// it is a no-op. Returns `true` if the set changed.
    pub fn insert(&mut self, diag: Diagnostic) -> bool {
        let entries = self.by_span.entry(diag.span).or_default();

        let covered = entries
            .iter()
            .any(|e| e.kind == diag.kind && (e.engine == diag.engine || e.engine.is_none()));
        if covered {
            return false;
        }
        if diag.engine.is_none() {
            entries.retain(|e| e.kind != diag.kind);
        }

        let key = diag.presentation_key();
        let at = entries
            .iter()
            .position(|e| e.presentation_key() > key)
            .unwrap_or(entries.len());
        entries.insert(at, diag);
        true
    }

    /// Whether a diagnostic of `kind` with exactly this `engine` tag sits at `span`.
    pub fn contains(&self, kind: DiagnosticKind, span: Span, engine: Option<Engine>) -> bool {
        self.at(span)
            .iter()
            .any(|d| d.kind == kind && d.engine == engine)
    }

    /// Whether `kind` is reported at `span` under any tag.
    pub fn reports(&self, kind: DiagnosticKind, span: Span) -> bool {
        self.at(span).iter().any(|d| d.kind == kind)
    }

    /// Entries at one span, in presentation order.
    pub fn at(&self, span: Span) -> &[Diagnostic] {
        match self.by_span.get(&span) {
            Some(entries) => entries.as_slice(),
            None => &[],
        }
    }

    /// Spans with at least one entry, outer before inner.
    pub fn spans(&self) -> Vec<Span> {
        let mut spans: Vec<Span> = self
            .by_span
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(span, _)| *span)
            .collect();
        spans.sort_by(Span::nesting_order);
        spans
    }

    /// All diagnostics in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.spans()
            .into_iter()
            .flat_map(move |span| self.at(span).iter())
    }

    /// All diagnostics in presentation order, owned.
    pub fn to_vec(&self) -> Vec<Diagnostic> {
        self.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.by_span.values().map(SmallVec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries of `kind`, across spans and tags.
    pub fn count_kind(&self, kind: DiagnosticKind) -> usize {
        self.by_span
            .values()
            .flat_map(|e| e.iter())
            .filter(|d| d.kind == kind)
            .count()
    }

    /// Number of error-severity entries.
    pub fn error_count(&self) -> usize {
        self.by_span
            .values()
            .flat_map(|e| e.iter())
            .filter(|d| d.is_error())
            .count()
    }

    /// Insert every entry of `other`.
    pub fn extend_from(&mut self, other: &DiagnosticSet) {
        for diag in other.by_span.values().flat_map(|e| e.iter()) {
            self.insert(*diag);
        }
    }

    /// Keep only entries matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&Diagnostic) -> bool) {
        for entries in self.by_span.values_mut() {
            entries.retain(|d| keep(d));
        }
        self.by_span.retain(|_, entries| !entries.is_empty());
    }
}

impl Extend<Diagnostic> for DiagnosticSet {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diag in iter {
            self.insert(diag);
        }
    }
}

impl FromIterator<Diagnostic> for DiagnosticSet {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        let mut set = DiagnosticSet::new();
        set.extend(iter);
        set
    }
}
