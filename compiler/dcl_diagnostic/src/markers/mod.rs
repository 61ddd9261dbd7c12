//! Inline diagnostic markers.
//!
//! The externally observed output format wraps each reported span in
//! `<!ENTRIES!>` ... `<!>`, where `ENTRIES` is a `, `-separated list of
//! `KIND` or `TAG;KIND`:
//!
//! ```text
//! <!NI;TYPE_MISMATCH!><!RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS!>b<!>?::<!OI;UNSAFE_CALL!>foo<!><!>
//! ```
//!
//! [`render`] produces marker text from clean source and a
//! [`DiagnosticSet`]; [`parse`] strips markers from annotated text and
//! recovers the expected set. `render(parse(t).source, parse(t).expected)`
//! reproduces `t` for any text whose markers are in presentation order.

use std::fmt;

use dcl_ir::Span;

use crate::{Diagnostic, DiagnosticKind, DiagnosticSet, Engine};

const OPEN: &str = "<!";
const OPEN_END: &str = "!>";
const CLOSE: &str = "<!>";

/// Error in annotated marker text. Offsets are byte offsets into the
/// annotated text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkerError {
    /// `<!` without a matching `!>`.
    Unterminated { offset: usize },
    /// `<!>` with no open marker.
    UnbalancedClose { offset: usize },
    /// Marker opened but never closed.
    Unclosed { offset: usize },
    /// `<!!>` with no entries.
    Empty { offset: usize },
    UnknownKind { name: String, offset: usize },
    UnknownEngine { tag: String, offset: usize },
    /// Offset does not fit a `Span`.
    TooLarge { offset: usize },
}

impl fmt::Display for MarkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerError::Unterminated { offset } => {
                write!(f, "marker at offset {offset} is missing its closing `!>`")
            }
            MarkerError::UnbalancedClose { offset } => {
                write!(f, "`<!>` at offset {offset} closes no marker")
            }
            MarkerError::Unclosed { offset } => {
                write!(f, "marker opened at offset {offset} is never closed")
            }
            MarkerError::Empty { offset } => write!(f, "empty marker at offset {offset}"),
            MarkerError::UnknownKind { name, offset } => {
                write!(f, "unknown diagnostic `{name}` at offset {offset}")
            }
            MarkerError::UnknownEngine { tag, offset } => {
                write!(f, "unknown engine tag `{tag}` at offset {offset}")
            }
            MarkerError::TooLarge { offset } => {
                write!(f, "offset {offset} exceeds the maximum span offset")
            }
        }
    }
}

impl std::error::Error for MarkerError {}

/// Clean source plus the diagnostics its markers described.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMarkers {
    pub source: String,
    pub expected: DiagnosticSet,
}

/// Render `set` over `source` as marker text.
///
/// Spans must nest or be disjoint, which holds for every set the checker
/// produces. Spans that do not fall on character boundaries are dropped.
pub fn render(source: &str, set: &DiagnosticSet) -> String {
    let spans = set.spans();
    let mut out = String::with_capacity(source.len() + spans.len() * 24);
    let mut pending = spans.iter().peekable();
    let mut open: Vec<Span> = Vec::new();

    let boundaries = source
        .char_indices()
        .map(|(i, c)| (i, Some(c)))
        .chain(std::iter::once((source.len(), None)));

    for (offset, ch) in boundaries {
        while open.last().is_some_and(|s| s.end as usize <= offset) {
            out.push_str(CLOSE);
            open.pop();
        }
        while let Some(span) = pending.next_if(|s| s.start as usize <= offset) {
            if (span.start as usize) < offset {
                // Not on a character boundary.
                continue;
            }
            write_open(&mut out, set.at(*span));
            if span.is_empty() {
                out.push_str(CLOSE);
            } else {
                open.push(*span);
            }
        }
        if let Some(c) = ch {
            out.push(c);
        }
    }
    out.push_str(&CLOSE.repeat(open.len()));
    out
}

fn write_open(out: &mut String, entries: &[Diagnostic]) {
    out.push_str(OPEN);
    for (i, diag) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&diag.marker_entry());
    }
    out.push_str(OPEN_END);
}

/// Strip markers from annotated text.
pub fn parse(text: &str) -> Result<ParsedMarkers, MarkerError> {
    let mut source = String::with_capacity(text.len());
    let mut expected = DiagnosticSet::new();
    // (offset in annotated text, offset in clean source, entries)
    let mut open: Vec<(usize, usize, Vec<(DiagnosticKind, Option<Engine>)>)> = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        if rest.starts_with(CLOSE) {
            let Some((_, start, entries)) = open.pop() else {
                return Err(MarkerError::UnbalancedClose { offset: pos });
            };
            let span = Span::try_from_range(start..source.len())
                .map_err(|_| MarkerError::TooLarge { offset: pos })?;
            for (kind, engine) in entries {
                expected.insert(Diagnostic {
                    kind,
                    span,
                    engine,
                });
            }
            pos += CLOSE.len();
        } else if rest.starts_with(OPEN) {
            let body_start = pos + OPEN.len();
            let Some(len) = text[body_start..].find(OPEN_END) else {
                return Err(MarkerError::Unterminated { offset: pos });
            };
            let entries = parse_entries(&text[body_start..body_start + len], pos)?;
            open.push((pos, source.len(), entries));
            pos = body_start + len + OPEN_END.len();
        } else {
            let Some(c) = rest.chars().next() else {
                break;
            };
            source.push(c);
            pos += c.len_utf8();
        }
    }

    if let Some((offset, _, _)) = open.first() {
        return Err(MarkerError::Unclosed { offset: *offset });
    }
    Ok(ParsedMarkers { source, expected })
}

fn parse_entries(
    body: &str,
    offset: usize,
) -> Result<Vec<(DiagnosticKind, Option<Engine>)>, MarkerError> {
    let mut entries = Vec::new();
    for raw in body.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (engine, name) = match raw.split_once(';') {
            Some((tag, name)) => {
                let engine = tag.trim().parse::<Engine>().map_err(|()| {
                    MarkerError::UnknownEngine {
                        tag: tag.trim().to_string(),
                        offset,
                    }
                })?;
                (Some(engine), name.trim())
            }
            None => (None, raw),
        };
        let kind = name
            .parse::<DiagnosticKind>()
            .map_err(|()| MarkerError::UnknownKind {
                name: name.to_string(),
                offset,
            })?;
        entries.push((kind, engine));
    }
    if entries.is_empty() {
        return Err(MarkerError::Empty { offset });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests;
