//! Parse errors.
//!
//! A parse error never aborts the unit: the offending item is skipped and
//! the error surfaces as a `SYNTAX` diagnostic.

use std::fmt;

use dcl_diagnostic::{Diagnostic, DiagnosticKind};
use dcl_ir::{Span, SpanError};

use crate::lexer::TokenKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Found a token where another was required.
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },
    /// A type-argument list with no closing `>`.
    UnclosedTypeArguments,
    /// A top-level line that starts no known item.
    UnknownItem,
    /// The unit is too large for `u32` offsets.
    SourceTooLarge(SpanError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub fn unexpected(expected: &'static str, found: TokenKind, span: Span) -> Self {
        ParseError::new(ParseErrorKind::UnexpectedToken { expected, found }, span)
    }

    /// The `SYNTAX` diagnostic reporting this error.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::Syntax, self.span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found} at {}", self.span)
            }
            ParseErrorKind::UnclosedTypeArguments => {
                write!(f, "type-argument list opened at {} is never closed", self.span)
            }
            ParseErrorKind::UnknownItem => write!(f, "unknown item at {}", self.span),
            ParseErrorKind::SourceTooLarge(err) => write!(f, "source too large: {err}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::SourceTooLarge(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SpanError> for ParseError {
    fn from(err: SpanError) -> Self {
        ParseError::new(ParseErrorKind::SourceTooLarge(err), Span::DUMMY)
    }
}
