//! Diagnostic kinds and the engines that report them.
//!
//! Kind names are the externally observed contract: they appear verbatim in
//! marker text (`<!UNSAFE_CALL!>`) and in `dclc explain`.

use std::fmt;

/// Every diagnostic this checker can report.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum DiagnosticKind {
    /// Type arguments or a nullability marker on a `::` left-hand side.
    ReservedSyntaxInCallableReferenceLhs,
    /// Class literal whose left-hand side has a nullable type.
    ExpressionOfNullableTypeInClassLiteralLhs,
    /// A name with no matching declaration.
    UnresolvedReference,
    /// Old-engine marker for a reference it could not type.
    DebugInfoMissingUnresolved,
    /// The reference does not fit its expected shape.
    TypeMismatch,
    /// Non-safe member access on a nullable receiver.
    UnsafeCall,
    /// Malformed syntax, e.g. an empty type-argument list.
    Syntax,
}

/// Severity level for a diagnostic kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    /// Informational; never fails a check on its own.
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Note => write!(f, "note"),
        }
    }
}

impl DiagnosticKind {
    /// All kinds, for exhaustive lookups and tests.
    ///
    /// Kept in sync with `as_str()`; `test_all_kinds_round_trip` catches
    /// an omission.
    pub const ALL: &[DiagnosticKind] = &[
        DiagnosticKind::ReservedSyntaxInCallableReferenceLhs,
        DiagnosticKind::ExpressionOfNullableTypeInClassLiteralLhs,
        DiagnosticKind::UnresolvedReference,
        DiagnosticKind::DebugInfoMissingUnresolved,
        DiagnosticKind::TypeMismatch,
        DiagnosticKind::UnsafeCall,
        DiagnosticKind::Syntax,
    ];

    /// The marker name, e.g. `"UNSAFE_CALL"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::ReservedSyntaxInCallableReferenceLhs => {
                "RESERVED_SYNTAX_IN_CALLABLE_REFERENCE_LHS"
            }
            DiagnosticKind::ExpressionOfNullableTypeInClassLiteralLhs => {
                "EXPRESSION_OF_NULLABLE_TYPE_IN_CLASS_LITERAL_LHS"
            }
            DiagnosticKind::UnresolvedReference => "UNRESOLVED_REFERENCE",
            DiagnosticKind::DebugInfoMissingUnresolved => "DEBUG_INFO_MISSING_UNRESOLVED",
            DiagnosticKind::TypeMismatch => "TYPE_MISMATCH",
            DiagnosticKind::UnsafeCall => "UNSAFE_CALL",
            DiagnosticKind::Syntax => "SYNTAX",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::DebugInfoMissingUnresolved => Severity::Note,
            _ => Severity::Error,
        }
    }

    /// Whether the kind is decided from syntax alone, before resolution.
    pub fn is_syntactic(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::ReservedSyntaxInCallableReferenceLhs | DiagnosticKind::Syntax
        )
    }

    /// One-line human description, used by emitters.
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::ReservedSyntaxInCallableReferenceLhs => {
                "this syntax is reserved in the left-hand side of `::`"
            }
            DiagnosticKind::ExpressionOfNullableTypeInClassLiteralLhs => {
                "expression in a class literal has a nullable type"
            }
            DiagnosticKind::UnresolvedReference => "unresolved reference",
            DiagnosticKind::DebugInfoMissingUnresolved => {
                "reference left unresolved, no type information recorded"
            }
            DiagnosticKind::TypeMismatch => "type mismatch",
            DiagnosticKind::UnsafeCall => {
                "only safe access is allowed on a receiver of nullable type"
            }
            DiagnosticKind::Syntax => "syntax error",
        }
    }

    /// Longer explanation for `dclc explain`.
    pub fn explanation(&self) -> &'static str {
        match self {
            DiagnosticKind::ReservedSyntaxInCallableReferenceLhs => {
                "An identifier followed by explicit type arguments (`a<T>::foo`) or by the \
                 nullability marker (`b?::foo`) parses, but is reserved on the left-hand side \
                 of a callable reference or class literal. The checker still resolves the bare \
                 identifier so later diagnostics stay meaningful."
            }
            DiagnosticKind::ExpressionOfNullableTypeInClassLiteralLhs => {
                "A class literal (`x::class`) needs a non-null receiver. Reported when the \
                 left-hand side is written with `?` or resolves to a declaration of nullable \
                 type."
            }
            DiagnosticKind::UnresolvedReference => {
                "The name has no declaration in scope. Reported on the left-hand side, on a \
                 type argument, or on a member that the receiver does not have."
            }
            DiagnosticKind::DebugInfoMissingUnresolved => {
                "Reported by the old inference engine on the member of a reference whose \
                 receiver could not be resolved: no replacement type could be computed."
            }
            DiagnosticKind::TypeMismatch => {
                "Reported by the new inference engine on the whole reference when the \
                 receiver is unresolved or nullable: the substituted error type does not fit \
                 the expected callable shape."
            }
            DiagnosticKind::UnsafeCall => {
                "Reported by the old inference engine on the member of a non-safe callable \
                 reference whose receiver is nullable."
            }
            DiagnosticKind::Syntax => {
                "The type-argument list is empty or does not parse. The brackets are ignored \
                 and the identifier is resolved as if they were absent."
            }
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a marker name such as `"TYPE_MISMATCH"`.
///
/// Case-insensitive, derived from [`DiagnosticKind::ALL`].
impl std::str::FromStr for DiagnosticKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or(())
    }
}

/// One of the two independent resolution engines.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Engine {
    Old,
    New,
}

impl Engine {
    pub const ALL: [Engine; 2] = [Engine::Old, Engine::New];

    /// Marker tag: `OI` (old inference) or `NI` (new inference).
    pub fn tag(&self) -> &'static str {
        match self {
            Engine::Old => "OI",
            Engine::New => "NI",
        }
    }

    /// The other engine.
    pub fn other(&self) -> Engine {
        match self {
            Engine::Old => Engine::New,
            Engine::New => Engine::Old,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parse a marker tag (`OI`/`NI`).
impl std::str::FromStr for Engine {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|engine| engine.tag().eq_ignore_ascii_case(s))
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
