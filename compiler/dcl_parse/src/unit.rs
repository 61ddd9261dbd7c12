//! Parsed analysis units.

use dcl_diagnostic::DiagnosticKind;
use dcl_ir::{Name, ReferenceExpr, Span, TypeNode};

use crate::ParseError;

/// Type names every unit can use without declaring them.
pub const BUILTIN_TYPES: &[&str] = &["Any", "Int", "Unit", "Nothing", "String", "Boolean"];

/// A declaration the resolution oracle can answer from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decl {
    /// `class name<T, ...> { member, ... }` or `object name`.
    Class {
        name: Name,
        type_params: Vec<Name>,
        members: Vec<Name>,
        span: Span,
    },
    /// `val name: Type`.
    Value { name: Name, ty: TypeNode, span: Span },
    /// `type Name`, a type usable as a type argument.
    Type { name: Name, span: Span },
    /// `fun Receiver.member`.
    Extension {
        receiver: Name,
        member: Name,
        span: Span,
    },
    /// `fun name()` without a reference body.
    Function { name: Name, span: Span },
}

impl Decl {
    pub fn name(&self) -> Name {
        match self {
            Decl::Class { name, .. }
            | Decl::Value { name, .. }
            | Decl::Type { name, .. }
            | Decl::Function { name, .. } => *name,
            Decl::Extension { member, .. } => *member,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decl::Class { span, .. }
            | Decl::Value { span, .. }
            | Decl::Type { span, .. }
            | Decl::Extension { span, .. }
            | Decl::Function { span, .. } => *span,
        }
    }
}

/// `fun name()[: T] = <reference>`: one reference to check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckItem {
    pub name: Name,
    pub reference: ReferenceExpr,
    pub span: Span,
}

/// `// !...` directives at the top of a unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directives {
    /// `// !WITH_NEW_INFERENCE`: run both engines.
    pub with_new_inference: bool,
    /// `// !LANGUAGE: +NewInference` or `-NewInference`.
    pub new_inference: Option<bool>,
    /// Kinds named in `// !DIAGNOSTICS: -KIND`.
    pub suppressed: Vec<DiagnosticKind>,
    /// Names in `// !DIAGNOSTICS:` that are not kinds this checker reports.
    pub unknown_suppressions: Vec<String>,
}

impl Directives {
    /// Apply one comment's text (without the leading `//`).
    pub(crate) fn apply(&mut self, comment: &str) {
        let Some(body) = comment.trim().strip_prefix('!') else {
            return;
        };
        let (name, args) = match body.split_once(':') {
            Some((name, args)) => (name.trim(), args),
            None => (body.trim(), ""),
        };
        match name {
            "WITH_NEW_INFERENCE" => self.with_new_inference = true,
            "LANGUAGE" => {
                for feature in args.split_whitespace() {
                    match feature {
                        "+NewInference" => self.new_inference = Some(true),
                        "-NewInference" => self.new_inference = Some(false),
                        _ => {}
                    }
                }
            }
            "DIAGNOSTICS" => {
                for entry in args.split_whitespace() {
                    let Some(kind_name) = entry.strip_prefix('-') else {
                        continue;
                    };
                    match kind_name.parse::<DiagnosticKind>() {
                        Ok(kind) => {
                            if !self.suppressed.contains(&kind) {
                                self.suppressed.push(kind);
                            }
                        }
                        Err(()) => self.unknown_suppressions.push(kind_name.to_string()),
                    }
                }
            }
            _ => {}
        }
    }
}

/// A parsed unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceUnit {
    pub directives: Directives,
    pub decls: Vec<Decl>,
    pub checks: Vec<CheckItem>,
    /// Items that failed to parse; each was skipped.
    pub errors: Vec<ParseError>,
}
