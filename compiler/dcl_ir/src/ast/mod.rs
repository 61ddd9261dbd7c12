//! Left-hand-side expression trees for `::` references.
//!
//! These trees are produced once by the parser and never mutated. The
//! checker only ever borrows them, so every node can be handed to both
//! resolution engines without cloning.

use crate::{Name, Span};

/// Trait for nodes that have a source location span.
pub trait Spanned {
    /// Get the source location span.
    fn span(&self) -> Span;
}

/// A type written inside an explicit type-argument list, e.g. the `T` and
/// `Any` in `b<T, Any>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeNode {
    pub name: Name,
    pub args: Vec<TypeNode>,
    /// Trailing `?` on the type argument itself.
    pub nullable: bool,
    /// The name alone, without arguments or `?`.
    pub name_span: Span,
    pub span: Span,
}

impl TypeNode {
    /// A bare type name without arguments.
    pub fn simple(name: Name, span: Span) -> Self {
        TypeNode {
            name,
            args: Vec::new(),
            nullable: false,
            name_span: span,
            span,
        }
    }

    /// Visit this type and every nested argument, outermost first.
    pub fn walk(&self, f: &mut impl FnMut(&TypeNode)) {
        f(self);
        for arg in &self.args {
            arg.walk(f);
        }
    }
}

impl Spanned for TypeNode {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression appearing to the left of `::`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExprNode {
    pub kind: ExprKind,
    pub span: Span,
}

/// The closed set of left-hand-side node forms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// A name with a grammatical completion in the unit.
    Identifier(Name),
    /// `base<args>`.
    ///
    /// `well_formed` is false when the bracket list was empty or did not
    /// parse as a type list; `args_span` then covers the offending interior
    /// (a point span for `<>`).
    GenericApplication {
        base: Box<ExprNode>,
        type_args: Vec<TypeNode>,
        well_formed: bool,
        args_span: Span,
    },
    /// `base?`.
    NullableQualified { base: Box<ExprNode> },
    /// Identifier text with no completion at all; carries the raw text.
    Unresolved(Name),
}

impl ExprNode {
    pub fn identifier(name: Name, span: Span) -> Self {
        ExprNode {
            kind: ExprKind::Identifier(name),
            span,
        }
    }

    pub fn unresolved(raw: Name, span: Span) -> Self {
        ExprNode {
            kind: ExprKind::Unresolved(raw),
            span,
        }
    }

    /// Wrap `base` in a type-argument application.
    pub fn generic(
        base: ExprNode,
        type_args: Vec<TypeNode>,
        well_formed: bool,
        args_span: Span,
        span: Span,
    ) -> Self {
        ExprNode {
            kind: ExprKind::GenericApplication {
                base: Box::new(base),
                type_args,
                well_formed,
                args_span,
            },
            span,
        }
    }

    /// Wrap `base` in a nullability marker.
    pub fn nullable(base: ExprNode, span: Span) -> Self {
        ExprNode {
            kind: ExprKind::NullableQualified {
                base: Box::new(base),
            },
            span,
        }
    }

    /// The wrapped node, if this is a generic application or nullable
    /// qualification.
    pub fn inner(&self) -> Option<&ExprNode> {
        match &self.kind {
            ExprKind::GenericApplication { base, .. } | ExprKind::NullableQualified { base } => {
                Some(base)
            }
            ExprKind::Identifier(_) | ExprKind::Unresolved(_) => None,
        }
    }

    /// The identifier or unresolved leaf at the bottom of any wrappers.
    pub fn innermost(&self) -> &ExprNode {
        let mut node = self;
        while let Some(inner) = node.inner() {
            node = inner;
        }
        node
    }
}

impl Spanned for ExprNode {
    fn span(&self) -> Span {
        self.span
    }
}

/// A `::` reference: callable reference or class literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceExpr {
    /// `lhs::member`, or `::member` when `lhs` is absent.
    CallableReference {
        lhs: Option<ExprNode>,
        member: Name,
        member_span: Span,
        /// Explicit safe access: a nullable receiver is permitted.
        safe: bool,
        span: Span,
    },
    /// `lhs::class`.
    ClassLiteral {
        lhs: ExprNode,
        keyword_span: Span,
        span: Span,
    },
}

impl ReferenceExpr {
    /// The left-hand side, if present.
    pub fn lhs(&self) -> Option<&ExprNode> {
        match self {
            ReferenceExpr::CallableReference { lhs, .. } => lhs.as_ref(),
            ReferenceExpr::ClassLiteral { lhs, .. } => Some(lhs),
        }
    }

    pub fn is_class_literal(&self) -> bool {
        matches!(self, ReferenceExpr::ClassLiteral { .. })
    }

    /// Whether a nullable receiver is accepted without complaint.
    pub fn is_safe(&self) -> bool {
        matches!(self, ReferenceExpr::CallableReference { safe: true, .. })
    }

    /// Span of the member name, or of the `class` keyword.
    pub fn target_span(&self) -> Span {
        match self {
            ReferenceExpr::CallableReference { member_span, .. } => *member_span,
            ReferenceExpr::ClassLiteral { keyword_span, .. } => *keyword_span,
        }
    }
}

impl Spanned for ReferenceExpr {
    fn span(&self) -> Span {
        match self {
            ReferenceExpr::CallableReference { span, .. }
            | ReferenceExpr::ClassLiteral { span, .. } => *span,
        }
    }
}
