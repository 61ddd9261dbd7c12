//! Shape classification of `::` left-hand sides.
//!
//! Classification is a pure function of the tree: it never consults the
//! resolution oracle, so the reserved-syntax decision cannot depend on
//! whether anything resolves.

use std::fmt;

use dcl_ir::{ExprKind, ExprNode, Span};

/// The syntactic shape of a left-hand side, borrowing the parts each
/// shape's later stages need.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape<'a> {
    /// A bare identifier.
    Plain(&'a ExprNode),
    /// `base<args>` with a well-formed argument list.
    GenericApplied {
        node: &'a ExprNode,
        base: &'a ExprNode,
    },
    /// `base?`, whatever `base` is.
    NullableQualified {
        node: &'a ExprNode,
        base: &'a ExprNode,
    },
    /// `base<...>` whose bracket list is empty or unparsable.
    Malformed {
        node: &'a ExprNode,
        base: &'a ExprNode,
        args_span: Span,
    },
    /// The innermost identifier had no completion at all.
    Unresolved {
        node: &'a ExprNode,
        leaf: &'a ExprNode,
    },
}

/// Payload-free shape tag, for logging and reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Plain,
    GenericApplied,
    NullableQualified,
    Malformed,
    Unresolved,
}

impl<'a> Shape<'a> {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Plain(_) => ShapeKind::Plain,
            Shape::GenericApplied { .. } => ShapeKind::GenericApplied,
            Shape::NullableQualified { .. } => ShapeKind::NullableQualified,
            Shape::Malformed { .. } => ShapeKind::Malformed,
            Shape::Unresolved { .. } => ShapeKind::Unresolved,
        }
    }

    /// The classified node itself.
    pub fn node(&self) -> &'a ExprNode {
        match *self {
            Shape::Plain(node)
            | Shape::GenericApplied { node, .. }
            | Shape::NullableQualified { node, .. }
            | Shape::Malformed { node, .. }
            | Shape::Unresolved { node, .. } => node,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Plain => "plain",
            ShapeKind::GenericApplied => "generic-applied",
            ShapeKind::NullableQualified => "nullable-qualified",
            ShapeKind::Malformed => "malformed",
            ShapeKind::Unresolved => "unresolved",
        };
        f.write_str(name)
    }
}

/// Classify a left-hand side.
///
/// An `Unresolved` leaf wins over any wrapper around it; otherwise the
/// outermost node decides.
pub fn classify(node: &ExprNode) -> Shape<'_> {
    let leaf = node.innermost();
    if matches!(leaf.kind, ExprKind::Unresolved(_)) {
        return Shape::Unresolved { node, leaf };
    }
    match &node.kind {
        ExprKind::Identifier(_) | ExprKind::Unresolved(_) => Shape::Plain(node),
        ExprKind::GenericApplication {
            base,
            well_formed: true,
            ..
        } => Shape::GenericApplied { node, base },
        ExprKind::GenericApplication {
            base,
            well_formed: false,
            args_span,
            ..
        } => Shape::Malformed {
            node,
            base,
            args_span: *args_span,
        },
        ExprKind::NullableQualified { base } => Shape::NullableQualified { node, base },
    }
}
