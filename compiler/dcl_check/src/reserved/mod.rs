//! Reserved-syntax detection.
//!
//! Maps a [`Shape`] to its primary diagnostics and to the degraded
//! expression resolution works on. Primary diagnostics are engine-agnostic
//! and always untagged.

use dcl_diagnostic::{Diagnostic, DiagnosticKind};
use dcl_ir::{ExprKind, ExprNode, Span, TypeNode};
use smallvec::SmallVec;

use crate::shape::{Shape, ShapeKind};

/// What the detector decided for one left-hand side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detection<'a> {
    pub shape: ShapeKind,
    /// Diagnostics decided from the shape alone.
    pub primary: SmallVec<[Diagnostic; 2]>,
    /// The leaf identifier resolution works on, all wrappers stripped.
    pub degraded: &'a ExprNode,
    /// Span later left-hand-side diagnostics attach to.
    pub anchor: Span,
    /// The shape itself carries a nullability marker.
    pub nullable: bool,
    /// Type arguments of every well-formed application in the chain.
    pub type_args: SmallVec<[&'a TypeNode; 4]>,
}

/// Decide primary diagnostics and the degraded form for `shape`.
pub fn detect(shape: Shape<'_>, is_class_literal: bool) -> Detection<'_> {
    let node = shape.node();
    let mut primary = SmallVec::new();
    let mut type_args = SmallVec::new();

    // Malformed bracket lists are reported wherever they sit in the chain.
    let mut current = Some(node);
    while let Some(n) = current {
        if let ExprKind::GenericApplication {
            type_args: args,
            well_formed,
            args_span,
            ..
        } = &n.kind
        {
            if *well_formed {
                type_args.extend(args.iter());
            } else {
                primary.push(Diagnostic::new(DiagnosticKind::Syntax, *args_span));
            }
        }
        current = n.inner();
    }

    let (anchor, nullable) = match shape {
        Shape::Plain(node) => (node.span, false),
        Shape::GenericApplied { node, .. } => {
            primary.push(Diagnostic::new(
                DiagnosticKind::ReservedSyntaxInCallableReferenceLhs,
                node.span,
            ));
            (node.span, false)
        }
        Shape::NullableQualified { base, .. } => {
            primary.push(Diagnostic::new(
                DiagnosticKind::ReservedSyntaxInCallableReferenceLhs,
                base.span,
            ));
            if is_class_literal {
                primary.push(Diagnostic::new(
                    DiagnosticKind::ExpressionOfNullableTypeInClassLiteralLhs,
                    base.span,
                ));
            }
            (base.span, true)
        }
        Shape::Malformed { base, .. } => (base.span, false),
        Shape::Unresolved { leaf, .. } => (leaf.span, false),
    };

    tracing::trace!(shape = %shape.kind(), primary = primary.len(), "detected");
    Detection {
        shape: shape.kind(),
        primary,
        degraded: node.innermost(),
        anchor,
        nullable,
        type_args,
    }
}
