//! dcl IR - spans, names and `::` left-hand-side trees.
//!
//! This crate contains the data the checker consumes:
//! - Spans for source locations
//! - Names for interned identifiers
//! - The left-hand-side expression tree of callable references and class
//!   literals (`ExprNode`, `TypeNode`, `ReferenceExpr`)
//!
//! All types are `Clone + Eq + Hash + Debug`; trees are immutable once built.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod interner;
mod name;
mod span;

pub use ast::{ExprKind, ExprNode, ReferenceExpr, Spanned, TypeNode};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::{Span, SpanError};
