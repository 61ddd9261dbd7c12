//! Parser for dcl analysis units.
//!
//! A unit declares classes, values, types and functions, then lists check
//! items, each holding one `::` reference:
//!
//! ```text
//! // !WITH_NEW_INFERENCE
//! class a<T> { foo }
//! val b: Int?
//! fun Int.foo()
//! type T
//!
//! fun testCallable1() = a<T>::foo
//! fun testClassLiteral2() = b?::class
//! ```
//!
//! Reference left-hand sides whose identifier names nothing declared in the
//! unit come back as `Unresolved` leaves.

mod error;
pub mod lexer;
mod parser;
mod unit;

pub use error::{ParseError, ParseErrorKind};
pub use parser::parse_unit;
pub use unit::{CheckItem, Decl, Directives, SourceUnit, BUILTIN_TYPES};
