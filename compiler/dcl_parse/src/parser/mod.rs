//! Recursive descent parser for analysis units.
//!
//! Items are line-oriented: an item that fails to parse is recorded as a
//! [`ParseError`] and the parser resumes at the next line.

mod cursor;
mod items;
mod reference;

use dcl_ir::{ExprKind, ExprNode, Name, ReferenceExpr, StringInterner};
use rustc_hash::FxHashSet;

use crate::lexer::{self, TokenKind};
use crate::unit::{CheckItem, Decl, SourceUnit, BUILTIN_TYPES};
use crate::ParseError;

use cursor::Cursor;

/// One parsed top-level item.
enum Item {
    Decl(Decl),
    Check(CheckItem),
    /// `package name` and similar lines with no effect on checking.
    Ignored,
}

/// Parse a unit.
///
/// Never fails: unparsable items are skipped and listed in
/// [`SourceUnit::errors`].
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_unit(source: &str, interner: &StringInterner) -> SourceUnit {
    let mut unit = SourceUnit::default();
    let tokens = match lexer::lex(source) {
        Ok(tokens) => tokens,
        Err(err) => {
            unit.errors.push(ParseError::from(err));
            return unit;
        }
    };
    for comment in &tokens.comments {
        unit.directives.apply(source.get(comment.to_range()).unwrap_or(""));
    }

    let mut parser = Parser {
        cursor: Cursor::new(&tokens.tokens, source, interner),
    };
    while !parser.cursor.is_at_end() {
        let start = parser.cursor.position();
        match parser.parse_item() {
            Ok(Item::Decl(decl)) => unit.decls.push(decl),
            Ok(Item::Check(check)) => unit.checks.push(check),
            Ok(Item::Ignored) => {}
            Err(err) => {
                tracing::debug!(%err, "skipping item");
                unit.errors.push(err);
                if parser.cursor.position() == start || !parser.cursor.at_line_start() {
                    parser.cursor.skip_line();
                }
            }
        }
    }

    mark_unresolved(&mut unit, interner);
    tracing::debug!(
        decls = unit.decls.len(),
        checks = unit.checks.len(),
        errors = unit.errors.len(),
        "parsed unit"
    );
    unit
}

struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl Parser<'_> {
    /// Require the item to end at the end of its line.
    fn expect_line_end(&self) -> Result<(), ParseError> {
        if self.cursor.at_line_start() {
            Ok(())
        } else {
            let token = self.cursor.current();
            Err(ParseError::unexpected("end of line", token.kind, token.span))
        }
    }

    /// Skip a balanced `( ... )` group if one starts here.
    fn skip_parens(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(TokenKind::LParen).is_none() {
            return Ok(());
        }
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.cursor.current();
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth -= 1,
                TokenKind::Eof => {
                    return Err(ParseError::unexpected("`)`", token.kind, token.span));
                }
                _ => {}
            }
            self.cursor.advance();
        }
        Ok(())
    }
}

/// Turn reference left-hand-side identifiers that name nothing declared in
/// the unit into `Unresolved` leaves.
fn mark_unresolved(unit: &mut SourceUnit, interner: &StringInterner) {
    let mut declared: FxHashSet<Name> = BUILTIN_TYPES.iter().map(|t| interner.intern(t)).collect();
    for decl in &unit.decls {
        match decl {
            Decl::Class { name, .. } | Decl::Value { name, .. } | Decl::Type { name, .. } => {
                declared.insert(*name);
            }
            Decl::Extension { .. } | Decl::Function { .. } => {}
        }
    }

    for check in &mut unit.checks {
        if let Some(lhs) = lhs_mut(&mut check.reference) {
            mark_leaf(lhs, &declared);
        }
    }
}

fn lhs_mut(reference: &mut ReferenceExpr) -> Option<&mut ExprNode> {
    match reference {
        ReferenceExpr::CallableReference { lhs, .. } => lhs.as_mut(),
        ReferenceExpr::ClassLiteral { lhs, .. } => Some(lhs),
    }
}

fn mark_leaf(node: &mut ExprNode, declared: &FxHashSet<Name>) {
    if let ExprKind::Identifier(name) = node.kind {
        if !declared.contains(&name) {
            node.kind = ExprKind::Unresolved(name);
        }
        return;
    }
    match &mut node.kind {
        ExprKind::GenericApplication { base, .. } | ExprKind::NullableQualified { base } => {
            mark_leaf(base, declared);
        }
        ExprKind::Identifier(_) | ExprKind::Unresolved(_) => {}
    }
}
