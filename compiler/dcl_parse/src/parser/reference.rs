//! References and their left-hand sides.
//!
//! ```text
//! reference := "::" member
//!            | lhs "::" (member | "class")
//! lhs       := ident ("<" type_args ">")? "?"*
//! type      := ident ("<" type ("," type)* ">")? "?"?
//! ```
//!
//! A bracket list that is empty or does not parse as types still produces
//! a `GenericApplication`, marked malformed, so the checker can report it.

use dcl_ir::{ExprNode, ReferenceExpr, Span, TypeNode};

use crate::lexer::{Token, TokenKind};
use crate::{ParseError, ParseErrorKind};

use super::Parser;

impl Parser<'_> {
    pub(super) fn parse_reference(&mut self) -> Result<ReferenceExpr, ParseError> {
        if let Some(colons) = self.cursor.eat(TokenKind::ColonColon) {
            let (member, member_span) = self.cursor.expect_ident("member name")?;
            if self.cursor.text_of(member_span) == "class" {
                return Err(ParseError::unexpected(
                    "member name",
                    TokenKind::Ident,
                    member_span,
                ));
            }
            return Ok(ReferenceExpr::CallableReference {
                lhs: None,
                member,
                member_span,
                safe: false,
                span: colons.span.merge(member_span),
            });
        }

        let lhs = self.parse_lhs()?;
        self.cursor.expect(TokenKind::ColonColon, "`::`")?;
        let target = self.cursor.expect(TokenKind::Ident, "member name or `class`")?;
        let span = lhs.span.merge(target.span);
        if self.cursor.text(target) == "class" {
            Ok(ReferenceExpr::ClassLiteral {
                lhs,
                keyword_span: target.span,
                span,
            })
        } else {
            Ok(ReferenceExpr::CallableReference {
                lhs: Some(lhs),
                member: self.cursor.intern(target),
                member_span: target.span,
                safe: false,
                span,
            })
        }
    }

    fn parse_lhs(&mut self) -> Result<ExprNode, ParseError> {
        let (name, span) = self.cursor.expect_ident("identifier")?;
        let mut node = ExprNode::identifier(name, span);
        if self.cursor.check(TokenKind::Lt) {
            node = self.parse_application(node)?;
        }
        while let Some(question) = self.cursor.eat(TokenKind::Question) {
            let span = node.span.merge(question.span);
            node = ExprNode::nullable(node, span);
        }
        Ok(node)
    }

    /// `base<...>`, well-formed or not.
    fn parse_application(&mut self, base: ExprNode) -> Result<ExprNode, ParseError> {
        let lt = self.cursor.advance();

        if let Some(gt) = self.cursor.eat(TokenKind::Gt) {
            let span = base.span.merge(gt.span);
            return Ok(ExprNode::generic(
                base,
                Vec::new(),
                false,
                Span::point(lt.span.end),
                span,
            ));
        }

        let args_start = self.cursor.position();
        if let Ok(type_args) = self.parse_type_list() {
            if let Some(gt) = self.cursor.eat(TokenKind::Gt) {
                let span = base.span.merge(gt.span);
                return Ok(ExprNode::generic(
                    base,
                    type_args,
                    true,
                    Span::new(lt.span.end, gt.span.start),
                    span,
                ));
            }
        }

        self.cursor.set_position(args_start);
        let gt = self.skip_to_matching_gt(lt)?;
        let span = base.span.merge(gt.span);
        Ok(ExprNode::generic(
            base,
            Vec::new(),
            false,
            Span::new(lt.span.end, gt.span.start),
            span,
        ))
    }

    /// Consume tokens up to and including the `>` matching `lt`, staying on
    /// the current line.
    fn skip_to_matching_gt(&mut self, lt: Token) -> Result<Token, ParseError> {
        let mut depth = 1usize;
        loop {
            let token = self.cursor.current();
            if token.line_start {
                return Err(ParseError::new(
                    ParseErrorKind::UnclosedTypeArguments,
                    lt.span,
                ));
            }
            self.cursor.advance();
            match token.kind {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(token);
                    }
                }
                _ => {}
            }
        }
    }

    fn parse_type_list(&mut self) -> Result<Vec<TypeNode>, ParseError> {
        let mut types = vec![self.parse_type()?];
        while self.cursor.eat(TokenKind::Comma).is_some() {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }

    /// A type reference, e.g. `Int?` or `Map<K, V>`.
    pub(super) fn parse_type(&mut self) -> Result<TypeNode, ParseError> {
        let (name, span) = self.cursor.expect_ident("type")?;
        let mut ty = TypeNode::simple(name, span);
        if self.cursor.eat(TokenKind::Lt).is_some() {
            ty.args = self.parse_type_list()?;
            ty.span = ty.span.merge(self.cursor.expect(TokenKind::Gt, "`>`")?.span);
        }
        if let Some(question) = self.cursor.eat(TokenKind::Question) {
            ty.nullable = true;
            ty.span = ty.span.merge(question.span);
        }
        Ok(ty)
    }
}
