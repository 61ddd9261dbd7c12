//! Declarations and check items.

use dcl_ir::{Name, Span};

use crate::lexer::TokenKind;
use crate::unit::{CheckItem, Decl};
use crate::{ParseError, ParseErrorKind};

use super::{Item, Parser};

impl Parser<'_> {
    pub(super) fn parse_item(&mut self) -> Result<Item, ParseError> {
        let token = self.cursor.current();
        if token.kind != TokenKind::Ident {
            return Err(ParseError::new(ParseErrorKind::UnknownItem, token.span));
        }
        match self.cursor.text(token) {
            "package" | "import" => {
                self.cursor.skip_line();
                Ok(Item::Ignored)
            }
            "class" => self.parse_class(false).map(Item::Decl),
            "object" => self.parse_class(true).map(Item::Decl),
            "val" => self.parse_value().map(Item::Decl),
            "type" => self.parse_type_decl().map(Item::Decl),
            "fun" => self.parse_fun(),
            _ => Err(ParseError::new(ParseErrorKind::UnknownItem, token.span)),
        }
    }

    /// `class name [<T, ...>] [{ members }]` or `object name [{ members }]`.
    fn parse_class(&mut self, is_object: bool) -> Result<Decl, ParseError> {
        let keyword = self.cursor.advance();
        let (name, name_span) = self.cursor.expect_ident("class name")?;
        let mut end = name_span.end;

        let mut type_params = Vec::new();
        if !is_object && self.cursor.eat(TokenKind::Lt).is_some() {
            loop {
                let (param, _) = self.cursor.expect_ident("type parameter")?;
                type_params.push(param);
                if self.cursor.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            end = self.cursor.expect(TokenKind::Gt, "`>`")?.span.end;
        }

        let mut members = Vec::new();
        if self.cursor.check(TokenKind::LBrace) && !self.cursor.at_line_start() {
            end = self.parse_members(&mut members)?;
        }
        self.expect_line_end()?;

        Ok(Decl::Class {
            name,
            type_params,
            members,
            span: Span::new(keyword.span.start, end),
        })
    }

    /// `{ [fun] name[()] [, ...] }`, members separated by commas or lines.
    fn parse_members(&mut self, members: &mut Vec<Name>) -> Result<u32, ParseError> {
        self.cursor.advance();
        loop {
            if let Some(close) = self.cursor.eat(TokenKind::RBrace) {
                return Ok(close.span.end);
            }
            if self.cursor.check_word("fun") {
                self.cursor.advance();
            }
            let (member, _) = self.cursor.expect_ident("member name")?;
            members.push(member);
            self.skip_parens()?;
            self.cursor.eat(TokenKind::Comma);
        }
    }

    /// `val name: Type`.
    fn parse_value(&mut self) -> Result<Decl, ParseError> {
        let keyword = self.cursor.advance();
        let (name, _) = self.cursor.expect_ident("value name")?;
        self.cursor.expect(TokenKind::Colon, "`:`")?;
        let ty = self.parse_type()?;
        self.expect_line_end()?;
        Ok(Decl::Value {
            name,
            span: Span::new(keyword.span.start, ty.span.end),
            ty,
        })
    }

    /// `type Name`.
    fn parse_type_decl(&mut self) -> Result<Decl, ParseError> {
        let keyword = self.cursor.advance();
        let (name, name_span) = self.cursor.expect_ident("type name")?;
        self.expect_line_end()?;
        Ok(Decl::Type {
            name,
            span: keyword.span.merge(name_span),
        })
    }

    /// `fun Receiver.member[()] [{}]`, `fun name()`, or a check item
    /// `fun name()[: T] = <reference>`.
    fn parse_fun(&mut self) -> Result<Item, ParseError> {
        let keyword = self.cursor.advance();
        let (name, name_span) = self.cursor.expect_ident("function name")?;

        if self.cursor.eat(TokenKind::Dot).is_some() {
            let (member, member_span) = self.cursor.expect_ident("member name")?;
            let mut end = member_span.end;
            if self.cursor.check(TokenKind::LParen) {
                self.skip_parens()?;
                end = self.previous_end(end);
            }
            if self.cursor.check(TokenKind::LBrace) {
                self.skip_braces()?;
            }
            self.expect_line_end()?;
            return Ok(Item::Decl(Decl::Extension {
                receiver: name,
                member,
                span: Span::new(keyword.span.start, end),
            }));
        }

        if !self.cursor.check(TokenKind::LParen) {
            let token = self.cursor.current();
            return Err(ParseError::unexpected("`(` or `.`", token.kind, token.span));
        }
        self.skip_parens()?;
        let mut end = self.previous_end(name_span.end);

        // Return type: anything up to `=` on this line.
        if self.cursor.eat(TokenKind::Colon).is_some() {
            while !self.cursor.at_line_start() && !self.cursor.check(TokenKind::Eq) {
                self.cursor.advance();
            }
        }

        if self.cursor.eat(TokenKind::Eq).is_none() {
            if self.cursor.check(TokenKind::LBrace) {
                self.skip_braces()?;
            }
            self.expect_line_end()?;
            return Ok(Item::Decl(Decl::Function {
                name,
                span: Span::new(keyword.span.start, end),
            }));
        }

        let reference = self.parse_reference()?;
        self.expect_line_end()?;
        end = dcl_ir::Spanned::span(&reference).end;
        Ok(Item::Check(CheckItem {
            name,
            reference,
            span: Span::new(keyword.span.start, end),
        }))
    }

    /// Skip a balanced `{ ... }` group on the current line.
    fn skip_braces(&mut self) -> Result<(), ParseError> {
        let open = self.cursor.advance();
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.cursor.current();
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                TokenKind::Eof => {
                    return Err(ParseError::unexpected("`}`", token.kind, open.span));
                }
                _ => {}
            }
            self.cursor.advance();
        }
        Ok(())
    }

    /// End offset of the token just consumed, or `fallback` at the start.
    fn previous_end(&self, fallback: u32) -> u32 {
        self.cursor
            .position()
            .checked_sub(1)
            .and_then(|pos| self.cursor.token_at(pos))
            .map_or(fallback, |token| token.span.end)
    }
}
