//! Token cursor for navigating the token stream.

use dcl_ir::{Name, Span, StringInterner};

use crate::lexer::{Token, TokenKind};
use crate::ParseError;

const EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
    line_start: true,
};

/// Cursor over a token list that always ends in `Eof`.
pub(crate) struct Cursor<'a> {
    tokens: &'a [Token],
    source: &'a str,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a [Token], source: &'a str, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            source,
            interner,
            pos: 0,
        }
    }

    /// Current position, for progress checks and backtracking.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.tokens.len(), "cursor position out of bounds");
        self.pos = pos;
    }

    pub(crate) fn token_at(&self, pos: usize) -> Option<Token> {
        self.tokens.get(pos).copied()
    }

    #[inline]
    pub(crate) fn current(&self) -> Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(EOF)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Whether the current token is the identifier `word`.
    pub(crate) fn check_word(&self, word: &str) -> bool {
        let token = self.current();
        token.kind == TokenKind::Ident && self.text(token) == word
    }

    /// Whether the current token begins a new line (or is `Eof`).
    pub(crate) fn at_line_start(&self) -> bool {
        self.current().line_start
    }

    /// Consume and return the current token. `Eof` is never consumed.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a token of `kind` or fail naming `expected`.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<Token, ParseError> {
        let token = self.current();
        if token.kind == kind {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(expected, token.kind, token.span))
        }
    }

    /// Consume an identifier and intern it.
    pub(crate) fn expect_ident(&mut self, expected: &'static str) -> Result<(Name, Span), ParseError> {
        let token = self.expect(TokenKind::Ident, expected)?;
        Ok((self.intern(token), token.span))
    }

    pub(crate) fn text(&self, token: Token) -> &'a str {
        self.text_of(token.span)
    }

    pub(crate) fn text_of(&self, span: Span) -> &'a str {
        self.source.get(span.to_range()).unwrap_or("")
    }

    pub(crate) fn intern(&self, token: Token) -> Name {
        self.interner.intern(self.text(token))
    }

    /// Skip to the first token of the next line.
    pub(crate) fn skip_line(&mut self) {
        self.advance();
        while !self.at_line_start() {
            self.advance();
        }
    }
}
