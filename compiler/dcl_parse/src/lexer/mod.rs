//! Tokenizer for analysis units.
//!
//! Produces a flat token list terminated by `Eof`. Comments are not tokens;
//! their spans are collected separately so the parser can read directives.

use std::fmt;

use dcl_ir::{Span, SpanError};

/// Token kinds of the unit language.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Lt,
    Gt,
    Question,
    ColonColon,
    Colon,
    Comma,
    Dot,
    Arrow,
    Eq,
    LParen,
    RParen,
    LBrace,
    RBrace,
    /// A character outside the unit language.
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable name for error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::Question => "`?`",
            TokenKind::ColonColon => "`::`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Arrow => "`->`",
            TokenKind::Eq => "`=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Error => "invalid character",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// First token on its line.
    pub line_start: bool,
}

/// Lexer output.
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    pub tokens: Vec<Token>,
    /// `//` comments, each span covering the text after the slashes.
    pub comments: Vec<Span>,
}

/// Tokenize a unit.
///
/// Fails only when the source does not fit `u32` offsets.
pub fn lex(source: &str) -> Result<TokenList, SpanError> {
    let mut out = TokenList::default();
    let bytes = source.as_bytes();
    let mut pos = 0;
    let mut line_start = true;

    while pos < bytes.len() {
        let start = pos;
        let c = bytes[pos];
        let kind = match c {
            b'\n' => {
                line_start = true;
                pos += 1;
                continue;
            }
            b' ' | b'\t' | b'\r' => {
                pos += 1;
                continue;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                let end = source[pos..].find('\n').map_or(source.len(), |n| pos + n);
                out.comments.push(Span::try_from_range(pos + 2..end)?);
                pos = end;
                continue;
            }
            b':' if bytes.get(pos + 1) == Some(&b':') => {
                pos += 2;
                TokenKind::ColonColon
            }
            b'-' if bytes.get(pos + 1) == Some(&b'>') => {
                pos += 2;
                TokenKind::Arrow
            }
            b'<' => single(&mut pos, TokenKind::Lt),
            b'>' => single(&mut pos, TokenKind::Gt),
            b'?' => single(&mut pos, TokenKind::Question),
            b':' => single(&mut pos, TokenKind::Colon),
            b',' => single(&mut pos, TokenKind::Comma),
            b'.' => single(&mut pos, TokenKind::Dot),
            b'=' => single(&mut pos, TokenKind::Eq),
            b'(' => single(&mut pos, TokenKind::LParen),
            b')' => single(&mut pos, TokenKind::RParen),
            b'{' => single(&mut pos, TokenKind::LBrace),
            b'}' => single(&mut pos, TokenKind::RBrace),
            _ => {
                let rest = &source[pos..];
                let ident_len: usize = rest
                    .chars()
                    .take_while(|ch| is_ident_char(*ch))
                    .map(char::len_utf8)
                    .sum();
                if ident_len > 0 && rest.chars().next().is_some_and(is_ident_start) {
                    pos += ident_len;
                    TokenKind::Ident
                } else {
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                    TokenKind::Error
                }
            }
        };
        out.tokens.push(Token {
            kind,
            span: Span::try_from_range(start..pos)?,
            line_start,
        });
        line_start = false;
    }

    out.tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::try_from_range(source.len()..source.len())?,
        line_start: true,
    });
    Ok(out)
}

#[inline]
fn single(pos: &mut usize, kind: TokenKind) -> TokenKind {
    *pos += 1;
    kind
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
