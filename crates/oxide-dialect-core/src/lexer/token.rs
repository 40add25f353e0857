//! Token types for the SQL lexer.

use super::Span;

/// The kind of token.
///
/// Keywords are not distinguished from identifiers: the rewriting stages only
/// recognize a handful of keywords and compare words case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword (e.g. `insert`, `user_id`).
    Word(String),
    /// Numeric literal, as written (e.g. `42`, `3.14`, `1e10`).
    Number(String),
    /// Single-quoted string literal, including the quotes.
    String(String),
    /// Double-quoted identifier, including the quotes.
    QuotedIdentifier(String),

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ::
    DoubleColon,
    /// =
    Eq,
    /// ~ (table-reference sigil)
    Tilde,
    /// Any other operator or symbol (`+`, `<=`, `||`, `?`, ...).
    Operator(String),

    /// End of input
    Eof,
}

/// A token with its span in the source statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source statement.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the word if this is a word token.
    #[must_use]
    pub fn as_word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(word) => Some(word),
            _ => None,
        }
    }

    /// Returns true if this token is the given word (case-insensitive).
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.as_word().is_some_and(|w| w.eq_ignore_ascii_case(word))
    }

    /// Returns true if this token can name a column or table.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Word(_) | TokenKind::QuotedIdentifier(_)
        )
    }

    /// Returns the source text of this token.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }
}
