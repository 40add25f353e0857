//! SQL Lexer/Tokenizer
//!
//! Two views of a statement are provided:
//! - [`tokenize`] produces word, literal and punctuation tokens for the
//!   structural rewrites (upsert recognition, bind plans).
//! - [`split_preserving_string_literals`] produces lossless word-boundary
//!   segments for in-place rewrites of hand-written SQL.

mod segments;
mod span;
mod token;
mod tokenizer;

pub use segments::{Segment, split_preserving_string_literals};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::{Lexer, tokenize};
