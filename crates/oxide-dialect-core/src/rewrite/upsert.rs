//! Parser for the `insert ... on conflict ... do update` idiom.
//!
//! Grammar (keywords case-insensitive):
//!
//! ```text
//! insert into <table> ( <col> [, <col>]* )
//! values ( <value> [, <value>]* ) [, ( <value> [, <value>]* )]*
//! on conflict ( <col> [, <col>]* )
//! do update set <col> = <expr> [, <col> = <expr>]* [where <expr>] [;]
//! ```
//!
//! A `<table>` is a name, a `schema.name` pair, a quoted identifier, or the
//! two-token `~name` reference resolved by the calling layer. A `<value>` is
//! any balanced run of tokens (literal, `:param`, function call).

use crate::error::{DialectError, Result};
use crate::lexer::{Token, TokenKind, tokenize};

/// One `<col> = <expr>` of the `do update set` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Assigned column, as written (qualifier stripped).
    pub target: String,
    /// Tokens of the right-hand side.
    pub expression: Vec<Token>,
}

/// Structured form of an upsert statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertStatement<'a> {
    source: &'a str,
    /// Target table, as written.
    pub table: String,
    /// Inserted columns, in order.
    pub columns: Vec<String>,
    /// Value rows; each value is its source text (parameters keep their `:`).
    pub rows: Vec<Vec<String>>,
    /// Conflict key, every entry also present in `columns`.
    pub conflict_columns: Vec<String>,
    /// Update assignments in order, conflict-column assignments removed.
    pub assignments: Vec<Assignment>,
    /// Tokens of the optional `where` condition of the update.
    pub condition: Option<Vec<Token>>,
}

impl<'a> UpsertStatement<'a> {
    /// Parses an upsert statement.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::MalformedUpsert`] with the index of the first
    /// token that diverges from the grammar, or
    /// [`DialectError::UnknownConflictColumn`] if a conflict column is not
    /// inserted.
    pub fn parse(sql: &'a str) -> Result<Self> {
        UpsertParser::new(sql).parse()
    }

    /// The statement text the token spans refer to.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Last component of the table name, used as a qualifier in expressions.
    #[must_use]
    pub fn table_qualifier(&self) -> &str {
        self.table
            .rsplit('.')
            .next()
            .map_or(self.table.as_str(), |name| name.trim_start_matches('~'))
    }

    /// Returns true if `name` is one of the inserted columns.
    #[must_use]
    pub fn is_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| same_column(c, name))
    }
}

/// Compares column names: case-insensitive unless either side is quoted.
#[must_use]
pub fn same_column(a: &str, b: &str) -> bool {
    if a.starts_with('"') || b.starts_with('"') {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

struct UpsertParser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> UpsertParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<UpsertStatement<'a>> {
        self.expect_word("insert")?;
        self.expect_word("into")?;
        let table = self.parse_table()?;

        self.expect(&TokenKind::LeftParen, "'(' to open the column list")?;
        let columns: Vec<String> = self
            .parse_identifier_list("column")?
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        self.expect_word("values")?;
        let mut rows = Vec::new();
        loop {
            let row_start = self.pos;
            let row = self.parse_row()?;
            if row.len() != columns.len() {
                return Err(DialectError::malformed(
                    row_start,
                    format!(
                        "expected {} values to match the column list, found {}",
                        columns.len(),
                        row.len()
                    ),
                ));
            }
            rows.push(row);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        self.expect_word("on")?;
        self.expect_word("conflict")?;
        self.expect(&TokenKind::LeftParen, "'(' to open the conflict column list")?;
        let mut conflict_columns = Vec::new();
        for (column, offset) in self.parse_identifier_list("conflict column")? {
            if !columns.iter().any(|c| same_column(c, &column)) {
                return Err(DialectError::UnknownConflictColumn { column, offset });
            }
            conflict_columns.push(column);
        }

        self.expect_word("do")?;
        self.expect_word("update")?;
        self.expect_word("set")?;

        let mut assignments = Vec::new();
        loop {
            let assignment = self.parse_assignment()?;
            if conflict_columns.iter().any(|c| same_column(c, &assignment.target)) {
                tracing::trace!(column = %assignment.target, "Dropping conflict column assignment");
            } else {
                assignments.push(assignment);
            }
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        let condition = if self.current().is_word("where") {
            self.pos += 1;
            let condition = self.collect_expression(false);
            if condition.is_empty() {
                return Err(DialectError::malformed(self.pos, "expected a condition after 'where'"));
            }
            Some(condition)
        } else {
            None
        };

        self.consume(&TokenKind::Semicolon);
        if !self.current().is_eof() {
            return Err(DialectError::malformed(self.pos, "unexpected token after the update clause"));
        }

        Ok(UpsertStatement {
            source: self.source,
            table,
            columns,
            rows,
            conflict_columns,
            assignments,
            condition,
        })
    }

    fn parse_table(&mut self) -> Result<String> {
        if self.consume(&TokenKind::Tilde) {
            let name = self.expect_identifier("table name after '~'")?;
            return Ok(format!("~{name}"));
        }
        let mut table = self.expect_identifier("table name")?;
        if self.check(&TokenKind::Dot) {
            self.pos += 1;
            let name = self.expect_identifier("table name after '.'")?;
            table.push('.');
            table.push_str(&name);
        }
        Ok(table)
    }

    /// Parses `<ident> [, <ident>]* )` after the opening parenthesis.
    fn parse_identifier_list(&mut self, what: &str) -> Result<Vec<(String, usize)>> {
        let mut names = Vec::new();
        loop {
            let offset = self.pos;
            let name = self.expect_identifier(what)?;
            names.push((name, offset));
            if self.consume(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RightParen, "',' or ')'")?;
            return Ok(names);
        }
    }

    /// Parses `( <value> [, <value>]* )`.
    fn parse_row(&mut self) -> Result<Vec<String>> {
        self.expect(&TokenKind::LeftParen, "'(' to open a value row")?;
        let mut values = Vec::new();
        loop {
            let start = self.pos;
            let value = self.collect_expression(true);
            let (Some(first), Some(last)) = (value.first(), value.last()) else {
                return Err(DialectError::malformed(start, "expected a value"));
            };
            values.push(String::from(&self.source[first.span.start..last.span.end]));
            if self.consume(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RightParen, "',' or ')' in value row")?;
            return Ok(values);
        }
    }

    fn parse_assignment(&mut self) -> Result<Assignment> {
        let mut target = self.expect_identifier("assignment target")?;
        if self.check(&TokenKind::Dot) {
            self.pos += 1;
            target = self.expect_identifier("column after '.'")?;
        }
        self.expect(&TokenKind::Eq, "'=' in assignment")?;
        let start = self.pos;
        let expression = self.collect_expression(true);
        if expression.is_empty() {
            return Err(DialectError::malformed(start, "expected an expression after '='"));
        }
        Ok(Assignment { target, expression })
    }

    /// Collects tokens up to the next top-level `,`, `)`, `;`, end of input
    /// or, outside value lists, `where`.
    fn collect_expression(&mut self, stop_at_comma: bool) -> Vec<Token> {
        let mut depth = 0usize;
        let mut tokens = Vec::new();
        loop {
            let token = self.current();
            match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon if depth == 0 => break,
                TokenKind::Comma if depth == 0 && stop_at_comma => break,
                TokenKind::RightParen if depth == 0 => break,
                TokenKind::Word(_) if depth == 0 && stop_at_comma && token.is_word("where") => break,
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            tokens.push(token.clone());
            self.pos += 1;
        }
        tokens
    }

    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<()> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(DialectError::malformed(self.pos, format!("expected {what}")))
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<()> {
        if self.current().is_word(word) {
            self.pos += 1;
            Ok(())
        } else {
            Err(DialectError::malformed(self.pos, format!("expected '{word}'")))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String> {
        let name = match &self.current().kind {
            TokenKind::Word(name) | TokenKind::QuotedIdentifier(name) => name.clone(),
            _ => return Err(DialectError::malformed(self.pos, format!("expected {what}"))),
        };
        self.pos += 1;
        Ok(name)
    }
}
