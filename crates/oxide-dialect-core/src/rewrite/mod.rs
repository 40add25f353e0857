//! Statement rewriting pipeline.
//!
//! A hand-written statement passes through three stages in a fixed order:
//! boolean-literal normalization, upsert-to-merge transpilation (only for
//! vendors without a native upsert and only when the gate matches), and
//! reserved-identifier rewriting.

mod merge;
mod pagination;
mod upsert;

pub use merge::{SOURCE_ALIAS, TARGET_ALIAS, emit_merge};
pub use pagination::apply_limit;
pub use upsert::{Assignment, UpsertStatement, same_column};

use regex::Regex;

use crate::dialect::DialectProfile;
use crate::error::Result;
use crate::identifier::{normalize_boolean_literals, rewrite_reserved_identifiers};
use crate::lexer::{Token, tokenize};

const UPSERT_PATTERN: &str = r"(?is)^\s*insert\s+into\b.*\bon\s+conflict\b.*\bdo\s+update\b";

/// Cheap pre-check deciding whether a statement needs the upsert parser.
#[derive(Debug, Clone)]
pub struct UpsertGate {
    pattern: Regex,
}

impl UpsertGate {
    /// Compiles the gate.
    ///
    /// # Errors
    ///
    /// Returns an error if the gate pattern fails to compile.
    pub fn new() -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(UPSERT_PATTERN)?,
        })
    }

    /// Returns true if `sql` is an `insert ... on conflict ... do update`.
    ///
    /// The pattern is confirmed on the token stream so that keywords inside
    /// string literals or comments do not open the gate.
    #[must_use]
    pub fn matches(&self, sql: &str) -> bool {
        self.pattern.is_match(sql) && {
            let tokens = tokenize(sql);
            has_pair(&tokens, "on", "conflict") && has_pair(&tokens, "do", "update")
        }
    }
}

fn has_pair(tokens: &[Token], first: &str, second: &str) -> bool {
    tokens
        .windows(2)
        .any(|pair| pair[0].is_word(first) && pair[1].is_word(second))
}

/// Transpiles an upsert into the equivalent vendor `merge`.
///
/// # Errors
///
/// Returns [`crate::DialectError::MalformedUpsert`] at the token where the
/// statement leaves the upsert grammar, or
/// [`crate::DialectError::UnknownConflictColumn`].
pub fn rewrite_upsert(sql: &str, profile: &DialectProfile) -> Result<String> {
    let upsert = UpsertStatement::parse(sql)?;
    Ok(emit_merge(&upsert, profile))
}

/// Runs the full rewrite pipeline for a vendor.
///
/// # Errors
///
/// Returns [`crate::DialectError::MalformedUpsert`] or
/// [`crate::DialectError::UnknownConflictColumn`] when a statement passes the
/// upsert gate but does not follow the upsert grammar.
pub fn rewrite(sql: &str, profile: &DialectProfile, gate: &UpsertGate) -> Result<String> {
    let normalized = normalize_boolean_literals(sql, profile);

    let statement = if !profile.native_upsert && gate.matches(&normalized) {
        tracing::debug!(vendor = %profile.vendor, "Upsert gate matched");
        rewrite_upsert(&normalized, profile)?
    } else {
        normalized
    };

    Ok(rewrite_reserved_identifiers(&statement, profile))
}
