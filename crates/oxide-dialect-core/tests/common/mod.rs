#![allow(dead_code)]

use oxide_dialect_core::{Dialect, DialectError, Vendor};

pub fn oracle() -> Dialect {
    Dialect::new(Vendor::Oracle).expect("oracle dialect")
}

pub fn postgres() -> Dialect {
    Dialect::new(Vendor::Postgres).expect("postgres dialect")
}

pub fn rewrite(sql: &str) -> String {
    oracle()
        .rewrite(sql)
        .unwrap_or_else(|e| panic!("Failed to rewrite: {sql}\nError: {e:?}"))
}

pub fn rewrite_err(sql: &str) -> DialectError {
    oracle()
        .rewrite(sql)
        .expect_err(&format!("Expected rewrite error for: {sql}"))
}

/// Returns the text between `using (` and `) excluded`.
pub fn using_clause(merge: &str) -> &str {
    let start = merge.find("using (").expect("using clause") + "using (".len();
    let end = merge.find(") excluded").expect("source alias");
    &merge[start..end]
}

/// Returns the text between `on (` and the next `)` line end.
pub fn on_clause(merge: &str) -> &str {
    let start = merge.find("\ton (").expect("on clause") + "\ton (".len();
    let rest = &merge[start..];
    let end = rest.find(")\n").unwrap_or(rest.len() - 1);
    &rest[..end]
}

/// Returns the `when matched` assignment list, if any.
pub fn matched_clause(merge: &str) -> Option<&str> {
    let marker = "when matched then update set ";
    let start = merge.find(marker)? + marker.len();
    let rest = &merge[start..];
    let end = rest.find('\n').unwrap_or(rest.len());
    Some(&rest[..end])
}
