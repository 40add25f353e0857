//! Tests for offset/limit emulation.

mod common;
use common::*;

const QUERY: &str = "select id, name from customers order by name";

fn wraps(sql: &str) -> usize {
    sql.matches(") results where").count()
}

#[test]
fn absent_limit_returns_input() {
    assert_eq!(oracle().limit(QUERY, Some(5), None), QUERY);
    assert_eq!(postgres().limit(QUERY, None, None), QUERY);
}

#[test]
fn zero_offset_wraps_once() {
    let sql = oracle().limit(QUERY, Some(0), Some(25));
    assert_eq!(wraps(&sql), 1);
    assert!(sql.ends_with("where rownum <= 25"));
}

#[test]
fn positive_offset_wraps_twice() {
    let sql = oracle().limit(QUERY, Some(40), Some(20));
    assert_eq!(wraps(&sql), 2);
    assert!(sql.contains("where rownum <= 60"));
    assert!(sql.ends_with("where record_number >= 40"));
}

#[test]
fn postgres_uses_native_clauses() {
    assert_eq!(
        postgres().limit(QUERY, Some(40), Some(20)),
        format!("{QUERY} limit 20 offset 40")
    );
}
