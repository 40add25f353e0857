//! Tests for the full rewrite pipeline: booleans, merge and identifiers.

mod common;
use common::*;

use oxide_dialect_core::{DialectProfile, rewrite_reserved_identifiers};

#[test]
fn reserved_identifier_rewrite_is_idempotent() {
    let profile = DialectProfile::oracle();
    let statements = [
        "select id, date, size, number from events where state = :state",
        "update sessions set comment = :comment, audit = 1 where uid = :uid",
        "select t.date, count(*) from t group by t.date",
        "insert into notes (id, comment) values (:id, 'date')",
    ];
    for sql in statements {
        let once = rewrite_reserved_identifiers(sql, &profile);
        let twice = rewrite_reserved_identifiers(&once, &profile);
        assert_eq!(once, twice, "{sql}");
    }
}

#[test]
fn reserved_words_inside_literals_are_untouched() {
    let sql = "select id from audit_log where kind in ('date', 'size', 'session state')";
    assert_eq!(rewrite(sql), sql);
}

#[test]
fn full_rewrite_is_idempotent_on_plain_statements() {
    let sql = "select id, date from t where active = true";
    let once = rewrite(sql);
    assert_eq!(once, "select id, \"date\" from t where active = 1");
    assert_eq!(rewrite(&once), once);
}

#[test]
fn merge_output_gets_reserved_identifiers_quoted() {
    let merge = rewrite(
        "insert into t (id, date) values (:id, :date) on conflict (id) do update set date = excluded.date",
    );
    assert!(merge.contains("select :id as id, :date as \"date\" from dual"));
    assert!(merge.contains("when matched then update set \"date\" = excluded.\"date\""));
    assert!(merge.contains("insert (tt.id, tt.\"date\") values (excluded.id, excluded.\"date\")"));
}

#[test]
fn boolean_keywords_become_numbers_before_merge() {
    let merge = rewrite(
        "insert into flags (id, enabled) values (:id, TRUE) on conflict (id) do update set enabled = false",
    );
    assert!(merge.contains("select :id as id, 1 as enabled from dual"));
    assert!(merge.contains("update set enabled = 0"));
}

#[test]
fn upsert_keywords_in_literals_do_not_trigger_merge() {
    let sql = "insert into notes (id, body) values (:id, 'on conflict do update')";
    assert_eq!(rewrite(sql), sql);
}

#[test]
fn postgres_passes_statements_through() {
    let sql = "insert into t (id, date) values (:id, true) on conflict (id) do update set date = excluded.date";
    assert_eq!(postgres().rewrite(sql).expect("rewritten"), sql);
}

#[test]
fn long_identifiers_are_truncated() {
    let sql = "select a_column_name_that_is_far_too_long_for_oracle from t";
    assert_eq!(
        rewrite(sql),
        "select a_column_name_that_is_far_too_ from t"
    );
}

#[test]
fn long_numeric_literals_are_kept_whole() {
    let sql = "update t set amount = 0.123456789012345678901234567890123 where id = :id";
    assert_eq!(rewrite(sql), sql);
}

#[test]
fn quotes_in_comments_do_not_hide_identifiers() {
    assert_eq!(
        rewrite("select id -- don't\n, size from t"),
        "select id -- don't\n, \"size\" from t"
    );
}
