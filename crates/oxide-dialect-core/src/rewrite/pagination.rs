//! `offset` / `limit` emulation.

use crate::dialect::{DialectProfile, Pagination};

/// Applies an offset and limit to a query.
///
/// Without a limit the query is returned unchanged. On `rownum` vendors the
/// query is wrapped once to keep rows up to `offset + limit`, and once more
/// when `offset > 0` to keep rows whose ordinal is at least `offset`.
#[must_use]
pub fn apply_limit(
    sql: &str,
    offset: Option<u64>,
    limit: Option<u64>,
    profile: &DialectProfile,
) -> String {
    let Some(limit) = limit else {
        return String::from(sql);
    };
    let offset = offset.unwrap_or(0);
    let query = sql.trim_end().trim_end_matches(';').trim_end();

    let paged = match profile.pagination {
        Pagination::Rownum => {
            let upper_bound = offset.saturating_add(limit);
            let bounded = format!(
                "select results.*, rownum as record_number from ({query}) results where rownum <= {upper_bound}"
            );
            if offset > 0 {
                format!(
                    "select results.* from ({bounded}) results where record_number >= {offset}"
                )
            } else {
                bounded
            }
        }
        Pagination::LimitOffset => {
            if offset > 0 {
                format!("{query} limit {limit} offset {offset}")
            } else {
                format!("{query} limit {limit}")
            }
        }
    };
    tracing::debug!(offset, limit, vendor = %profile.vendor, "Applied pagination");
    paged
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY: &str = "select * from t order by id";

    #[test]
    fn test_no_limit_is_identity() {
        let oracle = DialectProfile::oracle();
        assert_eq!(apply_limit(QUERY, None, None, &oracle), QUERY);
        assert_eq!(apply_limit(QUERY, Some(10), None, &oracle), QUERY);
    }

    #[test]
    fn test_limit_without_offset_wraps_once() {
        let sql = apply_limit(QUERY, Some(0), Some(5), &DialectProfile::oracle());
        assert_eq!(
            sql,
            "select results.*, rownum as record_number from (select * from t order by id) results where rownum <= 5"
        );
        assert_eq!(sql.matches("from (").count(), 1);
    }

    #[test]
    fn test_offset_wraps_twice() {
        let sql = apply_limit(QUERY, Some(20), Some(10), &DialectProfile::oracle());
        assert_eq!(
            sql,
            "select results.* from (select results.*, rownum as record_number from \
             (select * from t order by id) results where rownum <= 30) results where record_number >= 20"
        );
    }

    #[test]
    fn test_trailing_semicolon_is_dropped() {
        let sql = apply_limit("select 1 from dual;\n", None, Some(1), &DialectProfile::oracle());
        assert!(sql.contains("(select 1 from dual)"));
    }

    #[test]
    fn test_native_limit_offset() {
        let postgres = DialectProfile::postgres();
        assert_eq!(
            apply_limit(QUERY, None, Some(5), &postgres),
            "select * from t order by id limit 5"
        );
        assert_eq!(
            apply_limit(QUERY, Some(10), Some(5), &postgres),
            "select * from t order by id limit 5 offset 10"
        );
    }
}
