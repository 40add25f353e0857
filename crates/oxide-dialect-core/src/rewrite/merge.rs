//! `merge into` emission for parsed upserts.

use crate::dialect::DialectProfile;
use crate::lexer::{Token, TokenKind};

use super::upsert::UpsertStatement;

/// Alias of the target table in emitted merges.
pub const TARGET_ALIAS: &str = "tt";

/// Alias of the source row set in emitted merges.
pub const SOURCE_ALIAS: &str = "excluded";

/// Emits the vendor `merge` statement equivalent to an upsert.
///
/// Each value row becomes one `select ... as <col>` branch of a `union all`
/// source aliased `excluded`. Bare references to inserted columns in the
/// update clause are qualified with the target alias, as are references
/// qualified with the target table name.
#[must_use]
pub fn emit_merge(stmt: &UpsertStatement<'_>, profile: &DialectProfile) -> String {
    let from = profile
        .one_row_table
        .map(|table| format!(" from {table}"))
        .unwrap_or_default();

    let branches: Vec<String> = stmt
        .rows
        .iter()
        .map(|row| {
            let projections: Vec<String> = row
                .iter()
                .zip(&stmt.columns)
                .map(|(value, column)| format!("{value} as {column}"))
                .collect();
            format!("select {}{from}", projections.join(", "))
        })
        .collect();

    let on: Vec<String> = stmt
        .conflict_columns
        .iter()
        .map(|c| format!("{TARGET_ALIAS}.{c} = {SOURCE_ALIAS}.{c}"))
        .collect();

    let mut sql = format!(
        "merge into {} {TARGET_ALIAS}\n\tusing ({}) {SOURCE_ALIAS}\n\ton ({})",
        stmt.table,
        branches.join(" union all "),
        on.join(" and ")
    );

    if !stmt.assignments.is_empty() {
        let assignments: Vec<String> = stmt
            .assignments
            .iter()
            .map(|a| format!("{} = {}", a.target, render_expression(&a.expression, stmt)))
            .collect();
        sql.push_str("\n\twhen matched then update set ");
        sql.push_str(&assignments.join(", "));
        if let Some(condition) = &stmt.condition {
            sql.push_str(" where ");
            sql.push_str(&render_expression(condition, stmt));
        }
    }

    let targets: Vec<String> = stmt
        .columns
        .iter()
        .map(|c| format!("{TARGET_ALIAS}.{c}"))
        .collect();
    let sources: Vec<String> = stmt
        .columns
        .iter()
        .map(|c| format!("{SOURCE_ALIAS}.{c}"))
        .collect();
    sql.push_str(&format!(
        "\n\twhen not matched then insert ({}) values ({})",
        targets.join(", "),
        sources.join(", ")
    ));

    tracing::debug!(
        table = %stmt.table,
        rows = stmt.rows.len(),
        columns = stmt.columns.len(),
        conflict_columns = stmt.conflict_columns.len(),
        assignments = stmt.assignments.len(),
        "Rewrote upsert as merge"
    );
    sql
}

/// Renders expression tokens, collapsing whitespace runs to one space and
/// qualifying references to the target row.
fn render_expression(tokens: &[Token], stmt: &UpsertStatement<'_>) -> String {
    let source = stmt.source();
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        let previous = i.checked_sub(1).and_then(|p| tokens.get(p));
        let next = tokens.get(i + 1);
        if previous.is_some_and(|p| !p.span.touches(token.span)) {
            out.push(' ');
        }

        let text = token.text(source);
        if is_target_qualifier(token, next, tokens.get(i + 2), stmt) {
            out.push_str(TARGET_ALIAS);
        } else if is_bare_column(token, previous, next, stmt) {
            out.push_str(TARGET_ALIAS);
            out.push('.');
            out.push_str(text);
        } else {
            out.push_str(text);
        }
    }
    out
}

/// `<table>` in `<table>.<col>`.
fn is_target_qualifier(
    token: &Token,
    next: Option<&Token>,
    after: Option<&Token>,
    stmt: &UpsertStatement<'_>,
) -> bool {
    token
        .as_word()
        .is_some_and(|w| w.eq_ignore_ascii_case(stmt.table_qualifier()))
        && next.is_some_and(|n| n.kind == TokenKind::Dot)
        && after.is_some_and(Token::is_identifier)
}

/// An inserted column not qualified, not a parameter and not a call.
fn is_bare_column(
    token: &Token,
    previous: Option<&Token>,
    next: Option<&Token>,
    stmt: &UpsertStatement<'_>,
) -> bool {
    let Some(word) = token.as_word() else {
        return false;
    };
    let after_marker =
        previous.is_some_and(|p| matches!(p.kind, TokenKind::Dot | TokenKind::Colon));
    let before_marker =
        next.is_some_and(|n| matches!(n.kind, TokenKind::Dot | TokenKind::LeftParen));
    !after_marker && !before_marker && stmt.is_column(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(sql: &str) -> String {
        let stmt = UpsertStatement::parse(sql).expect("valid upsert");
        emit_merge(&stmt, &DialectProfile::oracle())
    }

    #[test]
    fn test_single_row_merge() {
        let sql = merge(
            "insert into t (id, name) values (:id, :name) on conflict (id) do update set name = excluded.name",
        );
        assert_eq!(
            sql,
            "merge into t tt\n\
             \tusing (select :id as id, :name as name from dual) excluded\n\
             \ton (tt.id = excluded.id)\n\
             \twhen matched then update set name = excluded.name\n\
             \twhen not matched then insert (tt.id, tt.name) values (excluded.id, excluded.name)"
        );
    }

    #[test]
    fn test_multi_row_union() {
        let sql = merge(
            "insert into user_logins (username, logins) values ('Naomi', 1), ('James', 1)
             on conflict (username) do update set logins = user_logins.logins + excluded.logins",
        );
        assert!(sql.contains(
            "using (select 'Naomi' as username, 1 as logins from dual \
             union all select 'James' as username, 1 as logins from dual) excluded"
        ));
        assert!(sql.contains("update set logins = tt.logins + excluded.logins"));
    }

    #[test]
    fn test_bare_column_reference_is_qualified() {
        let sql = merge(
            "insert into counters (id, hits) values (:id, :hits) on conflict (id)
             do update set hits = hits + excluded.hits where hits < 100",
        );
        assert!(sql.contains("update set hits = tt.hits + excluded.hits where tt.hits < 100"));
    }

    #[test]
    fn test_calls_and_parameters_are_not_qualified() {
        let sql = merge(
            "insert into t (id, greatest) values (:id, :greatest) on conflict (id)
             do update set greatest = greatest(greatest, :id)",
        );
        assert!(sql.contains("update set greatest = greatest(tt.greatest, :id)"));
    }

    #[test]
    fn test_all_assignments_elided() {
        let sql = merge("insert into t (id) values (:id) on conflict (id) do update set id = excluded.id");
        assert!(!sql.contains("when matched"));
        assert!(sql.ends_with("when not matched then insert (tt.id) values (excluded.id)"));
    }

    #[test]
    fn test_postgres_profile_has_no_dual() {
        let stmt = UpsertStatement::parse(
            "insert into t (id) values (1) on conflict (id) do update set id = 2",
        )
        .expect("valid upsert");
        let sql = emit_merge(&stmt, &DialectProfile::postgres());
        assert!(sql.contains("using (select 1 as id) excluded"));
    }
}
