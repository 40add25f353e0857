//! Identifier policy: truncation, reserved-word quoting and name normalization.

use crate::dialect::DialectProfile;
use crate::lexer::{Segment, split_preserving_string_literals};

/// Makes a name safe to use as an identifier for the profile's vendor.
///
/// The name is truncated to the vendor's maximum identifier length, then
/// quoted if it collides with a reserved word. Names that are already quoted
/// are returned unchanged, so the function is idempotent.
#[must_use]
pub fn restrict(name: &str, profile: &DialectProfile) -> String {
    if is_quoted(name, profile.identifier_quote) {
        return String::from(name);
    }
    let truncated: String = match profile.max_identifier_length {
        Some(max) if name.chars().count() > max => name.chars().take(max).collect(),
        _ => String::from(name),
    };
    if profile.is_reserved(&truncated) {
        profile.quote(&truncated)
    } else {
        truncated
    }
}

fn is_quoted(name: &str, quote: char) -> bool {
    name.len() >= 2 && name.starts_with(quote) && name.ends_with(quote)
}

/// Applies [`restrict`] to every bare identifier of a hand-written statement.
///
/// A word is left alone when it is inside a string literal or comment, is the
/// first word of the statement, follows a named-parameter marker or the `~`
/// table sigil, is directly followed by `(` (function calls), is a numeric
/// literal, or is already wrapped in identifier quotes.
#[must_use]
pub fn rewrite_reserved_identifiers(sql: &str, profile: &DialectProfile) -> String {
    if profile.reserved_words.is_empty() && profile.max_identifier_length.is_none() {
        return String::from(sql);
    }

    let segments = split_preserving_string_literals(sql);
    let mut out = String::with_capacity(sql.len());
    let mut seen_word = false;
    let mut changed = 0usize;

    for (index, segment) in segments.iter().enumerate() {
        if !segment.is_code_word() {
            out.push_str(segment.text);
            continue;
        }
        let first = !seen_word;
        seen_word = true;

        let previous = index.checked_sub(1).and_then(|i| segments.get(i));
        let next = segments.get(index + 1);
        if first
            || is_number(segment)
            || follows_marker(previous)
            || is_call(next)
            || is_wrapped(previous, profile)
        {
            out.push_str(segment.text);
            continue;
        }

        let restricted = restrict(segment.text, profile);
        if restricted != segment.text {
            changed += 1;
        }
        out.push_str(&restricted);
    }

    tracing::trace!(changed, "Rewrote reserved identifiers");
    out
}

/// `:name` bind parameters and `~name` sigil table references.
fn follows_marker(previous: Option<&Segment<'_>>) -> bool {
    previous.is_some_and(|s| {
        let text = s.text.trim_end();
        text.ends_with(':') || text.ends_with('~')
    })
}

fn is_number(segment: &Segment<'_>) -> bool {
    segment.text.starts_with(|c: char| c.is_ascii_digit())
}

fn is_call(next: Option<&Segment<'_>>) -> bool {
    next.is_some_and(|s| {
        !s.in_string_literal && !s.in_comment && s.text.trim_start().starts_with('(')
    })
}

fn is_wrapped(previous: Option<&Segment<'_>>, profile: &DialectProfile) -> bool {
    previous.is_some_and(|s| s.text.ends_with(profile.identifier_quote))
}

/// Replaces bare `true`/`false` keywords with `1`/`0` on numeric-boolean vendors.
///
/// String literals, bind parameters (`:true`) and qualified names (`t.true`)
/// are left untouched. Matching is case-insensitive.
#[must_use]
pub fn normalize_boolean_literals(sql: &str, profile: &DialectProfile) -> String {
    if !profile.numeric_booleans() {
        return String::from(sql);
    }

    let segments = split_preserving_string_literals(sql);
    let mut out = String::with_capacity(sql.len());
    for (index, segment) in segments.iter().enumerate() {
        let previous = index.checked_sub(1).and_then(|i| segments.get(i));
        let qualified = previous.is_some_and(|s| {
            let text = s.text.trim_end();
            text.ends_with(':') || text.ends_with('.') || text.ends_with(profile.identifier_quote)
        });
        if segment.is_code_word() && !qualified {
            if segment.text.eq_ignore_ascii_case("true") {
                out.push('1');
                continue;
            }
            if segment.text.eq_ignore_ascii_case("false") {
                out.push('0');
                continue;
            }
        }
        out.push_str(segment.text);
    }
    out
}

/// Converts a camelCase name to `snake_case` (`sliceStartDate` -> `slice_start_date`).
#[must_use]
pub fn uncamelify(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let previous = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_is_lower);
            if boundary && previous != '_' {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> DialectProfile {
        DialectProfile::oracle()
    }

    #[test]
    fn test_restrict_quotes_reserved_words() {
        assert_eq!(restrict("date", &oracle()), "\"date\"");
        assert_eq!(restrict("SIZE", &oracle()), "\"SIZE\"");
        assert_eq!(restrict("created", &oracle()), "created");
    }

    #[test]
    fn test_restrict_truncates() {
        let long = "a_really_long_column_name_that_overflows";
        let restricted = restrict(long, &oracle());
        assert_eq!(restricted.len(), 30);
        assert!(long.starts_with(&restricted));
    }

    #[test]
    fn test_restrict_is_idempotent() {
        let once = restrict("session", &oracle());
        assert_eq!(restrict(&once, &oracle()), once);
    }

    #[test]
    fn test_restrict_without_reserved_words() {
        assert_eq!(restrict("date", &DialectProfile::postgres()), "date");
    }

    #[test]
    fn test_rewrite_reserved_identifiers() {
        let sql = "select id, date, size from events where state = :state";
        assert_eq!(
            rewrite_reserved_identifiers(sql, &oracle()),
            "select id, \"date\", \"size\" from events where \"state\" = :state"
        );
    }

    #[test]
    fn test_rewrite_skips_function_calls() {
        let sql = "select number (1), uid from dual";
        assert_eq!(
            rewrite_reserved_identifiers(sql, &oracle()),
            "select number (1), \"uid\" from dual"
        );
    }

    #[test]
    fn test_rewrite_skips_first_word() {
        assert_eq!(rewrite_reserved_identifiers("comment on x", &oracle()), "comment on x");
        assert_eq!(
            rewrite_reserved_identifiers("  comment on x", &oracle()),
            "  comment on x"
        );
    }

    #[test]
    fn test_rewrite_leaves_string_literals_alone() {
        let sql = "select id from t where kind = 'date' and label = 'size of session'";
        assert_eq!(rewrite_reserved_identifiers(sql, &oracle()), sql);
    }

    #[test]
    fn test_rewrite_keeps_sigil_table() {
        assert_eq!(
            rewrite_reserved_identifiers("merge into ~audit tt using dual", &oracle()),
            "merge into ~audit tt using dual"
        );
    }

    #[test]
    fn test_rewrite_keeps_long_numeric_literals() {
        let sql = "update t set amount = 0.123456789012345678901234567890123 \
                   where id = 1234567890123456789012345678901234";
        assert_eq!(rewrite_reserved_identifiers(sql, &oracle()), sql);
    }

    #[test]
    fn test_rewrite_skips_comment_text() {
        assert_eq!(
            rewrite_reserved_identifiers("select id -- don't\n, size from t /* date */", &oracle()),
            "select id -- don't\n, \"size\" from t /* date */"
        );
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let sql = "update t set comment = :comment, audit = 1 where date > :date";
        let once = rewrite_reserved_identifiers(sql, &oracle());
        assert_eq!(rewrite_reserved_identifiers(&once, &oracle()), once);
        assert_eq!(
            once,
            "update t set \"comment\" = :comment, \"audit\" = 1 where \"date\" > :date"
        );
    }

    #[test]
    fn test_normalize_booleans() {
        let sql = "select * from t where active = true and deleted = FALSE";
        assert_eq!(
            normalize_boolean_literals(sql, &oracle()),
            "select * from t where active = 1 and deleted = 0"
        );
    }

    #[test]
    fn test_normalize_booleans_keeps_literals_and_parameters() {
        let sql = "select 'true' from t where a = :true and t.false = 1 and b = trueish";
        assert_eq!(normalize_boolean_literals(sql, &oracle()), sql);
    }

    #[test]
    fn test_normalize_booleans_native_vendor() {
        let sql = "select * from t where active = true";
        assert_eq!(normalize_boolean_literals(sql, &DialectProfile::postgres()), sql);
    }

    #[test]
    fn test_uncamelify() {
        assert_eq!(uncamelify("sliceStartDate"), "slice_start_date");
        assert_eq!(uncamelify("DeliveryPoint"), "delivery_point");
        assert_eq!(uncamelify("already_snake"), "already_snake");
        assert_eq!(uncamelify("HTTPServer"), "http_server");
        assert_eq!(uncamelify("address2Line"), "address2_line");
    }
}
