//! Word-boundary segmentation with string-literal tracking.
//!
//! Unlike [`Lexer`](super::Lexer), segmentation is lossless: concatenating the
//! segments yields the input byte for byte. Rewrites that must leave the rest
//! of a hand-written statement untouched (reserved identifiers, boolean
//! keywords) operate on segments.

/// A run of word characters or of non-word characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The segment text.
    pub text: &'a str,
    /// Whether the segment is a run of word characters.
    pub is_word: bool,
    /// Whether the segment lies inside a single-quoted string literal,
    /// quotes included.
    pub in_string_literal: bool,
    /// Whether the segment lies inside a `--` or `/* */` comment.
    pub in_comment: bool,
}

impl Segment<'_> {
    /// Returns true if this is a word segment outside literals and comments.
    #[must_use]
    pub const fn is_code_word(&self) -> bool {
        self.is_word && !self.in_string_literal && !self.in_comment
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Code,
    Literal,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Literal,
    LineComment,
    BlockComment,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits `sql` at every word boundary, marking segments inside string
/// literals and comments.
///
/// A doubled `''` inside a literal stays in the literal. A segment also ends
/// wherever a literal or comment opens or closes.
#[must_use]
pub fn split_preserving_string_literals(sql: &str) -> Vec<Segment<'_>> {
    let chars: Vec<(usize, char)> = sql.char_indices().collect();
    let mut segments = Vec::new();
    let mut mode = Mode::Code;
    let mut start = 0;
    let mut current: Option<(bool, Region)> = None;
    let mut i = 0;

    while i < chars.len() {
        let (index, c) = chars[i];
        let next = chars.get(i + 1).map(|&(_, n)| n);

        let (region, width) = match mode {
            Mode::Code => match (c, next) {
                ('\'', _) => {
                    mode = Mode::Literal;
                    (Region::Literal, 1)
                }
                ('-', Some('-')) => {
                    mode = Mode::LineComment;
                    (Region::Comment, 2)
                }
                ('/', Some('*')) => {
                    mode = Mode::BlockComment;
                    (Region::Comment, 2)
                }
                _ => (Region::Code, 1),
            },
            Mode::Literal => match (c, next) {
                ('\'', Some('\'')) => (Region::Literal, 2),
                ('\'', _) => {
                    mode = Mode::Code;
                    (Region::Literal, 1)
                }
                _ => (Region::Literal, 1),
            },
            Mode::LineComment => {
                if c == '\n' {
                    mode = Mode::Code;
                }
                (Region::Comment, 1)
            }
            Mode::BlockComment => {
                if c == '*' && next == Some('/') {
                    mode = Mode::Code;
                    (Region::Comment, 2)
                } else {
                    (Region::Comment, 1)
                }
            }
        };

        let key = (is_word_char(c), region);
        if let Some(previous) = current.filter(|&previous| previous != key) {
            segments.push(segment(&sql[start..index], previous));
            start = index;
        }
        current = Some(key);
        i += width;
    }

    if let Some(last) = current {
        segments.push(segment(&sql[start..], last));
    }
    segments
}

fn segment(text: &str, (is_word, region): (bool, Region)) -> Segment<'_> {
    Segment {
        text,
        is_word,
        in_string_literal: region == Region::Literal,
        in_comment: region == Region::Comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(sql: &str) -> Vec<&str> {
        split_preserving_string_literals(sql)
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_split_is_lossless() {
        let sql = "select a.b, 'x y' from t where c = :p";
        let joined: String = texts(sql).concat();
        assert_eq!(joined, sql);
    }

    #[test]
    fn test_split_on_word_boundaries() {
        assert_eq!(texts("a.b = :c"), vec!["a", ".", "b", " = :", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_preserving_string_literals("").is_empty());
    }

    #[test]
    fn test_string_literal_tracking() {
        let segments = split_preserving_string_literals("x = 'date' and date = 1");
        let date_segments: Vec<&Segment<'_>> =
            segments.iter().filter(|s| s.text == "date").collect();
        assert_eq!(date_segments.len(), 2);
        assert!(date_segments[0].in_string_literal);
        assert!(!date_segments[1].in_string_literal);
    }

    #[test]
    fn test_doubled_quote_stays_in_literal() {
        let segments = split_preserving_string_literals("'it''s size' size");
        let sizes: Vec<bool> = segments
            .iter()
            .filter(|s| s.text == "size")
            .map(|s| s.in_string_literal)
            .collect();
        assert_eq!(sizes, vec![true, false]);
    }

    #[test]
    fn test_quote_in_line_comment_is_ignored() {
        let segments = split_preserving_string_literals("select id -- don't\n, size from t");
        let comment: Vec<&str> = segments
            .iter()
            .filter(|s| s.in_comment)
            .map(|s| s.text)
            .collect();
        assert_eq!(comment.concat(), "-- don't\n");
        let size = segments.iter().find(|s| s.text == "size").expect("size segment");
        assert!(size.is_code_word());
    }

    #[test]
    fn test_block_comment() {
        let segments = split_preserving_string_literals("a /* it's date */ date");
        let dates: Vec<bool> = segments
            .iter()
            .filter(|s| s.text == "date")
            .map(Segment::is_code_word)
            .collect();
        assert_eq!(dates, vec![false, true]);
        let joined: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(joined, "a /* it's date */ date");
    }

    #[test]
    fn test_adjacent_literals() {
        let segments = split_preserving_string_literals("in ('a', 'b') or b");
        let flags: Vec<(&str, bool)> = segments
            .iter()
            .filter(|s| s.is_word)
            .map(|s| (s.text, s.in_string_literal))
            .collect();
        assert_eq!(
            flags,
            vec![("in", false), ("a", true), ("b", true), ("or", false), ("b", false)]
        );
    }
}
