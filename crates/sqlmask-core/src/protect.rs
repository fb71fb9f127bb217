//! Literal and comment protection
//!
//! String literals and comments are lifted out of the statement before any
//! identifier work happens and put back byte-for-byte at the end.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Placeholders are `<opener><n><CLOSE>` built from private-use characters.
/// None of them is a word character, so a placeholder always ends a word
/// run: `a/*c*/b` still scans as `a` and `b`.
const LITERAL_OPEN: char = '\u{E000}';
const COMMENT_OPEN: char = '\u{E001}';
const RESERVED_OPEN: char = '\u{E002}';
const CLOSE: char = '\u{E003}';

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"([\x{E000}-\x{E002}])([0-9]+)\x{E003}").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Literal,
    Comment,
    /// A character of the placeholder alphabet found in live text.
    Reserved,
}

impl SpanKind {
    const ALL: [SpanKind; 3] = [SpanKind::Literal, SpanKind::Comment, SpanKind::Reserved];

    fn opener(self) -> char {
        match self {
            SpanKind::Literal => LITERAL_OPEN,
            SpanKind::Comment => COMMENT_OPEN,
            SpanKind::Reserved => RESERVED_OPEN,
        }
    }

    fn from_opener(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.opener() == c)
    }
}

fn is_reserved(c: char) -> bool {
    ('\u{E000}'..='\u{E003}').contains(&c)
}

/// Placeholder for the `n`-th span of `kind`.
pub fn placeholder(kind: SpanKind, n: usize) -> String {
    format!("{}{}{}", kind.opener(), n, CLOSE)
}

/// A lifted literal or comment, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub kind: SpanKind,
    pub text: String,
}

/// Statement text with every literal/comment replaced by a placeholder.
#[derive(Debug, Clone)]
pub struct ProtectedText {
    text: String,
    spans: Vec<ProtectedSpan>,
    /// Per kind, the index into `spans` of each numbered placeholder.
    numbered: [Vec<usize>; 3],
}

impl ProtectedText {
    /// The working text, safe to scan for identifiers.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Spans in discovery order.
    pub fn spans(&self) -> &[ProtectedSpan] {
        &self.spans
    }

    /// Put every span back into `text` verbatim.
    pub fn restore(&self, text: &str) -> String {
        self.restore_with(text, |span| Cow::Borrowed(span.text.as_str()))
    }

    /// Put every span back into `text`, passing each through `render` first.
    pub fn restore_with<'s, F>(&'s self, text: &str, mut render: F) -> String
    where
        F: FnMut(&'s ProtectedSpan) -> Cow<'s, str>,
    {
        if self.spans.is_empty() {
            return text.to_string();
        }

        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                let span = caps[1]
                    .chars()
                    .next()
                    .and_then(SpanKind::from_opener)
                    .zip(caps[2].parse::<usize>().ok())
                    .and_then(|(kind, n)| self.numbered[kind as usize].get(n))
                    .map(|&index| &self.spans[index]);
                match span {
                    Some(span) => render(span).into_owned(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Lift quoted literals, `--` line comments and `/* */` block comments.
///
/// The scan is left to right and the earliest opener wins, so a quote inside
/// a comment never starts a literal. A literal or block comment without its
/// closer is left as live text. Placeholder characters already present in
/// live text are lifted too, so restoration never confuses them with spans.
pub fn protect(sql: &str) -> ProtectedText {
    let mut text = String::with_capacity(sql.len());
    let mut spans = Vec::new();
    let mut numbered: [Vec<usize>; 3] = Default::default();
    let mut copied = 0;
    let mut i = 0;

    while let Some(c) = sql[i..].chars().next() {
        let rest = &sql[i..];
        let found = match c {
            '\'' => rest[1..]
                .find('\'')
                .map(|close| (SpanKind::Literal, i + 1 + close + 1)),
            '-' if rest.starts_with("--") => {
                let end = rest.find('\n').map_or(sql.len(), |nl| i + nl);
                Some((SpanKind::Comment, end))
            }
            '/' if rest.starts_with("/*") => rest[2..]
                .find("*/")
                .map(|close| (SpanKind::Comment, i + 2 + close + 2)),
            c if is_reserved(c) => Some((SpanKind::Reserved, i + c.len_utf8())),
            _ => None,
        };

        let Some((kind, end)) = found else {
            i += c.len_utf8();
            continue;
        };

        let slot = &mut numbered[kind as usize];
        text.push_str(&sql[copied..i]);
        text.push_str(&placeholder(kind, slot.len()));
        slot.push(spans.len());
        spans.push(ProtectedSpan {
            kind,
            text: sql[i..end].to_string(),
        });
        copied = end;
        i = end;
    }

    text.push_str(&sql[copied..]);
    ProtectedText {
        text,
        spans,
        numbered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::word_runs;

    fn lit(n: usize) -> String {
        placeholder(SpanKind::Literal, n)
    }

    fn cmt(n: usize) -> String {
        placeholder(SpanKind::Comment, n)
    }

    #[test]
    fn test_literals_and_comments_are_lifted() {
        let sql = "SELECT a -- note\nFROM t /* multi\nline */ WHERE b = 'x y'";
        let protected = protect(sql);

        assert_eq!(
            protected.text(),
            format!("SELECT a {}\nFROM t {} WHERE b = {}", cmt(0), cmt(1), lit(0))
        );
        assert_eq!(protected.spans().len(), 3);
        assert_eq!(protected.spans()[0].text, "-- note");
        assert_eq!(protected.spans()[1].text, "/* multi\nline */");
        assert_eq!(protected.spans()[2].kind, SpanKind::Literal);
        assert_eq!(protected.restore(protected.text()), sql);
    }

    #[test]
    fn test_quote_inside_comment_does_not_open_literal() {
        let sql = "SELECT a -- don't\nFROM t WHERE c = 'v'";
        let protected = protect(sql);

        assert_eq!(protected.spans()[0].text, "-- don't");
        assert_eq!(protected.spans()[1].text, "'v'");
        assert_eq!(protected.restore(protected.text()), sql);
    }

    #[test]
    fn test_block_comment_is_non_greedy() {
        let protected = protect("/* a */ x /* b */");
        assert_eq!(protected.text(), format!("{} x {}", cmt(0), cmt(1)));
    }

    #[test]
    fn test_unterminated_spans_stay_live() {
        let sql = "SELECT 'open FROM t /* never closed";
        let protected = protect(sql);

        assert!(protected.spans().is_empty());
        assert_eq!(protected.text(), sql);
    }

    #[test]
    fn test_doubled_quote_becomes_adjacent_literals() {
        let sql = "WHERE n = 'O''Brien'";
        let protected = protect(sql);

        assert_eq!(protected.spans().len(), 2);
        assert_eq!(protected.text(), format!("WHERE n = {}{}", lit(0), lit(1)));
        assert_eq!(protected.restore(protected.text()), sql);
    }

    #[test]
    fn test_placeholder_ends_word_run() {
        let protected = protect("a/*c*/b = N'x'");
        let runs: Vec<_> = word_runs(protected.text()).map(|r| r.text).collect();

        assert_eq!(runs, vec!["a", "0", "b", "N", "0"]);
    }

    #[test]
    fn test_placeholder_characters_in_live_text_are_lifted() {
        let sql = format!("SELECT {}, 'x' FROM DUAL", lit(0));
        let protected = protect(&sql);

        // Opener and closer are lifted one by one; the digit between stays live
        assert_eq!(protected.spans().len(), 3);
        assert_eq!(protected.spans()[0].kind, SpanKind::Reserved);
        assert_eq!(protected.spans()[1].kind, SpanKind::Reserved);
        assert_eq!(protected.spans()[2].kind, SpanKind::Literal);
        assert_eq!(protected.restore(protected.text()), sql);
    }

    #[test]
    fn test_restore_leaves_unknown_placeholders() {
        let protected = protect("'a'");
        let text = format!("{} {} {}", lit(0), lit(9), cmt(0));

        assert_eq!(
            protected.restore(&text),
            format!("'a' {} {}", lit(9), cmt(0))
        );
    }
}
