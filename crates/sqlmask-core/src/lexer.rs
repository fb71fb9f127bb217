//! Word-run scanning shared by every stage that looks at identifiers
//!
//! A word run is a maximal run of alphanumeric characters plus `_`, `#` and
//! `$`. Token boundaries are word-run boundaries, so `USER` never matches
//! inside `USER_ID` or `TB_USER`.

/// Characters that extend a word run.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '#' | '$')
}

/// True when `word` has the identifier shape `[A-Za-z][A-Za-z0-9_#$]*`.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '#' | '$'))
        }
        _ => false,
    }
}

/// A word run located in its source text by byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRun<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

impl WordRun<'_> {
    pub fn is_identifier(&self) -> bool {
        is_identifier(self.text)
    }
}

/// Iterator over the word runs of a text, left to right.
pub struct WordRuns<'a> {
    text: &'a str,
    pos: usize,
}

pub fn word_runs(text: &str) -> WordRuns<'_> {
    WordRuns { text, pos: 0 }
}

impl<'a> Iterator for WordRuns<'a> {
    type Item = WordRun<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let (offset, _) = rest.char_indices().find(|&(_, c)| is_word_char(c))?;
        let start = self.pos + offset;
        let len = self.text[start..]
            .find(|c: char| !is_word_char(c))
            .unwrap_or(self.text.len() - start);
        let end = start + len;
        self.pos = end;

        Some(WordRun {
            start,
            end,
            text: &self.text[start..end],
        })
    }
}

/// Rewrite every identifier run for which `lookup` yields a replacement.
///
/// Runs that are not identifiers, and identifiers without a replacement, are
/// copied through unchanged. Replacements are never rescanned.
pub fn replace_identifiers<'m, F>(text: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<&'m str>,
{
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;

    for run in word_runs(text) {
        if !run.is_identifier() {
            continue;
        }
        if let Some(replacement) = lookup(run.text) {
            out.push_str(&text[copied..run.start]);
            out.push_str(replacement);
            copied = run.end;
        }
    }

    out.push_str(&text[copied..]);
    out
}
