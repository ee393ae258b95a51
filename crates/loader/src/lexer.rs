//! Line splitter for IR text.

/// One non-blank source line, split into whitespace-separated words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceLine<'a> {
    /// 1-based raw line number. Blank lines still count.
    pub number: usize,
    /// The line as written, without its terminator.
    pub text: &'a str,
    pub words: Vec<&'a str>,
}

impl SourceLine<'_> {
    /// The line text with surrounding whitespace removed, for diagnostics.
    pub fn trimmed(&self) -> String {
        self.text.trim().to_string()
    }
}

/// Iterate over the non-blank lines of `text`.
///
/// Both `\n` and `\r\n` terminators are accepted.
pub(crate) fn source_lines(text: &str) -> impl Iterator<Item = SourceLine<'_>> {
    text.lines().enumerate().filter_map(|(idx, line)| {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            None
        } else {
            Some(SourceLine {
                number: idx + 1,
                text: line,
                words,
            })
        }
    })
}
