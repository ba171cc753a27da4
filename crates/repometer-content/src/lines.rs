//! Line, comment and blank counting.
//!
//! A line is blank when it is empty after trimming. A non-blank line is a
//! comment when it starts with the language's line-comment marker, starts
//! with a block opener, or begins inside a block opened on an earlier line.
//! Blank lines are never comments, so `num_comments + num_blank <= loc`.
//!
//! Line boundaries are those of Python's `str.splitlines` after universal
//! newline decoding: `\n`, `\r\n`, a lone `\r`, and the form-feed,
//! vertical-tab, separator and Unicode line/paragraph separator characters.

use repometer_lang::CommentSyntax;
use repometer_types::LineStats;

#[derive(Debug, Clone, Copy)]
struct CommentRules {
    line: Option<&'static str>,
    block: Option<(&'static str, &'static str)>,
}

impl CommentRules {
    fn for_syntax(syntax: CommentSyntax) -> Self {
        match syntax {
            CommentSyntax::Hash => Self {
                line: Some("#"),
                block: None,
            },
            CommentSyntax::Percent => Self {
                line: Some("%"),
                block: None,
            },
            CommentSyntax::CStyle => Self {
                line: Some("//"),
                block: Some(("/*", "*/")),
            },
            CommentSyntax::Markup => Self {
                line: None,
                block: Some(("<!--", "-->")),
            },
            CommentSyntax::None => Self {
                line: None,
                block: None,
            },
        }
    }

    fn is_comment(&self, trimmed: &str, in_block: bool) -> bool {
        in_block
            || self.line.is_some_and(|p| trimmed.starts_with(p))
            || self.block.is_some_and(|(open, _)| trimmed.starts_with(open))
    }

    /// Block state after scanning `line`, given the state it started in.
    fn scan(&self, line: &str, mut in_block: bool) -> bool {
        let Some((open, close)) = self.block else {
            return false;
        };
        let mut rest = line;
        loop {
            if in_block {
                match rest.find(close) {
                    Some(pos) => {
                        in_block = false;
                        rest = &rest[pos + close.len()..];
                    }
                    None => return true,
                }
            } else {
                let Some(pos) = rest.find(open) else {
                    return false;
                };
                // `// ... /*` does not open a block
                if let Some(marker) = self.line
                    && rest[..pos].contains(marker)
                {
                    return false;
                }
                in_block = true;
                rest = &rest[pos + open.len()..];
            }
        }
    }
}

/// Characters that end a line. `\r\n` is one boundary.
pub const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Iterator returned by [`split_lines`].
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let Some(pos) = self.rest.find(LINE_BREAKS) else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..pos];
        let tail = &self.rest[pos..];
        let width = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        self.rest = &tail[width..];
        Some(line)
    }
}

/// Split `text` into lines. A trailing boundary does not start a new line.
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: text }
}

/// Count lines, comment lines and blank lines of `text`.
pub fn line_stats(text: &str, syntax: CommentSyntax) -> LineStats {
    let rules = CommentRules::for_syntax(syntax);
    let mut stats = LineStats::default();
    let mut in_block = false;

    for line in split_lines(text) {
        stats.loc += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            stats.num_blank += 1;
            continue;
        }
        if rules.is_comment(trimmed, in_block) {
            stats.num_comments += 1;
        }
        in_block = rules.scan(trimmed, in_block);
    }

    stats
}
