//! Song text tokenizer
//!
//! Tokens are separated by whitespace and commas. A `#` starts a comment that
//! runs to the end of the line. Oversized tokens are truncated to the caller's
//! limit; the remaining characters are still consumed.

use super::literal::parse_int;

/// Field separator
pub const SEPARATOR: char = ',';

/// Comment start
pub const COMMENT: char = '#';

/// Characters kept from a directive or mnemonic token
pub const DIRECTIVE_TOKEN_MAX: usize = 63;

/// Characters kept from an argument token
pub const ARG_TOKEN_MAX: usize = 31;

/// Whitespace as understood by the song format (space, tab, LF, CR, VT, FF)
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn is_delimiter(c: char) -> bool {
    is_space(c) || c == SEPARATOR || c == COMMENT
}

/// Case-insensitive exact keyword match
pub fn token_equals(token: &str, keyword: &str) -> bool {
    token.eq_ignore_ascii_case(keyword)
}

/// Cursor over song text
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Skip whitespace, separators and comments
    fn skip_blank(&mut self) {
        let mut in_comment = false;
        let start = self.pos;

        for (i, c) in self.rest().char_indices() {
            if in_comment {
                if c == '\n' {
                    in_comment = false;
                }
                continue;
            }
            if c == COMMENT {
                in_comment = true;
            } else if !(is_space(c) || c == SEPARATOR) {
                self.pos = start + i;
                return;
            }
        }
        self.pos = self.src.len();
    }

    /// Read the next token, keeping at most `max_len` characters of it
    pub fn next_token(&mut self, max_len: usize) -> Option<String> {
        self.skip_blank();

        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }

        let end = rest.find(is_delimiter).unwrap_or(rest.len());
        let raw = &rest[..end];
        self.pos += end;

        let token: String = raw.chars().take(max_len).collect();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    /// Read a directive or mnemonic token
    pub fn next_directive(&mut self) -> Option<String> {
        self.next_token(DIRECTIVE_TOKEN_MAX)
    }

    /// Read an argument token
    pub fn next_arg(&mut self) -> Option<String> {
        self.next_token(ARG_TOKEN_MAX)
    }

    /// Take the remainder of the current line, stopping before a newline or
    /// a comment, with surrounding whitespace and separators trimmed.
    ///
    /// A standalone `stop` keyword also ends the line, but only when it is
    /// followed on the same line by `arg_count` integer literals. The cursor is
    /// left on the terminator.
    pub fn take_line_until(&mut self, stop: &str, arg_count: usize) -> &'a str {
        let rest = self.rest();
        let mut end = rest.find(['\n', COMMENT]).unwrap_or(rest.len());
        let line = &rest[..end];

        let mut words = Vec::new();
        let mut offset = 0;
        for word in line.split(|c: char| is_space(c) || c == SEPARATOR) {
            if !word.is_empty() {
                words.push((offset, word));
            }
            offset += word.len() + 1;
        }

        let is_arg = |word: &str| {
            let arg: String = word.chars().take(ARG_TOKEN_MAX).collect();
            parse_int(&arg).is_some()
        };
        for (i, &(start, word)) in words.iter().enumerate() {
            let args = &words[i + 1..];
            if token_equals(word, stop)
                && args.len() >= arg_count
                && args[..arg_count].iter().all(|&(_, w)| is_arg(w))
            {
                end = start;
                break;
            }
        }

        self.pos += end;
        rest[..end].trim_matches(|c: char| is_space(c) || c == SEPARATOR)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_directive()
    }
}
