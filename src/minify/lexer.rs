//! Span classification for kernel source
//!
//! The lexer only distinguishes what minification needs to know: whitespace,
//! newlines, comments, string/char literals, and everything else as runs of
//! code. It never fails; unterminated literals end at the end of their line
//! and an unterminated block comment runs to the end of the input.

/// One classified span of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Spaces, tabs, carriage returns, form feeds and vertical tabs
    Whitespace,
    /// A single `\n`
    Newline,
    /// `// ...` up to (not including) the newline, or `/* ... */`
    Comment,
    /// A string or character literal including its quotes
    Literal(&'a str),
    /// Any other run of characters
    Code(&'a str),
}

/// Iterator over the spans of a source text
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Byte length of the literal starting at the current position
    fn literal_len(&self, quote: char) -> usize {
        let rest = self.rest();
        let mut chars = rest.char_indices().skip(1);

        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    // An escaped newline cannot occur after splicing; stop there anyway.
                    if let Some((j, '\n')) = chars.next() {
                        return j;
                    }
                }
                '\n' => return i,
                c if c == quote => return i + c.len_utf8(),
                _ => {}
            }
        }
        rest.len()
    }

    fn block_comment_len(&self) -> usize {
        let rest = self.rest();
        rest[2..].find("*/").map_or(rest.len(), |end| end + 4)
    }

    fn code_len(&self) -> usize {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b' ' | b'\t' | b'\r' | b'\x0b' | b'\x0c' | b'\n' | b'"' | b'\'' => break,
                b'/' if matches!(bytes.get(i + 1), Some(b'/' | b'*')) => break,
                _ => i += 1,
            }
        }
        i
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\x0b' | '\x0c')
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest();
        let first = rest.chars().next()?;

        let (len, token) = if is_blank(first) {
            let len = rest.find(|c: char| !is_blank(c)).unwrap_or(rest.len());
            (len, Token::Whitespace)
        } else if first == '\n' {
            (1, Token::Newline)
        } else if rest.starts_with("//") {
            (rest.find('\n').unwrap_or(rest.len()), Token::Comment)
        } else if rest.starts_with("/*") {
            (self.block_comment_len(), Token::Comment)
        } else if first == '"' || first == '\'' {
            let len = self.literal_len(first);
            (len, Token::Literal(&rest[..len]))
        } else {
            let len = self.code_len();
            (len, Token::Code(&rest[..len]))
        };

        self.pos += len;
        Some(token)
    }
}
