//! Kernel source minification
//!
//! Removes comments and insignificant whitespace from OpenCL C source without
//! changing the token sequence the kernel compiler sees:
//!
//! - Line splices (backslash-newline) are joined first, as the preprocessor does
//! - Comments count as whitespace and never match inside literals
//! - Whitespace between tokens disappears unless the neighbours would fuse
//! - Preprocessor directives keep their own line and their inner spacing
//!
//! `minify` is idempotent.

pub mod lexer;

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use lexer::{Lexer, Token};

/// Punctuator pairs that form a different token or a comment when adjacent
const FUSING_PAIRS: &[&str] = &[
    "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "==", "!=", "<=", ">=", "&&", "||",
    "<<", ">>", "->", "##", "//", "/*", "*/", "::", "<:", ":>", "<%", "%>", "%:",
];

/// Minify kernel source text
pub fn minify(text: &str) -> String {
    let text = join_spliced_lines(text);
    let mut out = Output::with_capacity(text.len());

    for token in Lexer::new(&text) {
        match token {
            Token::Whitespace | Token::Comment => out.pending_space = true,
            Token::Newline => out.end_line(),
            Token::Literal(span) | Token::Code(span) => out.push(span),
        }
    }

    out.buf
}

/// A backslash ending a line, with any trailing blanks
#[allow(clippy::expect_used)]
static LINE_SPLICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[ \t]*\r?\n").expect("line splice pattern is valid"));

/// Remove every line splice, including ones that joining itself exposes
fn join_spliced_lines(text: &str) -> Cow<'_, str> {
    let mut joined = LINE_SPLICE.replace_all(text, "");
    while LINE_SPLICE.is_match(&joined) {
        let next = LINE_SPLICE.replace_all(&joined, "").into_owned();
        joined = Cow::Owned(next);
    }
    joined
}

/// Characters that continue identifiers, numbers and literals
fn is_word(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '"' | '\'') || !c.is_ascii()
}

/// Whether `prev` followed directly by `next` would lex differently
fn needs_space(prev: char, next: char) -> bool {
    if is_word(prev) && is_word(next) {
        return true;
    }

    let mut pair = [0u8; 8];
    let len = prev.encode_utf8(&mut pair).len();
    let len = len + next.encode_utf8(&mut pair[len..]).len();
    std::str::from_utf8(&pair[..len]).is_ok_and(|pair| FUSING_PAIRS.contains(&pair))
}

/// Minified text under construction
struct Output {
    buf: String,
    /// Whitespace or a comment was seen since the last emitted span
    pending_space: bool,
    /// Only whitespace and comments so far on the current logical line
    at_line_start: bool,
    /// Inside a preprocessor directive line
    in_directive: bool,
    /// The directive's `#` was just emitted on its own
    after_hash: bool,
    /// A directive ended; the next span goes on a new line
    pending_newline: bool,
}

impl Output {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            pending_space: false,
            at_line_start: true,
            in_directive: false,
            after_hash: false,
            pending_newline: false,
        }
    }

    fn end_line(&mut self) {
        if self.in_directive {
            self.in_directive = false;
            self.pending_newline = true;
        }
        self.pending_space = true;
        self.at_line_start = true;
    }

    fn push(&mut self, span: &str) {
        let starts_directive = self.at_line_start && span.starts_with('#');

        if starts_directive && !self.buf.is_empty() && !self.buf.ends_with('\n') {
            self.pending_newline = true;
        }

        if self.pending_newline {
            if !self.buf.is_empty() {
                self.buf.push('\n');
            }
            self.pending_newline = false;
        } else if self.pending_space && self.separate_from(span) {
            self.buf.push(' ');
        }

        self.buf.push_str(span);

        self.after_hash = starts_directive && span == "#";
        if starts_directive {
            self.in_directive = true;
        }
        self.pending_space = false;
        self.at_line_start = false;
    }

    fn separate_from(&self, span: &str) -> bool {
        let (Some(prev), Some(next)) = (self.buf.chars().next_back(), span.chars().next()) else {
            return false;
        };
        if prev == '\n' {
            return false;
        }
        if self.in_directive {
            return !self.after_hash || needs_space(prev, next);
        }
        needs_space(prev, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Concatenated code and literal spans, i.e. the text with all whitespace
    /// and comments removed
    fn significant(text: &str) -> String {
        Lexer::new(text)
            .filter_map(|token| match token {
                Token::Code(span) | Token::Literal(span) => Some(span),
                _ => None,
            })
            .collect()
    }

    const KERNEL: &str = r#"/*
 * Copyright notice
 */
#ifndef WOLF_AES_CL
#define WOLF_AES_CL

#define R(x)   (x)
#define F (a) - 1
#define JOIN(a, b)   a ## b
#define LONG_MACRO(x) \
    do { x++;       \
    } while (0)

// Round constants
__constant static const uint AES0_C[256] = { 0xA56363C6U, 0x847C7CF8U };

inline uint getIdx()
{
    return get_global_id(0) - get_global_offset(0);   // offset
}

__kernel void cn0(__global ulong *input, __global uint *Scratchpad, uint Threads)
{
    const char *s = "a /* not a comment */ b // nor this";
    char c = '/';
    int x = a - -b + +c;
    int y = *input / *Scratchpad;
    x ++ ;
    #pragma unroll 8
    for (int i = 0; i < 8; ++i) {
        y <<= 1; y = y >> 1;
    }
}

#endif
"#;

    #[test]
    fn test_minify_kernel_with_include_text() {
        let resolved = "__kernel void k(){ /* c */ \n  int x=1;  }\nint helper(){return 2;}\n";
        assert_eq!(
            minify(resolved),
            "__kernel void k(){int x=1;}int helper(){return 2;}"
        );
    }

    #[test]
    fn test_minify_removes_comments() {
        assert_eq!(minify("a = b; // trailing\n/* block */ c = d;"), "a=b;c=d;");
    }

    #[test]
    fn test_minify_comment_separates_tokens() {
        assert_eq!(minify("int/**/x;"), "int x;");
    }

    #[test]
    fn test_minify_keeps_literals_intact() {
        let src = r#"p("a  /* x */  b // y", '"', "\"//\"");"#;
        assert_eq!(minify(src), r#"p("a  /* x */  b // y",'"',"\"//\"");"#);
    }

    #[test]
    fn test_minify_keeps_fusing_operators_apart() {
        assert_eq!(minify("x = a - -b + +c;"), "x=a- -b+ +c;");
        assert_eq!(minify("y = a / *p;"), "y=a/ *p;");
        assert_eq!(minify("z = a & &b;"), "z=a& &b;");
        assert_eq!(minify("p - > q"), "p- >q");
    }

    #[test]
    fn test_minify_keeps_word_separation() {
        assert_eq!(minify("unsigned   int  x = 1 ;"), "unsigned int x=1;");
        assert_eq!(minify("return \"x\";"), "return \"x\";");
    }

    #[test]
    fn test_minify_directives_stay_on_their_own_lines() {
        let src = "int a;\n#define X 1\nint b;\n  #  include \"y.h\"\nint c;\n";
        assert_eq!(minify(src), "int a;\n#define X 1\nint b;\n#include \"y.h\"\nint c;");
    }

    #[test]
    fn test_minify_directive_keeps_function_like_distinction() {
        assert_eq!(minify("#define F(x)   (x)\n"), "#define F(x) (x)");
        assert_eq!(minify("#define G (x)\n"), "#define G (x)");
        assert_eq!(minify("#define B -1\n"), "#define B -1");
    }

    #[test]
    fn test_minify_joins_line_splices() {
        let src = "#define M(x) \\\n  do { x++; \\\n  } while (0)\nint a;";
        assert_eq!(minify(src), "#define M(x) do { x++; } while (0)\nint a;");
    }

    #[test]
    fn test_minify_joins_line_splices_with_trailing_blanks() {
        assert_eq!(minify("#define X a \\ \nint b;\n"), "#define X a int b;");
        assert_eq!(minify("#define Y 1 \\\t\r\n+ 2\ny;"), "#define Y 1 + 2\ny;");
    }

    #[test]
    fn test_minify_spliced_line_comment_swallows_next_line() {
        assert_eq!(minify("a; // c \\\nb;\nc;"), "a;c;");
    }

    #[test]
    fn test_minify_multiline_comment_inside_directive() {
        assert_eq!(minify("#define A 1 /* x\n y */ 2\nz"), "#define A 1 2\nz");
    }

    #[test]
    fn test_minify_comment_before_directive() {
        assert_eq!(minify("a;\n/* note */ #define X\nb;"), "a;\n#define X\nb;");
    }

    #[test]
    fn test_minify_removes_blank_lines_and_trailing_space() {
        assert_eq!(minify("\n\n  a;   \n\n\t\n  b;  \n\n"), "a;b;");
    }

    #[test]
    fn test_minify_crlf_input() {
        assert_eq!(minify("#define X 1\r\nint a;\r\n"), "#define X 1\nint a;");
    }

    #[test]
    fn test_minify_empty_and_comment_only() {
        assert_eq!(minify(""), "");
        assert_eq!(minify("// nothing\n/* here */\n"), "");
    }

    #[test]
    fn test_minify_unterminated_comment_only_affects_its_region() {
        assert_eq!(minify("int a;  int b; /* open"), "int a;int b;");
    }

    #[test]
    fn test_minify_unterminated_literal_stops_at_line_end() {
        assert_eq!(minify("#error don't\nint  a;"), "#error don't\nint a;");
    }

    #[test]
    fn test_minify_is_idempotent() {
        let once = minify(KERNEL);
        assert_eq!(minify(&once), once);

        for sample in [
            "",
            "a",
            "#define X\n#define Y\n",
            "x = a - -b;\n#if A\ny;\n#endif\n",
            "p(\"//\" '\\'' \"x y\");",
            "#define X a \\ \nint b;\n",
            "#define A \\\\\n\nb;\n",
            "x \\\t\n y;",
        ] {
            let once = minify(sample);
            assert_eq!(minify(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_minify_preserves_tokens() {
        let minified = minify(KERNEL);
        // KERNEL's only splices sit between whitespace, so joining them
        // does not change the significant characters.
        assert_eq!(significant(&minified), significant(&join_spliced_lines(KERNEL)));
    }

    #[test]
    fn test_minify_kernel_shape() {
        let minified = minify(KERNEL);

        assert!(!minified.contains("Copyright"));
        assert!(!minified.contains("Round constants"));
        assert!(minified.contains("\"a /* not a comment */ b // nor this\""));
        assert!(minified.contains("\n#pragma unroll 8\n"));
        assert!(minified.contains("#define R(x) (x)\n"));
        assert!(minified.contains("#define F (a) - 1\n"));
        assert!(minified.contains("#define JOIN(a, b) a ## b\n"));
        assert!(minified.contains("x++;"));
        assert!(minified.contains("a- -b+ +c"));
        assert!(minified.contains("*input/ *Scratchpad"));
        assert!(minified.starts_with("#ifndef WOLF_AES_CL\n"));
        assert!(minified.ends_with("\n#endif"));
        assert!(minified.len() < KERNEL.len());
    }
}
