//! `#include "..."` directive matching

use std::ops::Range;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// A directive line: optional indentation, `#include`, then a quoted path
#[allow(clippy::expect_used)]
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*#include "([^"\r\n]*)""#).expect("directive pattern is valid")
});

/// Final component of a `/` or `\` separated path
fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Whether a directive naming `written` refers to the declared include `name`
pub fn refers_to(written: &str, name: &str) -> bool {
    written == name || file_name(written) == file_name(name)
}

/// First directive line whose written path satisfies `matches`
fn find_directive(text: &str, matches: impl Fn(&str) -> bool) -> Option<Range<usize>> {
    DIRECTIVE
        .captures_iter(text)
        .find(|caps| caps.get(1).is_some_and(|written| matches(written.as_str())))
        .and_then(|caps| caps.get(0))
        .map(|m| m.range())
}

/// Replace the first directive line referring to `name` with `content`.
///
/// A directive spelling `name` exactly wins over an earlier one that only
/// shares its file name. The replaced span runs from the start of the line
/// through the closing quote, so indentation goes with the directive and
/// anything after it on the line (including the newline) stays. Returns `None`
/// when no directive refers to `name`.
pub fn substitute_first(text: &str, name: &str, content: &str) -> Option<String> {
    let span = find_directive(text, |written| written == name)
        .or_else(|| find_directive(text, |written| refers_to(written, name)))?;

    let mut out = String::with_capacity(text.len() - span.len() + content.len());
    out.push_str(&text[..span.start]);
    out.push_str(content);
    out.push_str(&text[span.end..]);
    Some(out)
}

/// Replace every `#include "<name>"` occurrence, with any spaces or tabs in
/// front of it, by `content`. Occurrences need not start a line.
pub fn substitute_all(text: &str, name: &str, content: &str) -> (String, usize) {
    let pattern = format!(r#"[ \t]*#include "{}""#, regex::escape(name));
    // An escaped literal always compiles.
    let Ok(re) = Regex::new(&pattern) else {
        return (text.to_string(), 0);
    };

    let count = re.find_iter(text).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (re.replace_all(text, NoExpand(content)).into_owned(), count)
}
