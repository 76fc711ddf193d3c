//! C string-literal escaping
//!
//! Text is split into adjacent literal segments that the host compiler
//! concatenates. Every byte that could end the literal, start an escape, form a
//! trigraph, or depend on the source character set is escaped, so decoding the
//! segments yields exactly the input bytes.

/// Escaped bytes per segment before a new literal is started
pub const MAX_SEGMENT: usize = 2048;

/// Append the escaped form of `byte` to `out`
fn push_escaped(out: &mut String, byte: u8, prev: Option<u8>) {
    match byte {
        b'"' => out.push_str("\\\""),
        b'\\' => out.push_str("\\\\"),
        b'\n' => out.push_str("\\n"),
        b'\t' => out.push_str("\\t"),
        b'\r' => out.push_str("\\r"),
        b'?' if prev == Some(b'?') => out.push_str("\\?"),
        0x20..=0x7e => out.push(char::from(byte)),
        _ => out.push_str(&format!("\\{byte:03o}")),
    }
}

/// Split `text` into quoted literal segments.
///
/// A segment ends after every newline and once it holds [`MAX_SEGMENT`]
/// escaped bytes. Empty text yields a single `""`.
pub fn literal_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut prev = None;

    for &byte in text.as_bytes() {
        push_escaped(&mut current, byte, prev);
        prev = Some(byte);

        if byte == b'\n' || current.len() >= MAX_SEGMENT {
            segments.push(format!("\"{current}\""));
            current.clear();
        }
    }

    if !current.is_empty() || segments.is_empty() {
        segments.push(format!("\"{current}\""));
    }

    segments
}
