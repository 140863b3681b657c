//! Escaping for double-quoted scalars.

use crate::chars::is_printable;
use std::fmt::Write;

/// Two-character escape for characters YAML names explicitly.
const fn escape_sequence(c: char) -> Option<&'static str> {
    Some(match c {
        '\0' => "\\0",
        '\u{07}' => "\\a",
        '\u{08}' => "\\b",
        '\t' => "\\t",
        '\n' => "\\n",
        '\u{0B}' => "\\v",
        '\u{0C}' => "\\f",
        '\r' => "\\r",
        '\u{1B}' => "\\e",
        '"' => "\\\"",
        '\\' => "\\\\",
        '\u{85}' => "\\N",
        '\u{A0}' => "\\_",
        '\u{2028}' => "\\L",
        '\u{2029}' => "\\P",
        _ => return None,
    })
}

/// Writes `\xHH`, `\uHHHH` or `\UHHHHHHHH`, whichever is the narrowest fit.
fn push_hex(out: &mut String, c: char) {
    let code = c as u32;
    // Writing into a String cannot fail.
    let _ = if code <= 0xFF {
        write!(out, "\\x{:02X}", code)
    } else if code <= 0xFFFF {
        write!(out, "\\u{:04X}", code)
    } else {
        write!(out, "\\U{:08X}", code)
    };
}

/// Escapes `s` for use between double quotes.
///
/// `str` holds Unicode scalar values, so a character outside the BMP is a
/// single `char` here and is never split into surrogate halves.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::escape::escape;
///
/// assert_eq!(escape("tab\there"), "tab\\there");
/// assert_eq!(escape("\u{1}"), "\\x01");
/// assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
/// ```
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if let Some(seq) = escape_sequence(c) {
            out.push_str(seq);
        } else if is_printable(c) {
            out.push(c);
        } else {
            push_hex(&mut out, c);
        }
    }
    out
}
