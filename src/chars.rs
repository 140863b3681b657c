//! Character classes used when choosing how to write a scalar.

/// `s-white`: space or tab.
#[inline]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Returns `true` if the character can be written without escaping.
///
/// This is YAML's `nb-char` minus tab, NEL, NBSP and the Unicode line and
/// paragraph separators. Line feed is not printable either; block styles
/// handle it separately.
#[inline]
pub const fn is_printable(c: char) -> bool {
    let c = c as u32;
    (0x20 <= c && c <= 0x7E)
        || (0xA1 <= c && c <= 0xD7FF && c != 0x2028 && c != 0x2029)
        || (0xE000 <= c && c <= 0xFFFD && c != 0xFEFF)
        || (0x1_0000 <= c && c <= 0x10_FFFF)
}

/// Characters allowed after the first one in a plain scalar.
#[inline]
pub const fn is_plain_safe(c: char) -> bool {
    is_printable(c) && c != '\u{FEFF}' && !matches!(c, ',' | '[' | ']' | '{' | '}' | ':' | '#')
}

/// Characters allowed to start a plain scalar.
#[inline]
pub const fn is_plain_safe_first(c: char) -> bool {
    is_plain_safe(c)
        && !is_whitespace(c)
        && !matches!(
            c,
            '-' | '?'
                | ':'
                | ','
                | '['
                | ']'
                | '{'
                | '}'
                | '#'
                | '&'
                | '*'
                | '!'
                | '|'
                | '>'
                | '\''
                | '"'
                | '%'
                | '@'
                | '`'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_ranges() {
        assert!(is_printable(' '));
        assert!(is_printable('~'));
        assert!(!is_printable('\t'));
        assert!(!is_printable('\n'));
        assert!(!is_printable('\u{7F}'));
        assert!(!is_printable('\u{85}'));
        assert!(!is_printable('\u{A0}'));
        assert!(is_printable('\u{A1}'));
        assert!(is_printable('é'));
        assert!(!is_printable('\u{2028}'));
        assert!(!is_printable('\u{2029}'));
        assert!(!is_printable('\u{FEFF}'));
        assert!(!is_printable('\u{FFFE}'));
        assert!(is_printable('\u{1F600}'));
    }

    #[test]
    fn test_plain_safe() {
        assert!(is_plain_safe('a'));
        assert!(is_plain_safe('-'));
        assert!(is_plain_safe(' '));
        for c in [',', '[', ']', '{', '}', ':', '#'] {
            assert!(!is_plain_safe(c), "{:?}", c);
        }
    }

    #[test]
    fn test_plain_safe_first() {
        assert!(is_plain_safe_first('a'));
        assert!(is_plain_safe_first('.'));
        for c in "-?:,[]{}#&*!|>'\"%@` \t".chars() {
            assert!(!is_plain_safe_first(c), "{:?}", c);
        }
    }
}
