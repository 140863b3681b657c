//! Choosing and writing scalar styles.
//!
//! Every string has at least one valid representation (double-quoted), so
//! nothing in this module can fail. The classifier picks the least noisy
//! style that still reads back as the same string.

use crate::chars::{is_plain_safe, is_plain_safe_first, is_printable, is_whitespace};
use crate::escape::escape;
use crate::fold::fold_string;

/// The five ways a string can be written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    Literal,
    Folded,
    DoubleQuoted,
}

/// Picks the style for `s`.
///
/// `single_line_only` rules out block styles (keys, flow collections).
/// `line_width` of `None` disables width tracking, so folded style is never
/// chosen. `is_ambiguous` reports whether `s` would read back as some other
/// implicit type such as a bool or a number.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::scalar::{choose_style, ScalarStyle};
///
/// let never = |_: &str| false;
/// assert_eq!(choose_style("hello", false, 2, Some(80), never), ScalarStyle::Plain);
/// assert_eq!(choose_style("a: b", false, 2, Some(80), never), ScalarStyle::SingleQuoted);
/// assert_eq!(choose_style("a\nb", false, 2, Some(80), never), ScalarStyle::Literal);
/// assert_eq!(choose_style("a\nb", true, 2, Some(80), never), ScalarStyle::DoubleQuoted);
/// ```
pub fn choose_style<F>(
    s: &str,
    single_line_only: bool,
    indent_per_level: usize,
    line_width: Option<usize>,
    is_ambiguous: F,
) -> ScalarStyle
where
    F: Fn(&str) -> bool,
{
    let chars: Vec<char> = s.chars().collect();
    let mut has_line_break = false;
    let mut has_foldable_line = false;
    let mut plain = chars.first().map_or(false, |&c| is_plain_safe_first(c))
        && chars.last().map_or(false, |&c| !is_whitespace(c));

    // An overlong line is foldable unless it is more-indented.
    let foldable = |line_start: usize, line_end: usize| match line_width {
        Some(width) => line_end - line_start > width && chars.get(line_start) != Some(&' '),
        None => false,
    };

    if single_line_only {
        for &c in &chars {
            if !is_printable(c) {
                return ScalarStyle::DoubleQuoted;
            }
            plain = plain && is_plain_safe(c);
        }
    } else {
        let mut line_start = 0;
        for (i, &c) in chars.iter().enumerate() {
            if c == '\n' {
                has_line_break = true;
                has_foldable_line = has_foldable_line || foldable(line_start, i);
                line_start = i + 1;
            } else if !is_printable(c) {
                return ScalarStyle::DoubleQuoted;
            }
            plain = plain && is_plain_safe(c);
        }
        has_foldable_line = has_foldable_line || foldable(line_start, chars.len());
    }

    if !has_line_break && !has_foldable_line {
        return if plain && !is_ambiguous(s) {
            ScalarStyle::Plain
        } else {
            ScalarStyle::SingleQuoted
        };
    }
    // The indentation indicator is a single digit.
    if indent_per_level > 9 && needs_indent_indicator(s) {
        return ScalarStyle::DoubleQuoted;
    }
    if has_foldable_line {
        ScalarStyle::Folded
    } else {
        ScalarStyle::Literal
    }
}

/// A body starting with spaces (possibly after blank lines) needs an explicit
/// indentation indicator.
fn needs_indent_indicator(s: &str) -> bool {
    s.trim_start_matches('\n').starts_with(' ')
}

/// Block scalar header: optional indentation digit, chomping indicator, newline.
pub(crate) fn block_header(s: &str, indent_per_level: usize) -> String {
    let mut header = String::with_capacity(3);
    if needs_indent_indicator(s) {
        header.push_str(&indent_per_level.to_string());
    }
    let clip = s.ends_with('\n');
    let keep = clip && (s.ends_with("\n\n") || s == "\n");
    if keep {
        header.push('+');
    } else if !clip {
        header.push('-');
    }
    header.push('\n');
    header
}

/// Indents every non-empty line by `spaces`.
pub(crate) fn indent_string(s: &str, spaces: usize) -> String {
    let indent = " ".repeat(spaces);
    let mut out = String::with_capacity(s.len() + spaces * 4);
    for line in s.split_inclusive('\n') {
        if line != "\n" {
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

/// The document writer terminates the last line itself.
fn drop_ending_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
    }
    s
}

/// Writes `s` in `style`. Block bodies are indented by `indent` spaces;
/// `indent_per_level` is only used for the header's indentation digit.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::scalar::{render, ScalarStyle};
///
/// assert_eq!(render("it's", ScalarStyle::SingleQuoted, 2, 2, None), "'it''s'");
/// assert_eq!(render("a\nb\n", ScalarStyle::Literal, 2, 2, None), "|\n  a\n  b");
/// ```
#[must_use]
pub fn render(
    s: &str,
    style: ScalarStyle,
    indent_per_level: usize,
    indent: usize,
    line_width: Option<usize>,
) -> String {
    match style {
        ScalarStyle::Plain => s.to_string(),
        ScalarStyle::SingleQuoted => format!("'{}'", s.replace('\'', "''")),
        ScalarStyle::Literal => format!(
            "|{}{}",
            block_header(s, indent_per_level),
            drop_ending_newline(indent_string(s, indent))
        ),
        ScalarStyle::Folded => {
            let folded = match line_width {
                Some(width) => fold_string(s, width),
                None => s.to_string(),
            };
            format!(
                ">{}{}",
                block_header(s, indent_per_level),
                drop_ending_newline(indent_string(&folded, indent))
            )
        }
        ScalarStyle::DoubleQuoted => format!("\"{}\"", escape(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &str) -> bool {
        false
    }

    fn style(s: &str) -> ScalarStyle {
        choose_style(s, false, 2, Some(80), never)
    }

    #[test]
    fn test_plain_and_quoted() {
        assert_eq!(style("hello world"), ScalarStyle::Plain);
        assert_eq!(style(" leading"), ScalarStyle::SingleQuoted);
        assert_eq!(style("trailing "), ScalarStyle::SingleQuoted);
        assert_eq!(style("- item"), ScalarStyle::SingleQuoted);
        assert_eq!(style("a # b"), ScalarStyle::SingleQuoted);
        assert_eq!(style("[x]"), ScalarStyle::SingleQuoted);
        assert_eq!(style("a-b"), ScalarStyle::Plain);
    }

    #[test]
    fn test_ambiguous_is_single_quoted() {
        let ambiguous = |s: &str| s == "true";
        assert_eq!(
            choose_style("true", false, 2, Some(80), ambiguous),
            ScalarStyle::SingleQuoted
        );
    }

    #[test]
    fn test_non_printable_forces_double() {
        assert_eq!(style("bell\u{7}"), ScalarStyle::DoubleQuoted);
        assert_eq!(style("tab\there"), ScalarStyle::DoubleQuoted);
        assert_eq!(
            choose_style("x\u{7}", true, 2, None, never),
            ScalarStyle::DoubleQuoted
        );
    }

    #[test]
    fn test_block_styles() {
        assert_eq!(style("one\ntwo"), ScalarStyle::Literal);
        let long = format!("{} end", "word ".repeat(30));
        assert_eq!(style(&long), ScalarStyle::Folded);
        assert_eq!(
            choose_style(&long, false, 2, None, never),
            ScalarStyle::Plain
        );
        // more-indented long lines cannot be folded
        let indented = format!("a\n {}", "word ".repeat(30));
        assert_eq!(style(&indented), ScalarStyle::Literal);
    }

    #[test]
    fn test_wide_indent_with_leading_space() {
        assert_eq!(
            choose_style("  a\nb", false, 10, Some(80), never),
            ScalarStyle::DoubleQuoted
        );
        assert_eq!(
            choose_style("a\nb", false, 10, Some(80), never),
            ScalarStyle::Literal
        );
    }

    #[test]
    fn test_block_header() {
        assert_eq!(block_header("a", 2), "-\n");
        assert_eq!(block_header("a\n", 2), "\n");
        assert_eq!(block_header("a\n\n", 2), "+\n");
        assert_eq!(block_header("\n", 2), "+\n");
        assert_eq!(block_header("  a\n", 4), "4\n");
        assert_eq!(block_header("\n  a", 3), "3-\n");
    }

    #[test]
    fn test_indent_string_skips_empty_lines() {
        assert_eq!(indent_string("a\n\nb", 2), "  a\n\n  b");
    }

    #[test]
    fn test_render_block_styles() {
        assert_eq!(
            render("a\nb", ScalarStyle::Literal, 2, 4, None),
            "|-\n    a\n    b"
        );
        assert_eq!(
            render("a\n\n", ScalarStyle::Literal, 2, 2, None),
            "|+\n  a\n"
        );
        assert_eq!(
            render("aa bb cc", ScalarStyle::Folded, 2, 2, Some(5)),
            ">-\n  aa bb\n  cc"
        );
        assert_eq!(render("x\"y", ScalarStyle::DoubleQuoted, 2, 2, None), "\"x\\\"y\"");
    }
}
