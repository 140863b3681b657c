//! Greedy line folding for folded block scalars.
//!
//! In folded style a single line break between two content lines reads back
//! as a space, so a long line can be broken at any space that is followed by
//! a non-space. Lines starting with a space ("more indented") are kept
//! verbatim, since folding them would change the value.

/// Folds a single line (no `\n` inside) to `width` characters where possible.
///
/// Picks the longest segment under the limit each time, otherwise settles for
/// the shortest one over it. A line without a usable break point is returned
/// unchanged, even if it is longer than `width`.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::fold::fold_line;
///
/// assert_eq!(fold_line("aaa bbb ccc", 7), "aaa bbb\nccc");
/// assert_eq!(fold_line("short", 80), "short");
/// ```
#[must_use]
pub fn fold_line(line: &str, width: usize) -> String {
    if line.is_empty() || line.starts_with(' ') {
        return line.to_string();
    }

    let chars: Vec<char> = line.chars().collect();
    let breaks = (0..chars.len().saturating_sub(1))
        .filter(|&i| chars[i] == ' ' && chars[i + 1] != ' ');

    // start is inclusive; curr marks the last break point seen.
    let mut start = 0;
    let mut curr = 0;
    let mut result = String::with_capacity(line.len() + 8);

    for next in breaks {
        if next - start > width {
            let end = if curr > start { curr } else { next };
            result.push('\n');
            result.extend(&chars[start..end]);
            // the break space itself becomes the newline
            start = end + 1;
        }
        curr = next;
    }

    result.push('\n');
    if chars.len() - start > width && curr > start {
        result.extend(&chars[start..curr]);
        result.push('\n');
        result.extend(&chars[curr + 1..]);
    } else {
        result.extend(&chars[start..]);
    }

    result.split_off(1)
}

/// Folds every content line of `text` and adds the extra line break folded
/// style needs between two adjacent non-more-indented lines.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::fold::fold_string;
///
/// assert_eq!(fold_string("a\nb", 80), "a\n\nb");
/// assert_eq!(fold_string("a\n  b", 80), "a\n  b");
/// ```
#[must_use]
pub fn fold_string(text: &str, width: usize) -> String {
    let first_break = text.find('\n').unwrap_or(text.len());
    let mut result = fold_line(&text[..first_break], width);
    // Until the first content line is reached no extra break is added.
    let mut prev_more_indented = text.starts_with('\n') || text.starts_with(' ');

    let mut rest = &text[first_break..];
    while !rest.is_empty() {
        let content = rest.trim_start_matches('\n');
        let breaks = &rest[..rest.len() - content.len()];
        let line_end = content.find('\n').unwrap_or(content.len());
        let line = &content[..line_end];
        let more_indented = line.starts_with(' ');

        result.push_str(breaks);
        if !prev_more_indented && !more_indented && !line.is_empty() {
            result.push('\n');
        }
        result.push_str(&fold_line(line, width));

        prev_more_indented = more_indented;
        rest = &content[line_end..];
    }

    result
}
