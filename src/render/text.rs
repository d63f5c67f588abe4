//! Text measurement in terminal columns.

use crate::layout::Size;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Intrinsic size of rendered text: widest line by number of lines.
///
/// Empty text still occupies one row so that labels keep their height.
pub fn measure_text(text: &str) -> Size {
    let mut width = 0usize;
    let mut rows = 0usize;
    for line in text.lines() {
        width = width.max(line_width(line));
        rows += 1;
    }
    Size::new(clamp(width), clamp(rows.max(1)))
}

/// Display width of a single line in columns.
pub fn line_width(line: &str) -> usize {
    line.graphemes(true).map(UnicodeWidthStr::width).sum()
}

/// Greedy word wrap to `max_width` columns, keeping explicit line breaks.
///
/// Words wider than the limit are kept whole on their own line.
pub fn wrap_text(text: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut current = 0usize;
        for word in line.split_whitespace() {
            let width = line_width(word);
            if current > 0 && current + 1 + width > max_width {
                out.push('\n');
                current = 0;
            } else if current > 0 {
                out.push(' ');
                current += 1;
            }
            out.push_str(word);
            current += width;
        }
    }
    out
}

fn clamp(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_multiline_and_wide() {
        assert_eq!(measure_text("Play\nSettings"), Size::new(8, 2));
        assert_eq!(measure_text("日本"), Size::new(4, 1));
        assert_eq!(measure_text(""), Size::new(0, 1));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("you were invited to the lobby", 10), "you were\ninvited to\nthe lobby");
        assert_eq!(wrap_text("a\nb c", 10), "a\nb c");
    }
}
