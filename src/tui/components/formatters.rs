// Text formatters
//
// Width-aware helpers shared by the result panel, dialogs and status bar.
// Widths are terminal cells (unicode-width), not bytes or chars.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Greedy word wrap into lines of at most `width` cells.
///
/// Words wider than a line are split mid-word. Blank input yields one empty
/// line so callers always have something to style.
///
/// # Examples
/// ```ignore
/// assert_eq!(wrap_text("Hemoglobin is low", 10), vec!["Hemoglobin", "is low"]);
/// ```
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!current.is_empty());

            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
            } else {
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if current_width + w > width && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += w;
                }
            }
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Cut to `width` cells, ending with '…' when something was dropped
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("Hemoglobin is slightly low today", 12),
            vec!["Hemoglobin", "is slightly", "low today"]
        );
    }

    #[test]
    fn splits_words_longer_than_a_line() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn keeps_explicit_line_breaks() {
        assert_eq!(wrap_text("one\n\ntwo", 20), vec!["one", "", "two"]);
        assert_eq!(wrap_text("", 20), vec![""]);
    }

    #[test]
    fn wide_chars_count_as_two_cells() {
        assert_eq!(wrap_text("血液 検査", 4), vec!["血液", "検査"]);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("blood_test.jpg", 20), "blood_test.jpg");
        assert_eq!(truncate("blood_test.jpg", 6), "blood…");
        assert_eq!(truncate("blood_test.jpg", 0), "");
    }
}
