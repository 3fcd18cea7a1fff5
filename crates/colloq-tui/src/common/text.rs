//! Width-aware string truncation.
//!
//! Widths are terminal columns, not chars: CJK and emoji count as two.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts the end off a string that is wider than `max_width`, marking the
/// cut with an ellipsis.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut kept = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        kept.push(ch);
        width += ch_width;
    }
    kept.push('…');
    kept
}

/// Cuts the start off instead, keeping the tail that fits.
///
/// Input lines truncate this way: the end of the value, where the cursor
/// sits, stays visible.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut tail: Vec<char> = Vec::new();
    let mut width = 0usize;
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        tail.push(ch);
        width += ch_width;
    }
    tail.reverse();
    let tail: String = tail.into_iter().collect();
    format!("…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis_short() {
        assert_eq!(truncate_with_ellipsis("report", 12), "report");
    }

    #[test]
    fn test_truncate_with_ellipsis_exact() {
        assert_eq!(truncate_with_ellipsis("report", 6), "report");
    }

    #[test]
    fn test_truncate_with_ellipsis_truncated() {
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello w…");
    }

    #[test]
    fn test_truncate_with_ellipsis_very_short() {
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
    }

    #[test]
    fn test_truncate_with_ellipsis_wide_cjk() {
        // CJK characters take 2 terminal columns each
        let text = "中文test";
        assert_eq!(truncate_with_ellipsis(text, 6), "中文t…");
    }

    #[test]
    fn test_truncate_start_short() {
        assert_eq!(truncate_start_with_ellipsis("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_start_keeps_tail() {
        assert_eq!(truncate_start_with_ellipsis("hello world", 8), "…o world");
    }

    #[test]
    fn test_truncate_start_very_short() {
        assert_eq!(truncate_start_with_ellipsis("hello", 1), "…");
    }

    #[test]
    fn test_truncate_start_wide_cjk() {
        // "文" is two columns; only "t…" plus one wide char fits in 4
        assert_eq!(truncate_start_with_ellipsis("中文t", 4), "…文t");
    }
}
