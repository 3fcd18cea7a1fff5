//! Transcript scrollbar widget.
//!
//! ratatui's built-in Scrollbar rounds the thumb start and end separately,
//! so the thumb size fluctuates while scrolling. This one computes a fixed
//! thumb length and interpolates only its position.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const THUMB_SYMBOL: &str = "█";
const TRACK_SYMBOL: &str = "│";

/// Scrollbar for the transcript gutter.
///
/// The thumb keeps its size across scroll positions and sits flush with the
/// bottom of the track exactly when the content is fully scrolled.
#[derive(Debug, Clone)]
pub struct Scrollbar {
    /// Total wrapped transcript lines.
    total: usize,
    /// Rows the viewport shows at once.
    viewport: usize,
    /// Lines scrolled past above the viewport.
    offset: usize,
}

impl Scrollbar {
    pub fn new(total: usize, viewport: usize, offset: usize) -> Self {
        Self {
            total,
            viewport,
            offset,
        }
    }

    /// Thumb placement as `(top_row, length)` for a track of `track` rows.
    ///
    /// `None` when nothing scrolls, which also hides the track.
    fn geometry(&self, track: usize) -> Option<(usize, usize)> {
        let max_scroll = self.total.saturating_sub(self.viewport);
        if track == 0 || max_scroll == 0 {
            return None;
        }

        // Thumb length follows the visible share of the content. The +visible
        // in the denominator matches the built-in widget's size at the top.
        let visible = self.viewport.min(track);
        let denom = (self.total - 1 + visible) as u64;
        if denom == 0 {
            return Some((0, track));
        }
        let rounded = (track as u64 * visible as u64 + denom / 2) / denom;
        let thumb = (rounded as usize).clamp(1, track);

        // Interpolate the top over the rows the thumb leaves free.
        let span = (track - thumb) as u64;
        let offset = self.offset.min(max_scroll);
        let top = (offset as u64 * span / max_scroll as u64) as usize;

        Some((top, thumb))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((top, thumb)) = self.geometry(area.height as usize) else {
            return;
        };

        // Right edge of the area
        let x = area.x + area.width.saturating_sub(1);
        for (row, y) in (area.y..area.y + area.height).enumerate() {
            let in_thumb = (top..top + thumb).contains(&row);
            let symbol = if in_thumb { THUMB_SYMBOL } else { TRACK_SYMBOL };
            buf.set_string(x, y, symbol, Style::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_when_content_fits() {
        assert!(Scrollbar::new(10, 20, 0).geometry(20).is_none());
        assert!(Scrollbar::new(20, 20, 0).geometry(20).is_none());
    }

    #[test]
    fn thumb_length_stays_fixed_while_scrolling() {
        let lengths: Vec<usize> = [0, 40, 80]
            .into_iter()
            .map(|offset| Scrollbar::new(100, 20, offset).geometry(20).unwrap().1)
            .collect();

        assert_eq!(lengths, vec![3, 3, 3]);
    }

    #[test]
    fn thumb_reaches_bottom_at_max_scroll() {
        let (top, thumb) = Scrollbar::new(100, 20, 80).geometry(20).unwrap();
        assert_eq!(top + thumb, 20);

        let (top, _) = Scrollbar::new(100, 20, 0).geometry(20).unwrap();
        assert_eq!(top, 0);
    }

    #[test]
    fn degenerate_viewport_does_not_panic() {
        // A zero-height viewport still yields a one-row thumb
        assert_eq!(Scrollbar::new(5, 0, 5).geometry(3), Some((2, 1)));
    }
}
