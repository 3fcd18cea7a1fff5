//! Composer view.
//!
//! Pure rendering for the prompt box above the status line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::state::PageState;

/// Height of the composer box in rows, borders included.
pub const COMPOSER_HEIGHT: u16 = 3;

/// Renders the prompt box.
///
/// The line scrolls horizontally to keep the cursor in view; the title
/// reflects the send button state while a request is in flight.
pub fn render_composer(page: &PageState, frame: &mut Frame, area: Rect, show_cursor: bool) {
    let composer = &page.composer;
    let sending = !page.chat_form.submit_enabled;

    let title = if sending {
        " prompt (sending...) "
    } else {
        " prompt "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(title, Style::default().fg(Color::DarkGray)));

    let inner = block.inner(area);
    if inner.width == 0 || inner.height == 0 {
        frame.render_widget(block, area);
        return;
    }

    if composer.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Ask about your documents (Ctrl+O to upload)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        )))
        .block(block);
        frame.render_widget(hint, area);
        if show_cursor {
            frame.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let available = inner.width as usize;
    let cursor_cols = UnicodeWidthStr::width(&composer.text()[..composer.cursor()]);
    let scroll = cursor_cols.saturating_sub(available.saturating_sub(1));
    let visible = visible_window(composer.text(), scroll, available);

    let paragraph = Paragraph::new(Line::from(visible)).block(block);
    frame.render_widget(paragraph, area);

    let cursor_x = inner.x + (cursor_cols - scroll) as u16;
    if show_cursor && cursor_x < inner.x + inner.width {
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

/// Cuts a display-width window out of a line.
///
/// Skips `skip_cols` columns, then takes up to `take_cols`. A wide grapheme
/// straddling the left edge is replaced with a space so columns stay aligned.
fn visible_window(text: &str, skip_cols: usize, take_cols: usize) -> String {
    let mut out = String::new();
    let mut col = 0usize;

    for grapheme in text.graphemes(true) {
        let width = UnicodeWidthStr::width(grapheme);
        if col + width <= skip_cols {
            col += width;
            continue;
        }
        if col < skip_cols {
            for _ in 0..(col + width - skip_cols) {
                out.push(' ');
            }
            col += width;
            continue;
        }
        if col - skip_cols + width > take_cols {
            break;
        }
        out.push_str(grapheme);
        col += width;
    }

    out
}
