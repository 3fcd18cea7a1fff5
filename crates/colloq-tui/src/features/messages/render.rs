//! Transcript rendering functions.
//!
//! Builds the transcript as ratatui lines and counts how many lines the
//! current width produces. The count feeds the scroll math, so both paths
//! share the same wrapping helper.

use colloq_core::message::{Message, MessageRole};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Renders the whole transcript into ratatui lines.
///
/// Each message is followed by one blank separator line.
pub fn build_transcript_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for message in messages {
        lines.extend(message_lines(message, width));
        lines.push(Line::default());
    }

    lines
}

/// Counts the lines [`build_transcript_lines`] would produce at this width.
pub fn count_transcript_lines(messages: &[Message], width: usize) -> usize {
    messages
        .iter()
        .map(|message| message_line_count(message, width) + 1)
        .sum()
}

/// Columns a human message loses to the `> ` marker.
const HUMAN_MARKER_WIDTH: usize = 2;

fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    match message.role {
        MessageRole::Human => {
            let marker_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
            wrap_plain(&message.text, width.saturating_sub(HUMAN_MARKER_WIDTH))
                .into_iter()
                .enumerate()
                .map(|(idx, text)| {
                    let prefix = if idx == 0 { "> " } else { "  " };
                    Line::from(vec![Span::styled(prefix, marker_style), Span::raw(text)])
                })
                .collect()
        }
        MessageRole::Assistant => wrap_plain(&message.text, width)
            .into_iter()
            .map(Line::from)
            .collect(),
        MessageRole::System => {
            let style = Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM);
            wrap_plain(&message.text, width)
                .into_iter()
                .map(|text| Line::from(Span::styled(text, style)))
                .collect()
        }
    }
}

fn message_line_count(message: &Message, width: usize) -> usize {
    match message.role {
        MessageRole::Human => {
            wrap_plain(&message.text, width.saturating_sub(HUMAN_MARKER_WIDTH)).len()
        }
        MessageRole::Assistant | MessageRole::System => wrap_plain(&message.text, width).len(),
    }
}

/// Greedy word wrap by display width.
///
/// Embedded newlines start new logical lines; words wider than the viewport
/// are hard-broken at grapheme boundaries.
fn wrap_plain(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for logical in text.split('\n') {
        if logical.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0usize;

        for word in logical.split(' ') {
            let word_width = UnicodeWidthStr::width(word);

            if word_width > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let (piece, piece_width) = hard_break(word, width, &mut lines);
                current = piece;
                current_width = piece_width;
                continue;
            }

            let needed = if current.is_empty() {
                word_width
            } else {
                word_width + 1
            };

            if current_width + needed > width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                    current_width += 1;
                }
                current.push_str(word);
                current_width += word_width;
            }
        }

        lines.push(current);
    }

    lines
}

/// Breaks an overlong word at grapheme boundaries, pushing full rows into
/// `lines` and returning the unfinished trailing piece.
fn hard_break(word: &str, width: usize, lines: &mut Vec<String>) -> (String, usize) {
    let mut piece = String::new();
    let mut piece_width = 0usize;

    for grapheme in word.graphemes(true) {
        let grapheme_width = UnicodeWidthStr::width(grapheme);
        if piece_width + grapheme_width > width && !piece.is_empty() {
            lines.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push_str(grapheme);
        piece_width += grapheme_width;
    }

    (piece, piece_width)
}
