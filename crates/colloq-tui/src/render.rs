//! The view: draws `AppState` onto a ratatui frame.
//!
//! Nothing in this module mutates state or produces effects. The reducer
//! and the renderer share their layout math through
//! [`transcript_viewport`], so the scroll model and the screen agree on
//! how many lines fit.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::{Scrollbar, truncate_with_ellipsis};
use crate::features::composer::render::{COMPOSER_HEIGHT, render_composer};
use crate::features::messages;
use crate::overlays::OverlayExt;
use crate::state::{AppState, ExchangeState, PageState};

/// Status line height under the composer.
const STATUS_HEIGHT: u16 = 1;

/// Horizontal padding on each side of the transcript.
pub const TRANSCRIPT_MARGIN: u16 = 1;

/// Gutter reserved for the scrollbar on the right edge.
const SCROLLBAR_WIDTH: u16 = 1;

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 6;

/// Transcript text width and viewport height for a terminal of the given size.
///
/// Width accounts for the horizontal margins and the scrollbar gutter; height
/// for the composer and status line. The reducer uses the same numbers for
/// layout, so scroll math and rendering agree.
pub fn transcript_viewport(width: u16, height: u16) -> (usize, usize) {
    let text_width = width.saturating_sub(TRANSCRIPT_MARGIN * 2 + SCROLLBAR_WIDTH) as usize;
    let viewport_height = height.saturating_sub(COMPOSER_HEIGHT + STATUS_HEIGHT) as usize;
    (text_width.max(1), viewport_height)
}

/// Draws the whole screen: transcript, composer, status line, overlay.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let page = &app.page;

    let (transcript_width, transcript_height) = transcript_viewport(area.width, area.height);

    // Pre-wrap the transcript for the current width
    let all_lines =
        messages::render::build_transcript_lines(page.messages.messages(), transcript_width);
    let total_lines = all_lines.len();

    // Apply scroll offset to slice the visible portion
    let scroll_offset = {
        let max_offset = total_lines.saturating_sub(transcript_height);
        if page.messages.scroll.is_following() {
            max_offset
        } else {
            page.messages
                .scroll
                .offset(transcript_height)
                .min(max_offset)
        }
    };

    let visible_end = (scroll_offset + transcript_height).min(total_lines);
    let content_lines: Vec<Line<'static>> = all_lines
        .into_iter()
        .skip(scroll_offset)
        .take(visible_end - scroll_offset)
        .collect();

    // Short transcripts sit at the bottom, padded from above
    let pad = transcript_height.saturating_sub(content_lines.len());
    let mut visible_lines = vec![Line::default(); pad];
    visible_lines.extend(content_lines);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(COMPOSER_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    // Lines are pre-wrapped to the margin-adjusted width, so the paragraph
    // gets no .wrap() of its own
    let body = chunks[0];
    let transcript_area = Rect {
        x: body.x + TRANSCRIPT_MARGIN,
        y: body.y,
        width: body.width.saturating_sub(TRANSCRIPT_MARGIN * 2 + SCROLLBAR_WIDTH),
        height: body.height,
    };
    let transcript = Paragraph::new(visible_lines).block(Block::default().borders(Borders::NONE));
    frame.render_widget(transcript, transcript_area);

    let scrollbar = Scrollbar::new(total_lines, transcript_height, scroll_offset);
    frame.render_widget(scrollbar, body);

    // Composer; the cursor is hidden while an overlay captures input
    render_composer(page, frame, chunks[1], app.overlay.is_none());

    render_status_line(page, frame, chunks[2]);

    // Overlay draws last, on top of everything
    app.overlay.render(frame, area, chunks[1].y);
}

/// Elapsed time for the status line: "42s", "1m05s".
fn format_elapsed(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        return format!("{secs}s");
    }
    format!("{}m{:02}s", secs / 60, secs % 60)
}

/// Renders the status line below the composer.
fn render_status_line(page: &PageState, frame: &mut Frame, area: Rect) {
    let spinner_idx = (page.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len();
    let spinner = SPINNER_FRAMES[spinner_idx];

    let spans: Vec<Span> = match &page.exchange {
        ExchangeState::InFlight { started, .. } => {
            vec![
                Span::styled(spinner, Style::default().fg(Color::Yellow)),
                Span::raw(" "),
                Span::styled("Sending...", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(" ({})", format_elapsed(started.elapsed())),
                    Style::default().fg(Color::DarkGray),
                ),
            ]
        }
        ExchangeState::Idle => {
            if let Some(detail) = &page.last_failure {
                let max_width = area.width.saturating_sub(1) as usize;
                vec![Span::styled(
                    truncate_with_ellipsis(detail, max_width),
                    Style::default().fg(Color::Red),
                )]
            } else {
                let mut spans = Vec::new();
                if let Some(session) = &page.session {
                    let count = session.document_count();
                    let noun = if count == 1 { "doc" } else { "docs" };
                    spans.push(Span::styled(
                        format!("session {} · {count} {noun}  ", session.short_id()),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                spans.extend([
                    Span::styled("Ctrl+O", Style::default().fg(Color::DarkGray)),
                    Span::raw(" upload  "),
                    Span::styled("Ctrl+C", Style::default().fg(Color::DarkGray)),
                    Span::raw(" quit"),
                ]);
                spans
            }
        }
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
