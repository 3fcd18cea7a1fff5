//! Upload dialog for staging documents.

use colloq_core::exchange::driver::{ExchangeRequest, validate_file};
use colloq_core::exchange::events::{ElementId, ids};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::OverlayUpdate;
use crate::common::truncate_start_with_ellipsis;
use crate::effects::UiEffect;
use crate::state::PageState;

/// Dialog width in columns, borders included.
const DIALOG_WIDTH: u16 = 56;

/// Dialog height in rows, borders included.
const DIALOG_HEIGHT: u16 = 11;

/// Rows reserved for the staged file list.
const FILE_ROWS: usize = 4;

/// State for the upload dialog.
///
/// Files are staged one path at a time. Submitting sends whatever is staged,
/// including nothing; an empty upload fails like any other bad request and
/// the dialog stays open for another try.
#[derive(Debug, Clone)]
pub struct UploadDialogState {
    /// The path currently being typed.
    pub input: String,
    /// Paths staged for the next upload.
    pub files: Vec<String>,
    /// Error message to display (validation or busy feedback).
    pub error: Option<String>,
}

impl UploadDialogState {
    /// Opens the upload dialog with nothing staged.
    pub fn open() -> (Self, Vec<UiEffect>) {
        (
            Self {
                input: String::new(),
                files: Vec::new(),
                error: None,
            },
            vec![],
        )
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, composer_top: u16) {
        render_upload_dialog(frame, self, area, composer_top);
    }

    /// Inserts pasted text into the path input, dropping control characters.
    pub fn paste(&mut self, text: &str) {
        self.error = None;
        self.input.extend(text.chars().filter(|c| !c.is_control()));
    }

    pub fn handle_key(&mut self, page: &PageState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Clear error on any input
        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('c') if key.code == KeyCode::Esc || ctrl => {
                OverlayUpdate::close()
            }
            KeyCode::Enter => {
                let path = self.input.trim();
                if !path.is_empty() {
                    // Stage the typed path
                    match validate_file(path) {
                        Ok(()) => {
                            self.files.push(path.to_string());
                            self.input.clear();
                        }
                        Err(detail) => self.error = Some(detail),
                    }
                    OverlayUpdate::stay()
                } else if page.exchange.is_running() {
                    // Already uploading - show feedback
                    self.error = Some("Upload in progress...".to_string());
                    OverlayUpdate::stay()
                } else {
                    // Submit whatever is staged. The dialog stays open: the
                    // request completion closes it on success.
                    OverlayUpdate::stay().with_effects(vec![UiEffect::StartExchange {
                        request: ExchangeRequest::Upload {
                            elt: ElementId::from(ids::UPLOAD_FORM),
                            files: self.files.clone(),
                        },
                    }])
                }
            }
            KeyCode::Backspace => {
                if self.input.is_empty() {
                    self.files.pop();
                } else {
                    self.input.pop();
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }
}

fn render_upload_dialog(
    frame: &mut Frame,
    state: &UploadDialogState,
    area: Rect,
    composer_top: u16,
) {
    let popup = dialog_area(area, composer_top);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Upload Documents ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let body = block.inner(popup);
    frame.render_widget(block, popup);
    if body.height == 0 {
        return;
    }

    render_path_input(frame, state, row(body, 0));
    render_rule(frame, row(body, 1));
    render_staged_files(frame, state, body);
    render_help(frame, state, row(body, 2 + FILE_ROWS as u16));
    render_rule(frame, row(body, 3 + FILE_ROWS as u16));
    render_hints(frame, row(body, body.height - 1));
}

/// Centers the dialog in the region above the composer, shrinking it when
/// the terminal cannot fit the full size.
fn dialog_area(frame_area: Rect, composer_top: u16) -> Rect {
    let width = DIALOG_WIDTH.min(frame_area.width.saturating_sub(4));
    let height = DIALOG_HEIGHT.min(composer_top.saturating_sub(2));
    let x = frame_area.width.saturating_sub(width) / 2;
    let y = composer_top.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// One-row slice of the dialog body. Offsets past the bottom collapse to a
/// zero-height rect so short terminals drop the lower sections.
fn row(body: Rect, offset: u16) -> Rect {
    let height = u16::from(offset < body.height);
    Rect::new(body.x, body.y + offset.min(body.height), body.width, height)
}

fn render_path_input(frame: &mut Frame, state: &UploadDialogState, area: Rect) {
    let max_width = area.width.saturating_sub(3) as usize;
    let prompt = Span::styled("> ", Style::default().fg(Color::DarkGray));
    let cursor = Span::styled("█", Style::default().fg(Color::Cyan));
    let line = if state.input.is_empty() {
        Line::from(vec![
            prompt,
            cursor,
            Span::styled("path/to/document.pdf", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        // Long paths keep their tail visible
        Line::from(vec![
            prompt,
            Span::styled(
                truncate_start_with_ellipsis(&state.input, max_width),
                Style::default().fg(Color::Cyan),
            ),
            cursor,
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_rule(frame: &mut Frame, area: Rect) {
    let rule = "─".repeat(area.width as usize);
    let line = Line::from(Span::styled(rule, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_staged_files(frame: &mut Frame, state: &UploadDialogState, body: Rect) {
    let max_name_width = body.width.saturating_sub(2) as usize;

    let mut rows: Vec<Line> = Vec::new();
    if state.files.is_empty() {
        rows.push(Line::from(Span::styled(
            "(no files staged)",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        // When the list overflows, the first row summarizes what is hidden
        // and the most recent files fill the rest.
        let visible = if state.files.len() > FILE_ROWS {
            let hidden = state.files.len() - (FILE_ROWS - 1);
            rows.push(Line::from(Span::styled(
                format!("… {hidden} earlier"),
                Style::default().fg(Color::DarkGray),
            )));
            &state.files[state.files.len() - (FILE_ROWS - 1)..]
        } else {
            &state.files[..]
        };
        for name in visible {
            rows.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(truncate_start_with_ellipsis(name, max_name_width)),
            ]));
        }
    }

    for (i, line) in rows.into_iter().take(FILE_ROWS).enumerate() {
        frame.render_widget(Paragraph::new(line), row(body, 2 + i as u16));
    }
}

fn render_help(frame: &mut Frame, state: &UploadDialogState, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let (text, style) = if let Some(error) = &state.error {
        (error.clone(), Style::default().fg(Color::Red))
    } else if !state.input.trim().is_empty() {
        ("Press Enter to stage this file".to_string(), dim)
    } else if state.files.is_empty() {
        ("Type a path to a .pdf file".to_string(), dim)
    } else {
        let count = state.files.len();
        let noun = if count == 1 { "file" } else { "files" };
        (format!("{count} {noun} staged. Press Enter to upload"), dim)
    };
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let key = Style::default().fg(Color::Cyan);
    let line = Line::from(vec![
        Span::styled("Enter", key),
        Span::styled(" stage/upload • ", dim),
        Span::styled("Backspace", key),
        Span::styled(" unstage • ", dim),
        Span::styled("Esc", key),
        Span::styled(" cancel", dim),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use colloq_core::config::Config;

    use super::*;
    use crate::state::ExchangeState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn page() -> PageState {
        PageState::new(Config::default())
    }

    fn dialog() -> UploadDialogState {
        UploadDialogState::open().0
    }

    #[test]
    fn test_enter_stages_valid_pdf() {
        let mut state = dialog();
        state.input = "report.pdf".to_string();

        let update = state.handle_key(&page(), key(KeyCode::Enter));

        assert!(!update.closed);
        assert!(update.effects.is_empty());
        assert_eq!(state.files, vec!["report.pdf".to_string()]);
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_enter_rejects_unsupported_file_type() {
        let mut state = dialog();
        state.input = "notes.txt".to_string();

        let update = state.handle_key(&page(), key(KeyCode::Enter));

        assert!(!update.closed);
        assert!(state.files.is_empty());
        assert_eq!(state.error.as_deref(), Some("Unsupported file type: notes.txt"));
    }

    #[test]
    fn test_enter_submits_staged_files() {
        let mut state = dialog();
        state.files = vec!["a.pdf".to_string(), "b.pdf".to_string()];

        let update = state.handle_key(&page(), key(KeyCode::Enter));

        assert!(!update.closed);
        assert_eq!(
            update.effects,
            vec![UiEffect::StartExchange {
                request: ExchangeRequest::Upload {
                    elt: ElementId::from(ids::UPLOAD_FORM),
                    files: vec!["a.pdf".to_string(), "b.pdf".to_string()],
                },
            }]
        );
    }

    #[test]
    fn test_enter_submits_even_with_nothing_staged() {
        let mut state = dialog();

        let update = state.handle_key(&page(), key(KeyCode::Enter));

        assert_eq!(update.effects.len(), 1);
        assert!(matches!(
            &update.effects[0],
            UiEffect::StartExchange {
                request: ExchangeRequest::Upload { files, .. },
            } if files.is_empty()
        ));
    }

    #[test]
    fn test_submit_while_exchange_running_shows_feedback() {
        let mut state = dialog();
        state.files = vec!["a.pdf".to_string()];
        let mut page = page();
        let (_tx, rx) = tokio::sync::mpsc::unbounded_channel();
        page.exchange = ExchangeState::InFlight {
            rx,
            started: Instant::now(),
        };

        let update = state.handle_key(&page, key(KeyCode::Enter));

        assert!(update.effects.is_empty());
        assert_eq!(state.error.as_deref(), Some("Upload in progress..."));
    }

    #[test]
    fn test_backspace_unstages_when_input_empty() {
        let mut state = dialog();
        state.files = vec!["a.pdf".to_string(), "b.pdf".to_string()];

        state.handle_key(&page(), key(KeyCode::Backspace));

        assert_eq!(state.files, vec!["a.pdf".to_string()]);
    }

    #[test]
    fn test_backspace_edits_input_before_unstaging() {
        let mut state = dialog();
        state.files = vec!["a.pdf".to_string()];
        state.input = "b.pd".to_string();

        state.handle_key(&page(), key(KeyCode::Backspace));

        assert_eq!(state.input, "b.p");
        assert_eq!(state.files.len(), 1);
    }

    #[test]
    fn test_typing_clears_error() {
        let mut state = dialog();
        state.error = Some("Unsupported file type: notes.txt".to_string());

        state.handle_key(&page(), key(KeyCode::Char('a')));

        assert!(state.error.is_none());
    }

    #[test]
    fn test_esc_closes() {
        let mut state = dialog();

        let update = state.handle_key(&page(), key(KeyCode::Esc));

        assert!(update.closed);
    }

    #[test]
    fn test_dialog_area_centers_above_composer() {
        let area = Rect::new(0, 0, 80, 24);

        assert_eq!(dialog_area(area, 20), Rect::new(12, 4, 56, 11));
    }

    #[test]
    fn test_dialog_area_shrinks_on_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);

        assert_eq!(dialog_area(area, 6), Rect::new(2, 1, 36, 4));
    }

    #[test]
    fn test_row_collapses_past_the_body() {
        let body = Rect::new(1, 1, 54, 3);

        assert_eq!(row(body, 0), Rect::new(1, 1, 54, 1));
        assert_eq!(row(body, 7), Rect::new(1, 4, 54, 0));
    }
}
