//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use std::time::Instant;

use colloq_core::exchange::{DriverEvent, ExchangeEvent};
use crossterm::event::Event;

use crate::bindings;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{composer, messages};
use crate::mutations::StateMutation;
use crate::overlays::{self, Overlay, OverlayRequest, OverlayUpdate, UploadDialogState};
use crate::render;
use crate::state::{AppState, ExchangeState, PageState, swap_region};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            // Advance spinner animation
            app.page.spinner_frame = app.page.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(&mut app.page, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::ExchangeSpawned { rx } => {
            app.page.exchange = ExchangeState::InFlight {
                rx,
                started: Instant::now(),
            };
            vec![]
        }
        UiEvent::Exchange(driver_event) => handle_driver_event(app, driver_event),
    }
}

// ============================================================================
// Driver Event Handler
// ============================================================================

/// Applies one driver event to the page.
///
/// Lifecycle events route through the bindings layer; the other events carry
/// exchange payloads (swapped content, the new session, failure detail).
fn handle_driver_event(app: &mut AppState, event: DriverEvent) -> Vec<UiEffect> {
    match event {
        DriverEvent::Lifecycle(lifecycle) => {
            match &lifecycle {
                ExchangeEvent::BeforeRequest { .. } => {
                    app.page.last_failure = None;
                }
                ExchangeEvent::AfterRequest { .. } => {
                    // The final lifecycle event of every exchange
                    app.page.exchange = ExchangeState::Idle;
                }
                ExchangeEvent::AfterSwap { .. } => {}
            }
            bindings::react(app, &lifecycle);
            vec![]
        }
        DriverEvent::Swap { target, message } => {
            if swap_region(&target).is_some() {
                app.page.messages.push(message);
            }
            vec![]
        }
        DriverEvent::SessionEstablished(session) => {
            tracing::info!(session = %session.short_id(), "session established");
            app.page.session = Some(session);
            vec![]
        }
        DriverEvent::Failed { detail } => {
            app.page.last_failure = Some(detail);
            vec![]
        }
    }
}

// ============================================================================
// StateMutation Dispatcher
// ============================================================================

fn apply_mutations(page: &mut PageState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        match mutation {
            StateMutation::Messages(mutation) => page.messages.apply(mutation),
        }
    }
}

// ============================================================================
// Overlay plumbing
// ============================================================================

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    if update.closed {
        app.overlay = None;
    }
    update.effects
}

fn open_overlay_request(app: &mut AppState, request: OverlayRequest) -> Vec<UiEffect> {
    match request {
        OverlayRequest::Upload => {
            let (state, effects) = UploadDialogState::open();
            app.overlay = Some(Overlay::Upload(state));
            effects
        }
    }
}

// ============================================================================
// Frame Handler (layout, scroll coalescing, line counting)
// ============================================================================

/// Handles per-frame state updates.
///
/// This consolidates the housekeeping mutations that happen once per frame:
/// layout updates, the wrapped line recount, and scroll delta application.
fn handle_frame(page: &mut PageState, width: u16, height: u16) {
    let (text_width, viewport_height) = render::transcript_viewport(width, height);
    page.messages.update_layout(text_width, viewport_height);

    if page.messages.needs_line_count() {
        let lines = messages::render::count_transcript_lines(page.messages.messages(), text_width);
        page.messages.set_line_count(lines);
    }

    // Apply accumulated scroll delta from mouse events (coalescing)
    messages::apply_scroll_delta(&mut page.messages);
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => {
            messages::handle_mouse_event(&mut app.page.messages, &mouse);
            vec![]
        }
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        Event::Resize(_, _) => {
            // The next frame event re-runs layout with the new size
            vec![]
        }
        _ => vec![],
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    match app.overlay.as_mut() {
        Some(Overlay::Upload(dialog)) => dialog.paste(text),
        None => composer::handle_paste(&mut app.page.composer, text),
    }
}

fn handle_key(app: &mut AppState, key: crossterm::event::KeyEvent) -> Vec<UiEffect> {
    // Try to dispatch to the active overlay
    if let Some(overlay_update) = overlays::handle_overlay_key(&app.page, &mut app.overlay, key) {
        return apply_overlay_update(app, overlay_update);
    }

    // No overlay active - delegate to the composer feature module
    let ctx = composer::ComposerContext {
        exchange_running: app.page.exchange.is_running(),
        chat_submit_enabled: app.page.chat_form.submit_enabled,
    };
    let (effects, mutations, overlay_request) =
        composer::handle_main_key(&mut app.page.composer, &ctx, key);
    apply_mutations(&mut app.page, mutations);
    if let Some(request) = overlay_request
        && app.overlay.is_none()
    {
        let mut overlay_effects = open_overlay_request(app, request);
        overlay_effects.extend(effects);
        return overlay_effects;
    }

    effects
}

#[cfg(test)]
mod tests {
    use colloq_core::config::Config;
    use colloq_core::exchange::events::ids;
    use colloq_core::exchange::{ElementId, ExchangeRequest};
    use colloq_core::message::{Message, MessageRole};
    use colloq_core::session::Session;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

    use super::*;
    use crate::features::messages::ScrollMode;

    fn app() -> AppState {
        AppState::new(Config::default())
    }

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, modifiers)))
    }

    fn wheel_up() -> UiEvent {
        UiEvent::Terminal(Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn lifecycle(event: ExchangeEvent) -> UiEvent {
        UiEvent::Exchange(DriverEvent::Lifecycle(event))
    }

    #[test]
    fn test_tick_advances_spinner() {
        let mut app = app();

        update(&mut app, UiEvent::Tick);

        assert_eq!(app.page.spinner_frame, 1);
    }

    #[test]
    fn test_enter_submits_prompt_and_clears_composer() {
        let mut app = app();
        app.page.composer.set_text("what is in chapter 2?");

        let effects = update(&mut app, key_event(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            UiEffect::StartExchange {
                request: ExchangeRequest::Chat { prompt, .. },
            } if prompt == "what is in chapter 2?"
        ));
        assert!(app.page.composer.is_empty());

        let messages = app.page.messages.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::Human);
    }

    #[test]
    fn test_exchange_spawned_marks_in_flight() {
        let mut app = app();
        let (_tx, rx) = tokio::sync::mpsc::unbounded_channel();

        update(&mut app, UiEvent::ExchangeSpawned { rx });

        assert!(app.page.exchange.is_running());
    }

    #[test]
    fn test_before_request_clears_previous_failure() {
        let mut app = app();
        app.page.last_failure = Some("No files provided".to_string());

        update(
            &mut app,
            lifecycle(ExchangeEvent::BeforeRequest {
                elt: ElementId::from(ids::CHAT_FORM),
            }),
        );

        assert!(app.page.last_failure.is_none());
        assert!(!app.page.chat_form.submit_enabled);
    }

    #[test]
    fn test_final_lifecycle_event_returns_to_idle() {
        let mut app = app();
        let (_tx, rx) = tokio::sync::mpsc::unbounded_channel();
        update(&mut app, UiEvent::ExchangeSpawned { rx });

        update(
            &mut app,
            lifecycle(ExchangeEvent::AfterRequest {
                elt: ElementId::from(ids::UPLOAD_FORM),
                successful: true,
            }),
        );

        assert!(!app.page.exchange.is_running());
        assert!(app.page.upload_form.submit_enabled);
        // Success toggles the dialog: hidden before the event, open after
        assert!(app.overlay.is_some());
    }

    #[test]
    fn test_swap_appends_then_after_swap_follows() {
        let mut app = app();
        app.page.messages.scroll_to_top();

        update(
            &mut app,
            UiEvent::Exchange(DriverEvent::Swap {
                target: ElementId::from(ids::MESSAGES),
                message: Message::assistant("the answer"),
            }),
        );
        assert_eq!(app.page.messages.messages().len(), 1);
        assert!(!app.page.messages.scroll.is_following());

        update(
            &mut app,
            lifecycle(ExchangeEvent::AfterSwap {
                target: ElementId::from(ids::MESSAGES),
            }),
        );
        assert!(app.page.messages.scroll.is_following());
    }

    #[test]
    fn test_swap_for_unknown_region_drops_content() {
        let mut app = app();

        update(
            &mut app,
            UiEvent::Exchange(DriverEvent::Swap {
                target: ElementId::from("sidebar"),
                message: Message::assistant("lost"),
            }),
        );

        assert!(app.page.messages.messages().is_empty());
    }

    #[test]
    fn test_session_established_is_recorded() {
        let mut app = app();
        let session = Session::establish("documents", vec!["a.pdf".to_string()]);

        update(&mut app, UiEvent::Exchange(DriverEvent::SessionEstablished(session)));

        assert!(app.page.session.is_some());
    }

    #[test]
    fn test_failed_exchange_records_detail_without_swap() {
        let mut app = app();

        update(
            &mut app,
            UiEvent::Exchange(DriverEvent::Failed {
                detail: "No files provided".to_string(),
            }),
        );

        assert_eq!(app.page.last_failure.as_deref(), Some("No files provided"));
        assert!(app.page.messages.messages().is_empty());
    }

    #[test]
    fn test_ctrl_o_opens_upload_dialog() {
        let mut app = app();

        let effects = update(&mut app, key_event(KeyCode::Char('o'), KeyModifiers::CONTROL));

        assert!(effects.is_empty());
        assert!(matches!(app.overlay, Some(Overlay::Upload(_))));
    }

    #[test]
    fn test_keys_route_to_overlay_when_open() {
        let mut app = app();
        update(&mut app, key_event(KeyCode::Char('o'), KeyModifiers::CONTROL));

        update(&mut app, key_event(KeyCode::Char('a'), KeyModifiers::NONE));

        match &app.overlay {
            Some(Overlay::Upload(dialog)) => assert_eq!(dialog.input, "a"),
            other => panic!("expected upload dialog, got {other:?}"),
        }
        assert!(app.page.composer.is_empty());
    }

    #[test]
    fn test_escape_closes_overlay() {
        let mut app = app();
        update(&mut app, key_event(KeyCode::Char('o'), KeyModifiers::CONTROL));
        assert!(app.overlay.is_some());

        update(&mut app, key_event(KeyCode::Esc, KeyModifiers::NONE));

        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_paste_routes_to_composer_or_overlay() {
        let mut app = app();

        update(&mut app, UiEvent::Terminal(Event::Paste("hello".to_string())));
        assert_eq!(app.page.composer.text(), "hello");

        update(&mut app, key_event(KeyCode::Char('o'), KeyModifiers::CONTROL));
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("docs/a.pdf".to_string())),
        );
        match &app.overlay {
            Some(Overlay::Upload(dialog)) => assert_eq!(dialog.input, "docs/a.pdf"),
            other => panic!("expected upload dialog, got {other:?}"),
        }
    }

    #[test]
    fn test_frame_updates_layout_and_line_count() {
        let mut app = app();
        app.page.messages.push(Message::human("hello"));

        update(&mut app, UiEvent::Frame {
            width: 80,
            height: 24,
        });

        assert!(!app.page.messages.needs_line_count());
        assert_eq!(app.page.messages.viewport_height, 20);
    }

    #[test]
    fn test_wheel_scroll_applies_on_next_frame() {
        let mut app = app();
        // 30 one-line messages wrap to 60 transcript lines at this width
        for i in 0..30 {
            app.page.messages.push(Message::human(format!("line {i}")));
        }
        update(&mut app, UiEvent::Frame {
            width: 80,
            height: 24,
        });
        assert!(app.page.messages.scroll.is_following());

        update(&mut app, wheel_up());
        update(&mut app, wheel_up());
        update(&mut app, wheel_up());
        update(&mut app, UiEvent::Frame {
            width: 80,
            height: 24,
        });

        let bottom = app.page.messages.scroll.total_lines.saturating_sub(20);
        assert_eq!(app.page.messages.scroll.mode, ScrollMode::Anchored {
            line: bottom - 1,
        });
    }
}
