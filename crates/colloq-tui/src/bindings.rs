//! Reactions to exchange lifecycle events.
//!
//! The driver reports each exchange through a fixed sequence of lifecycle
//! events; this module maps those events onto the page:
//!
//! - `before_request` disables the submit control of the sending form
//! - `after_swap` on the messages region pins the transcript to the bottom
//! - `after_request` re-enables that control unconditionally, and on a
//!   successful exchange toggles the upload dialog
//!
//! Every lookup is total. An event naming an element outside any form, or a
//! swap target that is not a known region, falls through the explicit
//! absence branch and mutates nothing.
//!
//! The success toggle is deliberately form-agnostic: any successful form
//! submission flips the dialog, closing it when the upload that just
//! succeeded left it open.

use colloq_core::exchange::events::{ElementId, ExchangeEvent};

use crate::overlays::{Overlay, UploadDialogState};
use crate::state::{AppState, SwapRegion, enclosing_form, swap_region};

/// Applies one lifecycle event to the page.
pub fn react(app: &mut AppState, event: &ExchangeEvent) {
    match event {
        ExchangeEvent::BeforeRequest { elt } => on_before_request(app, elt),
        ExchangeEvent::AfterSwap { target } => on_after_swap(app, target),
        ExchangeEvent::AfterRequest { elt, successful } => {
            on_after_request(app, elt, *successful);
        }
    }
}

/// Toggles the upload dialog: hidden it opens, visible it closes.
///
/// Two calls in a row always restore the starting state. Opening builds a
/// fresh dialog, so a reopened dialog starts with nothing staged.
pub fn toggle_modal(app: &mut AppState) {
    if app.overlay.is_some() {
        app.overlay = None;
    } else {
        let (dialog, _effects) = UploadDialogState::open();
        app.overlay = Some(Overlay::Upload(dialog));
    }
}

fn on_before_request(app: &mut AppState, elt: &ElementId) {
    let Some(form) = enclosing_form(elt) else {
        return;
    };
    app.page.form_mut(form).submit_enabled = false;
}

fn on_after_swap(app: &mut AppState, target: &ElementId) {
    let Some(region) = swap_region(target) else {
        return;
    };
    match region {
        SwapRegion::Messages => app.page.messages.scroll_to_bottom(),
    }
}

fn on_after_request(app: &mut AppState, elt: &ElementId, successful: bool) {
    let Some(form) = enclosing_form(elt) else {
        return;
    };
    app.page.form_mut(form).submit_enabled = true;
    if successful {
        toggle_modal(app);
    }
}

#[cfg(test)]
mod tests {
    use colloq_core::config::Config;
    use colloq_core::exchange::events::ids;
    use colloq_core::message::Message;

    use super::*;
    use crate::features::messages::render::count_transcript_lines;
    use crate::state::FormId;

    fn app() -> AppState {
        AppState::new(Config::default())
    }

    fn elt(id: &str) -> ElementId {
        ElementId::from(id)
    }

    #[test]
    fn test_toggle_twice_restores_modal_state() {
        let mut app = app();

        assert!(app.overlay.is_none());
        toggle_modal(&mut app);
        assert!(app.overlay.is_some());
        toggle_modal(&mut app);
        assert!(app.overlay.is_none());

        // Same law starting from the open state
        toggle_modal(&mut app);
        toggle_modal(&mut app);
        toggle_modal(&mut app);
        assert!(app.overlay.is_some());
    }

    #[test]
    fn test_after_swap_pins_transcript_to_bottom() {
        for n in [0usize, 1, 3, 40] {
            let mut app = app();
            app.page.messages.update_layout(80, 20);
            for i in 0..n {
                app.page.messages.push(Message::human(format!("message {i}")));
            }
            let lines = count_transcript_lines(app.page.messages.messages(), 80);
            app.page.messages.set_line_count(lines);
            app.page.messages.scroll_to_top();

            react(&mut app, &ExchangeEvent::AfterSwap {
                target: elt(ids::MESSAGES),
            });

            assert!(app.page.messages.scroll.is_following(), "n = {n}");
            assert_eq!(
                app.page.messages.scroll.offset(20),
                lines.saturating_sub(20),
                "n = {n}"
            );
        }
    }

    #[test]
    fn test_after_swap_on_unknown_target_is_a_noop() {
        let mut app = app();
        app.page.messages.set_line_count(100);
        app.page.messages.scroll_to_top();

        react(&mut app, &ExchangeEvent::AfterSwap {
            target: elt("sidebar"),
        });

        assert!(!app.page.messages.scroll.is_following());
        assert_eq!(app.page.messages.scroll.offset(20), 0);
    }

    #[test]
    fn test_before_request_disables_only_the_enclosing_form() {
        let mut app = app();

        react(&mut app, &ExchangeEvent::BeforeRequest {
            elt: elt(ids::CHAT_INPUT),
        });

        assert!(!app.page.form(FormId::Chat).submit_enabled);
        assert!(app.page.form(FormId::Upload).submit_enabled);
    }

    #[test]
    fn test_request_lifecycle_disables_then_reenables_submit() {
        let mut app = app();

        react(&mut app, &ExchangeEvent::BeforeRequest {
            elt: elt(ids::SEND_BUTTON),
        });
        assert!(!app.page.form(FormId::Chat).submit_enabled);

        react(&mut app, &ExchangeEvent::AfterRequest {
            elt: elt(ids::SEND_BUTTON),
            successful: false,
        });
        assert!(app.page.form(FormId::Chat).submit_enabled);
    }

    #[test]
    fn test_after_request_reenables_even_without_before_request() {
        let mut app = app();
        app.page.form_mut(FormId::Upload).submit_enabled = false;

        react(&mut app, &ExchangeEvent::AfterRequest {
            elt: elt(ids::UPLOAD_BUTTON),
            successful: false,
        });

        assert!(app.page.form(FormId::Upload).submit_enabled);
    }

    #[test]
    fn test_successful_request_toggles_modal_exactly_once() {
        // Upload flow: dialog open before the event, closed after
        let mut app = app();
        toggle_modal(&mut app);
        assert!(app.overlay.is_some());

        react(&mut app, &ExchangeEvent::AfterRequest {
            elt: elt(ids::UPLOAD_FORM),
            successful: true,
        });
        assert!(app.overlay.is_none());

        // The toggle is relative to the pre-event state: a success arriving
        // with the dialog hidden flips it open
        react(&mut app, &ExchangeEvent::AfterRequest {
            elt: elt(ids::CHAT_FORM),
            successful: true,
        });
        assert!(app.overlay.is_some());
    }

    #[test]
    fn test_failed_request_leaves_modal_unchanged() {
        let mut app = app();

        react(&mut app, &ExchangeEvent::AfterRequest {
            elt: elt(ids::UPLOAD_FORM),
            successful: false,
        });
        assert!(app.overlay.is_none());

        toggle_modal(&mut app);
        react(&mut app, &ExchangeEvent::AfterRequest {
            elt: elt(ids::UPLOAD_FORM),
            successful: false,
        });
        assert!(app.overlay.is_some());
    }

    #[test]
    fn test_events_outside_any_form_mutate_nothing() {
        let mut app = app();

        react(&mut app, &ExchangeEvent::BeforeRequest {
            elt: elt(ids::MESSAGES),
        });
        react(&mut app, &ExchangeEvent::AfterRequest {
            elt: elt("standaloneButton"),
            successful: true,
        });

        assert!(app.page.form(FormId::Chat).submit_enabled);
        assert!(app.page.form(FormId::Upload).submit_enabled);
        assert!(app.overlay.is_none());
    }
}
