//! Messages feature reducer.
//!
//! Mouse wheel handling and per-frame scroll application. Wheel events only
//! accumulate; the delta is applied once per frame so trackpad bursts
//! coalesce into a single smooth scroll step.

use crossterm::event::{MouseEvent, MouseEventKind};

use super::state::MessagesState;

/// Lines scrolled per mouse wheel tick, before acceleration.
const MOUSE_SCROLL_LINES: usize = 1;

/// Feeds a mouse event into the wheel accumulator.
pub fn handle_mouse_event(messages: &mut MessagesState, event: &MouseEvent) {
    match event.kind {
        MouseEventKind::ScrollUp => messages.wheel.add(-(MOUSE_SCROLL_LINES as i32)),
        MouseEventKind::ScrollDown => messages.wheel.add(MOUSE_SCROLL_LINES as i32),
        _ => {}
    }
}

/// Applies the scroll delta accumulated since the last frame.
pub fn apply_scroll_delta(messages: &mut MessagesState) {
    let delta = messages.wheel.take();
    if delta == 0 {
        return;
    }

    let lines = delta.unsigned_abs() as usize;
    if delta < 0 {
        messages.scroll_up(lines);
    } else {
        messages.scroll_down(lines);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyModifiers, MouseButton};

    use super::*;
    use crate::features::messages::ScrollMode;

    fn wheel(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_apply_scroll_delta_with_acceleration() {
        let mut messages = MessagesState::new();
        messages.update_layout(80, 20);
        messages.set_line_count(100);

        // Three wheel ticks within one frame coalesce into a single step
        handle_mouse_event(&mut messages, &wheel(MouseEventKind::ScrollUp));
        handle_mouse_event(&mut messages, &wheel(MouseEventKind::ScrollUp));
        handle_mouse_event(&mut messages, &wheel(MouseEventKind::ScrollUp));
        apply_scroll_delta(&mut messages);

        // Follow offset was 80; one accelerated step up anchors at 79
        assert_eq!(messages.scroll.mode, ScrollMode::Anchored { line: 79 });
    }

    #[test]
    fn scroll_down_past_bottom_returns_to_follow() {
        let mut messages = MessagesState::new();
        messages.update_layout(80, 20);
        messages.set_line_count(100);
        messages.scroll.mode = ScrollMode::Anchored { line: 79 };

        handle_mouse_event(&mut messages, &wheel(MouseEventKind::ScrollDown));
        apply_scroll_delta(&mut messages);

        assert!(messages.scroll.is_following());
    }

    #[test]
    fn non_wheel_mouse_events_are_ignored() {
        let mut messages = MessagesState::new();
        messages.update_layout(80, 20);
        messages.set_line_count(100);

        handle_mouse_event(&mut messages, &wheel(MouseEventKind::Down(MouseButton::Left)));
        apply_scroll_delta(&mut messages);

        assert!(messages.scroll.is_following());
    }

    #[test]
    fn empty_accumulator_is_a_noop() {
        let mut messages = MessagesState::new();
        messages.update_layout(80, 20);
        messages.set_line_count(100);

        apply_scroll_delta(&mut messages);

        assert!(messages.scroll.is_following());
    }
}
