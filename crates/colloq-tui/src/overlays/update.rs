//! Overlay key routing.

use crossterm::event::KeyEvent;

use super::{Overlay, OverlayUpdate};
use crate::state::PageState;

/// Routes a key press to the active overlay.
///
/// Returns `None` when no overlay is active, so the caller falls through to
/// the main key handler. The returned update is applied by the reducer.
pub fn handle_overlay_key(
    page: &PageState,
    overlay: &mut Option<Overlay>,
    key: KeyEvent,
) -> Option<OverlayUpdate> {
    overlay.as_mut().map(|active| active.handle_key(page, key))
}

#[cfg(test)]
mod tests {
    use colloq_core::config::Config;
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::overlays::UploadDialogState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_returns_none_without_active_overlay() {
        let page = PageState::new(Config::default());
        let mut overlay = None;

        assert!(handle_overlay_key(&page, &mut overlay, key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_routes_keys_to_active_overlay() {
        let page = PageState::new(Config::default());
        let mut overlay = Some(Overlay::Upload(UploadDialogState::open().0));

        let update = handle_overlay_key(&page, &mut overlay, key(KeyCode::Char('a')))
            .expect("overlay should consume the key");

        assert!(!update.closed);
        match &overlay {
            Some(Overlay::Upload(dialog)) => assert_eq!(dialog.input, "a"),
            other => panic!("expected upload dialog, got {other:?}"),
        }
    }

    #[test]
    fn test_escape_requests_close() {
        let page = PageState::new(Config::default());
        let mut overlay = Some(Overlay::Upload(UploadDialogState::open().0));

        let update = handle_overlay_key(&page, &mut overlay, key(KeyCode::Esc))
            .expect("overlay should consume the key");

        assert!(update.closed);
    }
}
