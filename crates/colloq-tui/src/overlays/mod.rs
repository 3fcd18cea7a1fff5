//! Modal overlays.
//!
//! An overlay captures the keyboard while it is up; the page underneath
//! keeps rendering and keeps receiving driver events. `upload.rs` holds
//! the one dialog colloq has, `update.rs` routes keys to whichever
//! overlay is active.

mod update;
pub mod upload;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use update::handle_overlay_key;
pub use upload::UploadDialogState;

use crate::effects::UiEffect;
use crate::state::PageState;

/// Which overlay the page wants opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    Upload,
}

/// Outcome of routing one key through the active overlay.
#[derive(Debug)]
pub struct OverlayUpdate {
    /// True once the overlay is finished and should be dismissed.
    pub closed: bool,
    /// Effects for the runtime, in order.
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            closed: false,
            effects: Vec::new(),
        }
    }

    pub fn close() -> Self {
        Self {
            closed: true,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Upload(UploadDialogState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, composer_top: u16) {
        match self {
            Overlay::Upload(dialog) => dialog.render(frame, area, composer_top),
        }
    }

    pub fn handle_key(&mut self, page: &PageState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Upload(dialog) => dialog.handle_key(page, key),
        }
    }
}

/// Lets `Option<Overlay>` render itself without a match at the call site.
pub trait OverlayExt {
    fn render(&self, frame: &mut Frame, area: Rect, composer_top: u16);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, composer_top: u16) {
        if let Some(overlay) = self {
            overlay.render(frame, area, composer_top);
        }
    }
}
