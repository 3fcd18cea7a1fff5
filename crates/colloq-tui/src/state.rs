//! Application state composition.
//!
//! This module defines the top-level state hierarchy for the TUI:
//! - `AppState` - combined state (`PageState` + overlay)
//! - `PageState` - non-overlay UI state (forms, messages, composer, exchange)
//! - `ExchangeState` - exchange execution state (idle or in flight)
//!
//! ## State Hierarchy
//!
//! ```text
//! AppState
//! ├── page: PageState
//! │   ├── chat_form: FormState     (submit control for the composer)
//! │   ├── upload_form: FormState   (submit control for the upload dialog)
//! │   ├── messages: MessagesState  (transcript, scroll, layout)
//! │   ├── composer: ComposerState  (prompt text, history)
//! │   ├── session: Option<Session> (established by a successful upload)
//! │   └── exchange: ExchangeState  (idle, in flight)
//! └── overlay: Option<Overlay>     (modal overlays)
//! ```
//!
//! ## Split State Architecture
//!
//! State is split between `PageState` (non-overlay) and `Option<Overlay>`:
//! - `PageState` contains all non-overlay UI state
//! - `Option<Overlay>` holds the active overlay if any
//! - `AppState` combines both for runtime use
//!
//! This allows overlay handlers to get `&mut self` and `&PageState` simultaneously.

use std::time::Instant;

use colloq_core::config::Config;
use colloq_core::exchange::events::{ElementId, ids};
use colloq_core::session::Session;

use crate::features::composer::ComposerState;
use crate::features::messages::MessagesState;
use crate::overlays::Overlay;
use crate::runtime::inbox::DriverEventReceiver;

// ============================================================================
// AppState (Combined State)
// ============================================================================

/// Combined application state for the TUI.
///
/// Combines `PageState` with `Option<Overlay>` to enable the split state
/// architecture where overlay handlers can access both without borrow conflicts.
pub struct AppState {
    pub page: PageState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Creates a new `AppState` with no overlay active.
    pub fn new(config: Config) -> Self {
        Self {
            page: PageState::new(config),
            overlay: None,
        }
    }
}

// ============================================================================
// ExchangeState
// ============================================================================

/// Exchange execution state.
///
/// Tracks the in-flight exchange and its event channel. The driver task
/// reports progress through the channel, ending with a final `after_request`.
#[derive(Debug)]
pub enum ExchangeState {
    /// No exchange running, ready for input.
    Idle,
    /// An exchange is running; driver events arrive on `rx`.
    InFlight {
        /// Receiver for driver events.
        rx: DriverEventReceiver,
        /// When the request was sent, for the elapsed display.
        started: Instant,
    },
}

impl ExchangeState {
    /// Returns true if an exchange is currently running.
    pub fn is_running(&self) -> bool {
        !matches!(self, ExchangeState::Idle)
    }
}

// ============================================================================
// Page structure
// ============================================================================

/// The forms on the page, each owning one submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormId {
    Chat,
    Upload,
}

/// Regions whose content an exchange can replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRegion {
    Messages,
}

/// Per-form control state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Whether the form's submit control accepts input.
    pub submit_enabled: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            submit_enabled: true,
        }
    }
}

/// Elements inside the chat form.
const CHAT_FORM_MEMBERS: [&str; 3] = [ids::CHAT_FORM, ids::CHAT_INPUT, ids::SEND_BUTTON];

/// Elements inside the upload form.
const UPLOAD_FORM_MEMBERS: [&str; 3] = [ids::UPLOAD_FORM, ids::FILE_INPUT, ids::UPLOAD_BUTTON];

/// The form that contains `elt`, if any.
///
/// Mirrors the page markup: lifecycle events carry the id of the element
/// that triggered them, and form-scoped reactions apply only when that
/// element sits inside a form.
pub fn enclosing_form(elt: &ElementId) -> Option<FormId> {
    if CHAT_FORM_MEMBERS.contains(&elt.as_str()) {
        Some(FormId::Chat)
    } else if UPLOAD_FORM_MEMBERS.contains(&elt.as_str()) {
        Some(FormId::Upload)
    } else {
        None
    }
}

/// The swappable region `target` names, if any.
pub fn swap_region(target: &ElementId) -> Option<SwapRegion> {
    if target.as_str() == ids::MESSAGES {
        Some(SwapRegion::Messages)
    } else {
        None
    }
}

// ============================================================================
// PageState
// ============================================================================

/// TUI application state (non-overlay).
///
/// This contains all state except for overlays. Overlays are stored separately
/// in `Option<Overlay>` and combined via `AppState` to enable the split state
/// architecture where overlay handlers can access both without borrow conflicts.
#[derive(Debug)]
pub struct PageState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Loaded configuration.
    pub config: Config,
    /// Active session, established by the most recent successful upload.
    pub session: Option<Session>,
    /// Chat form control state.
    pub chat_form: FormState,
    /// Upload form control state.
    pub upload_form: FormState,
    /// Transcript state (messages, scroll, layout).
    pub messages: MessagesState,
    /// Prompt composer state (text, cursor, history).
    pub composer: ComposerState,
    /// Current exchange state.
    pub exchange: ExchangeState,
    /// Detail of the most recent failed exchange, cleared when a new one starts.
    pub last_failure: Option<String>,
    /// Spinner animation frame counter (for the in-flight indicator).
    pub spinner_frame: usize,
}

impl PageState {
    /// Creates a fresh `PageState` with both submit controls enabled.
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            config,
            session: None,
            chat_form: FormState::default(),
            upload_form: FormState::default(),
            messages: MessagesState::new(),
            composer: ComposerState::new(),
            exchange: ExchangeState::Idle,
            last_failure: None,
            spinner_frame: 0,
        }
    }

    /// Mutable control state for `form`.
    pub fn form_mut(&mut self, form: FormId) -> &mut FormState {
        match form {
            FormId::Chat => &mut self.chat_form,
            FormId::Upload => &mut self.upload_form,
        }
    }

    /// Read-only control state for `form`.
    pub fn form(&self, form: FormId) -> &FormState {
        match form {
            FormId::Chat => &self.chat_form,
            FormId::Upload => &self.upload_form,
        }
    }
}
