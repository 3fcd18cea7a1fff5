//! Exchange lifecycle event types.
//!
//! This module defines the contract between the exchange runtime and the UI.
//! Exactly three lifecycle kinds exist, and they arrive in dispatch order on
//! a single stream, so handlers can be tested by constructing events directly
//! instead of running a real exchange.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known element identifiers from the page model.
pub mod ids {
    /// The upload dialog.
    pub const UPLOAD_MODAL: &str = "uploadModal";
    /// The message transcript region; swap target for chat responses.
    pub const MESSAGES: &str = "messages";

    /// The chat form and its controls.
    pub const CHAT_FORM: &str = "chatForm";
    pub const CHAT_INPUT: &str = "chatInput";
    pub const SEND_BUTTON: &str = "sendButton";

    /// The upload form and its controls.
    pub const UPLOAD_FORM: &str = "uploadForm";
    pub const FILE_INPUT: &str = "fileInput";
    pub const UPLOAD_BUTTON: &str = "uploadButton";
}

/// Identifier of a page element (a form, a control, a region).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Lifecycle events for one exchange.
///
/// `before_request` always comes first. A successful exchange swaps content
/// and fires `after_swap` before `after_request`; a failed exchange skips the
/// swap and goes straight to `after_request` with `successful = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExchangeEvent {
    /// An exchange is about to be dispatched for the triggering element.
    BeforeRequest { elt: ElementId },

    /// Content was swapped into the named target region.
    AfterSwap { target: ElementId },

    /// The exchange completed. Carries the same triggering element as the
    /// matching `before_request` and whether the exchange succeeded.
    AfterRequest { elt: ElementId, successful: bool },
}

impl ExchangeEvent {
    /// The triggering element, for the two kinds that carry one.
    pub fn elt(&self) -> Option<&ElementId> {
        match self {
            ExchangeEvent::BeforeRequest { elt } | ExchangeEvent::AfterRequest { elt, .. } => {
                Some(elt)
            }
            ExchangeEvent::AfterSwap { .. } => None,
        }
    }
}
