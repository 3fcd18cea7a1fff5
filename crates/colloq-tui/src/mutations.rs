//! Mutations that cross feature boundaries.
//!
//! A reducer that wants to touch state outside its own slice returns one of
//! these instead of reaching over directly; `update` applies them in order
//! once the originating handler is done.

use colloq_core::message::Message;

/// A requested change to another slice's state.
#[derive(Debug, Clone, PartialEq)]
pub enum StateMutation {
    Messages(MessagesMutation),
}

/// Changes to the transcript pane.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagesMutation {
    Append(Message),
    ScrollToTop,
    ScrollToBottom,
    PageUp,
    PageDown,
}
