//! UI event types.
//!
//! ## Inbox Pattern
//!
//! All async results funnel through a single unbounded inbox channel that the
//! runtime drains once per loop iteration. The reducer only ever sees plain
//! `UiEvent` values; it never awaits anything. An in-flight exchange carries
//! its own receiver inside [`crate::state::ExchangeState`], and the runtime
//! forwards whatever is buffered there as `UiEvent::Exchange` values, in
//! emission order.

use colloq_core::exchange::DriverEvent;

use crate::runtime::inbox::DriverEventReceiver;

/// Events consumed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Fixed-cadence animation tick.
    Tick,

    /// Start of a loop iteration; carries the current terminal size.
    Frame { width: u16, height: u16 },

    /// Raw terminal input (keys, mouse, paste, resize).
    Terminal(crossterm::event::Event),

    /// The runtime spawned an exchange; the receiver yields its progress.
    ExchangeSpawned { rx: DriverEventReceiver },

    /// Progress reported by the in-flight exchange.
    Exchange(DriverEvent),
}
