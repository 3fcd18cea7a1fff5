//! Inbox channel types.
//!
//! Each spawned exchange gets a fresh channel pair: the driver keeps the
//! sending half, the receiving half rides inside
//! [`crate::state::ExchangeState::InFlight`] until the exchange completes.
//! The runtime drains the receiver once per loop iteration, so driver
//! progress reaches the reducer as ordinary events.

use colloq_core::exchange::DriverEvent;
use tokio::sync::mpsc;

/// Sending half, owned by the spawned driver task.
pub type DriverEventSender = mpsc::UnboundedSender<DriverEvent>;

/// Receiving half, carried in page state while an exchange is in flight.
pub type DriverEventReceiver = mpsc::UnboundedReceiver<DriverEvent>;

/// Creates the channel pair for one exchange.
pub fn channel() -> (DriverEventSender, DriverEventReceiver) {
    mpsc::unbounded_channel()
}
