//! UI effect types.
//!
//! The reducer stays pure by returning effects instead of performing I/O.
//! The runtime executes them after `update` returns; spawned work reports
//! back through `UiEvent`s on the inbox.

use colloq_core::exchange::ExchangeRequest;

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Exit the application.
    Quit,

    /// Run an exchange for a submitted form request. The runtime spawns the
    /// driver and answers with `UiEvent::ExchangeSpawned`.
    StartExchange { request: ExchangeRequest },
}
