//! Effect handlers for the TUI runtime.
//!
//! Side effects triggered by the reducer live here. Handlers do NOT mutate
//! state directly; they spawn work and report back through events.

use colloq_core::exchange::ExchangeRequest;
use colloq_core::exchange::driver::run_exchange;

use crate::events::UiEvent;
use crate::runtime::inbox;
use crate::state::PageState;

/// Spawns one exchange on the async runtime.
///
/// The driver task gets the sending half of a fresh channel; the returned
/// event hands the receiving half to the reducer, which marks the page
/// in flight. The driver sees a snapshot of config and session taken at
/// spawn time.
pub fn spawn_exchange(page: &PageState, request: ExchangeRequest) -> UiEvent {
    let (tx, rx) = inbox::channel();

    let config = page.config.clone();
    let session = page.session.clone();

    tokio::spawn(async move {
        run_exchange(config, session, request, tx).await;
    });

    UiEvent::ExchangeSpawned { rx }
}
