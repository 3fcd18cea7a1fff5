//! Exchange lifecycle: typed events plus the in-process demo driver.
//!
//! An exchange is one asynchronous request/response cycle. The driver runs
//! it on a spawned task and reports progress as a stream of [`DriverEvent`]s;
//! the [`events::ExchangeEvent`] union inside that stream is the lifecycle
//! contract UI handlers react to.

pub mod driver;
pub mod events;

pub use driver::{DriverEvent, ExchangeRequest};
pub use events::{ElementId, ExchangeEvent};
