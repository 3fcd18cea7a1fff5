//! Messages feature slice.
//!
//! The scrollable chat transcript: message list, scroll physics, rendering.
//!
//! ## Module Structure
//!
//! - `state.rs`: MessagesState plus ScrollState/WheelAccumulator
//! - `update.rs`: Mouse wheel handling and per-frame scroll application
//! - `render.rs`: Transcript line building and line counting

pub mod render;
pub mod state;
pub mod update;

pub use state::{MessagesState, ScrollMode, ScrollState, WheelAccumulator};
pub use update::{apply_scroll_delta, handle_mouse_event};
