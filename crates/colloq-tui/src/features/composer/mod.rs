//! Composer feature slice.
//!
//! Single-line prompt editor with readline-style bindings and command history.
//!
//! ## Module Structure
//!
//! - `state.rs`: ComposerState (text, cursor, history navigation)
//! - `update.rs`: Main-screen key routing
//! - `render.rs`: Composer box rendering

pub mod render;
pub mod state;
pub mod update;

pub use state::ComposerState;
pub use update::{ComposerContext, handle_main_key, handle_paste};
