//! Shared helpers used across rendering paths.

pub mod scrollbar;
pub mod text;

pub use scrollbar::Scrollbar;
pub use text::{truncate_start_with_ellipsis, truncate_with_ellipsis};
