//! Feature slices of the page, each with its own state/update/render files.

pub mod composer;
pub mod messages;
