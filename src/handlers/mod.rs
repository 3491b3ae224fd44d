//! HTTP handlers for the item pages.

pub mod items;
pub use items::*;
