//! Request extractors.

pub mod flash;
pub use flash::{FlashLevel, FlashMessage, Flashes};
