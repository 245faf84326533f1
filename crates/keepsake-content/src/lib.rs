//! Keepsake — screen content.
//!
//! Holds the stock text of every screen and lets a YAML document override
//! any section of it.

mod catalog;
mod error;

pub use catalog::{INTRO_SCREEN_COUNT, ScreenCatalog};
pub use error::ContentError;
