pub mod prompt;
pub mod summary;
pub mod theme;

pub use theme::{Icon, Theme};
