//! Channel layer: named handles and their colors.

mod color;
mod handle;

pub use color::{BLACK_STYLE, Color, ColorCycle, PALETTE};
pub use handle::{Channel, NAMESPACE_DELIMITER};
