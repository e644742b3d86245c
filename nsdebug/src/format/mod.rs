//! Formatting layer: elapsed-time text, format string parsing and output modes.

mod humanize;
mod mode;
mod printf;

pub use humanize::{humanize, humanize_duration};
pub use mode::{Emission, ModeSelection, OutputMode, PlainMode, StyledMode};
pub use printf::{FormatString, Placeholder, Segment, count_placeholders, escape};
