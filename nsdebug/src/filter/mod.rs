//! Filter layer deciding which channels produce output.
//!
//! A filter string is split into allow and deny globs, each compiled
//! into an anchored matcher over channel names.

mod pattern;
mod registry;
mod spec;

pub use pattern::{NameMatcher, Pattern, glob_to_regex};
pub use registry::FilterRegistry;
pub use spec::{DENY_PREFIX, FilterSpec, FilterToken};
