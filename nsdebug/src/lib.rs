//! # nsdebug
//!
//! Namespaced debug logging, switched on at runtime by a filter string.
//!
//! Each channel has a name such as `app:db`. A filter like
//! `app:*,-app:noisy` decides which channels print; it is read from a
//! persistent store at startup and can be replaced at any time. Every
//! line ends with the time since the channel's previous line, and
//! channels get their own color when the output supports it.
//!
//! ## Features
//!
//! - Glob filters with deny rules (`-name`) that win over allow rules
//! - printf-style format strings (`%s %d %i %f %o %c`)
//! - Styled (colored) or plain output, picked from terminal capabilities
//! - Pluggable storage and sinks, plus a bridge for the `log` crate
//!
//! ## Quick Start
//!
//! ```rust
//! use nsdebug::{DebugBuilder, MemorySink, ModeSelection, emit};
//!
//! let sink = MemorySink::new();
//! let debug = DebugBuilder::new()
//!     .filter("worker:*")
//!     .sink(sink.clone())
//!     .mode(ModeSelection::Plain)
//!     .build();
//!
//! let log = debug.create("worker:queue");
//! emit!(log, "picked job %d from %s", 42, "high");
//!
//! let quiet = debug.create("http");
//! emit!(quiet, "never printed");
//!
//! assert_eq!(sink.lines(), vec!["worker:queue picked job 42 from high +0ms"]);
//! ```
//!
//! The free functions ([`create`], [`enable`], ...) use a global context
//! reading its filter from the `DEBUG` environment variable:
//!
//! ```rust,no_run
//! let log = nsdebug::create("app:startup");
//! nsdebug::emit!(log, "listening on %s", "0.0.0.0:8080");
//! ```

pub mod arg;
pub mod bridge;
pub mod channel;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod format;
mod global;
pub mod sink;
pub mod storage;

// Re-export main types for convenience
pub use arg::{Arg, ErrorArg};
pub use bridge::LogBridge;
pub use channel::{Channel, Color};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use context::{DebugBuilder, DebugContext};
pub use error::Error;
pub use filter::{FilterRegistry, FilterSpec, Pattern};
pub use format::{ModeSelection, humanize, humanize_duration};
pub use global::{create, disable, enable, global, is_enabled};
pub use sink::{Capabilities, ConsoleSink, MemorySink, Sink};
pub use storage::{EnvStorage, FileStorage, MemoryStorage, Storage};

/// Emit a message on a channel.
///
/// Arguments are converted with `Arg::from` and only evaluated when the
/// channel is enabled.
///
/// ```rust
/// # let debug = nsdebug::DebugBuilder::new().no_sink().build();
/// let log = debug.create("cache");
/// nsdebug::emit!(log, "hit rate %f", 0.93);
/// ```
#[macro_export]
macro_rules! emit {
    ($channel:expr, $($arg:expr),+ $(,)?) => {{
        let channel = &$channel;
        if channel.is_enabled() {
            channel.log([$($crate::Arg::from($arg)),+]);
        }
    }};
}
