//! Output sinks receiving the console arguments of each emission.

mod console;
mod memory;

pub use console::{ConsoleSink, render_line};
pub use memory::MemorySink;

use std::io::{self, IsTerminal};

use crate::arg::Arg;
use crate::error::SinkError;

/// Trait for the host logging function.
///
/// Receives a variable-length argument list; a leading string is a
/// format string the sink may interpret.
pub trait Sink: Send + Sync {
    /// Write one call's arguments.
    fn write(&self, args: &[Arg]) -> Result<(), SinkError>;
}

/// Any closure over the argument list is a sink.
impl<F> Sink for F
where
    F: Fn(&[Arg]) + Send + Sync,
{
    fn write(&self, args: &[Arg]) -> Result<(), SinkError> {
        self(args);
        Ok(())
    }
}

/// What the host console can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether `%c` styles are rendered.
    pub styles: bool,
}

impl Capabilities {
    /// Probe stderr: styles need a terminal, no `NO_COLOR` and a non-dumb `TERM`.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let dumb = std::env::var("TERM").is_ok_and(|term| term == "dumb");

        Self {
            styles: !no_color && !dumb && io::stderr().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_closure_sink() {
        let calls = AtomicUsize::new(0);
        let sink = |args: &[Arg]| {
            calls.fetch_add(args.len(), Ordering::SeqCst);
        };
        sink.write(&[Arg::from("a"), Arg::from(1)]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
