//! Adapter routing `log` crate records into channels.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::arg::Arg;
use crate::channel::Channel;
use crate::context::DebugContext;
use crate::format::escape;

/// A `log::Log` implementation writing each record to the channel named
/// after its target.
///
/// Levels are ignored; the context's filter alone decides. A target's
/// channel is created on its first record, so its enabled state is fixed
/// from then on. Records from this crate are dropped to keep internal
/// diagnostics from feeding back into the output.
pub struct LogBridge {
    context: DebugContext,
    channels: Mutex<HashMap<String, Channel>>,
}

impl LogBridge {
    /// Create a bridge over a context.
    pub fn new(context: DebugContext) -> Self {
        Self {
            context,
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Install as the global logger with every level let through.
    pub fn install(self) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(LevelFilter::Trace);
        Ok(())
    }

    fn channel(&self, target: &str) -> Channel {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(target.to_string())
            .or_insert_with(|| self.context.create(target))
            .clone()
    }
}

fn is_internal(target: &str) -> bool {
    target
        .strip_prefix(env!("CARGO_CRATE_NAME"))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        let target = metadata.target();
        if is_internal(target) {
            return false;
        }

        let cached = self
            .channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(target)
            .map(Channel::is_enabled);
        cached.unwrap_or_else(|| self.context.is_enabled(target))
    }

    fn log(&self, record: &Record<'_>) {
        if is_internal(record.target()) {
            return;
        }

        // Lock released before emitting
        let channel = self.channel(record.target());
        if channel.is_enabled() {
            let message = record.args().to_string();
            channel.log([Arg::Str(escape(&message).into_owned())]);
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::context::DebugBuilder;
    use crate::format::ModeSelection;
    use crate::sink::MemorySink;
    use log::{Level, Log};

    fn bridge(filter: &str, sink: &MemorySink) -> LogBridge {
        let context = DebugBuilder::new()
            .filter(filter)
            .sink(sink.clone())
            .clock(ManualClock::new())
            .mode(ModeSelection::Plain)
            .build();
        LogBridge::new(context)
    }

    fn record<'a>(target: &'a str, args: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder()
            .target(target)
            .level(Level::Info)
            .args(args)
            .build()
    }

    fn metadata(target: &str) -> Metadata<'_> {
        Metadata::builder().target(target).level(Level::Debug).build()
    }

    #[test]
    fn test_records_go_to_target_channel() {
        let sink = MemorySink::new();
        let bridge = bridge("app::*", &sink);

        bridge.log(&record("app::db", format_args!("pool size {}", 4)));
        bridge.log(&record("other", format_args!("ignored")));

        assert_eq!(sink.lines(), vec!["app::db pool size 4 +0ms"]);
    }

    #[test]
    fn test_percent_in_message_is_literal() {
        let sink = MemorySink::new();
        let bridge = bridge("*", &sink);

        bridge.log(&record("app", format_args!("100%s done")));
        assert_eq!(sink.lines(), vec!["app 100%s done +0ms"]);
    }

    #[test]
    fn test_enabled_follows_filter() {
        let sink = MemorySink::new();
        let bridge = bridge("app*,-app::secret", &sink);

        assert!(bridge.enabled(&metadata("app::db")));
        assert!(!bridge.enabled(&metadata("app::secret")));
        assert!(!bridge.enabled(&metadata("nsdebug::context")));
    }

    #[test]
    fn test_internal_targets() {
        assert!(is_internal("nsdebug"));
        assert!(is_internal("nsdebug::storage"));
        assert!(!is_internal("nsdebugger"));
        assert!(!is_internal("app"));
    }
}
