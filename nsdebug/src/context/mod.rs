//! The debug context owning filter, channel state and output.
//!
//! A context is built once (see [`DebugBuilder`]) and shared by every
//! channel it creates. Tests build a fresh one each to stay isolated.

mod builder;

pub use builder::DebugBuilder;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use log::{debug, trace};

use crate::arg::Arg;
use crate::channel::{Channel, Color, ColorCycle};
use crate::clock::Clock;
use crate::error::{Result, SinkError};
use crate::filter::{FilterRegistry, FilterSpec, Pattern};
use crate::format::{Emission, OutputMode};
use crate::sink::Sink;
use crate::storage::Storage;

/// State shared between a context and its channels.
pub(crate) struct Shared {
    filter: RwLock<FilterRegistry>,

    /// Last emission per channel name, in first-emission order.
    timestamps: Mutex<IndexMap<String, Instant>>,

    colors: ColorCycle,
    storage: Option<Box<dyn Storage>>,
    storage_key: String,
    sink: Option<Arc<dyn Sink>>,
    mode: Arc<dyn OutputMode>,
    clock: Arc<dyn Clock>,
}

impl Shared {
    fn read_filter(&self) -> RwLockReadGuard<'_, FilterRegistry> {
        self.filter.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_filter(&self) -> RwLockWriteGuard<'_, FilterRegistry> {
        self.filter.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn is_enabled(&self, name: &str) -> bool {
        self.read_filter().is_enabled(name)
    }

    pub(crate) fn next_color(&self) -> Color {
        self.colors.next_color()
    }

    /// Record an emission and return the time since the previous one.
    fn tick(&self, name: &str) -> Duration {
        let now = self.clock.now();
        let mut timestamps = self.timestamps.lock().unwrap_or_else(PoisonError::into_inner);

        match timestamps.get_mut(name) {
            Some(previous) => {
                let elapsed = now.saturating_duration_since(*previous);
                *previous = now;
                elapsed
            }
            None => {
                timestamps.insert(name.to_string(), now);
                Duration::ZERO
            }
        }
    }

    /// Format and write one call of an enabled channel.
    pub(crate) fn emit(&self, name: &str, color: Color, args: Vec<Arg>) {
        let elapsed = self.tick(name);
        let emission = Emission {
            name,
            color,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        };

        if let Err(e) = self.write(&emission, args) {
            trace!("channel '{}' output dropped: {}", name, e);
        }
    }

    fn write(&self, emission: &Emission<'_>, args: Vec<Arg>) -> std::result::Result<(), SinkError> {
        let sink = self.sink.as_ref().ok_or(SinkError::Missing)?;
        sink.write(&self.mode.render(emission, args))
    }
}

/// Entry point for creating channels and controlling the filter.
#[derive(Clone)]
pub struct DebugContext {
    shared: Arc<Shared>,
}

impl DebugContext {
    /// Start building a context.
    pub fn builder() -> DebugBuilder {
        DebugBuilder::new()
    }

    pub(crate) fn from_parts(
        storage_key: String,
        storage: Option<Box<dyn Storage>>,
        sink: Option<Arc<dyn Sink>>,
        mode: Arc<dyn OutputMode>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        debug!("debug context: {} output", mode.name());
        Self {
            shared: Arc::new(Shared {
                filter: RwLock::new(FilterRegistry::new()),
                timestamps: Mutex::new(IndexMap::new()),
                colors: ColorCycle::new(),
                storage,
                storage_key,
                sink,
                mode,
                clock,
            }),
        }
    }

    /// Create a channel. Whether it is enabled is decided now, once.
    pub fn create(&self, name: impl Into<String>) -> Channel {
        Channel::new(name.into(), Arc::clone(&self.shared))
    }

    /// Replace the filter and persist the raw string, best effort.
    pub fn enable(&self, spec: &str) {
        self.shared.write_filter().enable(spec);

        if let Err(e) = self.persist(spec) {
            trace!("filter not persisted: {}", e);
        }
    }

    /// Disable every channel created from now on. Same as `enable("")`.
    pub fn disable(&self) {
        self.enable("");
    }

    /// Check if a channel name would be enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.shared.is_enabled(name)
    }

    /// Compiled allow patterns.
    pub fn names(&self) -> Vec<Pattern> {
        self.shared.read_filter().names().to_vec()
    }

    /// Compiled deny patterns.
    pub fn skips(&self) -> Vec<Pattern> {
        self.shared.read_filter().skips().to_vec()
    }

    /// The filter currently in effect.
    pub fn filter(&self) -> FilterSpec {
        self.shared.read_filter().spec().clone()
    }

    /// Name of the output mode in use ("styled" or "plain").
    pub fn mode_name(&self) -> &'static str {
        self.shared.mode.name()
    }

    /// Names of channels that have emitted, in order of first emission.
    pub fn channels(&self) -> Vec<String> {
        self.shared
            .timestamps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Read the persisted filter string, if any.
    pub(crate) fn load_persisted(&self) -> Option<String> {
        let storage = self.shared.storage.as_ref()?;
        match storage.load(&self.shared.storage_key) {
            Ok(value) => value,
            Err(e) => {
                trace!("persisted filter unavailable: {}", e);
                None
            }
        }
    }

    fn persist(&self, spec: &str) -> Result<()> {
        if let Some(storage) = &self.shared.storage {
            storage.store(&self.shared.storage_key, spec)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DebugContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugContext")
            .field("filter", &self.filter().raw().to_string())
            .field("mode", &self.mode_name())
            .field("storage_key", &self.shared.storage_key)
            .field("sink", &self.shared.sink.as_ref().map(|_| "<Sink>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::format::ModeSelection;
    use crate::sink::MemorySink;
    use crate::storage::{EnvStorage, MemoryStorage, Unavailable};

    fn plain(storage: MemoryStorage, sink: MemorySink, clock: ManualClock) -> DebugContext {
        DebugBuilder::new()
            .storage(storage)
            .sink(sink)
            .clock(clock)
            .mode(ModeSelection::Plain)
            .build()
    }

    #[test]
    fn test_startup_reads_persisted_filter() {
        let storage = MemoryStorage::with_value("debug", "a:*,-a:secret");
        let debug = plain(storage, MemorySink::new(), ManualClock::new());

        assert!(debug.is_enabled("a:foo"));
        assert!(!debug.is_enabled("a:secret"));
        assert!(!debug.is_enabled("b:foo"));
    }

    #[test]
    fn test_startup_without_persisted_filter() {
        let debug = plain(MemoryStorage::new(), MemorySink::new(), ManualClock::new());
        assert!(!debug.is_enabled("a"));
        assert!(debug.names().is_empty());
    }

    #[test]
    fn test_unavailable_storage_is_silent() {
        let sink = MemorySink::new();
        let debug = DebugBuilder::new()
            .storage(Unavailable)
            .sink(sink.clone())
            .mode(ModeSelection::Plain)
            .build();
        assert!(!debug.is_enabled("a"));

        debug.enable("a");
        assert!(debug.is_enabled("a"));
        debug.create("a").log(["still works"]);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_startup_reads_env_filter() {
        let var = "NSDEBUG_TEST_CONTEXT_ENV_FILTER";
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var(var, "worker:*,-worker:noisy") };

        let sink = MemorySink::new();
        let debug = DebugBuilder::new()
            .storage(EnvStorage::new(var))
            .sink(sink.clone())
            .mode(ModeSelection::Plain)
            .build();

        assert!(debug.is_enabled("worker:queue"));
        assert!(!debug.is_enabled("worker:noisy"));
        assert_eq!(debug.filter().raw(), "worker:*,-worker:noisy");

        // Writing back to a read-only store is ignored
        debug.enable("other");
        assert!(debug.is_enabled("other"));
        debug.create("other").log(["ok"]);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_enable_persists_raw_spec() {
        let storage = MemoryStorage::new();
        let debug = plain(storage.clone(), MemorySink::new(), ManualClock::new());

        debug.enable("  a:* , -a:secret ");
        assert_eq!(storage.get("debug").as_deref(), Some("  a:* , -a:secret "));

        debug.disable();
        assert_eq!(storage.get("debug").as_deref(), Some(""));
    }

    #[test]
    fn test_custom_storage_key() {
        let storage = MemoryStorage::with_value("trace", "x");
        let debug = DebugBuilder::new()
            .storage(storage.clone())
            .storage_key("trace")
            .no_sink()
            .build();
        assert!(debug.is_enabled("x"));

        debug.enable("y");
        assert_eq!(storage.get("trace").as_deref(), Some("y"));
        assert_eq!(storage.get("debug"), None);
    }

    #[test]
    fn test_explicit_filter_overrides_storage() {
        let storage = MemoryStorage::with_value("debug", "a");
        let debug = DebugBuilder::new()
            .storage(storage.clone())
            .filter("b")
            .no_sink()
            .build();
        assert!(!debug.is_enabled("a"));
        assert!(debug.is_enabled("b"));
        assert_eq!(storage.get("debug").as_deref(), Some("b"));
    }

    #[test]
    fn test_disable_matches_empty_enable() {
        let debug = plain(MemoryStorage::new(), MemorySink::new(), ManualClock::new());
        debug.enable("*");
        debug.disable();
        assert!(!debug.is_enabled("anything"));

        debug.enable("*");
        debug.enable("");
        assert!(!debug.is_enabled("anything"));
        assert!(debug.names().is_empty() && debug.skips().is_empty());
    }

    #[test]
    fn test_elapsed_first_zero_then_gap() {
        let sink = MemorySink::new();
        let clock = ManualClock::new();
        let debug = plain(MemoryStorage::with_value("debug", "*"), sink.clone(), clock.clone());

        let log = debug.create("worker");
        log.log(["start"]);
        clock.advance(Duration::from_millis(1500));
        log.log(["done"]);

        assert_eq!(sink.lines(), vec!["worker start +0ms", "worker done +1s"]);
    }

    #[test]
    fn test_timestamps_are_per_name() {
        let sink = MemorySink::new();
        let clock = ManualClock::new();
        let debug = plain(MemoryStorage::with_value("debug", "*"), sink.clone(), clock.clone());

        let a = debug.create("a");
        let b = debug.create("b");
        a.log(["one"]);
        clock.advance(Duration::from_millis(40));
        b.log(["two"]);
        clock.advance(Duration::from_millis(60));
        a.log(["three"]);

        assert_eq!(sink.lines(), vec!["a one +0ms", "b two +0ms", "a three +100ms"]);
        assert_eq!(debug.channels(), vec!["a", "b"]);
    }

    #[test]
    fn test_same_name_shares_timestamp() {
        let sink = MemorySink::new();
        let clock = ManualClock::new();
        let debug = plain(MemoryStorage::with_value("debug", "*"), sink.clone(), clock.clone());

        debug.create("a").log(["first"]);
        clock.advance(Duration::from_millis(5));
        debug.create("a").log(["second"]);

        assert_eq!(sink.lines()[1], "a second +5ms");
    }

    #[test]
    fn test_elapsed_with_system_clock() {
        let sink = MemorySink::new();
        let debug = DebugBuilder::new()
            .filter("*")
            .sink(sink.clone())
            .mode(ModeSelection::Plain)
            .build();

        let log = debug.create("wall");
        log.log(["a"]);
        std::thread::sleep(Duration::from_millis(20));
        log.log(["b"]);

        let lines = sink.lines();
        assert_eq!(lines[0], "wall a +0ms");
        let ms: u64 = lines[1]
            .strip_prefix("wall b +")
            .and_then(|s| s.strip_suffix("ms"))
            .unwrap()
            .parse()
            .unwrap();
        assert!((20..1000).contains(&ms));
    }

    #[test]
    fn test_no_sink_is_silent() {
        let debug = DebugBuilder::new().filter("*").no_sink().build();
        debug.create("a").log(["nowhere"]);
        assert_eq!(debug.channels(), vec!["a"]);
    }

    #[test]
    fn test_missing_sink_is_reported() {
        let debug = DebugBuilder::new().filter("*").no_sink().build();
        let emission = Emission {
            name: "a",
            color: crate::channel::PALETTE[0],
            elapsed_ms: 0,
        };
        let err = debug
            .shared
            .write(&emission, vec![Arg::from("x")])
            .unwrap_err();
        assert!(matches!(err, SinkError::Missing));
    }

    #[test]
    fn test_capabilities_pick_mode() {
        use crate::sink::Capabilities;

        let styled = DebugBuilder::new()
            .capabilities(Capabilities { styles: true })
            .no_sink()
            .build();
        let plain = DebugBuilder::new()
            .capabilities(Capabilities { styles: false })
            .no_sink()
            .build();
        assert_eq!(styled.mode_name(), "styled");
        assert_eq!(plain.mode_name(), "plain");
    }
}
