//! Builder for creating debug contexts.

use std::sync::Arc;

use super::DebugContext;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::format::ModeSelection;
use crate::sink::{Capabilities, ConsoleSink, Sink};
use crate::storage::Storage;

/// Builder for constructing a [`DebugContext`].
///
/// # Example
///
/// ```rust
/// use nsdebug::{DebugBuilder, MemorySink, MemoryStorage, ModeSelection};
///
/// let sink = MemorySink::new();
/// let debug = DebugBuilder::new()
///     .storage(MemoryStorage::with_value("debug", "app:*"))
///     .sink(sink.clone())
///     .mode(ModeSelection::Plain)
///     .build();
///
/// let log = debug.create("app:db");
/// log.log(["connected to %s", "primary"]);
/// assert_eq!(sink.lines(), vec!["app:db connected to primary +0ms"]);
/// ```
pub struct DebugBuilder {
    config: Config,
    storage: Option<Box<dyn Storage>>,
    /// `None` until set; resolved to a stderr sink in `build`.
    sink: Option<Option<Arc<dyn Sink>>>,
    capabilities: Option<Capabilities>,
    clock: Arc<dyn Clock>,
}

impl DebugBuilder {
    /// Create a builder with no storage and the system clock.
    ///
    /// Unless [`sink`](Self::sink) or [`no_sink`](Self::no_sink) is called,
    /// `build` attaches a stderr sink.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            storage: None,
            sink: None,
            capabilities: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the key the filter string is persisted under (default: "debug").
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Set the persistence store.
    pub fn storage(mut self, storage: impl Storage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Set the output sink.
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Some(Arc::new(sink)));
        self
    }

    /// Drop the output sink; enabled channels then write nowhere.
    pub fn no_sink(mut self) -> Self {
        self.sink = Some(None);
        self
    }

    /// Set the output mode selection (default: auto).
    pub fn mode(mut self, mode: ModeSelection) -> Self {
        self.config.mode = mode;
        self
    }

    /// Use these capabilities instead of probing the terminal.
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Set the time source.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Apply this filter at startup instead of the persisted one.
    pub fn filter(mut self, spec: impl Into<String>) -> Self {
        self.config.filter = Some(spec.into());
        self
    }

    /// Build the context and apply the startup filter.
    ///
    /// The explicit filter wins; otherwise the persisted string is read.
    /// A store that cannot be read leaves every channel disabled.
    pub fn build(self) -> DebugContext {
        let capabilities = self.capabilities.unwrap_or_else(Capabilities::detect);
        let mode = self.config.mode.resolve(capabilities);
        let sink = match self.sink {
            Some(sink) => sink,
            None => {
                let stderr: Arc<dyn Sink> = Arc::new(ConsoleSink::stderr());
                Some(stderr)
            }
        };

        let context = DebugContext::from_parts(
            self.config.storage_key,
            self.storage,
            sink,
            mode,
            self.clock,
        );

        let initial = match self.config.filter {
            Some(spec) => Some(spec),
            None => context.load_persisted(),
        };
        if let Some(spec) = initial {
            context.enable(&spec);
        }

        context
    }
}

impl Default for DebugBuilder {
    fn default() -> Self {
        Self::new()
    }
}
