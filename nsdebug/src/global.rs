//! Process-wide default context behind the free functions.

use std::sync::LazyLock;

use crate::channel::Channel;
use crate::context::{DebugBuilder, DebugContext};
use crate::storage::EnvStorage;

/// Reads its startup filter from `DEBUG` and writes to the default stderr sink.
static GLOBAL: LazyLock<DebugContext> = LazyLock::new(|| {
    DebugBuilder::new()
        .storage(EnvStorage::default())
        .build()
});

/// The process-wide default context.
pub fn global() -> &'static DebugContext {
    &GLOBAL
}

/// Create a channel on the global context.
pub fn create(name: impl Into<String>) -> Channel {
    global().create(name)
}

/// Replace the global filter.
///
/// The environment store is read-only, so this lasts for the process only.
pub fn enable(spec: &str) {
    global().enable(spec);
}

/// Disable every channel created from now on.
pub fn disable() {
    global().disable();
}

/// Check if a name is enabled on the global context.
pub fn is_enabled(name: &str) -> bool {
    global().is_enabled(name)
}
