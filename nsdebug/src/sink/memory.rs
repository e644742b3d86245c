//! In-memory sink capturing every call.

use std::sync::{Arc, Mutex, PoisonError};

use super::Sink;
use crate::arg::Arg;
use crate::error::SinkError;

/// Sink recording the raw argument list of each call.
///
/// Clones share the same record, so one handle can be given to a context
/// and another kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    calls: Arc<Mutex<Vec<Vec<Arg>>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<Vec<Arg>> {
        self.lock().clone()
    }

    /// Each recorded call rendered to a line, without colors.
    pub fn lines(&self) -> Vec<String> {
        self.lock()
            .iter()
            .map(|args| super::render_line(args, false))
            .collect()
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Take the recorded calls and reset.
    pub fn take(&self) -> Vec<Vec<Arg>> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<Arg>>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for MemorySink {
    fn write(&self, args: &[Arg]) -> Result<(), SinkError> {
        self.lock().push(args.to_vec());
        Ok(())
    }
}
