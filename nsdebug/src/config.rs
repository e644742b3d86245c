//! Context configuration.

use serde::{Deserialize, Serialize};

use crate::format::ModeSelection;
use crate::storage::DEFAULT_STORAGE_KEY;

/// Settings for a [`DebugContext`](crate::DebugContext).
///
/// Every field has a default, so partial documents deserialize:
///
/// ```json
/// { "mode": "plain", "filter": "app:*,-app:noisy" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key the filter string is persisted under.
    pub storage_key: String,

    /// Output mode selection.
    pub mode: ModeSelection,

    /// Filter applied at startup instead of the persisted one.
    pub filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            mode: ModeSelection::Auto,
            filter: None,
        }
    }
}
