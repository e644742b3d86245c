//! Short human-readable durations for the elapsed-time suffix.

use std::time::Duration;

const SECOND: u64 = 1000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Humanize a millisecond count.
///
/// Hours and minutes keep one decimal with ties rounded up, seconds are
/// truncated.
///
/// ```
/// assert_eq!(nsdebug::humanize(500), "500ms");
/// assert_eq!(nsdebug::humanize(1500), "1s");
/// assert_eq!(nsdebug::humanize(65_000), "1.1m");
/// assert_eq!(nsdebug::humanize(7_200_000), "2.0h");
/// ```
pub fn humanize(ms: u64) -> String {
    if ms >= HOUR {
        format!("{}h", tenths(ms, HOUR))
    } else if ms >= MINUTE {
        format!("{}m", tenths(ms, MINUTE))
    } else if ms >= SECOND {
        format!("{}s", ms / SECOND)
    } else {
        format!("{}ms", ms)
    }
}

/// `ms / unit` to one decimal, rounding half up in integer arithmetic.
fn tenths(ms: u64, unit: u64) -> String {
    let unit = u128::from(unit);
    let tenths = (u128::from(ms) * 10 + unit / 2) / unit;
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Humanize a [`Duration`], saturating at `u64::MAX` milliseconds.
pub fn humanize_duration(elapsed: Duration) -> String {
    humanize(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
