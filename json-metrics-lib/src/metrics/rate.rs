use super::FlatMetrics;
use crate::snapshot::SnapshotStore;
use regex::Regex;

const LOG_TARGET: &str = "      rate";

/// Longest gap between two runs, in seconds, over which a rate is still computed.
pub const MAX_RATE_INTERVAL_SECS: i64 = 600;

/// Convert cumulative counters into per-minute rates.
///
/// Every path in `current` that matches `diff` is replaced by
/// `(current - previous) * 60 / elapsed`, using the snapshot held by `store`. A path
/// becomes 0 when there is no previous value, when no time has elapsed, when the gap
/// exceeds [`MAX_RATE_INTERVAL_SECS`], or when the counter went down (a reset). Paths
/// not matching `diff` are returned unchanged.
///
/// The raw `current` values are persisted as the new snapshot before any rewriting.
/// Failing to persist is logged and does not affect the result.
#[must_use]
pub fn calc_diff(mut current: FlatMetrics, timestamp: i64, store: &SnapshotStore, diff: &Regex) -> FlatMetrics {
    let last = store.load();

    let mut elapsed = timestamp.saturating_sub(last.last_timestamp);
    if last.last_timestamp != 0 && elapsed > MAX_RATE_INTERVAL_SECS {
        log::warn!(target: LOG_TARGET, "Too long duration since last run ({elapsed}s), not computing rates");
        elapsed = 0;
    }

    if let Err(e) = store.save(timestamp, &current) {
        log::warn!(target: LOG_TARGET, "Couldn't save values: {e:#}");
    }

    for (path, value) in current.iter_mut().filter(|(path, _)| diff.is_match(path)) {
        *value = match last.metrics.get(path) {
            Some(previous) if elapsed > 0 => {
                #[expect(clippy::cast_precision_loss, reason = "elapsed seconds are far below 2^52")]
                let rate = (*value - previous) * 60.0 / elapsed as f64;
                if rate >= 0.0 {
                    rate
                } else {
                    log::warn!(target: LOG_TARGET, "Counter {path} seems to be reset");
                    0.0
                }
            }
            _ => 0.0,
        };
    }

    current
}
