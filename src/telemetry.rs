use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use serde::Serialize;

/// Point-in-time view of the request counters, serialized by the health
/// endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub scored: u64,
    pub rejected: u64,
    pub uptime: String,
}

/// Shared request counters. Purely observational: nothing on the scoring
/// path reads them, so relaxed atomics are sufficient.
#[derive(Debug)]
pub struct RequestStats {
    started_at: DateTime<Local>,
    scored: AtomicU64,
    rejected: AtomicU64,
}

impl RequestStats {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            scored: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    pub fn record_scored(&self) {
        self.scored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let elapsed = Local::now().signed_duration_since(self.started_at);
        StatsSnapshot {
            scored: self.scored.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            uptime: format_uptime(elapsed),
        }
    }
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

fn format_uptime(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = RequestStats::new();
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.scored, 0);
        assert_eq!(snapshot.rejected, 0);
    }

    #[test]
    fn counters_accumulate_independently() {
        let stats = RequestStats::new();
        stats.record_scored();
        stats.record_scored();
        stats.record_rejected();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.scored, 2);
        assert_eq!(snapshot.rejected, 1);
    }

    #[test]
    fn uptime_formats_hours_minutes_seconds() {
        assert_eq!(format_uptime(chrono::Duration::seconds(0)), "0h 0m 0s");
        assert_eq!(format_uptime(chrono::Duration::seconds(3725)), "1h 2m 5s");
        // A clock that ran backwards must not panic or underflow.
        assert_eq!(format_uptime(chrono::Duration::seconds(-5)), "0h 0m 0s");
    }

    #[test]
    fn snapshot_serializes_expected_fields() {
        let stats = RequestStats::new();
        stats.record_scored();
        let json = serde_json::to_value(stats.snapshot()).unwrap();

        assert_eq!(json["scored"], 1);
        assert_eq!(json["rejected"], 0);
        assert!(json["uptime"].is_string());
    }
}
