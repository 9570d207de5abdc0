use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Live counters for the current session. Bumped from the input callback,
/// read from the render loop, so plain atomics are all the coordination
/// this needs.
#[derive(Default)]
pub struct SessionCounters {
    scroll_up: AtomicU64,
    scroll_down: AtomicU64,
}

impl SessionCounters {
    pub fn record_up(&self) {
        self.scroll_up.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_down(&self) {
        self.scroll_down.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            scroll_up: self.scroll_up.load(Ordering::Relaxed),
            scroll_down: self.scroll_down.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of the session counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub scroll_up: u64,
    pub scroll_down: u64,
}

impl SessionSnapshot {
    pub fn total(&self) -> u64 {
        self.scroll_up + self.scroll_down
    }
}

/// Cumulative totals persisted between runs. Every field defaults
/// individually so data files written by older versions keep loading as
/// the schema grows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalMetrics {
    #[serde(default)]
    pub total_scroll_up: u64,
    #[serde(default)]
    pub total_scroll_down: u64,
    #[serde(default)]
    pub total_scrolls: u64,
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub total_time_seconds: f64,
    #[serde(default)]
    pub first_session: Option<String>,
    #[serde(default)]
    pub last_session: Option<String>,
}

impl TotalMetrics {
    /// Folds one finished session into the totals.
    pub fn absorb(&mut self, session: &SessionSnapshot, elapsed: Duration, ended_at: &str) {
        self.total_scroll_up += session.scroll_up;
        self.total_scroll_down += session.scroll_down;
        self.total_scrolls += session.total();
        self.total_sessions += 1;
        self.total_time_seconds += elapsed.as_secs_f64();
        if self.first_session.is_none() {
            self.first_session = Some(ended_at.to_string());
        }
        self.last_session = Some(ended_at.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(up: u64, down: u64) -> SessionSnapshot {
        SessionSnapshot {
            scroll_up: up,
            scroll_down: down,
        }
    }

    #[test]
    fn absorb_adds_session_counts() {
        let mut totals = TotalMetrics {
            total_scroll_up: 10,
            total_scroll_down: 20,
            total_scrolls: 30,
            total_sessions: 2,
            total_time_seconds: 60.0,
            first_session: Some("2026-01-01T00:00:00+00:00".into()),
            last_session: Some("2026-01-02T00:00:00+00:00".into()),
        };

        totals.absorb(&session(3, 4), Duration::from_secs(90), "2026-01-03T00:00:00+00:00");

        assert_eq!(totals.total_scroll_up, 13);
        assert_eq!(totals.total_scroll_down, 24);
        assert_eq!(totals.total_scrolls, 37);
        assert_eq!(totals.total_sessions, 3);
        assert!((totals.total_time_seconds - 150.0).abs() < f64::EPSILON);
        assert_eq!(
            totals.first_session.as_deref(),
            Some("2026-01-01T00:00:00+00:00")
        );
        assert_eq!(
            totals.last_session.as_deref(),
            Some("2026-01-03T00:00:00+00:00")
        );
    }

    #[test]
    fn absorb_order_does_not_change_counts() {
        let a = session(5, 1);
        let b = session(2, 7);

        let mut first = TotalMetrics::default();
        first.absorb(&a, Duration::from_secs(10), "t1");
        first.absorb(&b, Duration::from_secs(20), "t2");

        let mut second = TotalMetrics::default();
        second.absorb(&b, Duration::from_secs(20), "t1");
        second.absorb(&a, Duration::from_secs(10), "t2");

        assert_eq!(first.total_scroll_up, second.total_scroll_up);
        assert_eq!(first.total_scroll_down, second.total_scroll_down);
        assert_eq!(first.total_scrolls, second.total_scrolls);
        assert_eq!(first.total_sessions, second.total_sessions);
        assert!((first.total_time_seconds - second.total_time_seconds).abs() < f64::EPSILON);
    }

    #[test]
    fn first_session_is_set_once() {
        let mut totals = TotalMetrics::default();
        totals.absorb(&session(1, 0), Duration::from_secs(1), "t1");
        totals.absorb(&session(0, 1), Duration::from_secs(1), "t2");

        assert_eq!(totals.first_session.as_deref(), Some("t1"));
        assert_eq!(totals.last_session.as_deref(), Some("t2"));
    }

    #[test]
    fn counters_snapshot_reflects_increments() {
        let counters = SessionCounters::default();
        counters.record_up();
        counters.record_up();
        counters.record_down();

        let snap = counters.snapshot();
        assert_eq!(snap.scroll_up, 2);
        assert_eq!(snap.scroll_down, 1);
        assert_eq!(snap.total(), 3);
    }
}
