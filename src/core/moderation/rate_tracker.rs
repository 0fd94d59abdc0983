// Per-user sliding window of recent message timestamps.
//
// Each user owns one window inside a `DashMap`. Holding the entry guard
// serializes evict/append/count for that user, so concurrent messages from
// the same author never lose an update.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::collections::VecDeque;

pub struct RateTracker {
    windows: DashMap<u64, VecDeque<DateTime<Utc>>>,
    interval: Duration,
    max_messages: usize,
}

impl RateTracker {
    pub fn new(interval_secs: u64, max_messages: usize) -> Self {
        Self {
            windows: DashMap::new(),
            interval: Duration::seconds(interval_secs as i64),
            max_messages,
        }
    }

    /// Record a message from `user_id` at `now` and report whether the user is
    /// over the limit.
    ///
    /// Entries `interval` or more older than `now` are evicted first, then
    /// `now` is appended. Returns `true` iff the window now holds more than
    /// `max_messages` timestamps.
    pub fn record_and_check(&self, user_id: u64, now: DateTime<Utc>) -> bool {
        let mut window = self.windows.entry(user_id).or_default();
        let interval = self.interval;
        window.retain(|seen| now - *seen < interval);
        window.push_back(now);
        window.len() > self.max_messages
    }

    /// How many timestamps are currently stored for `user_id`.
    #[cfg(test)]
    pub fn window_len(&self, user_id: u64) -> usize {
        self.windows.get(&user_id).map(|w| w.len()).unwrap_or(0)
    }

    /// Drop windows whose newest entry has aged out. Returns how many were dropped.
    pub fn prune_idle(&self, now: DateTime<Utc>) -> usize {
        let before = self.windows.len();
        let interval = self.interval;
        self.windows
            .retain(|_, window| window.back().is_some_and(|last| now - *last < interval));
        before.saturating_sub(self.windows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_first_message_never_triggers() {
        let tracker = RateTracker::new(10, 5);
        assert!(!tracker.record_and_check(1, at(0)));
        assert_eq!(tracker.window_len(1), 1);
    }

    #[test]
    fn test_sixth_message_in_window_triggers() {
        let tracker = RateTracker::new(10, 5);

        for i in 0..5 {
            assert!(!tracker.record_and_check(1, at(i)), "message {} flagged", i);
        }
        assert!(tracker.record_and_check(1, at(5)));
    }

    #[test]
    fn test_window_slides() {
        let tracker = RateTracker::new(10, 5);

        for i in 0..5 {
            tracker.record_and_check(1, at(i));
        }
        // At t=10 the entry from t=0 is exactly one interval old and is evicted
        assert!(!tracker.record_and_check(1, at(10)));
        assert_eq!(tracker.window_len(1), 5);

        // Long silence empties the window
        assert!(!tracker.record_and_check(1, at(100)));
        assert_eq!(tracker.window_len(1), 1);
    }

    #[test]
    fn test_users_are_independent() {
        let tracker = RateTracker::new(10, 5);

        for i in 0..6 {
            tracker.record_and_check(1, at(i));
        }
        assert!(!tracker.record_and_check(2, at(6)));
    }

    #[test]
    fn test_matches_trailing_window_count() {
        let tracker = RateTracker::new(10, 5);
        // Irregular arrival pattern with bursts and gaps
        let offsets = [0, 1, 1, 2, 3, 4, 9, 11, 12, 12, 13, 13, 14, 30, 31, 32, 33, 34, 35, 36];
        let mut seen = Vec::new();

        for &offset in &offsets {
            let now = at(offset);
            seen.push(now);
            let in_window = seen
                .iter()
                .filter(|t| now - **t < Duration::seconds(10))
                .count();

            assert_eq!(
                tracker.record_and_check(7, now),
                in_window > 5,
                "mismatch at offset {}",
                offset
            );
        }
    }

    #[test]
    fn test_prune_idle_drops_stale_windows() {
        let tracker = RateTracker::new(10, 5);
        tracker.record_and_check(1, at(0));
        tracker.record_and_check(2, at(8));

        assert_eq!(tracker.prune_idle(at(12)), 1);
        assert_eq!(tracker.window_len(1), 0);
        assert_eq!(tracker.window_len(2), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_messages_are_all_counted() {
        use std::sync::Arc;

        let tracker = Arc::new(RateTracker::new(10, 1_000));
        let now = at(0);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let tracker = Arc::clone(&tracker);
            handles.push(tokio::spawn(async move {
                for _ in 0..50 {
                    tracker.record_and_check(42, now);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(tracker.window_len(42), 400);
    }
}
