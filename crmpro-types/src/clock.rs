//! Monotonic timestamp source.
//!
//! Timestamps are RFC 3339 UTC strings with microsecond precision, so their
//! lexicographic order matches their chronological order.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use std::sync::Mutex;

/// Issues strictly increasing timestamps.
///
/// Two calls within the same microsecond still yield distinct, ordered
/// values, which keeps `updated_at` strictly greater after every update.
#[derive(Debug)]
pub struct Clock {
    last: Mutex<DateTime<Utc>>,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Next instant, strictly after every instant this clock issued before.
    pub fn now(&self) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let wall = Utc::now().trunc_subsecs(6);
        let next = if wall > *last {
            wall
        } else {
            *last + Duration::microseconds(1)
        };
        *last = next;
        next
    }

    /// Next timestamp string.
    pub fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }

    /// Next timestamp string, also strictly after `previous` when it parses.
    pub fn timestamp_after(&self, previous: Option<&str>) -> String {
        let now = self.now();
        let floor = previous
            .and_then(|p| DateTime::parse_from_rfc3339(p).ok())
            .map(|p| p.with_timezone(&Utc).trunc_subsecs(6) + Duration::microseconds(1));

        match floor {
            Some(floor) if floor > now => {
                let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                if floor > *last {
                    *last = floor;
                }
                format_timestamp(floor)
            }
            _ => format_timestamp(now),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Format an instant the way every stored record does.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_strictly_increase() {
        let clock = Clock::new();
        let mut prev = clock.timestamp();
        for _ in 0..500 {
            let next = clock.timestamp();
            assert!(next > prev, "{next} should sort after {prev}");
            prev = next;
        }
    }

    #[test]
    fn timestamp_after_future_value() {
        let clock = Clock::new();
        let future = "2999-01-01T00:00:00.000000Z";
        let next = clock.timestamp_after(Some(future));
        assert!(next.as_str() > future);
        // later timestamps keep climbing past the bumped value
        assert!(clock.timestamp() > next);
    }

    #[test]
    fn timestamp_after_garbage_is_plain_now() {
        let clock = Clock::new();
        let ts = clock.timestamp_after(Some("not a date"));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn format_is_fixed_width() {
        let clock = Clock::new();
        let ts = clock.timestamp();
        assert_eq!(ts.len(), "2025-01-01T00:00:00.000000Z".len());
        assert!(ts.ends_with('Z'));
    }
}
