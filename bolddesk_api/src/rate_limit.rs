//! Rate-limit header tracking and the pre-request backoff guard.
//!
//! BoldDesk reports its request budget on every response through three
//! headers. The client keeps only the most recent reading and consults it
//! before each page of a bulk fetch, sleeping until the window rolls over
//! when the budget is nearly spent.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::header::HeaderMap;
use serde::Serialize;

/// Header carrying the number of requests allowed per window.
pub const LIMIT_HEADER: &str = "x-rate-limit-limit";
/// Header carrying the requests left in the current window.
pub const REMAINING_HEADER: &str = "x-rate-limit-remaining";
/// Header carrying the time the current window resets.
pub const RESET_HEADER: &str = "x-rate-limit-reset";

/// The guard only waits once `remaining` is at or below this value.
pub const LOW_REMAINING_THRESHOLD: u32 = 5;

/// Waits longer than this are not worth blocking for; the request goes out
/// and a 429 is surfaced instead.
pub const MAX_GUARD_WAIT: Duration = Duration::from_secs(120);

/// Last-observed `{limit, remaining, reset}` triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RateLimitSnapshot {
    /// Requests allowed per window.
    pub limit: Option<u32>,
    /// Requests left in the current window.
    pub remaining: Option<u32>,
    /// When the current window rolls over.
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimitSnapshot {
    /// Reads the three rate-limit headers. Missing or unparseable headers
    /// leave the corresponding field unset. Returns `None` when the response
    /// carried none of them.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let raw = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        if raw(LIMIT_HEADER).is_none()
            && raw(REMAINING_HEADER).is_none()
            && raw(RESET_HEADER).is_none()
        {
            return None;
        }

        Some(Self {
            limit: raw(LIMIT_HEADER).and_then(|v| v.trim().parse().ok()),
            remaining: raw(REMAINING_HEADER).and_then(|v| v.trim().parse().ok()),
            reset: raw(RESET_HEADER).and_then(parse_reset),
        })
    }

    /// How long the guard should block before the next request, if at all.
    pub fn wait_duration(&self, now: DateTime<Utc>) -> Option<Duration> {
        let remaining = self.remaining?;
        if remaining > LOW_REMAINING_THRESHOLD {
            return None;
        }
        let wait = self.retry_after(now)?;
        if wait < MAX_GUARD_WAIT {
            Some(wait)
        } else {
            None
        }
    }

    /// Time until the window resets, when that is in the future.
    pub fn retry_after(&self, now: DateTime<Utc>) -> Option<Duration> {
        let reset = self.reset?;
        (reset - now).to_std().ok().filter(|d| !d.is_zero())
    }
}

/// Parses the reset header. BoldDesk has sent both epoch seconds and
/// formatted timestamps over time, so every reasonable shape is accepted.
fn parse_reset(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(epoch) = value.parse::<i64>() {
        return DateTime::from_timestamp(epoch, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Holds the most recent [`RateLimitSnapshot`] for one client.
///
/// Every service borrowed from the same client sees the same snapshot.
/// The last response to arrive wins; the guard is advisory so that race
/// is harmless.
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    latest: Mutex<Option<RateLimitSnapshot>>,
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored snapshot.
    pub fn record(&self, snapshot: RateLimitSnapshot) {
        *self.latest.lock().unwrap_or_else(|e| e.into_inner()) = Some(snapshot);
    }

    /// Records the snapshot carried by `headers`, if any.
    pub fn record_headers(&self, headers: &HeaderMap) {
        if let Some(snapshot) = RateLimitSnapshot::from_headers(headers) {
            self.record(snapshot);
        }
    }

    /// The most recent snapshot, if a response has carried one yet.
    pub fn latest(&self) -> Option<RateLimitSnapshot> {
        *self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sleeps until the window resets when the remaining budget is low.
    pub async fn wait_if_needed(&self) {
        let wait = self.latest().and_then(|s| s.wait_duration(Utc::now()));
        if let Some(wait) = wait {
            tracing::warn!(
                "Rate limit nearly exhausted, waiting {:.1}s for the window to reset",
                wait.as_secs_f64()
            );
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn parses_all_three_headers() {
        let snap = RateLimitSnapshot::from_headers(&headers(&[
            (LIMIT_HEADER, "100"),
            (REMAINING_HEADER, "42"),
            (RESET_HEADER, "1706400000"),
        ]))
        .unwrap();
        assert_eq!(snap.limit, Some(100));
        assert_eq!(snap.remaining, Some(42));
        assert_eq!(snap.reset, Some(at(1_706_400_000)));
    }

    #[test]
    fn missing_headers_yield_none() {
        assert!(RateLimitSnapshot::from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn unparseable_header_leaves_field_unset() {
        let snap = RateLimitSnapshot::from_headers(&headers(&[
            (LIMIT_HEADER, "lots"),
            (REMAINING_HEADER, "7"),
        ]))
        .unwrap();
        assert_eq!(snap.limit, None);
        assert_eq!(snap.remaining, Some(7));
        assert_eq!(snap.reset, None);
    }

    #[test]
    fn reset_accepts_formatted_timestamps() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        for value in [
            "2024-05-01T12:30:00Z",
            "Wed, 01 May 2024 12:30:00 +0000",
            "2024-05-01 12:30:00",
        ] {
            assert_eq!(parse_reset(value), Some(expected), "value: {}", value);
        }
        assert_eq!(parse_reset("soon"), None);
    }

    #[test]
    fn wait_when_budget_low_and_reset_near() {
        let snap = RateLimitSnapshot {
            limit: Some(100),
            remaining: Some(3),
            reset: Some(at(1010)),
        };
        assert_eq!(snap.wait_duration(at(1000)), Some(Duration::from_secs(10)));
    }

    #[test]
    fn no_wait_when_budget_healthy() {
        let snap = RateLimitSnapshot {
            limit: Some(100),
            remaining: Some(50),
            reset: Some(at(1010)),
        };
        assert_eq!(snap.wait_duration(at(1000)), None);
    }

    #[test]
    fn no_wait_when_reset_passed_or_too_far() {
        let mut snap = RateLimitSnapshot {
            limit: Some(100),
            remaining: Some(0),
            reset: Some(at(990)),
        };
        assert_eq!(snap.wait_duration(at(1000)), None);

        snap.reset = Some(at(1000 + 121));
        assert_eq!(snap.wait_duration(at(1000)), None);
    }

    #[test]
    fn no_wait_without_remaining() {
        let snap = RateLimitSnapshot {
            limit: None,
            remaining: None,
            reset: Some(at(1005)),
        };
        assert_eq!(snap.wait_duration(at(1000)), None);
    }

    #[test]
    fn tracker_keeps_latest_only() {
        let tracker = RateLimitTracker::new();
        assert!(tracker.latest().is_none());

        tracker.record_headers(&headers(&[(REMAINING_HEADER, "10")]));
        tracker.record_headers(&headers(&[(REMAINING_HEADER, "9")]));
        tracker.record_headers(&HeaderMap::new());

        assert_eq!(tracker.latest().unwrap().remaining, Some(9));
    }

    #[tokio::test(start_paused = true)]
    async fn tracker_sleeps_until_reset() {
        let tracker = RateLimitTracker::new();
        tracker.record(RateLimitSnapshot {
            limit: Some(100),
            remaining: Some(3),
            reset: Some(Utc::now() + chrono::Duration::seconds(10)),
        });

        let start = tokio::time::Instant::now();
        tracker.wait_if_needed().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(9), "elapsed {:?}", elapsed);
        assert!(elapsed <= Duration::from_secs(11), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn tracker_does_not_sleep_with_budget() {
        let tracker = RateLimitTracker::new();
        tracker.record(RateLimitSnapshot {
            limit: Some(100),
            remaining: Some(50),
            reset: Some(Utc::now() + chrono::Duration::seconds(10)),
        });

        let start = tokio::time::Instant::now();
        tracker.wait_if_needed().await;
        assert!(start.elapsed() < Duration::from_millis(1));
    }
}
