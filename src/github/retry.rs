//! Retry policy utilities for GitHub requests.

use crate::error::GitHubError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::{Duration, SystemTime};

/// Bounded retry policy used by `GitHubClient`.
#[derive(Clone, Copy, Debug)]
pub(super) struct RetryPolicy {
    /// Upper bound on total attempts, including the initial request.
    pub(super) max_attempts: u32,
    /// Base delay used for exponential backoff.
    pub(super) initial_backoff: Duration,
    /// Maximum allowed delay between retry attempts.
    pub(super) max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// One attempt, no retries. Used for display-only requests.
    pub(super) fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Decide whether another attempt should be scheduled.
    pub(super) fn should_retry(&self, err: &GitHubError, attempt: u32) -> bool {
        if attempt.saturating_add(1) >= self.max_attempts {
            return false;
        }
        match err {
            GitHubError::Http(inner) => inner.is_timeout() || inner.is_connect(),
            // Secondary rate limits answer 403 with a Retry-After header.
            GitHubError::Status {
                code,
                retry_after_secs,
                ..
            } => {
                *code == 429
                    || (500..=599).contains(code)
                    || (*code == 403 && retry_after_secs.is_some())
            }
            GitHubError::GraphQl(_)
            | GitHubError::InvalidResponse(_)
            | GitHubError::MissingRepositoryInfo(_) => false,
        }
    }

    /// Compute retry delay, respecting `Retry-After` when present.
    pub(super) fn retry_delay_for(&self, attempt: u32, err: &GitHubError) -> Duration {
        if let Some(seconds) = err.retry_after_secs() {
            return Duration::from_secs(seconds.clamp(1, 300));
        }
        let pow = 2u32.saturating_pow(attempt);
        let millis = self
            .initial_backoff
            .as_millis()
            .saturating_mul(pow as u128)
            .min(self.max_backoff.as_millis());
        Duration::from_millis(millis as u64)
    }
}

/// Parse `Retry-After` as delta-seconds or an HTTP-date.
pub(super) fn parse_retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(seconds);
    }
    let at = httpdate::parse_http_date(value).ok()?;
    Some(
        at.duration_since(SystemTime::now())
            .map(|delta| delta.as_secs())
            .unwrap_or(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn retries_transient_statuses_only() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(&GitHubError::status(502, String::new(), None), 0));
        assert!(policy.should_retry(&GitHubError::status(429, String::new(), None), 1));
        assert!(policy.should_retry(&GitHubError::status(403, String::new(), Some(5)), 0));
        assert!(!policy.should_retry(&GitHubError::status(403, String::new(), None), 0));
        assert!(!policy.should_retry(&GitHubError::status(404, String::new(), None), 0));
        assert!(!policy.should_retry(&GitHubError::GraphQl("bad".into()), 0));
    }

    #[test]
    fn stops_after_max_attempts() {
        let policy = RetryPolicy::default();
        let err = GitHubError::status(503, String::new(), None);
        assert!(!policy.should_retry(&err, 2));
    }

    #[test]
    fn single_attempt_never_retries() {
        let policy = RetryPolicy::single_attempt();
        assert!(!policy.should_retry(&GitHubError::status(429, String::new(), Some(60)), 0));
        assert!(!policy.should_retry(&GitHubError::status(503, String::new(), None), 0));
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(350),
        };
        let err = GitHubError::status(500, String::new(), None);
        assert_eq!(policy.retry_delay_for(0, &err), Duration::from_millis(100));
        assert_eq!(policy.retry_delay_for(1, &err), Duration::from_millis(200));
        assert_eq!(policy.retry_delay_for(5, &err), Duration::from_millis(350));
        let hinted = GitHubError::status(429, String::new(), Some(0));
        assert_eq!(policy.retry_delay_for(0, &hinted), Duration::from_secs(1));
    }

    #[test]
    fn retry_after_accepts_seconds_and_http_dates() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(parse_retry_after_secs(&headers), Some(7));

        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after_secs(&headers), Some(0));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after_secs(&headers), None);
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn backoff_never_exceeds_cap(
                attempt in 0u32..64,
                initial_ms in 1u64..2_000,
                cap_ms in 1u64..60_000
            ) {
                let policy = RetryPolicy {
                    max_attempts: 100,
                    initial_backoff: Duration::from_millis(initial_ms),
                    max_backoff: Duration::from_millis(cap_ms),
                };
                let err = GitHubError::status(503, String::new(), None);
                prop_assert!(policy.retry_delay_for(attempt, &err) <= Duration::from_millis(cap_ms));
            }

            #[test]
            fn retry_after_hint_is_clamped(secs in 0u64..100_000) {
                let err = GitHubError::status(429, String::new(), Some(secs));
                let delay = RetryPolicy::default().retry_delay_for(0, &err);
                prop_assert!(delay >= Duration::from_secs(1));
                prop_assert!(delay <= Duration::from_secs(300));
            }
        }
    }
}
