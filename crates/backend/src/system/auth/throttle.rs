use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::shared::config::AuthConfig;

/// Счётчик неудачных входов по email.
///
/// After `max_failed_attempts` failures inside the window further attempts
/// are refused with `auth/too-many-requests` until the oldest failure ages out.
pub struct LoginThrottle {
    max_failed_attempts: usize,
    window: Duration,
    failures: Mutex<HashMap<String, Vec<DateTime<Utc>>>>,
}

impl LoginThrottle {
    pub fn new(max_failed_attempts: usize, window: Duration) -> Self {
        Self {
            max_failed_attempts,
            window,
            failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(auth.max_failed_attempts, Duration::minutes(auth.lockout_minutes))
    }

    pub fn is_locked(&self, email: &str, now: DateTime<Utc>) -> bool {
        if self.max_failed_attempts == 0 {
            return false;
        }
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let Some(attempts) = failures.get_mut(email) else {
            return false;
        };
        attempts.retain(|at| now - *at < self.window);
        if attempts.is_empty() {
            failures.remove(email);
            return false;
        }
        attempts.len() >= self.max_failed_attempts
    }

    /// Records a failure; emails whose window has fully expired are dropped
    pub fn record_failure(&self, email: &str, now: DateTime<Utc>) {
        if self.max_failed_attempts == 0 {
            return;
        }
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        failures.retain(|_, attempts| {
            attempts.retain(|at| now - *at < self.window);
            !attempts.is_empty()
        });
        failures.entry(email.to_string()).or_default().push(now);
    }

    pub fn clear(&self, email: &str) {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        failures.remove(email);
    }

    #[cfg(test)]
    fn tracked_emails(&self) -> usize {
        self.failures.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locks_after_limit_and_unlocks_after_window() {
        let throttle = LoginThrottle::new(3, Duration::minutes(15));
        let start = Utc::now();

        for i in 0..3 {
            assert!(!throttle.is_locked("a@b.c", start));
            throttle.record_failure("a@b.c", start + Duration::seconds(i));
        }
        assert!(throttle.is_locked("a@b.c", start + Duration::seconds(5)));
        assert!(!throttle.is_locked("other@b.c", start));

        assert!(!throttle.is_locked("a@b.c", start + Duration::minutes(16)));
    }

    #[test]
    fn clear_resets_counter() {
        let throttle = LoginThrottle::new(1, Duration::minutes(15));
        let now = Utc::now();
        throttle.record_failure("a@b.c", now);
        assert!(throttle.is_locked("a@b.c", now));
        throttle.clear("a@b.c");
        assert!(!throttle.is_locked("a@b.c", now));
    }

    #[test]
    fn zero_limit_disables_lockout() {
        let throttle = LoginThrottle::new(0, Duration::minutes(15));
        let now = Utc::now();
        throttle.record_failure("a@b.c", now);
        assert!(!throttle.is_locked("a@b.c", now));
        assert_eq!(throttle.tracked_emails(), 0);
    }

    #[test]
    fn expired_emails_are_forgotten() {
        let throttle = LoginThrottle::new(5, Duration::minutes(15));
        let start = Utc::now();
        for i in 0..1000 {
            throttle.record_failure(&format!("user{i}@example.com"), start);
        }
        assert_eq!(throttle.tracked_emails(), 1000);

        throttle.record_failure("late@example.com", start + Duration::hours(5));
        assert_eq!(throttle.tracked_emails(), 1);

        assert!(!throttle.is_locked("late@example.com", start + Duration::hours(6)));
        assert_eq!(throttle.tracked_emails(), 0);
    }
}
