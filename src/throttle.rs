//! Failed-login throttling guard.
//!
//! [`LoginThrottle`] tracks consecutive failed login attempts per account
//! identifier and enforces a temporary lockout once the failure threshold is
//! reached. It sits between the inbound login request and credential
//! verification:
//!
//! 1. The caller asks [`LoginThrottle::check`] whether the identifier is
//!    currently blocked.
//! 2. If allowed, the caller runs credential verification.
//! 3. The caller reports the outcome back via
//!    [`LoginThrottle::record_failure`] or [`LoginThrottle::record_success`].
//!
//! Lockout expiry is lazy: there is no background sweep, and an account
//! leaves lockout on the first `check` performed after the window has
//! elapsed. That same call is already treated as a fresh attempt, so
//! verification proceeds without requiring a second request.
//!
//! State lives in process memory for the lifetime of the guard and is not
//! shared across processes or persisted across restarts. The table is
//! unbounded: an identifier with failure history stays tracked until a
//! successful login or an observed expiry.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Consecutive failures at which an account enters lockout.
///
/// The check precedes verification of the current attempt, so only a *prior*
/// count at or above this threshold blocks: a request arriving after the 4th
/// failure is still allowed through to attempt verification.
pub const MAX_FAILURES: u32 = 5;

/// How long a locked account stays blocked after its most recent failure.
pub const LOCKOUT_MINUTES: i64 = 30;

fn lockout_duration() -> Duration {
    Duration::minutes(LOCKOUT_MINUTES)
}

/// Per-identifier attempt state. A record exists iff the identifier has at
/// least one consecutive failure.
#[derive(Debug, Clone, Copy)]
struct AttemptRecord {
    failures: u32,
    last_failure_at: DateTime<Utc>,
}

/// Outcome of a throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Verification may proceed. `prior_failures` is the consecutive failure
    /// count before this attempt, surfaced on successful login as an
    /// observability signal.
    Allowed { prior_failures: u32 },

    /// The identifier is inside its lockout window and verification must not
    /// be attempted. `minutes_remaining` uses ceiling rounding and is always
    /// in `1..=LOCKOUT_MINUTES`.
    Blocked { minutes_remaining: i64 },
}

/// In-memory guard over the per-account attempt table.
///
/// Construct one instance at process start and share it behind an `Arc`.
/// All mutations on the table are serialized through an internal mutex, so
/// concurrent attempts for the same identifier cannot lose updates.
#[derive(Debug, Default)]
pub struct LoginThrottle {
    records: Mutex<HashMap<String, AttemptRecord>>,
}

impl LoginThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `identifier` may attempt verification right now.
    ///
    /// If the lockout window has elapsed, the attempt record is cleared as a
    /// side effect and the call returns `Allowed { prior_failures: 0 }`.
    pub fn check(&self, identifier: &str) -> ThrottleDecision {
        self.check_at(identifier, Utc::now())
    }

    /// Record a failed verification for `identifier`.
    ///
    /// Must be called exactly once per failed verification, after `check`
    /// returned `Allowed`.
    pub fn record_failure(&self, identifier: &str) {
        self.record_failure_at(identifier, Utc::now())
    }

    /// Clear the attempt record for `identifier` after a successful
    /// verification. Idempotent.
    pub fn record_success(&self, identifier: &str) {
        let key = normalize(identifier);
        let removed = self.lock_records().remove(&key);

        if let Some(record) = removed {
            tracing::debug!(
                identifier = %key,
                cleared_failures = record.failures,
                "successful login cleared failed attempt record"
            );
        }
    }

    fn check_at(&self, identifier: &str, now: DateTime<Utc>) -> ThrottleDecision {
        let key = normalize(identifier);
        let mut records = self.lock_records();

        let Some(record) = records.get(&key).copied() else {
            return ThrottleDecision::Allowed { prior_failures: 0 };
        };

        if record.failures < MAX_FAILURES {
            return ThrottleDecision::Allowed {
                prior_failures: record.failures,
            };
        }

        let elapsed = now - record.last_failure_at;
        if elapsed < lockout_duration() {
            let remaining = lockout_duration() - elapsed;
            // Ceiling: one second left still reports one full minute.
            let minutes_remaining = ((remaining.num_seconds() + 59) / 60).max(1);

            tracing::debug!(
                identifier = %key,
                minutes_remaining,
                "login rejected, account is inside its lockout window"
            );

            return ThrottleDecision::Blocked { minutes_remaining };
        }

        // Lazy expiry: the first check past the window clears the record and
        // this same call proceeds as a fresh attempt.
        records.remove(&key);
        tracing::info!(identifier = %key, "lockout window elapsed, attempt record cleared");

        ThrottleDecision::Allowed { prior_failures: 0 }
    }

    fn record_failure_at(&self, identifier: &str, now: DateTime<Utc>) {
        let key = normalize(identifier);
        let mut records = self.lock_records();

        let record = records.entry(key.clone()).or_insert(AttemptRecord {
            failures: 0,
            last_failure_at: now,
        });
        record.failures += 1;
        record.last_failure_at = now;

        if record.failures == MAX_FAILURES {
            tracing::warn!(
                identifier = %key,
                failures = record.failures,
                lockout_minutes = LOCKOUT_MINUTES,
                "failure threshold reached, account locked"
            );
        } else {
            tracing::debug!(
                identifier = %key,
                failures = record.failures,
                "recorded failed login attempt"
            );
        }
    }

    fn lock_records(&self) -> std::sync::MutexGuard<'_, HashMap<String, AttemptRecord>> {
        // Map operations are total and never panic while holding the lock,
        // but recover from poisoning anyway rather than propagating it.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Identifiers are case-insensitive account keys, normalized to lowercase.
fn normalize(identifier: &str) -> String {
    identifier.to_lowercase()
}
