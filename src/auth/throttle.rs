//! In-memory throttling of authentication attempts.
//!
//! Advisory, per-process limiter: counters live in memory, reset on restart,
//! and instances do not coordinate. A deterrent against credential stuffing,
//! not a hard guarantee.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::clock::unix_now;

/// Default attempt budget per client per window.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Default window: one hour.
pub const DEFAULT_WINDOW_SECONDS: i64 = 60 * 60;

/// Client key used when no forwarding header is present.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Stale records are swept once the map holds at least this many entries,
/// bounding growth for long-running processes.
const SWEEP_MIN_ENTRIES: usize = 1024;

/// Endpoint classes tracked independently per client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttemptKind {
    Login,
    Signup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// Denied until `retry_after_unix` (window start plus window length).
    Limited { retry_after_unix: i64 },
}

#[derive(Clone, Copy, Debug)]
struct AttemptRecord {
    count: u32,
    window_start: i64,
}

#[derive(Clone, Copy, Debug)]
pub struct ThrottleConfig {
    pub max_attempts: u32,
    pub window_seconds: i64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            window_seconds: DEFAULT_WINDOW_SECONDS,
        }
    }
}

/// Attempt counters keyed by client and endpoint class.
///
/// Owned and injected by the caller rather than held in module state, so
/// tests can construct and reset it freely.
#[derive(Debug)]
pub struct AttemptThrottle {
    config: ThrottleConfig,
    records: Mutex<HashMap<(String, AttemptKind), AttemptRecord>>,
}

impl AttemptThrottle {
    #[must_use]
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Check the budget for `(client_key, kind)` and record the attempt.
    pub fn check_and_record(&self, client_key: &str, kind: AttemptKind) -> Decision {
        self.check_and_record_at(client_key, kind, unix_now())
    }

    /// Clock-pinned variant of [`check_and_record`](Self::check_and_record).
    pub fn check_and_record_at(
        &self,
        client_key: &str,
        kind: AttemptKind,
        now_unix_seconds: i64,
    ) -> Decision {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if records.len() >= SWEEP_MIN_ENTRIES {
            let window = self.config.window_seconds;
            records.retain(|_, record| now_unix_seconds - record.window_start <= window);
        }

        let record = records
            .entry((client_key.to_string(), kind))
            .or_insert(AttemptRecord {
                count: 0,
                window_start: now_unix_seconds,
            });

        if now_unix_seconds - record.window_start > self.config.window_seconds {
            record.count = 0;
            record.window_start = now_unix_seconds;
        }

        if record.count >= self.config.max_attempts {
            return Decision::Limited {
                retry_after_unix: record.window_start + self.config.window_seconds,
            };
        }

        record.count += 1;
        Decision::Allowed
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
