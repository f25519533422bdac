//! Per-client generation quota.

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use dashmap::{DashMap, mapref::one::RefMut};

/// Monotonic time source, injected so tests can move time forward.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        let mut offset = match self.offset.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *offset += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = match self.offset.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        };
        self.start + offset
    }
}

/// Tracks how many cards each client generated in the current window.
pub trait QuotaStore: Send + Sync {
    /// Whether `key` may generate another card. Starts a fresh window when the old one expired.
    fn check(&self, key: &str) -> bool;

    /// Count one successful generation for `key`.
    fn record(&self, key: &str);

    /// Reserve one generation for `key` if the limit allows it. The check and the increment
    /// happen under one lock, so concurrent callers cannot overshoot the limit.
    fn try_acquire(&self, key: &str) -> bool;

    /// Give back a slot taken by [`QuotaStore::try_acquire`] whose generation failed.
    fn release(&self, key: &str);

    /// Generations left for `key` in the current window.
    fn remaining(&self, key: &str) -> u32;

    /// Generations allowed per window.
    fn limit(&self) -> u32;
}

#[derive(Debug, Clone, Copy)]
struct Usage {
    count: u32,
    window_start: Instant,
}

/// In-process quota store. Counters are lost on restart.
pub struct InMemoryQuotaStore {
    limit: u32,
    reset_after: Duration,
    clock: Arc<dyn Clock>,
    usage: DashMap<String, Usage>,
}

impl std::fmt::Debug for InMemoryQuotaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryQuotaStore")
            .field("limit", &self.limit)
            .field("reset_after", &self.reset_after)
            .field("clients", &self.usage.len())
            .finish()
    }
}

impl InMemoryQuotaStore {
    pub fn new(limit: u32, reset_after: Duration) -> Self {
        Self::with_clock(limit, reset_after, Arc::new(SystemClock))
    }

    pub fn with_clock(limit: u32, reset_after: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            reset_after,
            clock,
            usage: DashMap::new(),
        }
    }

    fn expired(&self, usage: &Usage, now: Instant) -> bool {
        now.saturating_duration_since(usage.window_start) >= self.reset_after
    }

    /// Entry for `key`, holding its shard lock, with an expired window already reset.
    fn current(&self, key: &str) -> RefMut<'_, String, Usage> {
        let now = self.clock.now();
        let mut entry = self.usage.entry(key.to_string()).or_insert(Usage {
            count: 0,
            window_start: now,
        });
        if self.expired(&entry, now) {
            *entry = Usage {
                count: 0,
                window_start: now,
            };
        }
        entry
    }
}

impl QuotaStore for InMemoryQuotaStore {
    fn check(&self, key: &str) -> bool {
        let entry = self.current(key);
        entry.count < self.limit
    }

    fn record(&self, key: &str) {
        let mut entry = self.current(key);
        entry.count = entry.count.saturating_add(1);
        tracing::debug!(client = key, count = entry.count, limit = self.limit, "quota recorded");
    }

    fn try_acquire(&self, key: &str) -> bool {
        let mut entry = self.current(key);
        if entry.count >= self.limit {
            return false;
        }
        entry.count += 1;
        tracing::debug!(client = key, count = entry.count, limit = self.limit, "quota reserved");
        true
    }

    fn release(&self, key: &str) {
        if let Some(mut entry) = self.usage.get_mut(key) {
            entry.count = entry.count.saturating_sub(1);
            tracing::debug!(client = key, count = entry.count, "quota released");
        }
    }

    fn remaining(&self, key: &str) -> u32 {
        let now = self.clock.now();
        match self.usage.get(key) {
            Some(usage) if !self.expired(&usage, now) => self.limit.saturating_sub(usage.count),
            _ => self.limit,
        }
    }

    fn limit(&self) -> u32 {
        self.limit
    }
}

#[cfg(test)]
#[path = "../tests/unit/quota.rs"]
mod tests;
