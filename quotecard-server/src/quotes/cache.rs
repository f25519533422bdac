use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use quotecard::QuoteRecord;

use crate::quota::{Clock, SystemClock};

struct Cached {
    fetched_at: Instant,
    quotes: Arc<Vec<QuoteRecord>>,
}

/// Holds one fetched quote collection for a bounded time.
pub struct QuoteCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entry: Mutex<Option<Cached>>,
}

impl std::fmt::Debug for QuoteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entry: Mutex::new(None),
        }
    }

    /// The cached collection, if one was stored less than `ttl` ago.
    pub fn get(&self) -> Option<Arc<Vec<QuoteRecord>>> {
        let now = self.clock.now();
        let mut entry = match self.entry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match entry.as_ref() {
            Some(cached) if now.saturating_duration_since(cached.fetched_at) < self.ttl => {
                Some(cached.quotes.clone())
            }
            Some(_) => {
                *entry = None;
                None
            }
            None => None,
        }
    }

    /// Store `quotes`, replacing any previous collection.
    pub fn put(&self, quotes: Vec<QuoteRecord>) -> Arc<Vec<QuoteRecord>> {
        let quotes = Arc::new(quotes);
        let mut entry = match self.entry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *entry = Some(Cached {
            fetched_at: self.clock.now(),
            quotes: quotes.clone(),
        });
        quotes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quotes/cache.rs"]
mod tests;
