//! Keyed stale-while-revalidate cache for the long-lived server.
//!
//! Entries are keyed by the source's request signature
//! ([`StorySource::describe`]). A lookup always answers immediately with the
//! current [`FetchState`] and, when the entry is missing, failed or older than
//! the TTL, starts one background fetch. At most one fetch per key is in
//! flight; concurrent lookups during a refresh see the previous state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::fetch::StorySource;
use crate::view::FetchState;

#[derive(Debug, Clone, Default)]
struct Entry {
    state: FetchState,
    fetched_at: Option<Instant>,
    in_flight: bool,
}

impl Entry {
    /// Whether a lookup at `now` should start a new fetch.
    fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        if self.in_flight {
            return false;
        }
        match (&self.state, self.fetched_at) {
            (FetchState::Success(_), Some(at)) => now.duration_since(at) >= ttl,
            _ => true,
        }
    }
}

pub struct StoryCache {
    source: Arc<dyn StorySource>,
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl StoryCache {
    pub fn new(source: Arc<dyn StorySource>, ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            source,
            ttl,
            entries: RwLock::new(HashMap::new()),
        })
    }

    pub fn key(&self) -> String {
        self.source.describe()
    }

    /// Current state for this cache's source, refreshing in the background
    /// when needed.
    pub async fn get(self: &Arc<Self>) -> FetchState {
        let key = self.key();
        let now = Instant::now();

        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.clone()).or_default();

        if entry.is_stale(now, self.ttl) {
            debug!(%key, "cache entry stale, refreshing");
            entry.in_flight = true;
            let cache = Arc::clone(self);
            tokio::spawn(async move { cache.refresh(key).await });
        } else {
            debug!(%key, "cache hit");
        }

        entry.state.clone()
    }

    async fn refresh(&self, key: String) {
        let result = self.source.fetch().await;
        let ok = result.is_ok();

        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.clone()).or_default();
        entry.state = result.into();
        entry.fetched_at = Some(Instant::now());
        entry.in_flight = false;

        info!(%key, ok, "cache entry refreshed");
    }
}
