//! Artist cache - in-memory artist storage keyed by upstream id
//!
//! Insertion order is kept so the first `n` entries can serve a top-artists
//! request. Every mutation publishes a [`CacheEvent`] for consumers that want
//! to hear about records patched after they were handed out.

use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::broadcast;

use crate::models::ArtistRecord;

const EVENT_CAPACITY: usize = 64;

/// Change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// The cache was (re)loaded from a chart
    Loaded { count: usize },
    /// A single artist was inserted or patched
    Updated(String),
}

#[derive(Default)]
struct CacheInner {
    order: Vec<String>,
    artists: HashMap<String, ArtistRecord>,
}

/// In-memory store for artists
pub struct ArtistCache {
    inner: RwLock<CacheInner>,
    events: broadcast::Sender<CacheEvent>,
}

impl ArtistCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: RwLock::new(CacheInner::default()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Get total artist count
    pub fn count(&self) -> usize {
        self.inner.read().order.len()
    }

    /// First `n` artists in cache order
    pub fn first(&self, n: usize) -> Vec<ArtistRecord> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .take(n)
            .filter_map(|id| inner.artists.get(id).cloned())
            .collect()
    }

    /// Get artist by id
    pub fn get(&self, id: &str) -> Option<ArtistRecord> {
        self.inner.read().artists.get(id).cloned()
    }

    /// Load a chart: its artists move to the front in chart order, keeping
    /// albums/tags/bio already known for them. Other cached artists stay
    /// behind the chart entries.
    pub fn load(&self, artists: Vec<ArtistRecord>) {
        let count = artists.len();
        {
            let mut inner = self.inner.write();
            let mut order = Vec::with_capacity(count + inner.order.len());

            for mut artist in artists {
                if order.contains(&artist.id) {
                    continue;
                }
                if let Some(previous) = inner.artists.get(&artist.id) {
                    artist.absorb(previous);
                }
                order.push(artist.id.clone());
                inner.artists.insert(artist.id.clone(), artist);
            }

            let rest: Vec<String> = inner
                .order
                .iter()
                .filter(|id| !order.contains(id))
                .cloned()
                .collect();
            order.extend(rest);
            inner.order = order;
        }

        let _ = self.events.send(CacheEvent::Loaded { count });
    }

    /// Replace an artist in place, or append it
    pub fn upsert(&self, artist: ArtistRecord) {
        let id = artist.id.clone();
        {
            let mut inner = self.inner.write();
            if !inner.artists.contains_key(&id) {
                inner.order.push(id.clone());
            }
            inner.artists.insert(id.clone(), artist);
        }

        let _ = self.events.send(CacheEvent::Updated(id));
    }

    /// Patch an artist in place; returns false when it is not cached
    pub fn update<F>(&self, id: &str, patch: F) -> bool
    where
        F: FnOnce(&mut ArtistRecord),
    {
        let found = match self.inner.write().artists.get_mut(id) {
            Some(artist) => {
                patch(artist);
                true
            }
            None => false,
        };

        if found {
            let _ = self.events.send(CacheEvent::Updated(id.to_string()));
        }
        found
    }
}

impl Default for ArtistCache {
    fn default() -> Self {
        Self::new()
    }
}
