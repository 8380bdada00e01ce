// src/gist/cache.rs
// =============================================================================
// In-memory store for resolved gists.
//
// Entries are keyed by the reference exactly as the user wrote it. An entry
// fills up in two steps: the locator is known after discovery, the body after
// the first successful fetch. Nothing is ever evicted; a body cached once is
// served for the rest of the process even if the gist changes upstream.
//
// DashMap shards its locks, so writers to the same key serialize and writers
// to different keys mostly don't touch the same lock.
// =============================================================================

use dashmap::DashMap;

use super::url::Locator;

/// What we know so far about one reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    pub locator: Option<Locator>,
    pub body: Option<String>,
}

#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: DashMap<String, CacheEntry>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Records the locator, keeping any body already stored for the key.
    pub fn put_locator(&self, key: &str, locator: Locator) {
        self.entries.entry(key.to_string()).or_default().locator = Some(locator);
    }

    /// Records the body, keeping any locator already stored for the key.
    pub fn put_body(&self, key: &str, body: String) {
        self.entries.entry(key.to_string()).or_default().body = Some(body);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
