// src/gist/resolve.rs
// =============================================================================
// This module turns a gist reference into its content.
//
// How it works:
// 1. Look the reference up in the cache; a cached body ends the call
// 2. Classify the reference (share page or raw URL)
// 3. For a share page, GET the page and scrape the "Raw" anchor out of it
// 4. Remember the locator, so a later retry skips step 3
// 5. GET the raw URL and remember the body
//
// Concurrency:
// - Different references resolve fully in parallel
// - The same reference is resolved by at most one task at a time. Other
//   callers wait on a per-reference gate and then read the cached result,
//   so a page that embeds one gist five times hits the network once
// - A failed attempt caches nothing new, so the next waiter tries again
// =============================================================================

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use super::cache::{CacheEntry, ResourceCache};
use super::error::ResolveError;
use super::fetch::Fetcher;
use super::url::{Classified, Locator, ReferenceParser};

/// Log target for everything the resolver does.
pub const RESOLVER_TARGET: &str = "resolver";

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector is valid"));

static RAW_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^/[^/]+/[^/]+/raw/[^"]+$"#).expect("static regex is valid")
});

/// A reference that has been fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub direct_url: String,
    pub filename: String,
    pub body: String,
}

impl Resolved {
    fn new(locator: Locator, body: String) -> Self {
        Self {
            direct_url: locator.direct_url,
            filename: locator.filename,
            body,
        }
    }
}

pub struct Resolver {
    parser: ReferenceParser,
    fetcher: Arc<dyn Fetcher>,
    cache: Arc<ResourceCache>,
    // One gate per reference ever seen; lives as long as the cache does
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl Resolver {
    pub fn new(
        parser: ReferenceParser,
        fetcher: Arc<dyn Fetcher>,
        cache: Arc<ResourceCache>,
    ) -> Self {
        Self {
            parser,
            fetcher,
            cache,
            in_flight: DashMap::new(),
        }
    }

    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    pub fn parser(&self) -> &ReferenceParser {
        &self.parser
    }

    pub async fn resolve(&self, reference: &str) -> Result<Resolved, ResolveError> {
        if let Some(hit) = self.cached(reference) {
            debug!(target: RESOLVER_TARGET, reference, "using cached content");
            return Ok(hit);
        }

        // Malformed references never get a gate
        self.parser.classify(reference)?;

        // Clone the gate out of the map so no shard lock is held across .await
        let gate = self
            .in_flight
            .entry(reference.to_string())
            .or_default()
            .value()
            .clone();
        let _turn = gate.lock().await;

        // Whoever held the gate before us may have finished the job
        if let Some(hit) = self.cached(reference) {
            debug!(target: RESOLVER_TARGET, reference, "resolved by a concurrent caller");
            return Ok(hit);
        }

        let locator = self.locate(reference).await?;
        let body = self.fetch_body(&locator).await?;
        self.cache.put_body(reference, body.clone());

        debug!(
            target: RESOLVER_TARGET,
            reference,
            filename = %locator.filename,
            bytes = body.len(),
            "resolved"
        );
        Ok(Resolved::new(locator, body))
    }

    #[cfg(test)]
    fn gate_count(&self) -> usize {
        self.in_flight.len()
    }

    fn cached(&self, reference: &str) -> Option<Resolved> {
        match self.cache.get(reference)? {
            CacheEntry {
                locator: Some(locator),
                body: Some(body),
            } => Some(Resolved::new(locator, body)),
            _ => None,
        }
    }

    // Finds the raw URL for a reference, from the cache when possible.
    async fn locate(&self, reference: &str) -> Result<Locator, ResolveError> {
        if let Some(locator) = self.cache.get(reference).and_then(|entry| entry.locator) {
            debug!(target: RESOLVER_TARGET, reference, "using cached locator");
            return Ok(locator);
        }

        let locator = match self.parser.classify(reference)? {
            Classified::Direct(locator) => locator,
            Classified::NeedsDiscovery { owner, resource_id } => {
                self.discover(&owner, &resource_id).await?
            }
        };

        self.cache.put_locator(reference, locator.clone());
        Ok(locator)
    }

    async fn discover(&self, owner: &str, resource_id: &str) -> Result<Locator, ResolveError> {
        let page_url = self.parser.share_page_url(owner, resource_id);
        debug!(target: RESOLVER_TARGET, url = %page_url, "fetching share page");

        let response = self.fetcher.get(&page_url).await?;
        if !response.is_ok() {
            return Err(ResolveError::DiscoveryHttp {
                status: response.status,
            });
        }

        let raw_path = find_raw_path(&response.body).ok_or(ResolveError::RawLinkNotFound)?;
        Ok(self.parser.locator_for_raw_path(&raw_path))
    }

    async fn fetch_body(&self, locator: &Locator) -> Result<String, ResolveError> {
        debug!(target: RESOLVER_TARGET, url = %locator.direct_url, "fetching content");

        let response = self.fetcher.get(&locator.direct_url).await?;
        if !response.is_ok() {
            return Err(ResolveError::FetchHttp {
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

// Returns the href of the first anchor that points at a raw file,
// e.g. "/octocat/6cad32/raw/abc/hello.py"
fn find_raw_path(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .find(|href| RAW_PATH.is_match(href))
        .map(str::to_string)
}
