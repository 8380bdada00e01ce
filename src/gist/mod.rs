// src/gist/mod.rs
// =============================================================================
// This module resolves gist references into content.
//
// Submodules:
// - url: Classifies a reference as a share page or a raw-content URL
// - fetch: The HTTP transport (and the trait that lets tests replace it)
// - cache: Remembers locators and bodies for the life of the process
// - resolve: Ties the three together
// - error: What can go wrong
// =============================================================================

mod cache;
mod error;
mod fetch;
mod resolve;
mod url;

#[cfg(test)]
pub(crate) mod mock;

pub use cache::{CacheEntry, ResourceCache};
pub use error::{ResolveError, TransportError};
pub use fetch::{FetchResponse, Fetcher, HttpConfig, HttpFetcher};
pub use resolve::{Resolved, Resolver, RESOLVER_TARGET};
pub use url::{Classified, Endpoints, Locator, ReferenceParser};
