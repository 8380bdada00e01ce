// src/scan/markdown.rs
// =============================================================================
// This module finds gist references in Markdown text.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// Both inline links and autolinks come through as link events, so
// "[snippet](https://gist.github.com/u/123)" and
// "<https://gist.github.com/u/123>" are both picked up.
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};

use crate::gist::ReferenceParser;

/// Returns every link in `markdown` that is a gist reference, in document
/// order, without duplicates.
pub fn extract_gist_references(markdown: &str, references: &ReferenceParser) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for event in Parser::new(markdown) {
        // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
        if let Event::Start(Tag::Link(_link_type, dest_url, _title)) = event {
            let url = dest_url.to_string();

            if references.classify(&url).is_ok() && !found.contains(&url) {
                found.push(url);
            }
        }
    }

    found
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why ask the ReferenceParser instead of matching "gist.github.com"?
//    - The hosts are configurable
//    - The parser already knows both accepted shapes, so the scanner keeps
//      exactly the links the resolver would accept
//
// 2. Why drop duplicates here?
//    - The resolver would serve a repeated reference from its cache anyway
//    - Rendering it once keeps the report short
// -----------------------------------------------------------------------------
