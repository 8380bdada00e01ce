// src/scan/mod.rs
// =============================================================================
// This module handles whole documentation pages.
//
// A page may embed many gists; scanning collects every gist reference in a
// Markdown file so they can all be rendered together.
// =============================================================================

mod markdown;

pub use markdown::extract_gist_references;
