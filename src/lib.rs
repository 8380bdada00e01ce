// src/lib.rs
// =============================================================================
// gist-embed: resolve, cache and render GitHub Gist snippets for static
// documentation sites.
//
// Modules, leaf to root:
// - gist: reference parsing, HTTP transport, cache and resolver
// - lang: language tag detection for code fences
// - render: code block and SVG formatting
// - widgets: the per-widget callables a documentation host calls
// - scan: finding gist references in Markdown pages
// - config / logging: setup shared by every host
// =============================================================================

pub mod config;
pub mod gist;
pub mod lang;
pub mod logging;
pub mod render;
pub mod scan;
pub mod widgets;

pub use config::Config;
pub use widgets::{BlockingWidgets, CodeblockOptions, RenderReport, WidgetError, Widgets};
