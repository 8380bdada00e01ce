// src/logging.rs
// =============================================================================
// Debug logging, switched on per subsystem.
//
// Each part of the crate logs under its own tracing target:
//   gist_codeblock, svg_gist, resolver, language
// Only targets listed in the config (or passed with --debug) are shown at
// debug level; everything else only reports warnings. RUST_LOG, when set,
// replaces this filter entirely.
//
// Logs go to stderr so stdout carries nothing but rendered output.
// =============================================================================

use tracing_subscriber::EnvFilter;

use crate::config::DebugConfig;

/// Builds the filter string, e.g. "warn,resolver=debug".
pub fn filter_directives(debug: &DebugConfig) -> String {
    std::iter::once("warn".to_string())
        .chain(
            debug
                .subsystems
                .iter()
                .map(|subsystem| format!("{subsystem}=debug")),
        )
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init(debug: &DebugConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(debug)));

    // try_init fails only when a subscriber is already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
