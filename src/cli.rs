// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gist_embed::render::MAX_INDENT;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "gist-embed",
    version,
    about = "Render GitHub Gist snippets as documentation widgets",
    long_about = "gist-embed resolves gist share links and raw URLs, detects the snippet language \
                  and prints ready-to-embed Markdown code blocks or inline SVG icons."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logs for a subsystem (gist_codeblock, svg_gist, resolver, language)
    ///
    /// Can be given more than once: --debug resolver --debug language
    #[arg(long = "debug", value_name = "SUBSYSTEM", global = true)]
    pub debug: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one or more gists as fenced code blocks
    ///
    /// Example: gist-embed codeblock https://gist.github.com/user/1a2b3c --indent 1
    Codeblock {
        /// Gist share URLs or raw URLs
        #[arg(required = true)]
        references: Vec<String>,

        /// Indent level (4 spaces per level, at most 64)
        #[arg(long, default_value_t = 0, value_parser = parse_indent)]
        indent: usize,

        /// Force the code block language instead of detecting it
        #[arg(long)]
        ext: Option<String>,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Render an SVG file from a gist as an inline icon
    ///
    /// Example: gist-embed svg https://gist.github.com/user/1a2b3c
    Svg {
        /// Gist share URL or raw URL of an .svg file
        reference: String,
    },

    /// Render every gist linked from a Markdown file
    ///
    /// Example: gist-embed scan docs/index.md --json
    Scan {
        /// Markdown file to scan
        markdown_file: PathBuf,

        /// Indent level (4 spaces per level, at most 64)
        #[arg(long, default_value_t = 0, value_parser = parse_indent)]
        indent: usize,

        /// Output results in JSON format
        #[arg(long)]
        json: bool,
    },
}

// Rejects indent levels the renderer would clamp anyway
fn parse_indent(value: &str) -> Result<usize, String> {
    let level: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a whole number"))?;

    if level > MAX_INDENT {
        return Err(format!("indent must be at most {MAX_INDENT}"));
    }
    Ok(level)
}
