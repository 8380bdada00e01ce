// src/lang/table.rs
// =============================================================================
// Static lookup tables for language tags.
//
// Two tables feed the detector: file extensions to fence tags, and names
// reported by the content guesser to fence tags. Everything either table can
// return, plus FALLBACK, is the closed set of tags the detector produces.
// =============================================================================

use std::path::Path;

/// Tag used when nothing better is known.
pub const FALLBACK: &str = "text";

/// Fence tag for a file name, based on its extension (case-insensitive).
///
/// `Dockerfile` and `.bashrc` have no extension and return `None`.
pub fn from_filename(filename: &str) -> Option<&'static str> {
    let ext = Path::new(filename).extension()?.to_str()?;
    from_extension(&ext.to_lowercase())
}

fn from_extension(ext: &str) -> Option<&'static str> {
    let tag = match ext {
        "sh" => "bash",
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "css" => "css",
        "scss" => "scss",
        "html" => "html",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "rs" => "rust",
        "go" => "go",
        "java" => "java",
        "cpp" => "cpp",
        "c" => "c",
        "php" => "php",
        "rb" => "ruby",
        "sql" => "sql",
        "md" => "markdown",
        "dockerfile" => "dockerfile",
        "jsx" => "jsx",
        "tsx" => "tsx",
        "ps1" | "psm1" | "psd1" => "powershell",
        _ => return None,
    };
    Some(tag)
}

/// Maps a guesser's language name onto a fence tag (case-insensitive).
pub fn from_guess_name(name: &str) -> Option<&'static str> {
    let tag = match name.to_lowercase().as_str() {
        "python" | "python3" => "python",
        "javascript" => "javascript",
        "typescript" => "typescript",
        "bash" | "console" | "shell" | "sh" | "bourne again shell (bash)" => "bash",
        "ruby" => "ruby",
        "php" => "php",
        "go" => "go",
        "rust" => "rust",
        _ => return None,
    };
    Some(tag)
}
