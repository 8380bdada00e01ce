// src/render/mod.rs
// =============================================================================
// Turns resolved gist content into page markup.
//
// Submodules:
// - codeblock: Fenced, indented Markdown code blocks
// - svg: Inline SVG icons
// =============================================================================

mod codeblock;
mod svg;

pub use codeblock::{codeblock, unescape, MAX_INDENT};
pub use svg::{is_svg, process_svg, svg_widget};
