// src/render/svg.rs
// =============================================================================
// Prepares an SVG icon from a gist for inline display.
//
// - Fixed width/height attributes are dropped so CSS controls the size
// - Hard-coded dark fills become a CSS class, so the icon follows the theme
// - The result is squeezed onto one line so it can live in a table cell
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

static WIDTH_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"width="[^"]+""#).expect("static regex is valid"));
static HEIGHT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"height="[^"]+""#).expect("static regex is valid"));

const ICON_CLASS: &str = r#"class="custom-link-card-icon""#;
const BANNER_STYLE: &str = "display:inline-block; width:180px; height:45px; vertical-align:middle;";
const ICON_STYLE: &str = "display:inline-block; width:72px; height:72px; vertical-align:middle;";

pub fn is_svg(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".svg")
}

/// Strips sizing and recolours fills.
pub fn process_svg(svg: &str) -> String {
    let svg = WIDTH_ATTR.replace_all(svg, "");
    let svg = HEIGHT_ATTR.replace_all(&svg, "");

    svg.replace(r##"fill="#333""##, ICON_CLASS)
        .replace(r#"fill="black""#, ICON_CLASS)
        .replace(r#"fill-rule="evenodd""#, "")
        .replace(r#"clip-rule="evenodd""#, "")
}

/// Full widget markup for an SVG file.
///
/// Wide logotypes get a banner-sized box, everything else a square icon box.
pub fn svg_widget(svg: &str, filename: &str) -> String {
    let style = if filename.contains("logotype") {
        BANNER_STYLE
    } else {
        ICON_STYLE
    };

    let wrapped = format!(
        "\n    <div class=\"custom-link-card-image\" style=\"{style}\">\n        {}\n    </div>\n",
        process_svg(svg)
    );

    wrapped.replace('\n', " ").replace("  ", " ")
}
