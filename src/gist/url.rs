// src/gist/url.rs
// =============================================================================
// This module classifies gist references.
//
// Two shapes are accepted:
//   - Share form:  https://gist.github.com/<owner>/<hex-id>
//     We only know the page, so a discovery request is needed to find the
//     raw file behind it.
//   - Direct form: https://gist.githubusercontent.com/<owner>/<id>/raw/<file>
//     Already points at the content, no discovery needed.
//
// Anything else is rejected. Classification never touches the network.
// =============================================================================

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::ResolveError;

/// The two hosts a reference can point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Endpoints {
    /// Host serving the HTML share pages
    pub share_host: String,
    /// Host serving raw file contents
    pub content_host: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            share_host: "https://gist.github.com".to_string(),
            content_host: "https://gist.githubusercontent.com".to_string(),
        }
    }
}

/// A directly fetchable address plus the file name it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    pub direct_url: String,
    pub filename: String,
}

/// Result of looking at a reference without going to the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// The reference is already a raw-content URL
    Direct(Locator),
    /// The reference is a share page that has to be scraped first
    NeedsDiscovery { owner: String, resource_id: String },
}

/// Splits references into share-form and direct-form.
#[derive(Debug, Clone)]
pub struct ReferenceParser {
    share_host: String,
    content_host: String,
    share_pattern: Regex,
}

impl ReferenceParser {
    pub fn new(endpoints: &Endpoints) -> Result<Self, regex::Error> {
        let share_host = endpoints.share_host.trim_end_matches('/').to_string();
        let content_host = endpoints.content_host.trim_end_matches('/').to_string();

        // Anchored at the start only; trailing path segments or fragments
        // after the id are ignored, the same way a browser would land on the
        // gist page
        let share_pattern = Regex::new(&format!(
            r"^{}/([^/]+)/([a-f0-9]+)",
            regex::escape(&share_host)
        ))?;

        Ok(Self {
            share_host,
            content_host,
            share_pattern,
        })
    }

    pub fn classify(&self, reference: &str) -> Result<Classified, ResolveError> {
        if reference.starts_with(&format!("{}/", self.content_host)) {
            return Ok(Classified::Direct(Locator {
                direct_url: reference.to_string(),
                filename: last_segment(reference).to_string(),
            }));
        }

        let captures = self
            .share_pattern
            .captures(reference)
            .ok_or(ResolveError::InvalidFormat)?;

        Ok(Classified::NeedsDiscovery {
            owner: captures[1].to_string(),
            resource_id: captures[2].to_string(),
        })
    }

    /// The HTML page for a share-form reference.
    pub fn share_page_url(&self, owner: &str, resource_id: &str) -> String {
        format!("{}/{}/{}", self.share_host, owner, resource_id)
    }

    /// Turns a raw path scraped from a share page into a fetchable locator.
    pub fn locator_for_raw_path(&self, raw_path: &str) -> Locator {
        Locator {
            direct_url: format!("{}{}", self.content_host, raw_path),
            filename: last_segment(raw_path).to_string(),
        }
    }
}

// "a/b/raw/file.py" -> "file.py"
fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
