// src/config.rs
// =============================================================================
// Configuration, read from an optional TOML file.
//
// Every field has a default, so an empty file (or no file) gives a working
// setup against GitHub Gist. Unknown keys are rejected so typos show up
// instead of being silently ignored.
//
// Example:
//
//   [endpoints]
//   share_host = "https://gist.github.com"
//   content_host = "https://gist.githubusercontent.com"
//
//   [http]
//   timeout_secs = 10
//   max_connections = 10
//   max_idle_connections = 5
//
//   [debug]
//   subsystems = ["gist_codeblock", "resolver"]
// =============================================================================

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::gist::{Endpoints, HttpConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub endpoints: Endpoints,
    pub http: HttpConfig,
    pub debug: DebugConfig,
}

/// Which subsystems write debug logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugConfig {
    pub subsystems: Vec<String>,
}

impl Config {
    /// Loads the file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                Self::from_toml(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        check_host("endpoints.share_host", &self.endpoints.share_host)?;
        check_host("endpoints.content_host", &self.endpoints.content_host)?;

        if self.http.timeout_secs == 0 {
            bail!("http.timeout_secs must be greater than 0");
        }
        if self.http.max_connections == 0 {
            bail!("http.max_connections must be greater than 0");
        }
        Ok(())
    }

    /// Turns on debug logging for extra subsystems (from the command line).
    pub fn enable_debug<I, S>(&mut self, subsystems: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for subsystem in subsystems {
            let subsystem = subsystem.into();
            if !self.debug.subsystems.contains(&subsystem) {
                self.debug.subsystems.push(subsystem);
            }
        }
    }
}

fn check_host(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{field} is not a URL: {value}"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("{field} must use http or https: {value}");
    }
    if url.host_str().is_none() {
        bail!("{field} has no host: {value}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.endpoints.share_host, "https://gist.github.com");
        assert_eq!(
            config.endpoints.content_host,
            "https://gist.githubusercontent.com"
        );
        assert_eq!(config.http.timeout_secs, 10);
        assert!(config.debug.subsystems.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [http]
            timeout_secs = 3

            [debug]
            subsystems = ["resolver"]
            "#,
        )
        .unwrap();

        assert_eq!(config.http.timeout_secs, 3);
        assert_eq!(config.http.max_connections, 10);
        assert_eq!(config.endpoints, Endpoints::default());
        assert_eq!(config.debug.subsystems, vec!["resolver"]);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = Config::from_toml("[http]\ntimeout = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.endpoints.share_host = "gist.github.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.endpoints.content_host = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.max_connections = 0;
        assert!(config.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("gist-embed-{}.toml", std::process::id()));
        fs::write(
            &path,
            "[endpoints]\nshare_host = \"https://sharehost.example\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.endpoints.share_host, "https://sharehost.example");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_enable_debug_deduplicates() {
        let mut config = Config::default();
        config.enable_debug(["resolver", "svg_gist"]);
        config.enable_debug(vec!["resolver".to_string()]);
        assert_eq!(config.debug.subsystems, vec!["resolver", "svg_gist"]);
    }
}
