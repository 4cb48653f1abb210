//! Site configuration.
//!
//! Every field has a default matching the live portfolio, so the binary runs
//! with no configuration at all. A YAML file can override any subset of the
//! fields; CLI flags are applied on top by [`SiteConfig::apply_cli`].
//!
//! ```yaml
//! author_url: https://www.createwithswift.com/author/emanueleagosta/
//! cors_proxy: https://corsproxy.io/?
//! dense_categories: [articles, talks]
//! dedupe_by_url: true
//! ```

use crate::cli::Cli;
use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_AUTHOR_URL: &str = "https://www.createwithswift.com/author/emanueleagosta/";
pub const DEFAULT_CORS_PROXY: &str = "https://corsproxy.io/?";
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.createwithswift.com";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Page 1 of the author archive. Later pages live at `<author_url>page/N/`.
    pub author_url: String,
    /// Relay prefix; the target URL is appended percent-encoded.
    pub cors_proxy: String,
    /// Origin prepended to root-relative `href`/`src` values.
    pub site_origin: String,
    /// Filters that switch the grid into the dense column layout.
    pub dense_categories: Vec<String>,
    /// Per-card reveal delay step, in milliseconds.
    pub stagger_ms: u64,
    /// Extra time after the last card's delay before delays are cleared.
    pub settle_ms: u64,
    /// Drop repeated article URLs across pages (first occurrence wins).
    pub dedupe_by_url: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            author_url: DEFAULT_AUTHOR_URL.to_string(),
            cors_proxy: DEFAULT_CORS_PROXY.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            dense_categories: vec!["articles".to_string(), "talks".to_string()],
            stagger_ms: 40,
            settle_ms: 400,
            dedupe_by_url: false,
        }
    }
}

impl SiteConfig {
    /// Load from a YAML file, or fall back to defaults when no path is given.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).await?;
        let config: SiteConfig = serde_yaml::from_str(&raw).map_err(|e| {
            ScrapeError::config(format!("{}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "Loaded site configuration");
        Ok(config)
    }

    /// Layer CLI overrides on top of the file/default values.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.author_url {
            self.author_url = url.clone();
        }
        if let Some(proxy) = &cli.cors_proxy {
            self.cors_proxy = proxy.clone();
        }
        if cli.dedupe {
            self.dedupe_by_url = true;
        }
        self
    }

    /// Check URLs and normalize the archive URL to end with `/`.
    pub fn validate(mut self) -> Result<Self> {
        for (field, value) in [
            ("author_url", &self.author_url),
            ("cors_proxy", &self.cors_proxy),
            ("site_origin", &self.site_origin),
        ] {
            let parsed = Url::parse(value)
                .map_err(|e| ScrapeError::config(format!("{field} '{value}': {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ScrapeError::config(format!(
                    "{field} '{value}': unsupported scheme {}",
                    parsed.scheme()
                )));
            }
        }
        if !self.author_url.ends_with('/') {
            self.author_url.push('/');
        }
        self.site_origin = self.site_origin.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.author_url, DEFAULT_AUTHOR_URL);
        assert_eq!(config.stagger_ms, 40);
        assert_eq!(config.settle_ms, 400);
        assert_eq!(config.dense_categories, vec!["articles", "talks"]);
        assert!(!config.dedupe_by_url);
    }

    #[tokio::test]
    async fn test_load_without_path_is_default() {
        let config = SiteConfig::load(None).await.unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[tokio::test]
    async fn test_load_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cors_proxy: https://relay.example/?url=\ndedupe_by_url: true").unwrap();

        let config = SiteConfig::load(Some(file.path())).await.unwrap();
        assert_eq!(config.cors_proxy, "https://relay.example/?url=");
        assert!(config.dedupe_by_url);
        assert_eq!(config.author_url, DEFAULT_AUTHOR_URL);
    }

    #[tokio::test]
    async fn test_load_invalid_yaml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stagger_ms: [not, a, number]").unwrap();

        let err = SiteConfig::load(Some(file.path())).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Config { .. }));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "swift_articles",
            "--author-url",
            "https://example.com/author/someone",
            "--dedupe",
        ]);
        let config = SiteConfig::default().apply_cli(&cli).validate().unwrap();
        assert_eq!(config.author_url, "https://example.com/author/someone/");
        assert!(config.dedupe_by_url);
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = SiteConfig {
            cors_proxy: "not a url".to_string(),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SiteConfig {
            author_url: "ftp://example.com/".to_string(),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
