//! JSON dump of the aggregated articles.
//!
//! ```json
//! {
//!   "fetched_at": "2025-05-06T10:00:00+00:00",
//!   "source": "https://www.createwithswift.com/author/emanueleagosta/",
//!   "articles": [{ "url": "...", "image": "...", "category": "...", "title": "...", "subtitle": "..." }]
//! }
//! ```

use crate::error::Result;
use crate::models::{Article, ArticleFeed};
use chrono::Utc;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Wrap `articles` in an [`ArticleFeed`] stamped with the current time.
pub fn feed(source: &str, articles: &[Article]) -> ArticleFeed {
    ArticleFeed {
        fetched_at: Utc::now().to_rfc3339(),
        source: source.to_string(),
        articles: articles.to_vec(),
    }
}

/// Write `feed` as pretty-printed JSON, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_feed(feed: &ArticleFeed, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(feed)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).await?;
    }
    fs::write(path, json).await?;
    info!(count = feed.articles.len(), "Wrote article feed");
    Ok(())
}
