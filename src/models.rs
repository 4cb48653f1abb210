//! Data models for scraped articles.
//!
//! - [`Article`]: one normalized card scraped from an author archive page
//! - [`ArticleFeed`]: the aggregated batch, as written to the JSON output

use serde::{Deserialize, Serialize};

/// A normalized article summary.
///
/// `url` and `image` are already resolved to absolute form (or left as-is when
/// they are empty or a fragment). `title` is never empty for articles produced
/// by the extractor; every other text field defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// Absolute link to the article.
    pub url: String,
    /// Absolute thumbnail URL, empty when the card had no image.
    pub image: String,
    /// Primary tag shown as a badge on the card.
    pub category: String,
    /// Article headline.
    pub title: String,
    /// Excerpt text.
    pub subtitle: String,
}

/// The aggregated result of one scrape run.
#[derive(Debug, Deserialize, Serialize)]
pub struct ArticleFeed {
    /// RFC 3339 timestamp of when the batch was assembled.
    pub fetched_at: String,
    /// Author archive the batch was scraped from.
    pub source: String,
    pub articles: Vec<Article>,
}
