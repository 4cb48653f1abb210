//! Error taxonomy for fetching, aggregating and writing scraped articles.
//!
//! Only [`ScrapeError::Fetch`], [`ScrapeError::Network`] and
//! [`ScrapeError::EmptyResult`] ever reach the fallback path. Articles with a
//! missing title are skipped silently by the extractor and never show up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The proxy answered, but with a status outside the 2xx range.
    #[error("HTTP {status} while fetching {url}")]
    Fetch { status: u16, url: String },

    /// Transport-level failure (DNS, connect, body read). Propagated as-is.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Every attempted page parsed, but not a single article came out.
    #[error("no articles found")]
    EmptyResult,

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn config(message: impl Into<String>) -> Self {
        ScrapeError::Config {
            message: message.into(),
        }
    }

    /// HTTP status carried by a [`ScrapeError::Fetch`].
    pub fn status(&self) -> Option<u16> {
        match self {
            ScrapeError::Fetch { status, .. } => Some(*status),
            ScrapeError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
