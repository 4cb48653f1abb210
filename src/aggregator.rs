//! Multi-page article aggregation.
//!
//! Pages are fetched strictly in order, because whether page N+1 exists is
//! only known after parsing page N. At most [`MAX_PAGES`] pages are read.
//!
//! | Page | Failure | Effect |
//! |------|---------|--------|
//! | 1 | fetch error | whole aggregation fails |
//! | 2, 3 | fetch error | stop paginating, keep earlier pages |
//! | any | no articles at all | [`ScrapeError::EmptyResult`] |

use crate::config::SiteConfig;
use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use crate::models::Article;
use crate::scrapers::createwithswift::{has_next_page, parse_articles};
use crate::utils::truncate_for_log;
use itertools::Itertools;
use scraper::Html;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

pub const MAX_PAGES: usize = 3;

/// URL of archive page `page` (1-based). Page 1 is `base` itself.
pub fn page_url(base: &str, page: usize) -> String {
    if page <= 1 {
        base.to_string()
    } else {
        format!("{}/page/{page}/", base.trim_end_matches('/'))
    }
}

/// Placeholder URLs stand for "no link" and never identify an article.
fn is_placeholder(url: &str) -> bool {
    url.is_empty() || url == "#"
}

/// Fetch up to [`MAX_PAGES`] archive pages and concatenate their articles.
///
/// Articles keep page order, then in-page order. With `dedupe_by_url` set,
/// later repeats of an already-seen URL are dropped; link-less articles are
/// always kept.
#[instrument(level = "info", skip_all, fields(author_url = %config.author_url))]
pub async fn load_articles<F: PageFetcher>(fetcher: &F, config: &SiteConfig) -> Result<Vec<Article>> {
    let t0 = Instant::now();
    let mut articles: Vec<Article> = Vec::new();
    let mut pages_read = 0usize;

    for page in 1..=MAX_PAGES {
        let url = page_url(&config.author_url, page);
        let html = match fetcher.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                warn!(page, %url, error = %e, "Optional page failed; keeping earlier pages");
                break;
            }
        };

        let document = Html::parse_document(&html);
        let found = parse_articles(&document, &config.site_origin);
        let more = has_next_page(&document);
        info!(page, count = found.len(), has_next = more, "Scraped archive page");
        if found.is_empty() {
            debug!(page, preview = %truncate_for_log(&html, 300), "Page had no post cards");
        }

        articles.extend(found);
        pages_read = page;
        if !more {
            break;
        }
    }

    if config.dedupe_by_url {
        let before = articles.len();
        articles = articles
            .into_iter()
            .enumerate()
            .unique_by(|(i, a)| {
                if is_placeholder(&a.url) {
                    (String::new(), Some(*i))
                } else {
                    (a.url.clone(), None)
                }
            })
            .map(|(_, a)| a)
            .collect();
        if articles.len() < before {
            info!(dropped = before - articles.len(), "Removed duplicate articles");
        }
    }

    if articles.is_empty() {
        return Err(ScrapeError::EmptyResult);
    }

    info!(
        count = articles.len(),
        pages = pages_read,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Aggregated articles"
    );
    Ok(articles)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory fetcher: serves canned bodies per URL and records every request.
    #[derive(Default)]
    pub(crate) struct StubFetcher {
        pages: HashMap<String, std::result::Result<String, u16>>,
        pub(crate) requested: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        pub(crate) fn page(mut self, url: String, body: String) -> Self {
            self.pages.insert(url, Ok(body));
            self
        }

        pub(crate) fn failing(mut self, url: String, status: u16) -> Self {
            self.pages.insert(url, Err(status));
            self
        }
    }

    impl PageFetcher for StubFetcher {
        async fn fetch_page(&self, url: &str) -> Result<String> {
            self.requested.borrow_mut().push(url.to_string());
            match self.pages.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(ScrapeError::Fetch {
                    status: *status,
                    url: url.to_string(),
                }),
                None => Err(ScrapeError::Fetch {
                    status: 404,
                    url: url.to_string(),
                }),
            }
        }
    }

    /// An archive page holding `count` titled cards labelled `p{page}-{i}`.
    pub(crate) fn archive_page(page: usize, count: usize, next: bool) -> String {
        let cards: String = (0..count)
            .map(|i| {
                format!(
                    r#"<article class="post-card"><a class="post-card-content-link" href="/p{page}-{i}/"><h2 class="post-card-title">p{page}-{i}</h2></a></article>"#
                )
            })
            .collect();
        let nav = if next {
            r#"<a aria-label="Next page" href="next">Next</a>"#
        } else {
            ""
        };
        format!("<html><body>{cards}{nav}</body></html>")
    }

    fn config() -> SiteConfig {
        SiteConfig::default()
    }

    fn url(page: usize) -> String {
        page_url(&config().author_url, page)
    }

    fn titles(articles: &[Article]) -> Vec<String> {
        articles.iter().map(|a| a.title.clone()).collect()
    }

    #[test]
    fn test_page_url() {
        let base = "https://www.createwithswift.com/author/emanueleagosta/";
        assert_eq!(page_url(base, 1), base);
        assert_eq!(
            page_url(base, 3),
            "https://www.createwithswift.com/author/emanueleagosta/page/3/"
        );
        assert_eq!(
            page_url("https://www.createwithswift.com/author/emanueleagosta", 2),
            "https://www.createwithswift.com/author/emanueleagosta/page/2/"
        );
    }

    #[tokio::test]
    async fn test_first_page_failure_is_terminal() {
        let fetcher = StubFetcher::default().failing(url(1), 500);
        let err = load_articles(&fetcher, &config()).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Fetch { status: 500, .. }));
        assert_eq!(fetcher.requested.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_single_page_without_next() {
        let fetcher = StubFetcher::default().page(url(1), archive_page(1, 5, false));
        let articles = load_articles(&fetcher, &config()).await.unwrap();

        assert_eq!(articles.len(), 5);
        assert_eq!(*fetcher.requested.borrow(), vec![url(1)]);
    }

    #[tokio::test]
    async fn test_stops_when_second_page_has_no_next() {
        let fetcher = StubFetcher::default()
            .page(url(1), archive_page(1, 5, true))
            .page(url(2), archive_page(2, 2, false))
            .page(url(3), archive_page(3, 3, false));
        let articles = load_articles(&fetcher, &config()).await.unwrap();

        assert_eq!(articles.len(), 7);
        assert_eq!(*fetcher.requested.borrow(), vec![url(1), url(2)]);
    }

    #[tokio::test]
    async fn test_second_page_failure_keeps_first() {
        let fetcher = StubFetcher::default()
            .page(url(1), archive_page(1, 5, true))
            .failing(url(2), 502)
            .page(url(3), archive_page(3, 3, false));
        let articles = load_articles(&fetcher, &config()).await.unwrap();

        assert_eq!(articles.len(), 5);
        assert!(articles.iter().all(|a| a.title.starts_with("p1-")));
        assert_eq!(*fetcher.requested.borrow(), vec![url(1), url(2)]);
    }

    #[tokio::test]
    async fn test_three_pages_in_order() {
        let fetcher = StubFetcher::default()
            .page(url(1), archive_page(1, 5, true))
            .page(url(2), archive_page(2, 5, true))
            .page(url(3), archive_page(3, 3, false));
        let articles = load_articles(&fetcher, &config()).await.unwrap();

        assert_eq!(articles.len(), 13);
        let expected: Vec<String> = [(1, 5), (2, 5), (3, 3)]
            .iter()
            .flat_map(|&(p, n)| (0..n).map(move |i| format!("p{p}-{i}")))
            .collect();
        assert_eq!(titles(&articles), expected);
    }

    #[tokio::test]
    async fn test_third_page_failure_keeps_first_two() {
        let fetcher = StubFetcher::default()
            .page(url(1), archive_page(1, 5, true))
            .page(url(2), archive_page(2, 5, true))
            .failing(url(3), 503);
        let articles = load_articles(&fetcher, &config()).await.unwrap();
        assert_eq!(articles.len(), 10);
    }

    #[tokio::test]
    async fn test_never_reads_past_third_page() {
        let fetcher = StubFetcher::default()
            .page(url(1), archive_page(1, 1, true))
            .page(url(2), archive_page(2, 1, true))
            .page(url(3), archive_page(3, 1, true))
            .page(url(4), archive_page(4, 1, false));
        let articles = load_articles(&fetcher, &config()).await.unwrap();

        assert_eq!(articles.len(), 3);
        assert_eq!(fetcher.requested.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_pages_are_empty_result() {
        let fetcher = StubFetcher::default()
            .page(url(1), archive_page(1, 0, true))
            .page(url(2), archive_page(2, 0, false));
        let err = load_articles(&fetcher, &config()).await.unwrap_err();
        assert!(matches!(err, ScrapeError::EmptyResult));
    }

    #[tokio::test]
    async fn test_duplicates_kept_unless_dedupe() {
        // Page 2 repeats page 1's only article.
        let fetcher = StubFetcher::default()
            .page(url(1), archive_page(1, 1, true))
            .page(url(2), archive_page(1, 1, false));

        let kept = load_articles(&fetcher, &config()).await.unwrap();
        assert_eq!(kept.len(), 2);

        let deduped_config = SiteConfig {
            dedupe_by_url: true,
            ..config()
        };
        let deduped = load_articles(&fetcher, &deduped_config).await.unwrap();
        assert_eq!(titles(&deduped), vec!["p1-0"]);
    }

    #[tokio::test]
    async fn test_dedupe_keeps_linkless_articles() {
        let page = r#"<html><body>
            <article class="post-card"><h2 class="post-card-title">One</h2></article>
            <article class="post-card"><h2 class="post-card-title">Two</h2></article>
        </body></html>"#;
        let fetcher = StubFetcher::default().page(url(1), page.to_string());
        let dedupe_config = SiteConfig {
            dedupe_by_url: true,
            ..config()
        };

        let articles = load_articles(&fetcher, &dedupe_config).await.unwrap();
        assert_eq!(titles(&articles), vec!["One", "Two"]);
    }
}
