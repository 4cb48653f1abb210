//! Create with Swift author archive scraper.
//!
//! The archive is a Ghost theme: every article is an `article.post-card`
//! holding a link, a feature image, a primary tag, a title and an excerpt.
//! Pages follow a fixed `/page/N/` scheme, so the pagination markup is only
//! used as a yes/no signal.

use super::Candidates;
use crate::models::Article;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

static CARD: Lazy<Selector> = Lazy::new(|| Selector::parse("article.post-card").unwrap());

static LINK: Lazy<Candidates> = Lazy::new(|| Candidates::parse(&["a.post-card-content-link", "a"]));
static IMAGE: Lazy<Candidates> = Lazy::new(|| Candidates::parse(&["img.post-card-image", "img"]));
static TAG: Lazy<Candidates> = Lazy::new(|| Candidates::parse(&[".post-card-primary-tag"]));
static TITLE: Lazy<Candidates> = Lazy::new(|| Candidates::parse(&["h2.post-card-title"]));
static EXCERPT: Lazy<Candidates> =
    Lazy::new(|| Candidates::parse(&[".post-card-excerpt p", ".post-card-excerpt"]));

static NEXT_PAGE: Lazy<Candidates> = Lazy::new(|| {
    Candidates::parse(&[
        r#"a[aria-label="Next page"]"#,
        ".pagination .next",
        "a.pagination-next",
    ])
});

/// Extract every titled post card from an archive page, in document order.
///
/// Cards without an `h2.post-card-title` are skipped; nothing else excludes a
/// card. Links and images are resolved against `origin` with [`resolve_url`].
#[instrument(level = "debug", skip(document))]
pub fn parse_articles(document: &Html, origin: &str) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut skipped = 0usize;

    for card in document.select(&CARD) {
        let Some(title) = TITLE.first(card) else {
            skipped += 1;
            continue;
        };

        let raw_link = LINK
            .first(card)
            .map(|a| a.value().attr("href").unwrap_or(""))
            .unwrap_or("#");
        let raw_image = IMAGE.first(card).map(image_source).unwrap_or("");

        articles.push(Article {
            url: resolve_url(raw_link, origin),
            image: resolve_url(raw_image, origin),
            category: TAG.first(card).map(trimmed_text).unwrap_or_default(),
            title: trimmed_text(title),
            subtitle: EXCERPT.first(card).map(trimmed_text).unwrap_or_default(),
        });
    }

    debug!(found = articles.len(), skipped, "Parsed post cards");
    articles
}

/// Whether the page advertises a following page.
pub fn has_next_page(document: &Html) -> bool {
    NEXT_PAGE.any_match(document.root_element())
}

/// Make an `href`/`src` value absolute.
///
/// - `//host/path` gains `https:`
/// - `/path` gains `origin`
/// - anything else (absolute URLs, fragments, empty) is returned unchanged
pub fn resolve_url(raw: &str, origin: &str) -> String {
    if let Some(rest) = raw.strip_prefix("//") {
        format!("https://{rest}")
    } else if raw.starts_with('/') {
        format!("{origin}{raw}")
    } else {
        raw.to_string()
    }
}

/// `src`, or the first URL of `srcset` when `src` is missing or empty.
fn image_source(img: ElementRef<'_>) -> &str {
    let el = img.value();
    el.attr("src")
        .filter(|s| !s.is_empty())
        .or_else(|| el.attr("srcset").and_then(|set| set.split_whitespace().next()))
        .unwrap_or("")
}

fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
