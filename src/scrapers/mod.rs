//! Scrapers for article archive sites.
//!
//! Each scraper works on an already-parsed [`scraper::Html`] document and
//! exports two functions:
//! - `parse_articles(document, origin)`: the normalized [`Article`](crate::models::Article)s
//!   on the page, in document order
//! - `has_next_page(document)`: whether the page links to a following page
//!
//! Fetching and page iteration live in [`crate::aggregator`].
//!
//! Field lookups are written as ordered lists of CSS selectors
//! ([`Candidates`]): the first selector that matches inside a card wins.

use scraper::{ElementRef, Selector};

pub mod createwithswift;

/// An ordered list of selectors tried one after another.
#[derive(Debug)]
pub struct Candidates(Vec<Selector>);

impl Candidates {
    /// Build from static selector strings.
    ///
    /// # Panics
    ///
    /// On an invalid selector. Only call this with literals.
    pub fn parse(selectors: &[&str]) -> Self {
        Candidates(
            selectors
                .iter()
                .map(|s| Selector::parse(s).unwrap())
                .collect(),
        )
    }

    /// First element under `scope` matched by the earliest selector that matches anything.
    pub fn first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.0.iter().find_map(|sel| scope.select(sel).next())
    }

    /// Whether any selector matches anywhere under `scope`.
    pub fn any_match(&self, scope: ElementRef<'_>) -> bool {
        self.first(scope).is_some()
    }
}
