//! Article card rendering and the fallback path.
//!
//! Every scraped article becomes one `a.project-card` in the articles
//! container. All of them share the `articles` filter bucket; the scraped
//! category is only shown as a badge. Cards are inserted hidden and revealed
//! by a single filter refresh once the whole batch is in.

use super::filter::{FilterController, Reveal};
use crate::dom::{CATEGORY_ATTR, NewElement, Role, UiSurface};
use crate::error::ScrapeError;
use crate::models::Article;
use crate::utils::escape_html;
use tracing::{debug, instrument, warn};

/// Filter bucket shared by every rendered article card.
pub const ARTICLES_CATEGORY: &str = "articles";

/// Replace the container's contents with one card per article.
///
/// Returns the reveal produced by the post-insertion refresh, if a filter is
/// wired and a pill is active. Does nothing without an articles container.
#[instrument(level = "info", skip_all, fields(count = articles.len()))]
pub fn render_articles<S: UiSurface>(
    surface: &mut S,
    filter: Option<&FilterController>,
    articles: &[Article],
) -> Option<Reveal> {
    let Some(container) = surface.element(Role::ArticlesContainer) else {
        warn!("No articles container on the page; nothing rendered");
        return None;
    };

    surface.clear_children(container);
    for article in articles {
        surface.append_child(container, article_card(article));
    }
    debug!(inserted = articles.len(), "Inserted article cards");

    filter.and_then(|f| f.refresh(surface))
}

/// Blank the articles container and reveal the static fallback block.
pub fn show_fallback<S: UiSurface>(surface: &mut S, error: &ScrapeError) {
    warn!(error = %error, status = ?error.status(), "Failed to load articles; showing fallback");
    if let Some(container) = surface.element(Role::ArticlesContainer) {
        surface.clear_children(container);
    }
    if let Some(fallback) = surface.element(Role::ArticlesFallback) {
        surface.set_style(fallback, "display", "");
    }
}

/// The hidden, not-yet-revealed card element for one article.
pub fn article_card(article: &Article) -> NewElement {
    NewElement {
        tag: "a".to_string(),
        classes: vec!["project-card".to_string(), "small-card".to_string()],
        attrs: vec![
            ("href".to_string(), article.url.clone()),
            ("target".to_string(), "_blank".to_string()),
            ("rel".to_string(), "noopener noreferrer".to_string()),
            (CATEGORY_ATTR.to_string(), ARTICLES_CATEGORY.to_string()),
        ],
        styles: vec![
            ("display".to_string(), "none".to_string()),
            ("opacity".to_string(), "0".to_string()),
            ("transform".to_string(), "translateY(8px)".to_string()),
        ],
        inner_html: card_body(article),
    }
}

fn card_body(article: &Article) -> String {
    let badge = if article.category.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="card-pill">{}</span>"#, escape_html(&article.category))
    };
    format!(
        r#"<div class="project-thumbnail">{badge}<img src="{src}" alt="{alt}" class="thumbnail-img" loading="lazy"></div><div class="project-info"><h3 class="project-title">{title}</h3><p class="project-subtitle">{subtitle}</p></div>"#,
        src = escape_html(&article.image),
        alt = escape_html(&article.title),
        title = escape_html(&article.title),
        subtitle = escape_html(&article.subtitle),
    )
}
