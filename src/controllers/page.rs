//! Page wiring: which trigger runs which handler.
//!
//! [`Page::wire`] builds both controllers against a surface and registers a
//! named [`Handler`] for every trigger the page responds to. Components whose
//! elements are missing are simply not wired, and their triggers are never
//! registered. Dispatching an unregistered trigger is ignored.

use super::filter::{FilterController, Reveal};
use super::panel::PanelController;
use super::renderer::{render_articles, show_fallback};
use crate::config::SiteConfig;
use crate::dom::{ElementId, UiSurface};
use crate::error::ScrapeError;
use crate::models::Article;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

pub const ESCAPE: &str = "Escape";

/// A user action on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click(ElementId),
    Key(String),
}

/// What a registered trigger does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    SelectFilter(ElementId),
    TogglePanel,
    ClosePanel,
    EscapePanel,
}

pub struct Page<S> {
    surface: S,
    filter: Option<FilterController>,
    panel: Option<PanelController>,
    handlers: HashMap<Trigger, Handler>,
}

impl<S: UiSurface> Page<S> {
    pub fn wire(surface: S, config: &SiteConfig) -> Self {
        let filter = FilterController::wire(&surface, config);
        let panel = PanelController::wire(&surface);
        let mut handlers = HashMap::new();

        if let Some(filter) = &filter {
            for &pill in filter.pills() {
                handlers.insert(Trigger::Click(pill), Handler::SelectFilter(pill));
            }
        }
        if let Some(panel) = &panel {
            handlers.insert(Trigger::Click(panel.toggle_button()), Handler::TogglePanel);
            handlers.insert(Trigger::Click(panel.backdrop()), Handler::ClosePanel);
            if let Some(close) = panel.close_button() {
                handlers.insert(Trigger::Click(close), Handler::ClosePanel);
            }
            handlers.insert(Trigger::Key(ESCAPE.to_string()), Handler::EscapePanel);
        }

        info!(
            filter = filter.is_some(),
            panel = panel.is_some(),
            handlers = handlers.len(),
            "Page wired"
        );
        Self {
            surface,
            filter,
            panel,
            handlers,
        }
    }

    /// Activate the pill marked active in the markup, as if it were clicked.
    pub async fn start(&mut self) {
        let default = self
            .filter
            .as_ref()
            .and_then(|f| f.active(&self.surface))
            .map(|(pill, _)| pill);
        if let Some(pill) = default {
            self.dispatch(Trigger::Click(pill)).await;
        }
    }

    pub fn handler(&self, trigger: &Trigger) -> Option<Handler> {
        self.handlers.get(trigger).copied()
    }

    /// Run the handler registered for `trigger`. Returns whether one was registered.
    #[instrument(level = "debug", skip(self))]
    pub async fn dispatch(&mut self, trigger: Trigger) -> bool {
        let Some(handler) = self.handler(&trigger) else {
            debug!("No handler registered");
            return false;
        };

        match handler {
            Handler::SelectFilter(pill) => {
                let reveal = self
                    .filter
                    .as_ref()
                    .and_then(|f| f.select(&mut self.surface, pill));
                self.play(reveal).await;
            }
            Handler::TogglePanel => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.toggle(&mut self.surface);
                }
            }
            Handler::ClosePanel => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.close(&mut self.surface);
                }
            }
            Handler::EscapePanel => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.escape(&mut self.surface);
                }
            }
        }
        true
    }

    /// Render the aggregation outcome: cards on success, the fallback otherwise.
    pub async fn show_articles(&mut self, outcome: &Result<Vec<Article>, ScrapeError>) {
        match outcome {
            Ok(articles) => {
                let reveal = render_articles(&mut self.surface, self.filter.as_ref(), articles);
                self.play(reveal).await;
            }
            Err(e) => show_fallback(&mut self.surface, e),
        }
    }

    /// The pill whose filter value is `category`, if the filter is wired.
    pub fn pill_for(&self, category: &str) -> Option<ElementId> {
        self.filter
            .as_ref()
            .and_then(|f| f.pill_for(&self.surface, category))
    }

    pub fn active_filter(&self) -> Option<String> {
        self.filter
            .as_ref()
            .and_then(|f| f.active(&self.surface))
            .map(|(_, filter)| filter)
    }

    pub fn panel_open(&self) -> bool {
        self.panel.as_ref().is_some_and(PanelController::is_open)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    async fn play(&mut self, reveal: Option<Reveal>) {
        if let Some(reveal) = reveal {
            debug!(cards = reveal.cards().len(), "Revealing cards");
            reveal.play(&mut self.surface).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::load_articles;
    use crate::aggregator::tests::{StubFetcher, archive_page};
    use crate::aggregator::page_url;
    use crate::dom::{HeadlessSurface, Role};

    const MARKUP: &str = r#"<html><body>
        <button id="about-toggle">About</button>
        <div id="about-backdrop"></div>
        <aside id="about-panel" aria-hidden="true"><button id="about-close">×</button></aside>
        <button class="filter-pill" data-filter="apps">Apps</button>
        <button class="filter-pill active" data-filter="articles">Articles</button>
        <button class="filter-pill" data-filter="talks">Talks</button>
        <div class="project-grid">
            <a class="project-card" data-category="apps">App</a>
            <a class="project-card" data-category="talks">Talk</a>
            <div id="articles-container"><div class="skeleton"></div></div>
        </div>
        <div id="articles-fallback" style="display: none">Fallback</div>
    </body></html>"#;

    fn page() -> Page<HeadlessSurface> {
        Page::wire(HeadlessSurface::from_markup(MARKUP), &SiteConfig::default())
    }

    fn visible_categories(page: &Page<HeadlessSurface>) -> Vec<String> {
        let s = page.surface();
        s.cards()
            .into_iter()
            .filter(|&c| s.is_displayed(c) && s.style(c, "opacity").as_deref() == Some("1"))
            .map(|c| s.attr(c, "data-category").unwrap())
            .collect()
    }

    #[test]
    fn test_wire_registers_every_trigger() {
        let page = page();
        let s = page.surface();

        for pill in s.filter_pills() {
            assert_eq!(page.handler(&Trigger::Click(pill)), Some(Handler::SelectFilter(pill)));
        }
        let toggle = s.element(Role::AboutToggle).unwrap();
        let backdrop = s.element(Role::AboutBackdrop).unwrap();
        let close = s.element(Role::AboutClose).unwrap();
        assert_eq!(page.handler(&Trigger::Click(toggle)), Some(Handler::TogglePanel));
        assert_eq!(page.handler(&Trigger::Click(backdrop)), Some(Handler::ClosePanel));
        assert_eq!(page.handler(&Trigger::Click(close)), Some(Handler::ClosePanel));
        assert_eq!(
            page.handler(&Trigger::Key(ESCAPE.to_string())),
            Some(Handler::EscapePanel)
        );
        assert_eq!(page.handler(&Trigger::Key("Enter".to_string())), None);
    }

    #[test]
    fn test_missing_panel_registers_no_panel_triggers() {
        let markup = r#"<button class="filter-pill active" data-filter="a">a</button><div class="project-grid"></div>"#;
        let page = Page::wire(HeadlessSurface::from_markup(markup), &SiteConfig::default());
        assert_eq!(page.handler(&Trigger::Key(ESCAPE.to_string())), None);
        assert!(!page.panel_open());
    }

    #[tokio::test]
    async fn test_panel_flow() {
        let mut page = page();
        let toggle = page.surface().element(Role::AboutToggle).unwrap();
        let backdrop = page.surface().element(Role::AboutBackdrop).unwrap();

        assert!(page.dispatch(Trigger::Click(toggle)).await);
        assert!(page.panel_open());

        assert!(page.dispatch(Trigger::Key(ESCAPE.to_string())).await);
        assert!(!page.panel_open());

        assert!(page.dispatch(Trigger::Click(backdrop)).await);
        assert!(!page.panel_open());

        assert!(!page.dispatch(Trigger::Key("Enter".to_string())).await);
    }

    #[tokio::test]
    async fn test_start_applies_default_filter() {
        let mut page = page();
        page.start().await;

        assert_eq!(page.active_filter().as_deref(), Some("articles"));
        assert!(visible_categories(&page).is_empty());
        let grid = page.surface().element(Role::Grid).unwrap();
        assert!(page.surface().has_class(grid, "grid-4col"));
    }

    #[tokio::test]
    async fn test_loaded_articles_are_revealed_under_active_filter() {
        let config = SiteConfig::default();
        let fetcher = StubFetcher::default()
            .page(page_url(&config.author_url, 1), archive_page(1, 5, true))
            .page(page_url(&config.author_url, 2), archive_page(2, 2, false));

        let mut page = page();
        page.start().await;
        let outcome = load_articles(&fetcher, &config).await;
        page.show_articles(&outcome).await;

        assert_eq!(visible_categories(&page), vec!["articles"; 7]);

        let talks = page.pill_for("talks").unwrap();
        page.dispatch(Trigger::Click(talks)).await;
        assert_eq!(visible_categories(&page), vec!["talks"]);
    }

    #[tokio::test]
    async fn test_failed_load_shows_fallback() {
        let config = SiteConfig::default();
        let fetcher = StubFetcher::default().failing(page_url(&config.author_url, 1), 500);

        let mut page = page();
        page.start().await;
        let outcome = load_articles(&fetcher, &config).await;
        page.show_articles(&outcome).await;

        let s = page.surface();
        let container = s.element(Role::ArticlesContainer).unwrap();
        let fallback = s.element(Role::ArticlesFallback).unwrap();
        assert!(s.children(container).is_empty());
        assert!(s.is_displayed(fallback));
    }
}
