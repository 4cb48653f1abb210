//! Category filter over the card grid.
//!
//! The active category is whichever filter pill carries the `active` class;
//! selecting a pill moves the marker and refreshes the grid. A refresh is a
//! pure function of the surface: it re-queries every card, so cards inserted
//! after startup are picked up like static ones.
//!
//! A refresh happens in two parts. [`FilterController::refresh`] applies the
//! pre-animation pose synchronously and hands back a [`Reveal`], which then
//! waits two frames, staggers the matching cards in, and clears the stagger
//! delays once the animation has settled.

use crate::config::SiteConfig;
use crate::dom::{
    ACTIVE_CLASS, CATEGORY_ATTR, DENSE_GRID_CLASS, ElementId, FILTER_ATTR, Role, UiSurface,
};
use std::time::Duration;
use tracing::{debug, instrument};

const TRANSITION: &str = "opacity 0.35s ease, transform 0.35s ease";
const HIDDEN_OFFSET: &str = "translateY(8px)";
const RESTING_OFFSET: &str = "translateY(0)";

#[derive(Debug, Clone)]
pub struct FilterController {
    pills: Vec<ElementId>,
    grid: ElementId,
    dense_categories: Vec<String>,
    stagger: Duration,
    settle: Duration,
}

impl FilterController {
    /// Bind to the page's pills and grid. `None` when either is missing.
    pub fn wire<S: UiSurface>(surface: &S, config: &SiteConfig) -> Option<Self> {
        let pills = surface.filter_pills();
        let grid = surface.element(Role::Grid)?;
        if pills.is_empty() {
            return None;
        }
        Some(Self {
            pills,
            grid,
            dense_categories: config.dense_categories.clone(),
            stagger: config.stagger(),
            settle: config.settle(),
        })
    }

    pub fn pills(&self) -> &[ElementId] {
        &self.pills
    }

    /// The pill currently marked active and its filter value.
    pub fn active<S: UiSurface>(&self, surface: &S) -> Option<(ElementId, String)> {
        self.pills
            .iter()
            .copied()
            .find(|&pill| surface.has_class(pill, ACTIVE_CLASS))
            .map(|pill| (pill, surface.attr(pill, FILTER_ATTR).unwrap_or_default()))
    }

    /// First pill whose filter value is `category`.
    pub fn pill_for<S: UiSurface>(&self, surface: &S, category: &str) -> Option<ElementId> {
        self.pills
            .iter()
            .copied()
            .find(|&pill| surface.attr(pill, FILTER_ATTR).as_deref() == Some(category))
    }

    /// Make `pill` the only active pill, then refresh.
    pub fn select<S: UiSurface>(&self, surface: &mut S, pill: ElementId) -> Option<Reveal> {
        for &other in &self.pills {
            surface.remove_class(other, ACTIVE_CLASS);
        }
        surface.add_class(pill, ACTIVE_CLASS);
        self.refresh(surface)
    }

    /// Re-apply the active filter to every card on the surface.
    ///
    /// Returns `None`, touching nothing, when no pill is active.
    #[instrument(level = "debug", skip_all)]
    pub fn refresh<S: UiSurface>(&self, surface: &mut S) -> Option<Reveal> {
        let Some((_, filter)) = self.active(surface) else {
            debug!("No active filter pill; refresh skipped");
            return None;
        };

        let mut matching = Vec::new();
        for card in surface.cards() {
            surface.set_style(card, "transition", TRANSITION);
            if surface.attr(card, CATEGORY_ATTR).as_deref() == Some(filter.as_str()) {
                surface.set_style(card, "display", "");
                surface.set_style(card, "opacity", "0");
                surface.set_style(card, "transform", HIDDEN_OFFSET);
                matching.push(card);
            } else {
                surface.set_style(card, "display", "none");
                surface.set_style(card, "opacity", "0");
            }
        }

        if self.dense_categories.iter().any(|c| *c == filter) {
            surface.add_class(self.grid, DENSE_GRID_CLASS);
        } else {
            surface.remove_class(self.grid, DENSE_GRID_CLASS);
        }

        debug!(%filter, visible = matching.len(), "Applied filter");
        Some(Reveal {
            cards: matching,
            stagger: self.stagger,
            settle: self.settle,
        })
    }
}

/// The deferred half of a refresh: the staggered entrance of matching cards.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a Reveal does nothing until played"]
pub struct Reveal {
    cards: Vec<ElementId>,
    stagger: Duration,
    settle: Duration,
}

impl Reveal {
    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }

    /// Delay before stagger delays are cleared: one step per card plus the settle time.
    pub fn settle_after(&self) -> Duration {
        let steps = u32::try_from(self.cards.len()).unwrap_or(u32::MAX);
        self.stagger.saturating_mul(steps).saturating_add(self.settle)
    }

    pub async fn play<S: UiSurface>(self, surface: &mut S) {
        // Two frames, so the display change is committed before the transition starts.
        surface.next_frame().await;
        surface.next_frame().await;
        self.animate(surface);

        surface.sleep(self.settle_after()).await;
        for &card in &self.cards {
            surface.set_style(card, "transition-delay", "");
        }
    }

    /// Give each card its stagger delay and move it to the resting pose.
    pub fn animate<S: UiSurface>(&self, surface: &mut S) {
        for (i, &card) in self.cards.iter().enumerate() {
            let delay = self.stagger.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX));
            surface.set_style(card, "transition-delay", &format!("{}ms", delay.as_millis()));
            surface.set_style(card, "opacity", "1");
            surface.set_style(card, "transform", RESTING_OFFSET);
        }
    }
}
