//! The page surface the controllers drive.
//!
//! Controllers never touch markup directly. They go through [`UiSurface`], a
//! small capability interface: look up elements by role, read and write
//! classes/attributes/inline styles, insert children, and wait for the next
//! animation frame or a timer. [`HeadlessSurface`] implements it in memory.
//!
//! # DOM contract
//!
//! | Role | Selector |
//! |------|----------|
//! | filter pill | `.filter-pill` (`data-filter`, `active` marker) |
//! | card | `.project-card` (`data-category`) |
//! | [`Role::Grid`] | `.project-grid` |
//! | [`Role::AboutToggle`] | `#about-toggle` |
//! | [`Role::AboutPanel`] | `#about-panel` |
//! | [`Role::AboutBackdrop`] | `#about-backdrop` |
//! | [`Role::AboutClose`] | `#about-close` |
//! | [`Role::ArticlesContainer`] | `#articles-container` |
//! | [`Role::ArticlesFallback`] | `#articles-fallback` |

use std::time::Duration;

pub mod headless;

pub use headless::HeadlessSurface;

pub const FILTER_PILL: &str = ".filter-pill";
pub const PROJECT_CARD: &str = ".project-card";

pub const ACTIVE_CLASS: &str = "active";
pub const OPEN_CLASS: &str = "open";
pub const DENSE_GRID_CLASS: &str = "grid-4col";

pub const FILTER_ATTR: &str = "data-filter";
pub const CATEGORY_ATTR: &str = "data-category";
pub const ARIA_HIDDEN: &str = "aria-hidden";

/// Minimal page used when no markup file is given.
pub const DEFAULT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <nav class="filters">
    <button class="filter-pill active" data-filter="articles">Articles</button>
  </nav>
  <section class="project-grid">
    <div id="articles-container"></div>
  </section>
  <div id="articles-fallback" style="display: none">Read my articles on Create with Swift.</div>
</body>
</html>"#;

/// Handle to one element of a surface. Only meaningful for the surface that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

/// Singleton elements of the page, looked up by their fixed selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Grid,
    AboutToggle,
    AboutPanel,
    AboutBackdrop,
    AboutClose,
    ArticlesContainer,
    ArticlesFallback,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Grid,
        Role::AboutToggle,
        Role::AboutPanel,
        Role::AboutBackdrop,
        Role::AboutClose,
        Role::ArticlesContainer,
        Role::ArticlesFallback,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Role::Grid => ".project-grid",
            Role::AboutToggle => "#about-toggle",
            Role::AboutPanel => "#about-panel",
            Role::AboutBackdrop => "#about-backdrop",
            Role::AboutClose => "#about-close",
            Role::ArticlesContainer => "#articles-container",
            Role::ArticlesFallback => "#articles-fallback",
        }
    }
}

/// An element to be inserted with [`UiSurface::append_child`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewElement {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub styles: Vec<(String, String)>,
    /// Pre-escaped child markup.
    pub inner_html: String,
}

/// Capabilities the page controllers need from a rendering surface.
///
/// Style writes with an empty value remove the inline property, so the
/// element falls back to its stylesheet value.
pub trait UiSurface {
    fn element(&self, role: Role) -> Option<ElementId>;

    /// All filter pills, in document order.
    fn filter_pills(&self) -> Vec<ElementId>;

    /// All cards currently attached, static and inserted, in document order.
    fn cards(&self) -> Vec<ElementId>;

    fn attr(&self, id: ElementId, name: &str) -> Option<String>;
    fn set_attr(&mut self, id: ElementId, name: &str, value: &str);

    fn has_class(&self, id: ElementId, class: &str) -> bool;
    fn add_class(&mut self, id: ElementId, class: &str);
    fn remove_class(&mut self, id: ElementId, class: &str);

    fn style(&self, id: ElementId, property: &str) -> Option<String>;
    fn set_style(&mut self, id: ElementId, property: &str, value: &str);

    /// Detach every child of `parent`.
    fn clear_children(&mut self, parent: ElementId);
    fn append_child(&mut self, parent: ElementId, child: NewElement) -> ElementId;

    /// Resolve once the next animation frame begins.
    async fn next_frame(&mut self);
    async fn sleep(&mut self, duration: Duration);
}
