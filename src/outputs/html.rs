//! HTML fragment of the rendered article cards.
//!
//! The fragment is the current markup of every card in the articles
//! container, one per line, including the inline styles left by the last
//! filter refresh. It can be pasted into the page in place of the skeletons.

use crate::dom::{HeadlessSurface, Role, UiSurface};
use crate::error::Result;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Markup of the articles container's children, or `None` without a container.
pub fn cards_fragment(surface: &HeadlessSurface) -> Option<String> {
    let container = surface.element(Role::ArticlesContainer)?;
    let fragment = surface
        .children(container)
        .into_iter()
        .map(|card| surface.outer_html(card))
        .collect::<Vec<_>>()
        .join("\n");
    Some(fragment)
}

#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_cards(surface: &HeadlessSurface, path: &Path) -> Result<()> {
    let Some(fragment) = cards_fragment(surface) else {
        warn!("Page has no articles container; skipping HTML output");
        return Ok(());
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).await?;
    }
    fs::write(path, &fragment).await?;
    info!(bytes = fragment.len(), "Wrote card fragment");
    Ok(())
}
