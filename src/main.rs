//! # Swift Articles
//!
//! Headless controller for a portfolio page: it wires the category filter and
//! the about panel against the page markup, scrapes the author's archive on
//! Create with Swift, and inserts the articles into the card grid.
//!
//! ## Usage
//!
//! ```sh
//! swift_articles --page ./index.html -j ./articles.json -o ./articles.html
//! ```
//!
//! ## Architecture
//!
//! 1. **Wiring**: build the page surface and register the filter/panel handlers
//! 2. **Aggregation**: fetch up to three archive pages through the CORS relay
//! 3. **Rendering**: insert article cards and refresh the active filter, or
//!    reveal the fallback block when nothing could be loaded
//! 4. **Output**: optionally write the articles as JSON and the cards as HTML

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod config;
mod controllers;
mod dom;
mod error;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use aggregator::load_articles;
use cli::Cli;
use config::SiteConfig;
use controllers::page::{Page, Trigger};
use dom::{DEFAULT_PAGE, HeadlessSurface, UiSurface};
use fetch::ProxyFetcher;
use outputs::{html, json};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("swift_articles starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = SiteConfig::load(args.config.as_deref())
        .await?
        .apply_cli(&args)
        .validate()?;
    info!(author_url = %config.author_url, proxy = %config.cors_proxy, "Configuration ready");

    // ---- Wire the page ----
    let markup = match &args.page {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => DEFAULT_PAGE.to_string(),
    };
    let mut page = Page::wire(HeadlessSurface::from_markup(&markup), &config);
    page.start().await;

    // ---- Aggregate and render ----
    let fetcher = ProxyFetcher::new(config.cors_proxy.clone());
    let outcome = load_articles(&fetcher, &config).await;
    page.show_articles(&outcome).await;

    for category in &args.select {
        match page.pill_for(category) {
            Some(pill) => {
                page.dispatch(Trigger::Click(pill)).await;
            }
            None => warn!(%category, "No filter pill for category; ignoring"),
        }
    }

    // ---- Outputs ----
    if let (Some(path), Ok(articles)) = (&args.json_output, &outcome) {
        json::write_feed(&json::feed(&config.author_url, articles), path).await?;
    }
    if let Some(path) = &args.html_output {
        html::write_cards(page.surface(), path).await?;
    }

    let surface = page.surface();
    let visible = surface
        .cards()
        .into_iter()
        .filter(|&c| surface.is_displayed(c))
        .count();
    debug!(
        frames = surface.frames(),
        timers = surface.timers().len(),
        "Animation steps played"
    );
    let elapsed = start_time.elapsed();
    info!(
        loaded = outcome.as_ref().map(Vec::len).unwrap_or(0),
        fallback = outcome.is_err(),
        active_filter = page.active_filter().as_deref().unwrap_or("none"),
        visible_cards = visible,
        panel_open = page.panel_open(),
        ?elapsed,
        "Execution complete"
    );

    Ok(())
}
