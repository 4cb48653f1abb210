//! Command-line interface definitions for Swift Articles.
//!
//! Every option is optional: with no flags the binary scrapes the default
//! author archive into a built-in page skeleton and logs the result.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Scrape into the real portfolio markup and dump both outputs
/// swift_articles --page ./index.html -j ./articles.json -o ./articles.html
///
/// # Switch the grid to the "talks" filter after rendering
/// swift_articles --page ./index.html --select talks
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page markup to drive (filter pills, grid, about panel, articles container)
    #[arg(short, long)]
    pub page: Option<PathBuf>,

    /// Optional path to a YAML site configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Author archive URL (page 1)
    #[arg(long, env = "AUTHOR_URL")]
    pub author_url: Option<String>,

    /// CORS relay prefix; the target URL is appended percent-encoded
    #[arg(long, env = "CORS_PROXY")]
    pub cors_proxy: Option<String>,

    /// Drop articles whose URL already appeared on an earlier page
    #[arg(long)]
    pub dedupe: bool,

    /// Click the filter pill with this category after rendering (repeatable)
    #[arg(short, long)]
    pub select: Vec<String>,

    /// Write the aggregated articles as JSON to this file
    #[arg(short, long)]
    pub json_output: Option<PathBuf>,

    /// Write the rendered article cards as an HTML fragment to this file
    #[arg(short = 'o', long)]
    pub html_output: Option<PathBuf>,
}
