//! Output writers for a finished run.
//!
//! # Submodules
//!
//! - [`json`]: the aggregated articles as an [`ArticleFeed`](crate::models::ArticleFeed)
//! - [`html`]: the rendered article cards as an HTML fragment
//!
//! Both are optional and selected on the command line (`--json-output`,
//! `--html-output`).

pub mod html;
pub mod json;
