//! Page controllers driven through a [`UiSurface`](crate::dom::UiSurface).
//!
//! - [`filter`]: active-category state and the staggered card reveal
//! - [`panel`]: the about overlay's open/closed toggle
//! - [`renderer`]: article cards and the fallback block
//! - [`page`]: trigger registration and dispatch for the whole page

pub mod filter;
pub mod page;
pub mod panel;
pub mod renderer;
