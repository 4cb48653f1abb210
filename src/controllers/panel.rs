//! About panel overlay: a two-state open/closed toggle.
//!
//! Opening marks the panel and backdrop `open`, the toggle button `active`,
//! and sets `aria-hidden="false"` on the panel. Closing reverses all four.
//! Transitions are unguarded: closing a closed panel re-applies the closed
//! markers and is otherwise a no-op.

use crate::dom::{ACTIVE_CLASS, ARIA_HIDDEN, ElementId, OPEN_CLASS, Role, UiSurface};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PanelController {
    toggle: ElementId,
    panel: ElementId,
    backdrop: ElementId,
    close_button: Option<ElementId>,
    open: bool,
}

impl PanelController {
    /// Bind to the toggle, panel and backdrop. The close button is optional.
    pub fn wire<S: UiSurface>(surface: &S) -> Option<Self> {
        Some(Self {
            toggle: surface.element(Role::AboutToggle)?,
            panel: surface.element(Role::AboutPanel)?,
            backdrop: surface.element(Role::AboutBackdrop)?,
            close_button: surface.element(Role::AboutClose),
            open: false,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_button(&self) -> ElementId {
        self.toggle
    }

    pub fn backdrop(&self) -> ElementId {
        self.backdrop
    }

    pub fn close_button(&self) -> Option<ElementId> {
        self.close_button
    }

    pub fn open<S: UiSurface>(&mut self, surface: &mut S) {
        surface.add_class(self.panel, OPEN_CLASS);
        surface.add_class(self.backdrop, OPEN_CLASS);
        surface.add_class(self.toggle, ACTIVE_CLASS);
        surface.set_attr(self.panel, ARIA_HIDDEN, "false");
        self.open = true;
        debug!("About panel opened");
    }

    pub fn close<S: UiSurface>(&mut self, surface: &mut S) {
        surface.remove_class(self.panel, OPEN_CLASS);
        surface.remove_class(self.backdrop, OPEN_CLASS);
        surface.remove_class(self.toggle, ACTIVE_CLASS);
        surface.set_attr(self.panel, ARIA_HIDDEN, "true");
        self.open = false;
        debug!("About panel closed");
    }

    pub fn toggle<S: UiSurface>(&mut self, surface: &mut S) {
        if self.open {
            self.close(surface);
        } else {
            self.open(surface);
        }
    }

    /// Escape closes an open panel and is ignored otherwise.
    pub fn escape<S: UiSurface>(&mut self, surface: &mut S) {
        if self.open {
            self.close(surface);
        }
    }
}
