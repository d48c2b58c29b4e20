//! Page chrome shared between widgets

use std::cell::Cell;
use std::rc::Rc;

/// Shared sidebar visibility.
///
/// Every widget on a page holds a clone; toggling through any of them is
/// seen by all.
#[derive(Debug, Clone)]
pub struct SidebarHandle(Rc<Cell<bool>>);

impl Default for SidebarHandle {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl SidebarHandle {
    pub fn is_visible(&self) -> bool {
        self.0.get()
    }

    pub fn set_visible(&self, visible: bool) {
        self.0.set(visible);
    }

    /// Flip visibility and return the new state
    pub fn toggle(&self) -> bool {
        let visible = !self.0.get();
        self.0.set(visible);
        visible
    }

    /// Label for the control that flips the sidebar
    pub fn toggle_label(&self) -> &'static str {
        if self.is_visible() {
            "Hide sidebar"
        } else {
            "Show sidebar"
        }
    }
}
