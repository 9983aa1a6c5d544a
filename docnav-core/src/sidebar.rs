//! Mobile sidebar open/closed state. The overlay exists exactly while open.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarTransition {
    Opened,
    Closed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarState {
    open: bool,
}

impl SidebarState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    pub const fn toggle(&mut self) -> SidebarTransition {
        self.open = !self.open;
        if self.open {
            SidebarTransition::Opened
        } else {
            SidebarTransition::Closed
        }
    }

    /// Close the sidebar; returns whether it was open.
    pub const fn close(&mut self) -> bool {
        let was_open = self.open;
        self.open = false;
        was_open
    }
}
