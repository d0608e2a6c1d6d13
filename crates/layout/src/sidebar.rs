use serde::{Deserialize, Serialize};

/// Desktop sidebar width in CSS pixels.
pub const SIDEBAR_WIDTH_PX: f64 = 460.0;

/// Ctrl/Cmd + this key toggles the sidebar.
pub const SIDEBAR_KEYBOARD_SHORTCUT: &str = "b";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarState {
    Expanded,
    Collapsed,
}

impl SidebarState {
    pub fn as_str(self) -> &'static str {
        match self {
            SidebarState::Expanded => "expanded",
            SidebarState::Collapsed => "collapsed",
        }
    }
}

/// Open/closed state of the desktop sidebar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Sidebar {
    open: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self { open: true }
    }
}

impl Sidebar {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> SidebarState {
        if self.open {
            SidebarState::Expanded
        } else {
            SidebarState::Collapsed
        }
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn toggle(&mut self) -> SidebarState {
        self.open = !self.open;
        self.state()
    }

    /// Toggle on Ctrl/Cmd + `b`. Returns `true` when the key press was consumed.
    pub fn handle_shortcut(&mut self, key: &str, ctrl: bool, meta: bool) -> bool {
        if key != SIDEBAR_KEYBOARD_SHORTCUT || !(ctrl || meta) {
            return false;
        }
        self.toggle();
        true
    }
}

/// The sidebar only takes room on desktop layouts.
pub fn is_sidebar_expanded(is_desktop: bool, state: SidebarState) -> bool {
    is_desktop && state == SidebarState::Expanded
}
