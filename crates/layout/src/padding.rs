use foundation::padding::Padding;
use runtime::previous::Previous;

use crate::sidebar::SIDEBAR_WIDTH_PX;

pub const DESKTOP_PADDING_PX: f64 = 100.0;
pub const MOBILE_PADDING_PX: f64 = 20.0;

/// Insets used when fitting the map to bounds.
pub fn viewport_padding(is_desktop: bool, sidebar_expanded: bool) -> Padding {
    if !is_desktop {
        return Padding::uniform(MOBILE_PADDING_PX);
    }
    let base = Padding::uniform(DESKTOP_PADDING_PX);
    if sidebar_expanded {
        base.with_extra_left(SIDEBAR_WIDTH_PX)
    } else {
        base
    }
}

/// Asks for a re-fit only when the sidebar expands or collapses.
#[derive(Debug, Clone)]
pub struct PaddingController {
    expanded: Previous<bool>,
    padding: Padding,
}

impl PaddingController {
    pub fn new(is_desktop: bool, sidebar_expanded: bool) -> Self {
        Self {
            expanded: Previous::new(sidebar_expanded),
            padding: viewport_padding(is_desktop, sidebar_expanded),
        }
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Recompute for the current layout. `Some(padding)` means the map
    /// should be re-fitted with it.
    pub fn update(&mut self, is_desktop: bool, sidebar_expanded: bool) -> Option<Padding> {
        self.padding = viewport_padding(is_desktop, sidebar_expanded);
        self.expanded.observe(sidebar_expanded)?;
        Some(self.padding)
    }
}
