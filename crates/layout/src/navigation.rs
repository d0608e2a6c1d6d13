use serde::{Deserialize, Serialize};

/// Tabs of the mobile bottom bar.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Location,
    #[default]
    Main,
    Map,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Location, Tab::Main, Tab::Map];

    pub fn name(self) -> &'static str {
        match self {
            Tab::Location => "Location",
            Tab::Main => "Analysis",
            Tab::Map => "Map",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Location => "location",
            Tab::Main => "main",
            Tab::Map => "map",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Tab::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Mobile navigation: a tab bar plus a bottom sheet holding the panels.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MobileNavigation {
    tab: Tab,
}

impl MobileNavigation {
    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// The map tab closes the sheet so the map is fully visible.
    pub fn sheet_open(&self) -> bool {
        matches!(self.tab, Tab::Main | Tab::Location)
    }

    pub fn show_intro_description(&self) -> bool {
        self.tab == Tab::Main
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NavigationLayout {
    /// Collapsible sidebar with the intro and main panel.
    Desktop,
    /// Tab bar with a bottom sheet.
    Mobile,
}

impl NavigationLayout {
    pub fn for_desktop(is_desktop: bool) -> Self {
        if is_desktop {
            NavigationLayout::Desktop
        } else {
            NavigationLayout::Mobile
        }
    }
}
