//! Glue between the map widget, the URL-backed stores and the page layout.

use foundation::bounds::Bounds;
use foundation::padding::Padding;
use foundation::time::Millis;
use layers::settings::{BasemapStyle, LabelsStyle, MapSettings};
use layers::toggle::ToggleSummary;
use layout::breakpoint::{Breakpoint, BreakpointWatch};
use layout::navigation::{MobileNavigation, NavigationLayout, Tab};
use layout::padding::PaddingController;
use layout::sidebar::{Sidebar, SidebarState, is_sidebar_expanded};
use urlstate::UrlStateError;
use urlstate::map_state::MapUrlState;
use urlstate::store::QueryStore;

use crate::widget::{MapWidget, WidgetLayers};

pub struct Dashboard<W: MapWidget, S: QueryStore> {
    widget: W,
    state: MapUrlState<S>,
    sidebar: Sidebar,
    desktop: BreakpointWatch,
    padding: PaddingController,
    navigation: MobileNavigation,
}

impl<W: MapWidget, S: QueryStore> Dashboard<W, S> {
    /// The desktop flag is resolved from `viewport_width_px` straight away.
    pub fn new(widget: W, store: S, viewport_width_px: f64) -> Self {
        let desktop = BreakpointWatch::client_only(Breakpoint::DESKTOP, viewport_width_px);
        let sidebar = Sidebar::default();
        let is_desktop = desktop.is_match();
        Self {
            widget,
            state: MapUrlState::new(store),
            sidebar,
            desktop,
            padding: PaddingController::new(
                is_desktop,
                is_sidebar_expanded(is_desktop, sidebar.state()),
            ),
            navigation: MobileNavigation::default(),
        }
    }

    /// Fit the stored bounds and show the stored basemap and labels.
    pub fn mount(&mut self) {
        let bounds = self.state.bounds();
        self.widget.fit_bounds(bounds, self.padding.padding());
        self.apply_settings();
    }

    /// Store the viewport the user settled on. Bounds the map reports but
    /// that fail validation are dropped.
    pub fn on_move_end(&mut self, now: Millis) -> Result<(), UrlStateError> {
        let Some(pairs) = self.widget.get_bounds() else {
            return Ok(());
        };
        match self.state.set_bounds_pairs(pairs, now) {
            Ok(_) => Ok(()),
            Err(UrlStateError::Rejected(err)) => {
                tracing::warn!(%err, ?pairs, "ignoring map bounds");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// A fresh style arrives with its authored visibility; re-apply ours.
    pub fn on_style_load(&mut self) -> ToggleSummary {
        self.apply_settings()
    }

    /// Back/forward navigation: re-read the URL and move the map to it.
    pub fn on_popstate(&mut self) -> Result<(), UrlStateError> {
        let before = (self.state.bounds(), self.state.settings());
        self.state.reload()?;
        if self.state.bounds() != before.0 {
            self.widget
                .fit_bounds(self.state.bounds(), self.padding.padding());
        }
        if self.state.settings() != before.1 {
            self.apply_settings();
        }
        Ok(())
    }

    pub fn select_basemap(
        &mut self,
        basemap: BasemapStyle,
        now: Millis,
    ) -> Result<ToggleSummary, UrlStateError> {
        self.state.set_basemap(basemap, now)?;
        Ok(self.apply_settings())
    }

    pub fn select_basemap_str(
        &mut self,
        raw: &str,
        now: Millis,
    ) -> Result<BasemapStyle, UrlStateError> {
        let basemap = self.state.set_basemap_str(raw, now)?;
        self.apply_settings();
        Ok(basemap)
    }

    pub fn select_labels(
        &mut self,
        labels: LabelsStyle,
        now: Millis,
    ) -> Result<ToggleSummary, UrlStateError> {
        self.state.set_labels(labels, now)?;
        Ok(self.apply_settings())
    }

    pub fn select_labels_str(
        &mut self,
        raw: &str,
        now: Millis,
    ) -> Result<LabelsStyle, UrlStateError> {
        let labels = self.state.set_labels_str(raw, now)?;
        self.apply_settings();
        Ok(labels)
    }

    pub fn toggle_sidebar(&mut self) -> SidebarState {
        let state = self.sidebar.toggle();
        self.relayout();
        state
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar.set_open(open);
        self.relayout();
    }

    /// Returns `true` when the key press toggled the sidebar.
    pub fn on_key(&mut self, key: &str, ctrl: bool, meta: bool) -> bool {
        if !self.sidebar.handle_shortcut(key, ctrl, meta) {
            return false;
        }
        self.relayout();
        true
    }

    pub fn on_resize(&mut self, viewport_width_px: f64) {
        self.desktop.update(viewport_width_px);
        self.relayout();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.navigation.select(tab);
    }

    pub fn zoom_in(&mut self) {
        self.widget.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.widget.zoom_out();
    }

    /// Commit throttled URL writes that have come due.
    pub fn tick(&mut self, now: Millis) -> Result<bool, UrlStateError> {
        self.state.tick(now)
    }

    pub fn flush(&mut self, now: Millis) -> Result<bool, UrlStateError> {
        self.state.flush(now)
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.state.next_due()
    }

    pub fn is_desktop(&self) -> bool {
        self.desktop.is_match()
    }

    pub fn sidebar_expanded(&self) -> bool {
        is_sidebar_expanded(self.is_desktop(), self.sidebar.state())
    }

    pub fn sidebar_state(&self) -> SidebarState {
        self.sidebar.state()
    }

    pub fn navigation_layout(&self) -> NavigationLayout {
        NavigationLayout::for_desktop(self.is_desktop())
    }

    pub fn navigation(&self) -> MobileNavigation {
        self.navigation
    }

    pub fn padding(&self) -> Padding {
        self.padding.padding()
    }

    pub fn bounds(&self) -> Bounds {
        self.state.bounds()
    }

    pub fn settings(&self) -> MapSettings {
        self.state.settings()
    }

    pub fn share_search(&self) -> String {
        self.state.share_search()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn state(&self) -> &MapUrlState<S> {
        &self.state
    }

    fn apply_settings(&mut self) -> ToggleSummary {
        let Some(style) = self.widget.get_style() else {
            tracing::debug!("style not loaded yet, skipping layer toggles");
            return ToggleSummary::default();
        };
        self.state
            .settings()
            .apply(&style, &mut WidgetLayers(&mut self.widget))
    }

    fn relayout(&mut self) {
        let is_desktop = self.is_desktop();
        let expanded = self.sidebar_expanded();
        if let Some(padding) = self.padding.update(is_desktop, expanded) {
            self.widget.fit_bounds(self.state.bounds(), padding);
        }
    }
}
