use foundation::bounds::Bounds;
use foundation::time::Millis;
use layers::settings::{BasemapStyle, LabelsStyle, MapSettings};
use runtime::signal::{Signal, SubscriptionId};

use crate::UrlStateError;
use crate::param::{BasemapParam, BoundsParam, LabelsParam, QueryParam, resolve};
use crate::state::UrlState;
use crate::store::QueryStore;

/// The dashboard's URL-backed stores: viewport bounds and map style settings.
///
/// Values are mirrored in [`Signal`]s so views can subscribe instead of
/// re-reading the URL.
pub struct MapUrlState<S: QueryStore> {
    url: UrlState<S>,
    bounds: Signal<Bounds>,
    settings: Signal<MapSettings>,
}

impl<S: QueryStore> MapUrlState<S> {
    pub fn new(store: S) -> Self {
        Self::from_url(UrlState::new(store))
    }

    pub fn from_url(url: UrlState<S>) -> Self {
        let bounds = Signal::new(url.get::<BoundsParam>());
        let settings = Signal::new(MapSettings::new(
            url.get::<BasemapParam>(),
            url.get::<LabelsParam>(),
        ));
        Self {
            url,
            bounds,
            settings,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds.value()
    }

    pub fn settings(&self) -> MapSettings {
        self.settings.value()
    }

    pub fn basemap(&self) -> BasemapStyle {
        self.settings.value().basemap
    }

    pub fn labels(&self) -> LabelsStyle {
        self.settings.value().labels
    }

    pub fn set_bounds(&mut self, bounds: Bounds, now: Millis) -> Result<(), UrlStateError> {
        if !self.bounds.set(bounds) {
            // Same value: only retry a write the store refused.
            self.url.tick(now)?;
            return Ok(());
        }
        self.url.set::<BoundsParam>(&bounds, now)?;
        Ok(())
    }

    /// Validate raw corners first; nothing is committed when they are rejected.
    pub fn set_bounds_pairs(
        &mut self,
        pairs: [[f64; 2]; 2],
        now: Millis,
    ) -> Result<Bounds, UrlStateError> {
        let bounds = Bounds::from_pairs(pairs)?;
        self.set_bounds(bounds, now)?;
        Ok(bounds)
    }

    pub fn set_basemap(
        &mut self,
        basemap: BasemapStyle,
        now: Millis,
    ) -> Result<(), UrlStateError> {
        let next = MapSettings {
            basemap,
            ..self.settings()
        };
        if !self.settings.set(next) {
            self.url.tick(now)?;
            return Ok(());
        }
        self.url.set::<BasemapParam>(&basemap, now)?;
        Ok(())
    }

    /// Unknown values select the default basemap.
    pub fn set_basemap_str(
        &mut self,
        raw: &str,
        now: Millis,
    ) -> Result<BasemapStyle, UrlStateError> {
        let basemap = resolve::<BasemapParam>(Some(raw));
        self.set_basemap(basemap, now)?;
        Ok(basemap)
    }

    pub fn set_labels(&mut self, labels: LabelsStyle, now: Millis) -> Result<(), UrlStateError> {
        let next = MapSettings {
            labels,
            ..self.settings()
        };
        if !self.settings.set(next) {
            self.url.tick(now)?;
            return Ok(());
        }
        self.url.set::<LabelsParam>(&labels, now)?;
        Ok(())
    }

    /// Unknown values select the default labels.
    pub fn set_labels_str(
        &mut self,
        raw: &str,
        now: Millis,
    ) -> Result<LabelsStyle, UrlStateError> {
        let labels = resolve::<LabelsParam>(Some(raw));
        self.set_labels(labels, now)?;
        Ok(labels)
    }

    pub fn subscribe_bounds(&mut self, f: impl FnMut(&Bounds) + 'static) -> SubscriptionId {
        self.bounds.subscribe(f)
    }

    pub fn subscribe_settings(&mut self, f: impl FnMut(&MapSettings) + 'static) -> SubscriptionId {
        self.settings.subscribe(f)
    }

    pub fn unsubscribe_bounds(&mut self, id: SubscriptionId) -> bool {
        self.bounds.unsubscribe(id)
    }

    pub fn unsubscribe_settings(&mut self, id: SubscriptionId) -> bool {
        self.settings.unsubscribe(id)
    }

    pub fn tick(&mut self, now: Millis) -> Result<bool, UrlStateError> {
        self.url.tick(now)
    }

    pub fn flush(&mut self, now: Millis) -> Result<bool, UrlStateError> {
        self.url.flush(now)
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.url.next_due()
    }

    /// Re-read the URL (back/forward navigation) and notify subscribers of changes.
    pub fn reload(&mut self) -> Result<(), UrlStateError> {
        self.url.reload()?;
        self.bounds.set(self.url.get::<BoundsParam>());
        self.settings.set(MapSettings::new(
            self.url.get::<BasemapParam>(),
            self.url.get::<LabelsParam>(),
        ));
        Ok(())
    }

    /// Current `?`-prefixed query, including values not yet committed.
    pub fn share_search(&self) -> String {
        self.url.query().to_search()
    }

    pub fn url(&self) -> &UrlState<S> {
        &self.url
    }

    pub fn store(&self) -> &S {
        self.url.store()
    }
}

/// `?bounds=…&basemap=…&labels=…` for a given state, on top of `base`.
pub fn share_query(
    base: &crate::query::QueryString,
    bounds: Bounds,
    settings: MapSettings,
) -> crate::query::QueryString {
    let mut query = base.clone();
    query.set(BoundsParam::KEY, BoundsParam::serialize(&bounds));
    query.set(BasemapParam::KEY, BasemapParam::serialize(&settings.basemap));
    query.set(LabelsParam::KEY, LabelsParam::serialize(&settings.labels));
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryString;
    use crate::store::InMemoryQueryStore;
    use crate::store::testing::FailingQueryStore;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn page_rebuilt_from_url_has_same_state() {
        let mut first = MapUrlState::new(InMemoryQueryStore::new());
        first
            .set_bounds_pairs([[20.0, 2.0], [30.0, 10.0]], Millis(0.0))
            .unwrap();
        first.set_basemap(BasemapStyle::Satellite, Millis(1.0)).unwrap();
        first.set_labels(LabelsStyle::None, Millis(2.0)).unwrap();

        let search = first.store().search();
        let reloaded = MapUrlState::new(InMemoryQueryStore::from_search(&search));
        assert_eq!(
            reloaded.bounds(),
            Bounds::from_pairs([[20.0, 2.0], [30.0, 10.0]]).unwrap()
        );
        assert_eq!(reloaded.basemap(), BasemapStyle::Satellite);
        assert_eq!(reloaded.labels(), LabelsStyle::None);
    }

    #[test]
    fn repeating_a_refused_write_commits_it() {
        let mut state = MapUrlState::new(FailingQueryStore::failing(1));
        let pairs = [[20.0, 2.0], [30.0, 10.0]];
        assert!(state.set_bounds_pairs(pairs, Millis(0.0)).is_err());
        assert_eq!(state.bounds(), Bounds::from_pairs(pairs).unwrap());

        state.set_bounds_pairs(pairs, Millis(10.0)).unwrap();
        assert_eq!(
            state.store().inner().search(),
            "?bounds=%5B%5B20%2C2%5D%2C%5B30%2C10%5D%5D"
        );
        assert_eq!(state.next_due(), None);
    }

    #[test]
    fn refused_settings_write_is_committed_by_flush() {
        let mut state = MapUrlState::new(FailingQueryStore::failing(1));
        assert!(state.set_labels(LabelsStyle::Light, Millis(0.0)).is_err());
        assert!(state.url().has_pending());
        assert!(state.flush(Millis(1.0)).unwrap());
        assert_eq!(state.store().inner().search(), "?labels=light");
    }

    #[test]
    fn invalid_pairs_are_rejected_without_commit() {
        let mut state = MapUrlState::new(InMemoryQueryStore::new());
        let err = state
            .set_bounds_pairs([[30.0, 2.0], [20.0, 10.0]], Millis(0.0))
            .unwrap_err();
        assert!(matches!(err, UrlStateError::Rejected(_)));
        assert_eq!(state.bounds(), Bounds::SOUTH_SUDAN);
        assert_eq!(state.store().write_count(), 0);
        assert_eq!(state.share_search(), "");
    }

    #[test]
    fn invalid_url_values_fall_back_to_defaults() {
        let state = MapUrlState::new(InMemoryQueryStore::from_search(
            "?bounds=%5B%5B30%2C2%5D%2C%5B20%2C10%5D%5D&basemap=terrain&labels=none",
        ));
        assert_eq!(state.bounds(), Bounds::SOUTH_SUDAN);
        assert_eq!(state.settings(), MapSettings::default());
    }

    #[test]
    fn string_setters_fall_back_to_defaults() {
        let mut state = MapUrlState::new(InMemoryQueryStore::from_search("?basemap=dark&labels="));
        assert_eq!(state.set_basemap_str("Satellite", Millis(0.0)).unwrap(), BasemapStyle::Light);
        assert_eq!(state.set_labels_str("bold", Millis(0.0)).unwrap(), LabelsStyle::Dark);
        assert_eq!(state.store().search(), "?basemap=light&labels=dark");
    }

    #[test]
    fn unchanged_values_do_not_write() {
        let mut state = MapUrlState::new(InMemoryQueryStore::new());
        state.set_basemap(BasemapStyle::Light, Millis(0.0)).unwrap();
        state.set_bounds(Bounds::SOUTH_SUDAN, Millis(0.0)).unwrap();
        assert_eq!(state.store().write_count(), 0);
    }

    #[test]
    fn subscribers_see_setting_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut state = MapUrlState::new(InMemoryQueryStore::new());
        let sink = Rc::clone(&seen);
        state.subscribe_settings(move |s| sink.borrow_mut().push(*s));

        state.set_basemap(BasemapStyle::Dark, Millis(0.0)).unwrap();
        state.set_labels(LabelsStyle::Light, Millis(0.0)).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                MapSettings::new(BasemapStyle::Dark, LabelsStyle::Dark),
                MapSettings::new(BasemapStyle::Dark, LabelsStyle::Light),
            ]
        );
    }

    #[test]
    fn drag_updates_are_coalesced_into_the_url() {
        let mut state = MapUrlState::new(InMemoryQueryStore::new());
        for (i, t) in [0.0, 100.0, 200.0, 300.0].into_iter().enumerate() {
            let west = 20.0 + i as f64;
            state
                .set_bounds_pairs([[west, 2.0], [30.0, 10.0]], Millis(t))
                .unwrap();
        }
        assert_eq!(state.store().write_count(), 1);
        assert_eq!(state.bounds().west(), 23.0);
        assert!(state.tick(Millis(1000.0)).unwrap());
        let stored = state.store().read().unwrap();
        assert_eq!(stored.get("bounds"), Some("[[23,2],[30,10]]"));
    }

    #[test]
    fn reload_notifies_bounds_subscribers() {
        let count = Rc::new(RefCell::new(0));
        let mut state = MapUrlState::new(InMemoryQueryStore::from_search("?bounds=[[20,2],[30,10]]"));
        let c = Rc::clone(&count);
        state.subscribe_bounds(move |_| *c.borrow_mut() += 1);
        state.set_bounds_pairs([[21.0, 2.0], [30.0, 10.0]], Millis(0.0)).unwrap();
        state.set_bounds_pairs([[22.0, 2.0], [30.0, 10.0]], Millis(1.0)).unwrap();
        state.reload().unwrap();
        assert_eq!(state.bounds().west(), 21.0);
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn share_query_keeps_foreign_keys() {
        let base = QueryString::parse("?tab=location");
        let q = share_query(
            &base,
            Bounds::from_pairs([[20.0, 2.0], [30.0, 10.0]]).unwrap(),
            MapSettings::new(BasemapStyle::Dark, LabelsStyle::None),
        );
        assert_eq!(q.get("tab"), Some("location"));
        assert_eq!(q.get("bounds"), Some("[[20,2],[30,10]]"));
        assert_eq!(q.get("basemap"), Some("dark"));
        assert_eq!(q.get("labels"), Some(""));
    }
}
