//! Browser entry points. The page owns one dashboard, kept in a thread-local
//! and driven through the exported functions below.

use std::cell::{Cell, RefCell};

use foundation::padding::Padding;
use foundation::time::Millis;
use layers::style::StyleDocument;
use layout::navigation::Tab;
use urlstate::store::LocationQueryStore;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dashboard::Dashboard;
use crate::listeners::PageListeners;
use crate::widget::MapWidget;

#[wasm_bindgen]
extern "C" {
    /// The map ref handed out by the React map component.
    pub type MapRef;

    #[wasm_bindgen(method, js_name = getBounds)]
    fn get_bounds(this: &MapRef) -> Option<LngLatBounds>;

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &MapRef, bounds: &JsValue, options: &JsValue);

    #[wasm_bindgen(method, js_name = getStyle)]
    fn get_style(this: &MapRef) -> JsValue;

    #[wasm_bindgen(method, js_name = getMap)]
    fn get_map(this: &MapRef) -> MapboxMap;

    #[wasm_bindgen(method, js_name = zoomIn)]
    fn zoom_in(this: &MapRef);

    #[wasm_bindgen(method, js_name = zoomOut)]
    fn zoom_out(this: &MapRef);

    type LngLatBounds;

    #[wasm_bindgen(method, js_name = toArray)]
    fn to_array(this: &LngLatBounds) -> JsValue;

    type MapboxMap;

    #[wasm_bindgen(method, js_name = setLayoutProperty)]
    fn set_layout_property(this: &MapboxMap, layer_id: &str, name: &str, value: &str);
}

pub struct JsMapWidget {
    map: MapRef,
}

impl JsMapWidget {
    pub fn new(map: MapRef) -> Self {
        Self { map }
    }
}

fn json_of(value: &JsValue) -> Option<String> {
    js_sys::JSON::stringify(value).ok().map(String::from)
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

impl MapWidget for JsMapWidget {
    fn get_bounds(&self) -> Option<[[f64; 2]; 2]> {
        let bounds = self.map.get_bounds()?;
        let raw = json_of(&bounds.to_array())?;
        match serde_json::from_str(&raw) {
            Ok(pairs) => Some(pairs),
            Err(err) => {
                warn(&format!("unexpected map bounds {raw}: {err}"));
                None
            }
        }
    }

    fn fit_bounds(&mut self, bounds: foundation::bounds::Bounds, padding: Padding) {
        let corners = js_sys::Array::new();
        for [lng, lat] in bounds.to_pairs() {
            let pair = js_sys::Array::new();
            pair.push(&JsValue::from_f64(lng));
            pair.push(&JsValue::from_f64(lat));
            corners.push(&pair);
        }
        let options = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&options, &"padding".into(), &padding_object(padding));
        self.map.fit_bounds(&corners, &options);
    }

    fn get_style(&self) -> Option<StyleDocument> {
        let style = self.map.get_style();
        if style.is_null() || style.is_undefined() {
            return None;
        }
        let raw = json_of(&style)?;
        match StyleDocument::from_json(&raw) {
            Ok(doc) => Some(doc),
            Err(err) => {
                warn(&format!("could not read map style: {err}"));
                None
            }
        }
    }

    fn set_layout_property(&mut self, layer_id: &str, name: &str, value: &str) {
        self.map.get_map().set_layout_property(layer_id, name, value);
    }

    fn zoom_in(&mut self) {
        self.map.zoom_in();
    }

    fn zoom_out(&mut self) {
        self.map.zoom_out();
    }
}

fn padding_object(padding: Padding) -> JsValue {
    let o = js_sys::Object::new();
    for (key, v) in [
        ("top", padding.top),
        ("right", padding.right),
        ("bottom", padding.bottom),
        ("left", padding.left),
    ] {
        let _ = js_sys::Reflect::set(&o, &JsValue::from_str(key), &JsValue::from_f64(v));
    }
    o.into()
}

type BrowserDashboard = Dashboard<JsMapWidget, LocationQueryStore>;

thread_local! {
    static STATE: RefCell<Option<BrowserDashboard>> = const { RefCell::new(None) };
    static TICK_SCHEDULED: Cell<bool> = const { Cell::new(false) };
    static LISTENERS: PageListeners = const { PageListeners::new() };
}

/// Run `f` on the mounted dashboard. Returns `None` before mount, during
/// teardown, and for calls re-entering from a map event fired by `f` itself.
fn with_dashboard<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut BrowserDashboard) -> R,
{
    STATE
        .try_with(|state| {
            let mut state = state.try_borrow_mut().ok()?;
            state.as_mut().map(f)
        })
        .ok()
        .flatten()
}

fn now() -> Millis {
    Millis(js_sys::Date::now())
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Arrange for the next throttled URL write to be committed when it is due.
fn schedule_tick() {
    let Some(due) = with_dashboard(|d| d.next_due()).flatten() else {
        return;
    };
    if TICK_SCHEDULED.with(|s| s.replace(true)) {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let delay = due.elapsed_since(now()).ceil() as i32;
    let callback = Closure::once_into_js(move || {
        TICK_SCHEDULED.with(|s| s.set(false));
        if let Some(Err(err)) = with_dashboard(|d| d.tick(now())) {
            // Still pending; the next map or settings change retries it.
            warn(&format!("url update failed: {err}"));
            return;
        }
        schedule_tick();
    });
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        .is_err()
    {
        TICK_SCHEDULED.with(|s| s.set(false));
    }
}

/// The listener reads whichever dashboard is mounted, so one per page.
fn listen_popstate(window: &web_sys::Window) -> Result<(), JsValue> {
    LISTENERS.with(|listeners| listeners.bind_popstate(|| add_popstate_listener(window)))?;
    Ok(())
}

fn add_popstate_listener(window: &web_sys::Window) -> Result<(), JsValue> {
    let handler = Closure::<dyn FnMut()>::new(move || {
        if let Some(Err(err)) = with_dashboard(|d| d.on_popstate()) {
            warn(&format!("could not restore map state: {err}"));
        }
    });
    window.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    crate::console::init();
}

/// Take over a loaded map: fit the URL bounds and apply the URL style settings.
#[wasm_bindgen]
pub fn mount_dashboard(map: MapRef, viewport_width_px: f64) -> Result<(), JsValue> {
    let store = LocationQueryStore::new().map_err(to_js)?;
    let mut dashboard = Dashboard::new(JsMapWidget::new(map), store, viewport_width_px);
    dashboard.mount();
    STATE.with(|state| *state.borrow_mut() = Some(dashboard));
    if let Some(window) = web_sys::window() {
        listen_popstate(&window)?;
    }
    Ok(())
}

#[wasm_bindgen]
pub fn on_move_end() -> Result<(), JsValue> {
    let result = with_dashboard(|d| d.on_move_end(now())).transpose();
    schedule_tick();
    result.map(|_| ()).map_err(to_js)
}

#[wasm_bindgen]
pub fn on_style_load() {
    with_dashboard(|d| {
        d.on_style_load();
    });
}

/// Unknown values select the default basemap. Returns the applied value.
#[wasm_bindgen]
pub fn set_basemap(basemap: &str) -> Result<String, JsValue> {
    let applied = with_dashboard(|d| d.select_basemap_str(basemap, now())).transpose();
    schedule_tick();
    let applied = applied.map_err(to_js)?;
    Ok(applied.map(|b| b.as_str().to_string()).unwrap_or_default())
}

/// Empty string hides labels. Returns the applied value.
#[wasm_bindgen]
pub fn set_labels(labels: &str) -> Result<String, JsValue> {
    let applied = with_dashboard(|d| d.select_labels_str(labels, now())).transpose();
    schedule_tick();
    let applied = applied.map_err(to_js)?;
    Ok(applied.map(|l| l.as_str().to_string()).unwrap_or_default())
}

#[wasm_bindgen]
pub fn get_map_settings() -> JsValue {
    let settings = with_dashboard(|d| d.settings()).unwrap_or_default();
    let o = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &o,
        &JsValue::from_str("basemap"),
        &JsValue::from_str(settings.basemap.as_str()),
    );
    let _ = js_sys::Reflect::set(
        &o,
        &JsValue::from_str("labels"),
        &JsValue::from_str(settings.labels.as_str()),
    );
    o.into()
}

#[wasm_bindgen]
pub fn toggle_sidebar() -> bool {
    with_dashboard(|d| {
        d.toggle_sidebar();
        d.sidebar_expanded()
    })
    .unwrap_or_default()
}

#[wasm_bindgen]
pub fn set_sidebar_open(open: bool) {
    with_dashboard(|d| d.set_sidebar_open(open));
}

#[wasm_bindgen]
pub fn is_sidebar_expanded() -> bool {
    with_dashboard(|d| d.sidebar_expanded()).unwrap_or_default()
}

/// Returns `true` when the key press was consumed.
#[wasm_bindgen]
pub fn on_key(key: &str, ctrl: bool, meta: bool) -> bool {
    with_dashboard(|d| d.on_key(key, ctrl, meta)).unwrap_or_default()
}

#[wasm_bindgen]
pub fn on_resize(viewport_width_px: f64) {
    with_dashboard(|d| d.on_resize(viewport_width_px));
}

#[wasm_bindgen]
pub fn is_desktop() -> bool {
    with_dashboard(|d| d.is_desktop()).unwrap_or_default()
}

/// `location`, `main` or `map`; unknown names are ignored.
#[wasm_bindgen]
pub fn select_tab(tab: &str) {
    let Some(tab) = Tab::parse(tab) else {
        warn(&format!("unknown tab {tab}"));
        return;
    };
    with_dashboard(|d| d.select_tab(tab));
}

#[wasm_bindgen]
pub fn is_sheet_open() -> bool {
    with_dashboard(|d| d.navigation().sheet_open()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn zoom_in() {
    with_dashboard(|d| d.zoom_in());
}

#[wasm_bindgen]
pub fn zoom_out() {
    with_dashboard(|d| d.zoom_out());
}

/// Commit pending URL writes right away, e.g. before the page unloads.
#[wasm_bindgen]
pub fn flush_url() -> Result<(), JsValue> {
    with_dashboard(|d| d.flush(now()))
        .transpose()
        .map(|_| ())
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn share_search() -> String {
    with_dashboard(|d| d.share_search()).unwrap_or_default()
}
