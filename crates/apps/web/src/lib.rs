//! Browser side of the dashboard: keeps the map, the URL and the page layout
//! in agreement.

pub mod console;
pub mod dashboard;
pub mod listeners;
pub mod widget;

#[cfg(target_arch = "wasm32")]
mod bindings;

pub use dashboard::Dashboard;
pub use widget::{MapWidget, WidgetLayers};
