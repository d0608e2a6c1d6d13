//! Typed query parameters.
//!
//! Reading never fails: a missing key or a value that does not parse
//! resolves to the parameter's default.

use foundation::bounds::Bounds;
use layers::settings::{BasemapStyle, LabelsStyle};

pub trait QueryParam {
    type Value: Clone + PartialEq;

    const KEY: &'static str;

    /// Coalescing window for writes, if writes to this key are throttled.
    const THROTTLE_MS: Option<f64> = None;

    fn default_value() -> Self::Value;

    fn parse(raw: &str) -> Option<Self::Value>;

    fn serialize(value: &Self::Value) -> String;
}

/// Value of `P` for a raw query value, falling back to the default.
pub fn resolve<P: QueryParam>(raw: Option<&str>) -> P::Value {
    let Some(raw) = raw else {
        return P::default_value();
    };
    match P::parse(raw) {
        Some(value) => value,
        None => {
            tracing::debug!(key = P::KEY, raw, "unparseable query value, using default");
            P::default_value()
        }
    }
}

/// `bounds`: JSON `[[west, south], [east, north]]`.
pub struct BoundsParam;

impl QueryParam for BoundsParam {
    type Value = Bounds;

    const KEY: &'static str = "bounds";
    const THROTTLE_MS: Option<f64> = Some(1000.0);

    fn default_value() -> Bounds {
        Bounds::SOUTH_SUDAN
    }

    fn parse(raw: &str) -> Option<Bounds> {
        match serde_json::from_str::<Bounds>(raw) {
            Ok(bounds) => Some(bounds),
            Err(err) => {
                tracing::debug!(%err, "bounds failed schema validation");
                None
            }
        }
    }

    // Written the way `JSON.stringify` would (`20`, not `20.0`); `f64`'s
    // `Display` is the shortest representation that reads back exactly.
    fn serialize(value: &Bounds) -> String {
        format!(
            "[[{},{}],[{},{}]]",
            value.west(),
            value.south(),
            value.east(),
            value.north()
        )
    }
}

/// `basemap`: `light` | `dark` | `satellite`.
pub struct BasemapParam;

impl QueryParam for BasemapParam {
    type Value = BasemapStyle;

    const KEY: &'static str = "basemap";

    fn default_value() -> BasemapStyle {
        BasemapStyle::default()
    }

    fn parse(raw: &str) -> Option<BasemapStyle> {
        BasemapStyle::parse(raw)
    }

    fn serialize(value: &BasemapStyle) -> String {
        value.as_str().to_string()
    }
}

/// `labels`: `dark` | `light` | empty for no labels.
pub struct LabelsParam;

impl QueryParam for LabelsParam {
    type Value = LabelsStyle;

    const KEY: &'static str = "labels";

    fn default_value() -> LabelsStyle {
        LabelsStyle::default()
    }

    fn parse(raw: &str) -> Option<LabelsStyle> {
        LabelsStyle::parse(raw)
    }

    fn serialize(value: &LabelsStyle) -> String {
        value.as_str().to_string()
    }
}
