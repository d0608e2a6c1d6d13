//! Basemap and label choices, and how they map onto style layer groups.

use serde::{Deserialize, Serialize};

use crate::style::StyleDocument;
use crate::toggle::{LayerVisibilityTarget, ToggleSummary, toggle_group_layers};

pub const BASEMAP_GROUP_PREFIX: &str = "basemap-";
pub const LABELS_GROUP_PREFIX: &str = "labels-";

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasemapStyle {
    #[default]
    Light,
    Dark,
    Satellite,
}

impl BasemapStyle {
    pub const ALL: [BasemapStyle; 3] = [
        BasemapStyle::Light,
        BasemapStyle::Dark,
        BasemapStyle::Satellite,
    ];

    /// Exact, case-sensitive match on the query value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(BasemapStyle::Light),
            "dark" => Some(BasemapStyle::Dark),
            "satellite" => Some(BasemapStyle::Satellite),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BasemapStyle::Light => "light",
            BasemapStyle::Dark => "dark",
            BasemapStyle::Satellite => "satellite",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BasemapStyle::Light => "Light",
            BasemapStyle::Dark => "Dark",
            BasemapStyle::Satellite => "Satellite",
        }
    }

    pub fn group_name(self) -> String {
        format!("{BASEMAP_GROUP_PREFIX}{}", self.as_str())
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelsStyle {
    #[default]
    Dark,
    Light,
    /// No labels; encoded as the empty string.
    #[serde(rename = "")]
    None,
}

impl LabelsStyle {
    pub const ALL: [LabelsStyle; 3] = [LabelsStyle::Dark, LabelsStyle::Light, LabelsStyle::None];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(LabelsStyle::Dark),
            "light" => Some(LabelsStyle::Light),
            "" => Some(LabelsStyle::None),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LabelsStyle::Dark => "dark",
            LabelsStyle::Light => "light",
            LabelsStyle::None => "",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LabelsStyle::Dark => "Dark",
            LabelsStyle::Light => "Light",
            LabelsStyle::None => "None",
        }
    }

    /// `labels-` for [`LabelsStyle::None`], which no authored group is named.
    pub fn group_name(self) -> String {
        format!("{LABELS_GROUP_PREFIX}{}", self.as_str())
    }
}

/// Basemap plus labels, as selected in the map settings panel.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
    pub basemap: BasemapStyle,
    pub labels: LabelsStyle,
}

impl MapSettings {
    pub fn new(basemap: BasemapStyle, labels: LabelsStyle) -> Self {
        Self { basemap, labels }
    }

    /// Show the selected basemap and label groups, hide their siblings.
    pub fn apply<T: LayerVisibilityTarget + ?Sized>(
        &self,
        style: &StyleDocument,
        target: &mut T,
    ) -> ToggleSummary {
        let basemap = self.basemap.group_name();
        let labels = self.labels.group_name();
        let a = toggle_group_layers(style, target, BASEMAP_GROUP_PREFIX, |g| g == basemap);
        let b = toggle_group_layers(style, target, LABELS_GROUP_PREFIX, |g| g == labels);
        ToggleSummary {
            shown: a.shown + b.shown,
            hidden: a.hidden + b.hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleLayer;
    use crate::visibility::Visibility;

    #[test]
    fn parse_is_exact() {
        for b in BasemapStyle::ALL {
            assert_eq!(BasemapStyle::parse(b.as_str()), Some(b));
        }
        for l in LabelsStyle::ALL {
            assert_eq!(LabelsStyle::parse(l.as_str()), Some(l));
        }
        assert_eq!(BasemapStyle::parse("Dark"), None);
        assert_eq!(BasemapStyle::parse(" light"), None);
        assert_eq!(BasemapStyle::parse(""), None);
        assert_eq!(LabelsStyle::parse("none"), None);
        assert_eq!(LabelsStyle::parse("satellite"), None);
    }

    #[test]
    fn defaults_are_light_basemap_and_dark_labels() {
        let s = MapSettings::default();
        assert_eq!(s.basemap, BasemapStyle::Light);
        assert_eq!(s.labels, LabelsStyle::Dark);
    }

    #[test]
    fn serde_uses_query_values() {
        let json = serde_json::to_string(&MapSettings::new(
            BasemapStyle::Satellite,
            LabelsStyle::None,
        ))
        .unwrap();
        assert_eq!(json, r#"{"basemap":"satellite","labels":""}"#);
    }

    fn style() -> StyleDocument {
        StyleDocument::default()
            .with_group("1", "basemap-light")
            .with_group("2", "basemap-dark")
            .with_group("3", "basemap-satellite")
            .with_group("4", "labels-dark")
            .with_group("5", "labels-light")
            .with_layer(StyleLayer::new("bg-light").in_group("1"))
            .with_layer(StyleLayer::new("bg-dark").in_group("2"))
            .with_layer(StyleLayer::new("imagery").in_group("3"))
            .with_layer(StyleLayer::new("places-dark").in_group("4"))
            .with_layer(StyleLayer::new("places-light").in_group("5"))
            .with_layer(StyleLayer::new("flood-extent"))
    }

    fn visible(style: &StyleDocument) -> Vec<&str> {
        style
            .layers
            .iter()
            .filter(|l| l.visibility() == Visibility::Visible)
            .map(|l| l.id.as_str())
            .collect()
    }

    #[test]
    fn apply_switches_groups() {
        let source = style();
        let mut out = source.clone();
        MapSettings::new(BasemapStyle::Satellite, LabelsStyle::Light).apply(&source, &mut out);
        assert_eq!(visible(&out), vec!["imagery", "places-light", "flood-extent"]);
    }

    #[test]
    fn no_labels_hides_every_label_group() {
        let source = style();
        let mut out = source.clone();
        let summary =
            MapSettings::new(BasemapStyle::Light, LabelsStyle::None).apply(&source, &mut out);
        assert_eq!(visible(&out), vec!["bg-light", "flood-extent"]);
        assert_eq!(summary.touched(), 5);
    }
}
