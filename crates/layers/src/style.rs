//! Mapbox style document model.
//!
//! Only the parts the dashboard reads or writes are typed: layer ids, layer
//! group tags (`metadata["mapbox:group"]`), the group table
//! (`metadata["mapbox:groups"]`) and layer `layout`. Everything else is kept
//! in `extra` maps so a document survives a read/modify/write cycle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::visibility::Visibility;

#[derive(Debug)]
pub enum StyleError {
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StyleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleError::Parse(msg) => write!(f, "invalid style document: {msg}"),
            StyleError::Serialize(msg) => write!(f, "style serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for StyleError {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    #[serde(default)]
    pub layers: Vec<StyleLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<StyleMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleMetadata {
    #[serde(
        rename = "mapbox:groups",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub groups: BTreeMap<String, LayerGroup>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of the style's group table, keyed by group id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerGroup {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleLayer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LayerMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerMetadata {
    #[serde(
        rename = "mapbox:group",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub group: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StyleLayer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn in_group(mut self, group_id: impl Into<String>) -> Self {
        self.metadata = Some(LayerMetadata {
            group: Some(group_id.into()),
            extra: Map::new(),
        });
        self
    }

    pub fn group(&self) -> Option<&str> {
        self.metadata.as_ref()?.group.as_deref()
    }

    /// `layout.visibility`, which defaults to visible when absent.
    pub fn visibility(&self) -> Visibility {
        match self
            .layout
            .as_ref()
            .and_then(|l| l.get("visibility"))
            .and_then(Value::as_str)
        {
            Some("none") => Visibility::None,
            _ => Visibility::Visible,
        }
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.layout
            .get_or_insert_with(Map::new)
            .insert("visibility".to_string(), Value::from(visibility.as_str()));
    }
}

impl StyleDocument {
    pub fn from_json(raw: &str) -> Result<Self, StyleError> {
        serde_json::from_str(raw).map_err(|e| StyleError::Parse(e.to_string()))
    }

    pub fn from_value(value: Value) -> Result<Self, StyleError> {
        serde_json::from_value(value).map_err(|e| StyleError::Parse(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, StyleError> {
        serde_json::to_string_pretty(self).map_err(|e| StyleError::Serialize(e.to_string()))
    }

    pub fn with_group(mut self, group_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.metadata.get_or_insert_with(StyleMetadata::default).groups.insert(
            group_id.into(),
            LayerGroup {
                name: name.into(),
                extra: Map::new(),
            },
        );
        self
    }

    pub fn with_layer(mut self, layer: StyleLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &LayerGroup)> {
        self.metadata
            .iter()
            .flat_map(|m| m.groups.iter())
            .map(|(id, group)| (id.as_str(), group))
    }

    /// Display name of a group id, if the group table knows it.
    pub fn group_name(&self, group_id: &str) -> Option<&str> {
        self.metadata
            .as_ref()?
            .groups
            .get(group_id)
            .map(|g| g.name.as_str())
    }

    pub fn layer(&self, id: &str) -> Option<&StyleLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: &str) -> Option<&mut StyleLayer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }
}
