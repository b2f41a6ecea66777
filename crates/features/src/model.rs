use geo::LngLat;
use serde::{Deserialize, Serialize};

/// Property bag carried by every point.
///
/// The wire names (`type`, `colorCode`, `iconUrl`) follow the upstream data
/// feed. Unknown keys are preserved in `extra` so a collection survives a
/// round trip through an engine source without losing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "colorCode", default)]
    pub color_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "iconUrl", default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FeatureProperties {
    /// Minimal properties for a given project type; everything else empty.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            size: String::new(),
            state: String::new(),
            color_code: String::new(),
            name: String::new(),
            city: String::new(),
            image: None,
            icon_url: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// A single geospatial point. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub position: LngLat,
    pub properties: FeatureProperties,
}

impl Feature {
    pub fn new(position: LngLat, properties: FeatureProperties) -> Self {
        Self {
            position,
            properties,
        }
    }
}

/// An ordered sequence of features.
///
/// Ordering contract:
/// - Order is the external display/sort order and is preserved through
///   filtering and layout.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
