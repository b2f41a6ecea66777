//! Widget configuration from host-supplied element attributes.

use std::collections::BTreeMap;

use geo::{LngLat, ViewportBounds};

/// Projections the widget will accept; anything else falls back to the
/// default.
pub const PROJECTIONS: [&str; 8] = [
    "mercator",
    "globe",
    "albers",
    "equalEarth",
    "equirectangular",
    "lambertConformalConic",
    "naturalEarth",
    "winkelTripel",
];

pub const DEFAULT_PROJECTION: &str = "mercator";

/// Zoom level above which the engine stops clustering.
pub const CLUSTER_MAX_ZOOM: f64 = 14.0;

/// Cluster aggregation radius in pixels.
pub const CLUSTER_RADIUS: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub center: LngLat,
    pub zoom: f64,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    pub style_url: Option<String>,
    pub projection: String,
    /// Disables pan/zoom interaction on the host side.
    pub locked: bool,
    /// Ease the camera toward a cluster when it is clicked.
    pub auto_refocus: bool,
    pub show_legend: bool,
    pub viewport_bounds: Option<ViewportBounds>,
    pub max_bounds: Option<ViewportBounds>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            access_key: None,
            center: LngLat::new(0.0, 0.0),
            zoom: 0.0,
            min_zoom: None,
            max_zoom: None,
            style_url: None,
            projection: DEFAULT_PROJECTION.to_string(),
            locked: false,
            auto_refocus: false,
            show_legend: false,
            viewport_bounds: None,
            max_bounds: None,
        }
    }
}

impl WidgetConfig {
    /// Builds a configuration from `data-os-*` element attributes.
    ///
    /// Missing or unparseable values fall back to defaults; an invalid
    /// projection name falls back to `DEFAULT_PROJECTION`. A bounds
    /// rectangle is only applied when all four edges are present and
    /// non-zero.
    pub fn from_attributes(attrs: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let projection = match attrs.get("data-os-map-projection") {
            Some(name) if PROJECTIONS.contains(&name.as_str()) => name.clone(),
            _ => DEFAULT_PROJECTION.to_string(),
        };

        Self {
            endpoint: text(attrs, "data-os-endpoint"),
            access_key: text(attrs, "data-os-key"),
            center: LngLat::new(
                num(attrs, "data-os-map-lng").unwrap_or(defaults.center.lng),
                num(attrs, "data-os-map-lat").unwrap_or(defaults.center.lat),
            ),
            zoom: num(attrs, "data-os-map-zoom").unwrap_or(defaults.zoom),
            min_zoom: num(attrs, "data-os-map-min-zoom"),
            max_zoom: num(attrs, "data-os-map-max-zoom"),
            style_url: text(attrs, "data-os-map-style"),
            projection,
            locked: flag(attrs, "data-os-map-lock"),
            auto_refocus: flag(attrs, "data-os-map-auto-refocus"),
            show_legend: flag(attrs, "data-os-map-legend"),
            viewport_bounds: bounds(attrs, "data-os-viewport-bounds"),
            max_bounds: bounds(attrs, "data-os-max-bounds"),
        }
    }
}

fn text(attrs: &BTreeMap<String, String>, key: &str) -> Option<String> {
    attrs.get(key).filter(|v| !v.is_empty()).cloned()
}

fn num(attrs: &BTreeMap<String, String>, key: &str) -> Option<f64> {
    attrs.get(key).and_then(|v| v.parse::<f64>().ok())
}

fn flag(attrs: &BTreeMap<String, String>, key: &str) -> bool {
    matches!(attrs.get(key).map(String::as_str), Some("true") | Some("1"))
}

fn bounds(attrs: &BTreeMap<String, String>, prefix: &str) -> Option<ViewportBounds> {
    ViewportBounds::from_edges(
        num(attrs, &format!("{prefix}-west")),
        num(attrs, &format!("{prefix}-south")),
        num(attrs, &format!("{prefix}-east")),
        num(attrs, &format!("{prefix}-north")),
    )
}
