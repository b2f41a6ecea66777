//! The seam to the external map-rendering engine.
//!
//! Everything behind `MapEngine` is out of scope for this subsystem:
//! projection, pan/zoom, tile fetching and the base clustering primitives.
//! The widget only ever writes into the engine (sources, paint and layout
//! properties, cursor); it never reads render state back.

use features::{Feature, FeatureCollection};
use geo::{LngLat, ViewportBounds};
use layout::LineSegment;

/// A named engine data source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub &'static str);

/// A rendered engine layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub &'static str);

/// A paint or layout property value.
///
/// `Expression` carries engine-native conditional expressions (step/match)
/// as raw JSON, the same way the upstream style spec does.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Expression(serde_json::Value),
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// A screen-space point, in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Input event kinds the widget subscribes to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Zoom,
    MouseEnter,
    MouseLeave,
    Resize,
}

/// What the engine reports under a queried screen point.
///
/// A cluster marker carries `cluster_id`; an individual point carries its
/// feature payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    pub position: LngLat,
    pub cluster_id: Option<u64>,
    pub feature: Option<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    ClusterNotFound(u64),
    SourceMissing(String),
    NotReady,
    Unsupported,
    Io(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::ClusterNotFound(id) => write!(f, "cluster {id} not found"),
            EngineError::SourceMissing(name) => write!(f, "source {name:?} does not exist"),
            EngineError::NotReady => write!(f, "engine has not completed its first layout"),
            EngineError::Unsupported => write!(f, "host cannot run the rendering engine"),
            EngineError::Io(msg) => write!(f, "engine i/o error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Operations consumed from the external engine.
///
/// Write-only from the widget's perspective: nothing written here is ever
/// read back and compared.
pub trait MapEngine {
    /// Creates or wholesale-replaces a named point source.
    fn set_source_data(&mut self, source: SourceId, data: &FeatureCollection);

    /// Creates or wholesale-replaces a named line source.
    fn set_line_source(&mut self, source: SourceId, lines: &[LineSegment]);

    /// Returns up to `limit` member leaves of a cluster. Paged; can fail.
    fn cluster_leaves(
        &mut self,
        source: SourceId,
        cluster_id: u64,
        limit: usize,
    ) -> Result<Vec<Feature>, EngineError>;

    /// Zoom level at which a cluster disaggregates on its own.
    fn cluster_expansion_zoom(
        &mut self,
        source: SourceId,
        cluster_id: u64,
    ) -> Result<f64, EngineError>;

    /// Rendered features under a screen point, front-most first.
    fn query_rendered(&self, point: ScreenPoint, layer: LayerId) -> Vec<RenderedFeature>;

    fn set_paint_property(&mut self, layer: LayerId, name: &str, value: PaintValue);

    fn set_layout_property(&mut self, layer: LayerId, name: &str, value: PaintValue);

    fn set_filter(&mut self, layer: LayerId, filter: serde_json::Value);

    /// Subscribes to an input event, optionally scoped to one layer.
    fn subscribe(&mut self, layer: Option<LayerId>, event: EventKind);

    /// Fits the viewport to a bounding box. Fails before the first layout.
    fn fit_bounds(&mut self, bounds: ViewportBounds, padding_px: f64) -> Result<(), EngineError>;

    /// Smoothly re-centers the camera.
    fn ease_to(&mut self, center: LngLat, zoom: f64);

    fn set_cursor(&mut self, cursor: Cursor);

    /// Registers a named image for marker/popup use. Per-asset failures are
    /// isolated by the caller.
    fn load_image(&mut self, name: &str, url: &str) -> Result<(), EngineError>;
}
