//! Deterministic in-memory engine for tests.
//!
//! Records every write in stable containers (`BTreeMap`, ordered logs) so a
//! test can assert the exact sequence of effects the widget produced.
//! Cluster leaves and rendered-feature queries are scripted up front.

use std::collections::{BTreeMap, BTreeSet};

use features::{Feature, FeatureCollection};
use geo::{LngLat, ViewportBounds};
use layout::LineSegment;

use crate::seam::{
    Cursor, EngineError, EventKind, LayerId, MapEngine, PaintValue, RenderedFeature, ScreenPoint,
    SourceId,
};

#[derive(Debug, Default)]
pub struct MemoryEngine {
    pub sources: BTreeMap<SourceId, FeatureCollection>,
    pub line_sources: BTreeMap<SourceId, Vec<LineSegment>>,
    pub paint: BTreeMap<(LayerId, String), PaintValue>,
    pub layout_props: BTreeMap<(LayerId, String), PaintValue>,
    pub filters: BTreeMap<LayerId, serde_json::Value>,
    pub subscriptions: Vec<(Option<LayerId>, EventKind)>,
    pub fitted: Vec<(ViewportBounds, f64)>,
    pub eased: Vec<(LngLat, f64)>,
    pub cursor: Cursor,
    pub images: BTreeMap<String, String>,

    /// Ordered log of every paint write, for animation-sequencing asserts.
    pub paint_writes: Vec<(LayerId, String, PaintValue)>,

    /// When false, `fit_bounds` fails with `NotReady`.
    pub laid_out: bool,

    scripted_leaves: BTreeMap<u64, Vec<Feature>>,
    scripted_expansion_zoom: BTreeMap<u64, f64>,
    scripted_rendered: BTreeMap<LayerId, Vec<RenderedFeature>>,
    failing_clusters: BTreeSet<u64>,
    failing_images: BTreeSet<String>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self {
            laid_out: true,
            ..Self::default()
        }
    }

    pub fn script_leaves(&mut self, cluster_id: u64, leaves: Vec<Feature>) {
        self.scripted_leaves.insert(cluster_id, leaves);
    }

    pub fn script_expansion_zoom(&mut self, cluster_id: u64, zoom: f64) {
        self.scripted_expansion_zoom.insert(cluster_id, zoom);
    }

    /// Makes leaf fetches for `cluster_id` fail.
    pub fn fail_cluster(&mut self, cluster_id: u64) {
        self.failing_clusters.insert(cluster_id);
    }

    pub fn script_rendered(&mut self, layer: LayerId, hits: Vec<RenderedFeature>) {
        self.scripted_rendered.insert(layer, hits);
    }

    /// Makes `load_image` fail for one url.
    pub fn fail_image(&mut self, url: &str) {
        self.failing_images.insert(url.to_string());
    }

    pub fn source(&self, source: SourceId) -> Option<&FeatureCollection> {
        self.sources.get(&source)
    }

    pub fn paint_value(&self, layer: LayerId, name: &str) -> Option<&PaintValue> {
        self.paint.get(&(layer, name.to_string()))
    }
}

impl MapEngine for MemoryEngine {
    fn set_source_data(&mut self, source: SourceId, data: &FeatureCollection) {
        self.sources.insert(source, data.clone());
    }

    fn set_line_source(&mut self, source: SourceId, lines: &[LineSegment]) {
        self.line_sources.insert(source, lines.to_vec());
    }

    fn cluster_leaves(
        &mut self,
        _source: SourceId,
        cluster_id: u64,
        limit: usize,
    ) -> Result<Vec<Feature>, EngineError> {
        if self.failing_clusters.contains(&cluster_id) {
            return Err(EngineError::ClusterNotFound(cluster_id));
        }
        let leaves = self
            .scripted_leaves
            .get(&cluster_id)
            .ok_or(EngineError::ClusterNotFound(cluster_id))?;
        Ok(leaves.iter().take(limit).cloned().collect())
    }

    fn cluster_expansion_zoom(
        &mut self,
        _source: SourceId,
        cluster_id: u64,
    ) -> Result<f64, EngineError> {
        self.scripted_expansion_zoom
            .get(&cluster_id)
            .copied()
            .ok_or(EngineError::ClusterNotFound(cluster_id))
    }

    fn query_rendered(&self, _point: ScreenPoint, layer: LayerId) -> Vec<RenderedFeature> {
        self.scripted_rendered.get(&layer).cloned().unwrap_or_default()
    }

    fn set_paint_property(&mut self, layer: LayerId, name: &str, value: PaintValue) {
        self.paint_writes
            .push((layer, name.to_string(), value.clone()));
        self.paint.insert((layer, name.to_string()), value);
    }

    fn set_layout_property(&mut self, layer: LayerId, name: &str, value: PaintValue) {
        self.layout_props.insert((layer, name.to_string()), value);
    }

    fn set_filter(&mut self, layer: LayerId, filter: serde_json::Value) {
        self.filters.insert(layer, filter);
    }

    fn subscribe(&mut self, layer: Option<LayerId>, event: EventKind) {
        self.subscriptions.push((layer, event));
    }

    fn fit_bounds(&mut self, bounds: ViewportBounds, padding_px: f64) -> Result<(), EngineError> {
        if !self.laid_out {
            return Err(EngineError::NotReady);
        }
        self.fitted.push((bounds, padding_px));
        Ok(())
    }

    fn ease_to(&mut self, center: LngLat, zoom: f64) {
        self.eased.push((center, zoom));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn load_image(&mut self, name: &str, url: &str) -> Result<(), EngineError> {
        if self.failing_images.contains(url) {
            return Err(EngineError::Io(format!("image fetch failed: {url}")));
        }
        self.images.insert(name.to_string(), url.to_string());
        Ok(())
    }
}
