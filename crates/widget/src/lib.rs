//! Map-display widget core.
//!
//! Sits between a raw point collection and an external map-rendering engine:
//! multi-facet filtering, cluster disaggregation with a radial layout and a
//! generation-guarded fade, debounced viewport re-fit, and a single
//! persistent event dispatch path.

pub mod config;
pub mod diag;
pub mod expansion;
pub mod layers;
pub mod router;
pub mod style;
pub mod viewport;

use engine::{Cursor, MapEngine, ScreenPoint};
use facets::FacetFilter;
use features::FeatureCollection;
use geo::Time;

use crate::config::WidgetConfig;
use crate::diag::DiagnosticLog;
use crate::expansion::{ExpansionController, FrameOutcome};
use crate::layers::{
    INTERACTIVE_LAYERS, LAYER_CLUSTERS, LAYER_EXPANDED, LAYER_POINTS, SOURCE_LOCATIONS,
};
use crate::router::{EventRouter, InputEvent};
use crate::style::StyleBootstrap;
use crate::viewport::ViewportSync;

/// The widget facade the hosting page drives.
///
/// All operations are synchronous and run to completion on the calling
/// event; the engine's render state is written, never read back.
#[derive(Debug)]
pub struct MapWidget {
    config: WidgetConfig,
    filter: FacetFilter,
    original: FeatureCollection,
    expansion: ExpansionController,
    viewport: ViewportSync,
    style: StyleBootstrap,
    router: EventRouter,
    diag: DiagnosticLog,
    zoom: f64,
    hidden: bool,
}

impl MapWidget {
    pub fn new(config: WidgetConfig) -> Self {
        let viewport = ViewportSync::new(config.viewport_bounds);
        let zoom = config.zoom;
        Self {
            config,
            filter: FacetFilter::new(),
            original: FeatureCollection::empty(),
            expansion: ExpansionController::new(),
            viewport,
            style: StyleBootstrap::new(),
            router: EventRouter::new(),
            diag: DiagnosticLog::new(),
            zoom,
            hidden: false,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diag
    }

    pub fn drain_diagnostics(&mut self) -> Vec<diag::DiagnosticEvent> {
        self.diag.drain()
    }

    /// Current animation generation; frames must be scheduled with this
    /// value and hand it back to `on_animation_frame`.
    pub fn animation_generation(&self) -> u64 {
        self.expansion.generation()
    }

    pub fn expanded_cluster_id(&self) -> Option<u64> {
        self.expansion.expanded_cluster_id()
    }

    /// The host could not create the rendering engine at all: the widget
    /// hides itself and yields to static fallback content. No error reaches
    /// the host page.
    pub fn fall_back(&mut self) {
        if !self.hidden {
            self.hidden = true;
            self.diag
                .emit("host", "rendering engine unsupported, showing fallback content");
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Wires the widget to a freshly created engine: base style bootstrap,
    /// layer styling, event subscriptions, initial viewport fit.
    pub fn attach<E: MapEngine>(&mut self, engine: &mut E) {
        if self.hidden {
            return;
        }
        self.style.install(engine);
        layers::install_layers(engine);
        self.router.bind(engine);
        self.viewport.on_load(engine, &mut self.diag);
    }

    /// Accepts a raw GeoJSON point collection.
    ///
    /// On validation failure the previous data keeps rendering; on success
    /// the authoritative collection is replaced wholesale, the current
    /// filter re-applied, and per-feature icons preloaded (individual icon
    /// failures don't abort the rest).
    pub fn set_data<E: MapEngine>(&mut self, engine: &mut E, raw: &str) {
        if self.hidden {
            return;
        }
        let parsed = match FeatureCollection::from_geojson(raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.diag.emit("data", format!("rejected point collection: {err}"));
                return;
            }
        };

        self.original = parsed;
        self.expansion.collapse(engine);
        self.push_visible(engine);
        self.preload_icons(engine);
    }

    /// Single dispatch path for all engine input events.
    pub fn handle_event<E: MapEngine>(&mut self, engine: &mut E, event: InputEvent, now: Time) {
        if self.hidden {
            return;
        }
        match event {
            InputEvent::Click { point } => self.on_click(engine, point, now),
            InputEvent::ZoomChanged { zoom } => {
                self.zoom = zoom;
                self.expansion.collapse(engine);
            }
            InputEvent::MouseEnter { layer } => {
                if INTERACTIVE_LAYERS.contains(&layer) {
                    engine.set_cursor(Cursor::Pointer);
                }
            }
            InputEvent::MouseLeave { layer } => {
                if INTERACTIVE_LAYERS.contains(&layer) {
                    engine.set_cursor(Cursor::Default);
                }
            }
            InputEvent::Resize => self.viewport.on_resize(now),
            InputEvent::FacetToggled {
                dimension,
                value,
                selected,
            } => match self.filter.set_selected(&dimension, &value, selected) {
                Ok(()) => self.push_visible(engine),
                Err(err) => self.diag.emit("facets", err.to_string()),
            },
        }
    }

    /// One step of the cluster-fade loop. The host reschedules while this
    /// returns `Continue`.
    pub fn on_animation_frame<E: MapEngine>(
        &mut self,
        engine: &mut E,
        scheduled_generation: u64,
        now: Time,
    ) -> FrameOutcome {
        if self.hidden {
            return FrameOutcome::Done;
        }
        self.expansion
            .on_animation_frame(engine, scheduled_generation, now)
    }

    /// Drives time-based work (the resize debounce). Call once per host
    /// tick.
    pub fn poll<E: MapEngine>(&mut self, engine: &mut E, now: Time) {
        if self.hidden {
            return;
        }
        self.viewport.poll(engine, &mut self.diag, now);
    }

    fn on_click<E: MapEngine>(&mut self, engine: &mut E, point: ScreenPoint, now: Time) {
        let cluster_hit = engine
            .query_rendered(point, LAYER_CLUSTERS)
            .into_iter()
            .find_map(|hit| hit.cluster_id.map(|id| (id, hit.position)));

        if let Some((cluster_id, center)) = cluster_hit {
            self.expansion
                .expand(engine, &mut self.diag, cluster_id, center, self.zoom, now);
            if self.config.auto_refocus {
                match engine.cluster_expansion_zoom(SOURCE_LOCATIONS, cluster_id) {
                    Ok(zoom) => engine.ease_to(center, zoom),
                    Err(err) => self
                        .diag
                        .emit("refocus", format!("expansion zoom unavailable: {err}")),
                }
            }
            return;
        }

        // Clicks on individual or expanded points are popup territory,
        // which the host owns; they must not collapse the expansion.
        if !engine.query_rendered(point, LAYER_EXPANDED).is_empty() {
            return;
        }
        if !engine.query_rendered(point, LAYER_POINTS).is_empty() {
            return;
        }

        self.expansion.collapse(engine);
    }

    fn push_visible<E: MapEngine>(&mut self, engine: &mut E) {
        let visible = self.filter.compute_visible(&self.original);
        engine.set_source_data(SOURCE_LOCATIONS, visible.as_ref());
    }

    fn preload_icons<E: MapEngine>(&mut self, engine: &mut E) {
        for feature in &self.original.features {
            let Some(url) = &feature.properties.icon_url else {
                continue;
            };
            if let Err(err) = engine.load_image(url, url) {
                self.diag.emit(
                    "icons",
                    format!("icon for {:?} failed: {err}", feature.properties.name),
                );
            }
        }
    }
}
