//! Cluster expansion: click -> leaf fetch -> radial layout -> render ->
//! collapse.
//!
//! At most one expansion is live at a time; starting a new one fully retires
//! the previous geometry and its animation. Stale animation frames are
//! rejected by a generation counter: every scheduled frame carries the
//! generation it was armed under, and a mismatch at fire time terminates the
//! loop without touching engine state.

use engine::{MapEngine, PaintValue};
use features::FeatureCollection;
use geo::{LngLat, Time};
use layout::{LineSegment, radial_expansion};

use crate::diag::DiagnosticLog;
use crate::layers::{LAYER_CLUSTERS, SOURCE_EXPANDED, SOURCE_EXPANSION_LINES, SOURCE_LOCATIONS};

/// Bounded page size for leaf fetches.
pub const LEAF_PAGE_LIMIT: usize = 100;

/// Cluster-marker opacity at the start of the fade-in.
pub const FADE_FROM_OPACITY: f64 = 0.25;

/// Fade-in duration (seconds).
pub const FADE_DURATION_S: f64 = 0.3;

/// Result of one animation frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The fade advanced; schedule another frame with the same generation.
    Continue,
    /// The fade finished (or none is armed); stop scheduling.
    Done,
    /// The frame belonged to a superseded generation; nothing was written.
    Stale,
}

/// The live disaggregated display of one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterExpansion {
    pub cluster_id: u64,
    pub center: LngLat,
    pub leaves: FeatureCollection,
    pub lines: Vec<LineSegment>,
    /// Current cluster-layer opacity in [0, 1] while the fade runs.
    pub opacity: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct FadeAnimation {
    start: Time,
    duration_s: f64,
    from: f64,
    to: f64,
}

/// State machine: Collapsed -> Expanding -> Expanded -> Collapsing ->
/// Collapsed. The transient states live inside the synchronous transition
/// methods; between calls the controller is either collapsed or expanded.
#[derive(Debug, Default)]
pub struct ExpansionController {
    live: Option<ClusterExpansion>,
    generation: u64,
    fade: Option<FadeAnimation>,
}

impl ExpansionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current animation generation. Frames must be scheduled with this
    /// value and re-checked against it when they fire.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_expanded(&self) -> bool {
        self.live.is_some()
    }

    pub fn live(&self) -> Option<&ClusterExpansion> {
        self.live.as_ref()
    }

    pub fn expanded_cluster_id(&self) -> Option<u64> {
        self.live.as_ref().map(|e| e.cluster_id)
    }

    /// Expands `cluster_id` at `center`, retiring any prior expansion.
    ///
    /// On leaf-fetch failure the attempt is abandoned silently (diagnostic
    /// event only) and the controller is left collapsed.
    pub fn expand<E: MapEngine>(
        &mut self,
        engine: &mut E,
        diag: &mut DiagnosticLog,
        cluster_id: u64,
        center: LngLat,
        zoom: f64,
        now: Time,
    ) -> bool {
        self.collapse(engine);

        let leaves = match engine.cluster_leaves(SOURCE_LOCATIONS, cluster_id, LEAF_PAGE_LIMIT) {
            Ok(leaves) => leaves,
            Err(err) => {
                diag.emit(
                    "expansion",
                    format!("leaf fetch for cluster {cluster_id} failed: {err}"),
                );
                return false;
            }
        };
        if leaves.is_empty() {
            diag.emit("expansion", format!("cluster {cluster_id} has no leaves"));
            return false;
        }

        let placed = radial_expansion(center, zoom, &leaves);
        let collection = FeatureCollection::new(placed.leaves);
        engine.set_source_data(SOURCE_EXPANDED, &collection);
        engine.set_line_source(SOURCE_EXPANSION_LINES, &placed.lines);

        // Sibling clusters start faded and ease back to full opacity so the
        // new expansion reads clearly.
        self.generation = self.generation.wrapping_add(1);
        engine.set_paint_property(
            LAYER_CLUSTERS,
            "circle-opacity",
            PaintValue::Number(FADE_FROM_OPACITY),
        );
        self.fade = Some(FadeAnimation {
            start: now,
            duration_s: FADE_DURATION_S,
            from: FADE_FROM_OPACITY,
            to: 1.0,
        });
        self.live = Some(ClusterExpansion {
            cluster_id,
            center,
            leaves: collection,
            lines: placed.lines,
            opacity: FADE_FROM_OPACITY,
        });
        true
    }

    /// Clears the expanded geometry, restores full cluster opacity and
    /// invalidates any in-flight animation frames.
    pub fn collapse<E: MapEngine>(&mut self, engine: &mut E) {
        if self.live.is_none() && self.fade.is_none() {
            return;
        }
        engine.set_source_data(SOURCE_EXPANDED, &FeatureCollection::empty());
        engine.set_line_source(SOURCE_EXPANSION_LINES, &[]);
        engine.set_paint_property(LAYER_CLUSTERS, "circle-opacity", PaintValue::Number(1.0));
        self.generation = self.generation.wrapping_add(1);
        self.fade = None;
        self.live = None;
    }

    /// Applies one opacity step of the fade.
    ///
    /// `scheduled_generation` is the generation read when the frame was
    /// scheduled; a mismatch means the expansion it belonged to is gone and
    /// the frame must not write anything.
    pub fn on_animation_frame<E: MapEngine>(
        &mut self,
        engine: &mut E,
        scheduled_generation: u64,
        now: Time,
    ) -> FrameOutcome {
        if scheduled_generation != self.generation {
            return FrameOutcome::Stale;
        }
        let Some(fade) = self.fade else {
            return FrameOutcome::Done;
        };

        let t = if fade.duration_s <= 0.0 {
            1.0
        } else {
            ((now.0 - fade.start.0) / fade.duration_s).clamp(0.0, 1.0)
        };
        let opacity = fade.from + (fade.to - fade.from) * t;
        engine.set_paint_property(LAYER_CLUSTERS, "circle-opacity", PaintValue::Number(opacity));
        if let Some(live) = &mut self.live {
            live.opacity = opacity;
        }

        if t >= 1.0 {
            self.fade = None;
            FrameOutcome::Done
        } else {
            FrameOutcome::Continue
        }
    }
}
