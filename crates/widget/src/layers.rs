//! Source and layer wiring, with the paint constants the widget pushes into
//! the engine on attach.

use engine::{LayerId, MapEngine, PaintValue, SourceId};
use serde_json::json;

/// The authoritative point source.
pub const SOURCE_LOCATIONS: SourceId = SourceId("locations");
/// Secondary source holding the repositioned leaves of a live expansion.
pub const SOURCE_EXPANDED: SourceId = SourceId("expanded-points");
/// Secondary source holding the center-to-leaf connectors.
pub const SOURCE_EXPANSION_LINES: SourceId = SourceId("expansion-lines");

pub const LAYER_CLUSTERS: LayerId = LayerId("clusters");
pub const LAYER_CLUSTER_COUNT: LayerId = LayerId("cluster-count");
pub const LAYER_POINTS: LayerId = LayerId("unclustered-point");
pub const LAYER_EXPANDED: LayerId = LayerId("expanded-point");
pub const LAYER_EXPANSION_LINES: LayerId = LayerId("expansion-lines");

/// Layers the cursor turns into a pointer over.
pub const INTERACTIVE_LAYERS: [LayerId; 3] = [LAYER_CLUSTERS, LAYER_POINTS, LAYER_EXPANDED];

const CLUSTER_COLOR: &str = "#E2231A";

/// Applies the widget's layer styling to the engine.
pub fn install_layers<E: MapEngine>(engine: &mut E) {
    engine.set_filter(LAYER_CLUSTERS, json!(["has", "point_count"]));
    engine.set_paint_property(
        LAYER_CLUSTERS,
        "circle-color",
        PaintValue::Expression(json!([
            "step",
            ["get", "point_count"],
            CLUSTER_COLOR,
            1,
            CLUSTER_COLOR
        ])),
    );
    engine.set_paint_property(
        LAYER_CLUSTERS,
        "circle-radius",
        PaintValue::Expression(json!([
            "step",
            ["get", "point_count"],
            16,
            2,
            20,
            3,
            24,
            4,
            28,
            5,
            32
        ])),
    );

    engine.set_filter(LAYER_CLUSTER_COUNT, json!(["has", "point_count"]));
    engine.set_layout_property(
        LAYER_CLUSTER_COUNT,
        "text-field",
        PaintValue::Expression(json!(["get", "point_count_abbreviated"])),
    );
    engine.set_layout_property(LAYER_CLUSTER_COUNT, "text-size", PaintValue::Number(20.0));
    engine.set_paint_property(
        LAYER_CLUSTER_COUNT,
        "text-color",
        PaintValue::Text("#fff".to_string()),
    );

    engine.set_filter(LAYER_POINTS, json!(["!", ["has", "point_count"]]));
    for layer in [LAYER_POINTS, LAYER_EXPANDED] {
        engine.set_paint_property(layer, "circle-radius", PaintValue::Number(14.0));
        engine.set_paint_property(
            layer,
            "circle-color",
            PaintValue::Expression(json!(["get", "colorCode"])),
        );
    }

    engine.set_paint_property(
        LAYER_EXPANSION_LINES,
        "line-color",
        PaintValue::Text("#212121".to_string()),
    );
    engine.set_paint_property(LAYER_EXPANSION_LINES, "line-width", PaintValue::Number(1.0));
}
