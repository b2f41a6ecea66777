//! GeoJSON wire format for point collections.
//!
//! Structural validation only: the root must be a `FeatureCollection` of
//! `Feature`s with `Point` geometry and a properties object. Schema-level
//! validation of the property values is the caller's concern.

use serde::{Deserialize, Serialize};

use crate::model::{Feature, FeatureCollection, FeatureProperties};
use geo::LngLat;

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    Json(String),
    NotACollection(String),
    NotAFeature { index: usize, found: String },
    NotAPoint { index: usize, found: String },
    BadCoordinates { index: usize },
    MissingProperties { index: usize },
}

impl std::fmt::Display for FeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureError::Json(msg) => write!(f, "malformed GeoJSON: {msg}"),
            FeatureError::NotACollection(found) => {
                write!(f, "root type must be FeatureCollection, found {found:?}")
            }
            FeatureError::NotAFeature { index, found } => {
                write!(f, "feature {index}: type must be Feature, found {found:?}")
            }
            FeatureError::NotAPoint { index, found } => {
                write!(f, "feature {index}: geometry must be Point, found {found:?}")
            }
            FeatureError::BadCoordinates { index } => {
                write!(f, "feature {index}: coordinates must be [lng, lat]")
            }
            FeatureError::MissingProperties { index } => {
                write!(f, "feature {index}: missing properties object")
            }
        }
    }
}

impl std::error::Error for FeatureError {}

#[derive(Debug, Serialize, Deserialize)]
struct WireCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<WireFeature>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFeature {
    #[serde(rename = "type")]
    kind: String,
    geometry: WireGeometry,
    #[serde(default)]
    properties: Option<FeatureProperties>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: serde_json::Value,
}

impl FeatureCollection {
    /// Parses raw GeoJSON text into an ordered collection.
    ///
    /// Input order is preserved. Any structural defect rejects the whole
    /// input; a previously parsed collection stays valid.
    pub fn from_geojson(raw: &str) -> Result<Self, FeatureError> {
        let wire: WireCollection =
            serde_json::from_str(raw).map_err(|e| FeatureError::Json(e.to_string()))?;
        if wire.kind != "FeatureCollection" {
            return Err(FeatureError::NotACollection(wire.kind));
        }

        let mut features = Vec::with_capacity(wire.features.len());
        for (index, wf) in wire.features.into_iter().enumerate() {
            if wf.kind != "Feature" {
                return Err(FeatureError::NotAFeature {
                    index,
                    found: wf.kind,
                });
            }
            if wf.geometry.kind != "Point" {
                return Err(FeatureError::NotAPoint {
                    index,
                    found: wf.geometry.kind,
                });
            }
            let position = coordinates_to_lnglat(&wf.geometry.coordinates)
                .ok_or(FeatureError::BadCoordinates { index })?;
            let properties = wf
                .properties
                .ok_or(FeatureError::MissingProperties { index })?;
            features.push(Feature::new(position, properties));
        }

        Ok(Self::new(features))
    }

    /// Serializes the collection back into a GeoJSON value for an engine
    /// source.
    pub fn to_geojson_value(&self) -> Result<serde_json::Value, FeatureError> {
        let wire = WireCollection {
            kind: "FeatureCollection".to_string(),
            features: self
                .features
                .iter()
                .map(|f| WireFeature {
                    kind: "Feature".to_string(),
                    geometry: WireGeometry {
                        kind: "Point".to_string(),
                        coordinates: serde_json::json!([f.position.lng, f.position.lat]),
                    },
                    properties: Some(f.properties.clone()),
                })
                .collect(),
        };
        serde_json::to_value(wire).map_err(|e| FeatureError::Json(e.to_string()))
    }
}

fn coordinates_to_lnglat(value: &serde_json::Value) -> Option<LngLat> {
    let pair = value.as_array()?;
    if pair.len() < 2 {
        return None;
    }
    let lng = pair[0].as_f64()?;
    let lat = pair[1].as_f64()?;
    Some(LngLat::new(lng, lat))
}

#[cfg(test)]
mod tests {
    use super::FeatureError;
    use crate::model::FeatureCollection;
    use pretty_assertions::assert_eq;

    fn sample() -> &'static str {
        r##"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-80.1, 26.2] },
                    "properties": {
                        "type": "AI",
                        "size": "72 MW",
                        "state": "FL",
                        "colorCode": "#28a745",
                        "name": "Boca Raton Campus",
                        "city": "Boca Raton",
                        "region": "Southeast"
                    }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-97.7, 30.3] },
                    "properties": {
                        "type": "Colocation",
                        "size": "18 MW",
                        "state": "TX",
                        "colorCode": "#4e2751",
                        "name": "Austin I",
                        "city": "Austin"
                    }
                }
            ]
        }"##
    }

    #[test]
    fn parses_collection_in_order() {
        let c = FeatureCollection::from_geojson(sample()).expect("parse");
        assert_eq!(c.len(), 2);
        assert_eq!(c.features[0].properties.name, "Boca Raton Campus");
        assert_eq!(c.features[1].properties.kind, "Colocation");
        assert_eq!(c.features[1].position.lng, -97.7);
    }

    #[test]
    fn unknown_properties_are_preserved() {
        let c = FeatureCollection::from_geojson(sample()).expect("parse");
        assert_eq!(
            c.features[0].properties.extra.get("region"),
            Some(&serde_json::json!("Southeast"))
        );
    }

    #[test]
    fn rejects_non_collection_root() {
        let raw = r#"{ "type": "Feature", "features": [] }"#;
        let err = FeatureCollection::from_geojson(raw).unwrap_err();
        assert_eq!(err, FeatureError::NotACollection("Feature".to_string()));
    }

    #[test]
    fn rejects_non_point_geometry() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                "properties": { "type": "AI" }
            }]
        }"#;
        let err = FeatureCollection::from_geojson(raw).unwrap_err();
        assert_eq!(
            err,
            FeatureError::NotAPoint {
                index: 0,
                found: "LineString".to_string()
            }
        );
    }

    #[test]
    fn rejects_short_coordinates() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [4.2] },
                "properties": { "type": "AI" }
            }]
        }"#;
        let err = FeatureCollection::from_geojson(raw).unwrap_err();
        assert_eq!(err, FeatureError::BadCoordinates { index: 0 });
    }

    #[test]
    fn rejects_missing_properties() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            }]
        }"#;
        let err = FeatureCollection::from_geojson(raw).unwrap_err();
        assert_eq!(err, FeatureError::MissingProperties { index: 0 });
    }

    #[test]
    fn round_trips_through_geojson_value() {
        let c = FeatureCollection::from_geojson(sample()).expect("parse");
        let value = c.to_geojson_value().expect("serialize");
        let back = FeatureCollection::from_geojson(&value.to_string()).expect("reparse");
        assert_eq!(back, c);
    }
}
