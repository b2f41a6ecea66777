//! Radial layout for disaggregating a cluster into its member leaves.
//!
//! Pure geometry, no shared state.
//!
//! Ordering contract:
//! - Leaves are placed in ascending order of their lowercase-trimmed
//!   `"{city} {name}"` key; equal keys keep their input order (stable sort).
//! - Leaf 0 reads at 12 o'clock and placement proceeds clockwise.

use std::f64::consts::{FRAC_PI_2, TAU};

use features::Feature;
use geo::LngLat;

/// Base spread in degrees at zoom 0, before the member-count term.
const BASE_SPREAD_DEG: f64 = 10.0;

/// A center-to-leaf connector.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineSegment {
    pub start: LngLat,
    pub end: LngLat,
}

/// Repositioned leaf copies plus their connectors, in placement order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RadialExpansion {
    pub leaves: Vec<Feature>,
    pub lines: Vec<LineSegment>,
}

/// Computes the radial placement of a cluster's leaves around `center`.
///
/// The radius halves with each zoom level (roughly constant on screen) and
/// grows with `log2(n + 1)` so dense clusters stay compact. Geometry is
/// replaced on each leaf copy; properties are untouched. Deterministic for
/// equal inputs.
pub fn radial_expansion(center: LngLat, zoom: f64, leaves: &[Feature]) -> RadialExpansion {
    let n = leaves.len();
    if n == 0 {
        return RadialExpansion::default();
    }

    let mut ordered: Vec<(String, &Feature)> =
        leaves.iter().map(|f| (placement_key(f), f)).collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0));

    let radius = (BASE_SPREAD_DEG / zoom.exp2()) * ((n as f64) + 1.0).log2();
    let adjustment = center.latitude_adjustment();

    let mut out = RadialExpansion {
        leaves: Vec::with_capacity(n),
        lines: Vec::with_capacity(n),
    };

    for (i, (_key, leaf)) in ordered.into_iter().enumerate() {
        let angle = ((n - i) as f64 / n as f64) * TAU + FRAC_PI_2;
        let position = LngLat::new(
            center.lng + (radius * angle.cos()) / adjustment,
            center.lat + radius * angle.sin(),
        );
        out.leaves
            .push(Feature::new(position, leaf.properties.clone()));
        out.lines.push(LineSegment {
            start: center,
            end: position,
        });
    }

    out
}

fn placement_key(feature: &Feature) -> String {
    let p = &feature.properties;
    format!("{} {}", p.city.trim(), p.name.trim()).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{LineSegment, radial_expansion};
    use features::{Feature, FeatureProperties};
    use geo::LngLat;
    use std::f64::consts::TAU;

    fn leaf(city: &str, name: &str) -> Feature {
        let mut p = FeatureProperties::of_kind("AI");
        p.city = city.to_string();
        p.name = name.to_string();
        Feature::new(LngLat::new(0.0, 0.0), p)
    }

    fn leaves(n: usize) -> Vec<Feature> {
        (0..n).map(|i| leaf("austin", &format!("site {i:02}"))).collect()
    }

    #[test]
    fn empty_input_yields_empty_expansion() {
        let out = radial_expansion(LngLat::new(0.0, 0.0), 10.0, &[]);
        assert!(out.leaves.is_empty());
        assert!(out.lines.is_empty());
    }

    #[test]
    fn five_leaves_at_zoom_ten_match_reference_numbers() {
        let center = LngLat::new(0.0, 0.0);
        let out = radial_expansion(center, 10.0, &leaves(5));
        assert_eq!(out.leaves.len(), 5);
        assert_eq!(out.lines.len(), 5);

        // radius = (10 / 1024) * log2(6)
        let radius = (10.0 / 1024.0) * 6.0_f64.log2();
        assert!((radius - 0.0252437).abs() < 1e-6);

        // Leaf 0: angle = 2*pi + pi/2, straight north of the center.
        let first = out.leaves[0].position;
        assert!(first.lng.abs() < 1e-12, "expected due north, lng {}", first.lng);
        assert!((first.lat - radius).abs() < 1e-12);
    }

    #[test]
    fn angles_are_evenly_spaced() {
        let center = LngLat::new(0.0, 0.0);
        let n = 7;
        let out = radial_expansion(center, 8.0, &leaves(n));

        let angles: Vec<f64> = out
            .leaves
            .iter()
            .map(|f| (f.position.lat - center.lat).atan2(f.position.lng - center.lng))
            .collect();
        for w in angles.windows(2) {
            let mut diff = (w[0] - w[1]).rem_euclid(TAU);
            if diff > std::f64::consts::PI {
                diff = TAU - diff;
            }
            assert!(
                (diff - TAU / n as f64).abs() < 1e-9,
                "uneven spacing: {diff}"
            );
        }
    }

    #[test]
    fn leaves_sort_by_city_then_name_case_insensitively() {
        let input = vec![
            leaf("Tulsa", "Zeta"),
            leaf("austin", "beta"),
            leaf("Austin", "Alpha"),
        ];
        let out = radial_expansion(LngLat::new(0.0, 0.0), 10.0, &input);
        let names: Vec<&str> = out
            .leaves
            .iter()
            .map(|f| f.properties.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "Zeta"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut a = leaf("austin", "same");
        a.properties.size = "first".to_string();
        let mut b = leaf("austin", "same");
        b.properties.size = "second".to_string();

        let out = radial_expansion(LngLat::new(0.0, 0.0), 10.0, &[a, b]);
        assert_eq!(out.leaves[0].properties.size, "first");
        assert_eq!(out.leaves[1].properties.size, "second");
    }

    #[test]
    fn properties_survive_repositioning() {
        let mut input = leaf("austin", "alpha");
        input.properties.size = "72 MW".to_string();
        let out = radial_expansion(LngLat::new(5.0, 5.0), 10.0, &[input.clone()]);
        assert_eq!(out.leaves[0].properties, input.properties);
        assert_ne!(out.leaves[0].position, input.position);
    }

    #[test]
    fn lines_connect_center_to_each_leaf() {
        let center = LngLat::new(3.0, 4.0);
        let out = radial_expansion(center, 9.0, &leaves(4));
        for (leaf, line) in out.leaves.iter().zip(&out.lines) {
            assert_eq!(
                *line,
                LineSegment {
                    start: center,
                    end: leaf.position
                }
            );
        }
    }

    #[test]
    fn polar_center_stays_bounded() {
        let center = LngLat::new(0.0, 89.999);
        let out = radial_expansion(center, 3.0, &leaves(6));
        for f in &out.leaves {
            assert!(f.position.lng.is_finite());
            assert!(f.position.lat.is_finite());
            // cos(89.9 deg) ~ 1.7e-3 bounds the east-west stretch; without
            // the clamp this would blow up toward infinity.
            assert!((f.position.lng - center.lng).abs() < 1.0e4);
        }
    }

    #[test]
    fn equal_inputs_produce_equal_outputs() {
        let input = leaves(9);
        let a = radial_expansion(LngLat::new(-97.7, 30.3), 11.0, &input);
        let b = radial_expansion(LngLat::new(-97.7, 30.3), 11.0, &input);
        assert_eq!(a, b);
    }

    #[test]
    fn radius_shrinks_as_zoom_grows() {
        let input = leaves(5);
        let near = radial_expansion(LngLat::new(0.0, 0.0), 12.0, &input);
        let far = radial_expansion(LngLat::new(0.0, 0.0), 6.0, &input);
        let r = |e: &super::RadialExpansion| {
            let p = e.leaves[0].position;
            (p.lng * p.lng + p.lat * p.lat).sqrt()
        };
        assert!(r(&near) < r(&far));
    }
}
