/// A west/south/east/north rectangle used for viewport auto-fit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl ViewportBounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Builds a bounds rectangle only when all four edges are supplied and
    /// non-zero. Partial rectangles are treated as "not configured".
    pub fn from_edges(
        west: Option<f64>,
        south: Option<f64>,
        east: Option<f64>,
        north: Option<f64>,
    ) -> Option<Self> {
        match (west, south, east, north) {
            (Some(w), Some(s), Some(e), Some(n))
                if w != 0.0 && s != 0.0 && e != 0.0 && n != 0.0 =>
            {
                Some(Self::new(w, s, e, n))
            }
            _ => None,
        }
    }
}
