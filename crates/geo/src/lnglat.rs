/// Maximum latitude magnitude (degrees) used by layout math.
///
/// The east-west compensation term divides by `cos(lat)`, which degenerates
/// toward the poles. Latitudes are clamped into this range before the
/// division so the radius stays bounded.
pub const MAX_LAYOUT_LATITUDE: f64 = 89.9;

/// A WGS84 longitude/latitude pair in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Latitude clamped into `[-MAX_LAYOUT_LATITUDE, MAX_LAYOUT_LATITUDE]`.
    pub fn clamped_lat(&self) -> f64 {
        self.lat.clamp(-MAX_LAYOUT_LATITUDE, MAX_LAYOUT_LATITUDE)
    }

    /// East-west compression factor at this latitude.
    ///
    /// Equals 1 at the equator and shrinks toward the poles; the pole
    /// degeneracy is avoided by `clamped_lat`.
    pub fn latitude_adjustment(&self) -> f64 {
        self.clamped_lat().to_radians().cos()
    }
}
