use crate::core::constants::{LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= LAT_MIN && self.lat <= LAT_MAX && self.lon >= LON_MIN && self.lon <= LON_MAX
    }

    /// Central angle to another coordinate via the haversine formula.
    /// Always in `[0, pi]`; numerically stable for small separations.
    pub fn central_angle_to(&self, other: &LatLng) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * a.sqrt().min(1.0).asin()
    }

    /// Great-circle distance in kilometres on a sphere of the given diameter.
    pub fn distance_km(&self, other: &LatLng, diameter_km: f64) -> f64 {
        (diameter_km / 2.0) * self.central_angle_to(other)
    }

    /// Unit-sphere Cartesian embedding, used for great-circle interpolation.
    pub fn to_cartesian(&self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    /// Recovers a coordinate from a (not necessarily normalized) Cartesian vector.
    pub fn from_cartesian(v: [f64; 3]) -> Self {
        let hyp = (v[0] * v[0] + v[1] * v[1]).sqrt();
        let lat = v[2].atan2(hyp).to_degrees();
        let lon = v[1].atan2(v[0]).to_degrees();
        Self::new(lat, lon)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_BODY_DIAMETER_KM;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lon, -74.0060);
        assert!(coord.is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(0.0, 180.5).is_valid());
    }

    #[test]
    fn test_distance_zero_and_symmetric() {
        let a = LatLng::new(35.0, 139.0);
        let b = LatLng::new(-12.0, -77.0);

        assert_eq!(a.distance_km(&a, DEFAULT_BODY_DIAMETER_KM), 0.0);
        let ab = a.distance_km(&b, DEFAULT_BODY_DIAMETER_KM);
        let ba = b.distance_km(&a, DEFAULT_BODY_DIAMETER_KM);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_distance_scales_with_diameter() {
        let a = LatLng::new(10.0, 20.0);
        let b = LatLng::new(-30.0, 80.0);
        let d1 = a.distance_km(&b, DEFAULT_BODY_DIAMETER_KM);
        let d2 = a.distance_km(&b, 2.0 * DEFAULT_BODY_DIAMETER_KM);
        assert!((d2 - 2.0 * d1).abs() < 1e-9);
    }

    #[test]
    fn test_quarter_great_circle() {
        // (0,0) to (0,90) is a quarter of the equator: pi * R / 2 for R = 6371.
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 90.0);
        let d = a.distance_km(&b, DEFAULT_BODY_DIAMETER_KM);
        assert!((d - 10007.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_cartesian_round_trip() {
        let coord = LatLng::new(48.8566, 2.3522);
        let back = LatLng::from_cartesian(coord.to_cartesian());
        assert!((back.lat - coord.lat).abs() < 1e-9);
        assert!((back.lon - coord.lon).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal_angle_capped() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 180.0);
        let c = a.central_angle_to(&b);
        assert!(c <= std::f64::consts::PI + 1e-12);
        assert!((c - std::f64::consts::PI).abs() < 1e-9);
    }
}
