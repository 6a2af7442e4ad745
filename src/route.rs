//! Great-circle routing: spherical interpolation between two pins and the
//! unwrapping pass that turns the samples into a continuous screen polyline
//! on the horizontally-wrapping canvas.

use crate::core::constants::ROUTE_SAMPLES;
use crate::core::geo::{LatLng, Point};
use crate::core::transform::CanvasTransform;

/// Samples the great-circle path from `start` to `end` with `samples`
/// intervals (so `samples + 1` points), using spherical linear interpolation
/// on the unit-sphere embedding.
///
/// Coincident endpoints are an explicit degenerate branch: the result is a
/// constant path of the requested length, never a division by zero. Callers
/// should skip drawing such a zero-length path.
pub fn great_circle_path(start: LatLng, end: LatLng, samples: usize) -> Vec<LatLng> {
    let delta = start.central_angle_to(&end);
    if delta <= f64::EPSILON {
        return vec![start; samples + 1];
    }

    let p0 = start.to_cartesian();
    let p1 = end.to_cartesian();
    let sin_delta = delta.sin();

    (0..=samples)
        .map(|i| {
            let f = i as f64 / samples as f64;
            let a = ((1.0 - f) * delta).sin() / sin_delta;
            let b = (f * delta).sin() / sin_delta;
            LatLng::from_cartesian([
                a * p0[0] + b * p1[0],
                a * p0[1] + b * p1[1],
                a * p0[2] + b * p1[2],
            ])
        })
        .collect()
}

/// Default-resolution path.
pub fn default_path(start: LatLng, end: LatLng) -> Vec<LatLng> {
    great_circle_path(start, end, ROUTE_SAMPLES)
}

/// Projects a sampled path to screen space and unwraps it into a continuous
/// polyline.
///
/// Consecutive samples can legitimately jump a full period when the path
/// crosses the map's cut edge, so each point after the first is shifted by
/// whole periods until it lies within half a period of the previous adjusted
/// point. The result lives in unbounded x-space; the renderer tiles it at
/// plus/minus one period for display.
pub fn unwrap_screen_path(
    path: &[LatLng],
    transform: &CanvasTransform,
    pan_offset: f64,
) -> Vec<Point> {
    let period = transform.eff_width();
    let mut out: Vec<Point> = Vec::with_capacity(path.len());
    for coord in path {
        let mut x = transform.lon_to_x(coord.lon, pan_offset);
        let y = transform.lat_to_y(coord.lat);
        if let Some(prev) = out.last() {
            while x - prev.x > period / 2.0 {
                x -= period;
            }
            while prev.x - x > period / 2.0 {
                x += period;
            }
        }
        out.push(Point::new(x, y));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_path_is_constant() {
        let p = LatLng::new(12.0, 34.0);
        let path = great_circle_path(p, p, ROUTE_SAMPLES);
        assert_eq!(path.len(), ROUTE_SAMPLES + 1);
        assert!(path.iter().all(|s| *s == p));

        // and its projection is a single repeated point
        let t = CanvasTransform::preview();
        let screen = unwrap_screen_path(&path, &t, 0.0);
        assert!(screen.iter().all(|s| *s == screen[0]));
    }

    #[test]
    fn test_endpoints_are_exact() {
        let a = LatLng::new(35.6762, 139.6503);
        let b = LatLng::new(40.7128, -74.0060);
        let path = great_circle_path(a, b, ROUTE_SAMPLES);
        let first = path.first().unwrap();
        let last = path.last().unwrap();
        assert!((first.lat - a.lat).abs() < 1e-9 && (first.lon - a.lon).abs() < 1e-9);
        assert!((last.lat - b.lat).abs() < 1e-9 && (last.lon - b.lon).abs() < 1e-9);
    }

    #[test]
    fn test_samples_stay_on_sphere_ranges() {
        let a = LatLng::new(60.0, 10.0);
        let b = LatLng::new(-45.0, -160.0);
        for p in great_circle_path(a, b, ROUTE_SAMPLES) {
            assert!(p.lat >= -90.0 && p.lat <= 90.0);
            assert!(p.lon >= -180.0 && p.lon <= 180.0);
        }
    }

    #[test]
    fn test_unwrap_limits_jumps_across_cut_edge() {
        // A short path crossing the antimeridian produces raw x jumps of
        // nearly a full period; unwrapping must keep neighbors close.
        let a = LatLng::new(10.0, 170.0);
        let b = LatLng::new(-5.0, -170.0);
        let t = CanvasTransform::preview();
        let screen = unwrap_screen_path(&great_circle_path(a, b, ROUTE_SAMPLES), &t, 0.0);

        let period = t.eff_width();
        for pair in screen.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= period / 2.0);
        }
    }

    #[test]
    fn test_unwrap_jump_bound_with_pan() {
        let a = LatLng::new(0.0, 150.0);
        let b = LatLng::new(30.0, -120.0);
        let t = CanvasTransform::export(2);
        for pan in [0.0, 333.0, 1100.0] {
            let screen = unwrap_screen_path(&great_circle_path(a, b, ROUTE_SAMPLES), &t, pan);
            for pair in screen.windows(2) {
                assert!((pair[1].x - pair[0].x).abs() <= t.eff_width() / 2.0);
            }
        }
    }

    #[test]
    fn test_meridian_route_is_straight() {
        // Both endpoints on the same meridian: every sample keeps that
        // longitude, so the unwrapped polyline is vertical.
        let a = LatLng::new(10.0, 25.0);
        let b = LatLng::new(55.0, 25.0);
        let t = CanvasTransform::preview();
        let screen = unwrap_screen_path(&great_circle_path(a, b, ROUTE_SAMPLES), &t, 0.0);
        for p in &screen {
            assert!((p.x - screen[0].x).abs() < 1e-6);
        }
    }
}
