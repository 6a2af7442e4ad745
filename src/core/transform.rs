use crate::core::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, LAT_MAX, LAT_MIN, LON_MAX, LON_MIN, MARGIN_BOTTOM, MARGIN_LEFT,
    MARGIN_RIGHT, MARGIN_TOP,
};
use serde::{Deserialize, Serialize};

/// Maps geographic coordinates onto a horizontally-wrapping canvas band.
///
/// Longitude maps linearly onto the effective (non-margin) width and latitude
/// onto the effective height; there is no projection distortion. The map
/// behaves as a period-`eff_width` strip: `lon_to_x` itself is unbounded, and
/// the renderer wraps concrete primitives with [`CanvasTransform::wrap_x`]
/// plus one replicated copy on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    canvas_width: f64,
    canvas_height: f64,
    margin_left: f64,
    margin_top: f64,
    eff_width: f64,
    eff_height: f64,
    multiplier: f64,
}

impl CanvasTransform {
    /// The interactive preview canvas: fixed size, fixed margins, scale 1.
    pub fn preview() -> Self {
        let eff_width = (CANVAS_WIDTH - MARGIN_LEFT - MARGIN_RIGHT) as f64;
        let eff_height = (CANVAS_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) as f64;
        Self {
            canvas_width: CANVAS_WIDTH as f64,
            canvas_height: CANVAS_HEIGHT as f64,
            margin_left: MARGIN_LEFT as f64,
            margin_top: MARGIN_TOP as f64,
            eff_width,
            eff_height,
            multiplier: 1.0,
        }
    }

    /// An export target: the effective band only (no margins), scaled by the
    /// resolution multiplier. Shares every geometry rule with the preview so
    /// exported pixel positions are exactly `multiplier` times preview ones.
    pub fn export(multiplier: u32) -> Self {
        let m = multiplier as f64;
        let eff_width = (CANVAS_WIDTH - MARGIN_LEFT - MARGIN_RIGHT) as f64 * m;
        let eff_height = (CANVAS_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) as f64 * m;
        Self {
            canvas_width: eff_width,
            canvas_height: eff_height,
            margin_left: 0.0,
            margin_top: 0.0,
            eff_width,
            eff_height,
            multiplier: m,
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    pub fn margin_left(&self) -> f64 {
        self.margin_left
    }

    pub fn margin_top(&self) -> f64 {
        self.margin_top
    }

    /// Width of the drawable band in pixels; the horizontal wrap period.
    pub fn eff_width(&self) -> f64 {
        self.eff_width
    }

    pub fn eff_height(&self) -> f64 {
        self.eff_height
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Whether this transform carries visible margins (the preview does,
    /// export targets do not). Grid labels live in the margins.
    pub fn has_margins(&self) -> bool {
        self.margin_left > 0.0 || self.margin_top > 0.0
    }

    /// Longitude to canvas x. Unbounded: the result is not reduced into the
    /// band, callers wrap or tile as needed. `pan_offset` is in preview-scale
    /// pixels and is scaled here.
    pub fn lon_to_x(&self, lon: f64, pan_offset: f64) -> f64 {
        let relative = (lon - LON_MIN) / (LON_MAX - LON_MIN);
        self.margin_left + relative * self.eff_width + pan_offset * self.multiplier
    }

    /// Latitude to canvas y. Strictly decreasing in latitude; no wraparound.
    pub fn lat_to_y(&self, lat: f64) -> f64 {
        let relative = (LAT_MAX - lat) / (LAT_MAX - LAT_MIN);
        self.margin_top + relative * self.eff_height
    }

    /// Reduces an unbounded x into the base band `[margin_left,
    /// margin_left + eff_width)`.
    pub fn wrap_x(&self, x: f64) -> f64 {
        self.margin_left + (x - self.margin_left).rem_euclid(self.eff_width)
    }

    /// The three tile shifts used to keep wrapped features visible at the
    /// band's cut edge.
    pub fn tile_shifts(&self) -> [f64; 3] {
        [-self.eff_width, 0.0, self.eff_width]
    }
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::preview()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_geometry() {
        let t = CanvasTransform::preview();
        assert_eq!(t.eff_width(), 1120.0);
        assert_eq!(t.eff_height(), 670.0);
        assert_eq!(t.canvas_width(), 1200.0);
        assert!(t.has_margins());
    }

    #[test]
    fn test_lon_to_x_strictly_increasing() {
        let t = CanvasTransform::preview();
        let mut prev = f64::NEG_INFINITY;
        for lon in -180..=180 {
            let x = t.lon_to_x(lon as f64, 37.0);
            assert!(x > prev);
            prev = x;
        }
    }

    #[test]
    fn test_lat_to_y_strictly_decreasing() {
        let t = CanvasTransform::preview();
        let mut prev = f64::INFINITY;
        for lat in -90..=90 {
            let y = t.lat_to_y(lat as f64);
            assert!(y < prev);
            prev = y;
        }
    }

    #[test]
    fn test_wrap_x_lands_in_band() {
        let t = CanvasTransform::preview();
        for x in [-5000.0, -1.0, 40.0, 500.0, 1159.9, 1160.0, 9999.0] {
            let w = t.wrap_x(x);
            assert!(w >= t.margin_left() && w < t.margin_left() + t.eff_width());
        }
        assert_eq!(t.wrap_x(40.0), 40.0);
        assert_eq!(t.wrap_x(40.0 + 1120.0), 40.0);
    }

    #[test]
    fn test_export_scales_exactly() {
        let t1 = CanvasTransform::export(1);
        let t2 = CanvasTransform::export(2);
        assert_eq!(t2.canvas_width(), 2.0 * t1.canvas_width());
        assert_eq!(t2.canvas_height(), 2.0 * t1.canvas_height());
        assert!(!t1.has_margins());

        let pan = 123.0;
        for lon in [-180.0, -33.0, 0.0, 90.0] {
            assert!((t2.lon_to_x(lon, pan) - 2.0 * t1.lon_to_x(lon, pan)).abs() < 1e-9);
        }
        for lat in [-90.0, -15.5, 0.0, 60.0] {
            assert!((t2.lat_to_y(lat) - 2.0 * t1.lat_to_y(lat)).abs() < 1e-9);
        }
    }
}
