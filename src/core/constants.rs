//! Engine-wide magic numbers for the fixed canvas geometry.
//! Keeping them in a single place makes it easier to tweak them together.

/// Fixed preview canvas size in pixels.
pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 750;

/// Fixed margins around the drawable band.
pub const MARGIN_LEFT: u32 = 40;
pub const MARGIN_RIGHT: u32 = 40;
pub const MARGIN_TOP: u32 = 40;
pub const MARGIN_BOTTOM: u32 = 40;

/// Valid geographic ranges.
pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// Grid spacing in degrees.
pub const LON_GRID_STEP: i32 = 30;
pub const LAT_GRID_STEP: i32 = 15;

/// Default body diameter (Earth) in kilometres.
pub const DEFAULT_BODY_DIAMETER_KM: f64 = 12742.0;

/// Number of interpolation intervals along a great-circle overlay.
pub const ROUTE_SAMPLES: usize = 100;

/// Pin list layout: name column width in display cells, distance field width.
pub const NAME_COLUMN_WIDTH: usize = 16;
pub const DISTANCE_FIELD_WIDTH: usize = 10;

/// Label font size in pixels at multiplier 1.
pub const LABEL_FONT_SIZE: f32 = 14.0;

/// Dash pattern for route overlays (on/off lengths at multiplier 1).
pub const ROUTE_DASH_ON: f64 = 6.0;
pub const ROUTE_DASH_OFF: f64 = 4.0;
