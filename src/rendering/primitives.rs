use crate::core::geo::Point;
use crate::core::pins::PinColor;
use image::{Rgba, RgbaImage};
use std::sync::Arc;

/// Flat fill of the drawable band.
pub const BAND_FILL: Rgba<u8> = Rgba([224, 224, 224, 255]);
/// Canvas color outside the band.
pub const CANVAS_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Ordinary gridlines and their labels.
pub const GRID_COLOR: Rgba<u8> = Rgba([128, 128, 128, 255]);
/// The equator is rendered in a distinguishing color.
pub const EQUATOR_COLOR: Rgba<u8> = Rgba([178, 34, 34, 255]);
/// Pin marker triangles.
pub const MARKER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

impl PinColor {
    pub fn rgba(&self) -> Rgba<u8> {
        match self {
            PinColor::Black => Rgba([0, 0, 0, 255]),
            PinColor::Red => Rgba([255, 0, 0, 255]),
            PinColor::Blue => Rgba([0, 0, 255, 255]),
            PinColor::Green => Rgba([0, 128, 0, 255]),
            PinColor::Yellow => Rgba([255, 255, 0, 255]),
            PinColor::Purple => Rgba([128, 0, 128, 255]),
            PinColor::Orange => Rgba([255, 165, 0, 255]),
        }
    }
}

/// A single device-independent draw call. The scene composer emits a full
/// list of these from document state on every frame; the rasterizer (or any
/// other draw target) replays them in order.
#[derive(Debug, Clone)]
pub enum DrawPrimitive {
    /// Axis-aligned filled rectangle.
    Rect { min: Point, max: Point, color: Rgba<u8> },
    /// A raster blitted with its top-left at `origin`, alpha-blended with
    /// `alpha` in [0, 100], clipped to the band.
    Image {
        origin: Point,
        image: Arc<RgbaImage>,
        alpha: f64,
    },
    /// Straight line segment.
    Line {
        from: Point,
        to: Point,
        color: Rgba<u8>,
    },
    /// Filled polygon (used for pin markers).
    Polygon { points: Vec<Point>, color: Rgba<u8> },
    /// Connected line strip, optionally dashed (route overlays).
    Polyline {
        points: Vec<Point>,
        color: Rgba<u8>,
        dashed: bool,
    },
    /// Text anchored at its bottom-center.
    Text {
        anchor: Point,
        text: String,
        color: Rgba<u8>,
        size: f32,
    },
}

impl DrawPrimitive {
    /// A copy of this primitive shifted horizontally by `dx`; used for the
    /// plus/minus one period tile replication.
    pub fn shifted_x(&self, dx: f64) -> DrawPrimitive {
        let shift = |p: &Point| Point::new(p.x + dx, p.y);
        match self {
            DrawPrimitive::Rect { min, max, color } => DrawPrimitive::Rect {
                min: shift(min),
                max: shift(max),
                color: *color,
            },
            DrawPrimitive::Image {
                origin,
                image,
                alpha,
            } => DrawPrimitive::Image {
                origin: shift(origin),
                image: Arc::clone(image),
                alpha: *alpha,
            },
            DrawPrimitive::Line { from, to, color } => DrawPrimitive::Line {
                from: shift(from),
                to: shift(to),
                color: *color,
            },
            DrawPrimitive::Polygon { points, color } => DrawPrimitive::Polygon {
                points: points.iter().map(&shift).collect(),
                color: *color,
            },
            DrawPrimitive::Polyline {
                points,
                color,
                dashed,
            } => DrawPrimitive::Polyline {
                points: points.iter().map(&shift).collect(),
                color: *color,
                dashed: *dashed,
            },
            DrawPrimitive::Text {
                anchor,
                text,
                color,
                size,
            } => DrawPrimitive::Text {
                anchor: shift(anchor),
                text: text.clone(),
                color: *color,
                size: *size,
            },
        }
    }
}
