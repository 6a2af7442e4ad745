//! CPU rasterizer: replays a draw-primitive list into an RGBA buffer and
//! encodes export PNGs. Preview and export share this path at different
//! scale factors.

use crate::core::constants::{ROUTE_DASH_OFF, ROUTE_DASH_ON};
use crate::core::document::{ExportMultiplier, MapDocument};
use crate::core::geo::Point;
use crate::core::transform::CanvasTransform;
use crate::rendering::primitives::{DrawPrimitive, CANVAS_FILL};
use crate::rendering::scene;
use crate::Result;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut, draw_text_mut};
use imageproc::rect::Rect;
use rusttype::{point, Font, Scale};
use std::path::Path;

/// Font candidates tried when the preferred font is unavailable.
const FALLBACK_FONTS: [&str; 3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

/// Loads a TrueType font from disk. Returns `None` (after logging) when the
/// file is missing or unparseable; label drawing degrades gracefully.
pub fn load_font(path: &Path) -> Option<Font<'static>> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let font = Font::try_from_vec(bytes);
            if font.is_none() {
                log::warn!("font file {} is not a usable TrueType font", path.display());
            }
            font
        }
        Err(err) => {
            log::warn!("failed to read font {}: {err}", path.display());
            None
        }
    }
}

/// Loads the preferred font, falling back to common system fonts. A missing
/// font is never fatal; with no font at all, labels are skipped.
pub fn load_font_or_fallback(preferred: &Path) -> Option<Font<'static>> {
    if let Some(font) = load_font(preferred) {
        return Some(font);
    }
    FALLBACK_FONTS
        .iter()
        .find_map(|candidate| load_font(Path::new(candidate)))
}

/// Renders the interactive preview frame (multiplier 1, margins included).
pub fn render_preview(doc: &MapDocument, font: Option<&Font>) -> RgbaImage {
    let transform = CanvasTransform::preview();
    rasterize(&scene::compose(doc, &transform), &transform, font)
}

/// Renders an export raster: the effective band only, scaled by the
/// multiplier.
pub fn render_export(
    doc: &MapDocument,
    multiplier: ExportMultiplier,
    font: Option<&Font>,
) -> RgbaImage {
    let transform = CanvasTransform::export(multiplier.factor());
    rasterize(&scene::compose(doc, &transform), &transform, font)
}

/// Renders and writes the export PNG at `eff_width * m` x `eff_height * m`.
pub fn export_png(
    doc: &MapDocument,
    multiplier: ExportMultiplier,
    font: Option<&Font>,
    path: &Path,
) -> Result<()> {
    let image = render_export(doc, multiplier, font);
    image.save(path)?;
    log::debug!(
        "exported {}x{} map image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Replays primitives in order onto a fresh canvas sized by the transform.
pub fn rasterize(
    primitives: &[DrawPrimitive],
    transform: &CanvasTransform,
    font: Option<&Font>,
) -> RgbaImage {
    let width = transform.canvas_width() as u32;
    let height = transform.canvas_height() as u32;
    let mut canvas = RgbaImage::from_pixel(width, height, CANVAS_FILL);
    let m = transform.multiplier();

    // background rasters never bleed into the margins
    let band = ClipRect {
        x0: transform.margin_left(),
        y0: transform.margin_top(),
        x1: transform.margin_left() + transform.eff_width(),
        y1: transform.margin_top() + transform.eff_height(),
    };

    for prim in primitives {
        match prim {
            DrawPrimitive::Rect { min, max, color } => {
                let (w, h) = ((max.x - min.x).round() as i32, (max.y - min.y).round() as i32);
                if w > 0 && h > 0 {
                    draw_filled_rect_mut(
                        &mut canvas,
                        Rect::at(min.x.round() as i32, min.y.round() as i32)
                            .of_size(w as u32, h as u32),
                        *color,
                    );
                }
            }
            DrawPrimitive::Image {
                origin,
                image,
                alpha,
            } => blit_clipped(&mut canvas, image, *origin, &band, *alpha),
            DrawPrimitive::Line { from, to, color } => {
                draw_line_segment_mut(
                    &mut canvas,
                    (from.x as f32, from.y as f32),
                    (to.x as f32, to.y as f32),
                    *color,
                );
            }
            DrawPrimitive::Polygon { points, color } => draw_polygon(&mut canvas, points, *color),
            DrawPrimitive::Polyline {
                points,
                color,
                dashed,
            } => {
                if *dashed {
                    draw_dashed_polyline(
                        &mut canvas,
                        points,
                        *color,
                        ROUTE_DASH_ON * m,
                        ROUTE_DASH_OFF * m,
                    );
                } else {
                    for pair in points.windows(2) {
                        draw_line_segment_mut(
                            &mut canvas,
                            (pair[0].x as f32, pair[0].y as f32),
                            (pair[1].x as f32, pair[1].y as f32),
                            *color,
                        );
                    }
                }
            }
            DrawPrimitive::Text {
                anchor,
                text,
                color,
                size,
            } => {
                if let Some(font) = font {
                    draw_anchored_text(&mut canvas, font, *anchor, text, *color, *size);
                }
            }
        }
    }

    canvas
}

struct ClipRect {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

/// Source-over blit of `src` at `origin`, with an extra whole-image alpha in
/// [0, 100], clipped to `clip` and the canvas.
fn blit_clipped(canvas: &mut RgbaImage, src: &RgbaImage, origin: Point, clip: &ClipRect, alpha: f64) {
    let factor = (alpha / 100.0).clamp(0.0, 1.0);
    let ox = origin.x.round() as i64;
    let oy = origin.y.round() as i64;

    for (sx, sy, pixel) in src.enumerate_pixels() {
        let dx = ox + sx as i64;
        let dy = oy + sy as i64;
        if (dx as f64) < clip.x0 || (dx as f64) >= clip.x1 {
            continue;
        }
        if (dy as f64) < clip.y0 || (dy as f64) >= clip.y1 {
            continue;
        }
        if dx < 0 || dy < 0 || dx >= canvas.width() as i64 || dy >= canvas.height() as i64 {
            continue;
        }

        let Rgba([sr, sg, sb, sa]) = *pixel;
        let a = (sa as f64 / 255.0) * factor;
        if a <= 0.0 {
            continue;
        }
        let dst = canvas.get_pixel_mut(dx as u32, dy as u32);
        let Rgba([dr, dg, db, da]) = *dst;
        let blend = |s: u8, d: u8| (s as f64 * a + d as f64 * (1.0 - a)).round() as u8;
        *dst = Rgba([
            blend(sr, dr),
            blend(sg, dg),
            blend(sb, db),
            da.max((a * 255.0).round() as u8),
        ]);
    }
}

fn draw_polygon(canvas: &mut RgbaImage, points: &[Point], color: Rgba<u8>) {
    let mut poly: Vec<imageproc::point::Point<i32>> = points
        .iter()
        .map(|p| imageproc::point::Point::new(p.x.round() as i32, p.y.round() as i32))
        .collect();
    poly.dedup();
    if poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    match poly.len() {
        0 => {}
        1 | 2 => {
            // too small to fill at this scale
            let p = poly[0];
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < canvas.width() && (p.y as u32) < canvas.height()
            {
                canvas.put_pixel(p.x as u32, p.y as u32, color);
            }
        }
        _ => draw_polygon_mut(canvas, &poly, color),
    }
}

/// Dashed line strip with the dash phase carried across segment joints.
fn draw_dashed_polyline(canvas: &mut RgbaImage, points: &[Point], color: Rgba<u8>, on: f64, off: f64) {
    let mut pen_down = true;
    let mut remaining = on;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let len = a.distance_to(&b);
        if len == 0.0 {
            continue;
        }
        let dir = Point::new((b.x - a.x) / len, (b.y - a.y) / len);
        let mut travelled = 0.0;
        while travelled < len {
            let step = remaining.min(len - travelled);
            let from = a.add(&dir.multiply(travelled));
            let to = a.add(&dir.multiply(travelled + step));
            if pen_down {
                draw_line_segment_mut(
                    canvas,
                    (from.x as f32, from.y as f32),
                    (to.x as f32, to.y as f32),
                    color,
                );
            }
            travelled += step;
            remaining -= step;
            if remaining <= 0.0 {
                pen_down = !pen_down;
                remaining = if pen_down { on } else { off };
            }
        }
    }
}

fn draw_anchored_text(
    canvas: &mut RgbaImage,
    font: &Font,
    anchor: Point,
    text: &str,
    color: Rgba<u8>,
    size: f32,
) {
    let scale = Scale::uniform(size);
    let width = text_width(font, text, scale);
    // anchor is the label's bottom-center
    let x = (anchor.x - width as f64 / 2.0).round() as i32;
    let y = (anchor.y - size as f64).round() as i32;
    draw_text_mut(canvas, color, x, y, scale, font, text);
}

fn text_width(font: &Font, text: &str, scale: Scale) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}
