//! Scene composition: a pure function from document state to an ordered
//! draw-primitive list. The interactive preview and the file exporter replay
//! the same primitives at different scale factors, so their geometry can
//! never drift apart.

use crate::core::constants::{LABEL_FONT_SIZE, LAT_GRID_STEP, LON_GRID_STEP};
use crate::core::document::MapDocument;
use crate::core::geo::Point;
use crate::core::transform::CanvasTransform;
use crate::rendering::primitives::{
    DrawPrimitive, BAND_FILL, EQUATOR_COLOR, GRID_COLOR, MARKER_COLOR,
};
use crate::route;
use std::sync::Arc;

/// Regenerates the full primitive list for one frame. Immediate-mode: no
/// retained per-primitive handles, mutation and rendering stay independent.
pub fn compose(doc: &MapDocument, transform: &CanvasTransform) -> Vec<DrawPrimitive> {
    let mut prims = Vec::new();
    let pan = doc.pan_offset();
    let m = transform.multiplier();
    let (ml, mt) = (transform.margin_left(), transform.margin_top());
    let (w, h) = (transform.eff_width(), transform.eff_height());

    // 1. band fill and background raster, tiled around the pan offset
    prims.push(DrawPrimitive::Rect {
        min: Point::new(ml, mt),
        max: Point::new(ml + w, mt + h),
        color: BAND_FILL,
    });
    if let Some(bg) = doc.background() {
        let image = if m == 1.0 {
            Arc::clone(bg)
        } else {
            Arc::new(image::imageops::resize(
                bg.as_ref(),
                w as u32,
                h as u32,
                image::imageops::FilterType::Lanczos3,
            ))
        };
        let offset = (pan * m).rem_euclid(w);
        for dx in transform.tile_shifts() {
            prims.push(DrawPrimitive::Image {
                origin: Point::new(ml + offset + dx, mt),
                image: Arc::clone(&image),
                alpha: doc.bg_alpha(),
            });
        }
    }

    // 2. graticule
    compose_grid(transform, pan, &mut prims);

    // 3. pins: marker triangle plus name label, wrapped and replicated
    for pin in doc.pins().iter() {
        let pos = pin.position();
        let x = transform.wrap_x(transform.lon_to_x(pos.lon, pan));
        let y = transform.lat_to_y(pos.lat);
        for dx in transform.tile_shifts() {
            prims.push(DrawPrimitive::Polygon {
                points: vec![
                    Point::new(x + dx - 3.0 * m, y - 4.0 * m),
                    Point::new(x + dx + 3.0 * m, y - 4.0 * m),
                    Point::new(x + dx, y),
                ],
                color: MARKER_COLOR,
            });
            prims.push(DrawPrimitive::Text {
                anchor: Point::new(x + dx, y - 4.0 * m),
                text: pin.name().to_string(),
                color: pin.color().rgba(),
                size: LABEL_FONT_SIZE * m as f32,
            });
        }
    }

    // 4. great-circle overlays from the focal pin
    if doc.show_routes {
        if let Some(focal) = doc.focal().and_then(|id| doc.pins().get(id)) {
            let focal_pos = focal.position();
            for pin in doc.pins().iter().filter(|p| p.id() != focal.id()) {
                let target = pin.position();
                if focal_pos.central_angle_to(&target) <= f64::EPSILON {
                    // zero-length path, nothing to draw
                    continue;
                }
                let path = route::default_path(focal_pos, target);
                let screen = route::unwrap_screen_path(&path, transform, pan);
                let base = DrawPrimitive::Polyline {
                    points: screen,
                    color: pin.color().rgba(),
                    dashed: true,
                };
                for dx in transform.tile_shifts() {
                    prims.push(base.shifted_x(dx));
                }
            }
        }
    }

    prims
}

fn compose_grid(transform: &CanvasTransform, pan: f64, prims: &mut Vec<DrawPrimitive>) {
    let m = transform.multiplier();
    let (ml, mt) = (transform.margin_left(), transform.margin_top());
    let (w, h) = (transform.eff_width(), transform.eff_height());

    let mut lon = -180;
    while lon <= 180 {
        let x = transform.wrap_x(transform.lon_to_x(lon as f64, pan));
        for dx in transform.tile_shifts() {
            // -180 and 180 wrap to the same meridian; draw the seam once
            if lon == 180 && dx != 0.0 {
                continue;
            }
            prims.push(DrawPrimitive::Line {
                from: Point::new(x + dx, mt),
                to: Point::new(x + dx, mt + h),
                color: GRID_COLOR,
            });
            if transform.has_margins() {
                prims.push(DrawPrimitive::Text {
                    anchor: Point::new(x + dx, mt - 5.0),
                    text: format!("{lon}\u{b0}"),
                    color: GRID_COLOR,
                    size: LABEL_FONT_SIZE * m as f32,
                });
            }
        }
        lon += LON_GRID_STEP;
    }

    let mut lat = -90;
    while lat <= 90 {
        let y = transform.lat_to_y(lat as f64);
        prims.push(DrawPrimitive::Line {
            from: Point::new(ml, y),
            to: Point::new(ml + w, y),
            color: if lat == 0 { EQUATOR_COLOR } else { GRID_COLOR },
        });
        if transform.has_margins() {
            prims.push(DrawPrimitive::Text {
                anchor: Point::new(ml - 20.0, y + LABEL_FONT_SIZE as f64 / 2.0),
                text: format!("{lat}\u{b0}"),
                color: GRID_COLOR,
                size: LABEL_FONT_SIZE * m as f32,
            });
        }
        lat += LAT_GRID_STEP;
    }
}
