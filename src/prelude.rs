//! Prelude module for common pinmap types and functions
//!
//! Re-exports the most commonly used items for easy importing with
//! `use pinmap::prelude::*;`

pub use crate::core::{
    constants,
    document::{ExportMultiplier, MapDocument},
    geo::{LatLng, Point},
    pins::{display_width, Pin, PinColor, PinEntry, PinFields, PinId, PinStore},
    transform::CanvasTransform,
};

pub use crate::route::{default_path, great_circle_path, unwrap_screen_path};

pub use crate::rendering::{
    azimuthal::{AzimuthalPlotter, AzimuthalRequest},
    primitives::DrawPrimitive,
    raster::{export_png, load_font_or_fallback, rasterize, render_export, render_preview},
    scene::compose,
};

pub use crate::data::{
    csv::{decode_pins, encode_pins},
    folder::MapFolder,
    settings::MapSettings,
    state::AppState,
    PersistError,
};

pub use crate::{Error, MapError, Result};
