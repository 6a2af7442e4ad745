//! # pinmap
//!
//! A Rust-native engine for pin maps on a horizontally-wrapping planar
//! world: named, colored markers at latitude/longitude, great-circle
//! distances and routes on a configurable-diameter sphere, and a
//! deterministic raster compositing pipeline shared by the interactive
//! preview and PNG export.
//!
//! The windowing toolkit, input widgets and the azimuthal projection
//! renderer are external collaborators; this crate models the document,
//! the coordinate transform, the routing math, the compositing pipeline
//! and the on-disk formats.

pub mod core;
pub mod data;
pub mod prelude;
pub mod rendering;
pub mod route;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    document::{ExportMultiplier, MapDocument},
    geo::{LatLng, Point},
    pins::{Pin, PinColor, PinEntry, PinFields, PinId, PinStore},
    transform::CanvasTransform,
};

pub use crate::rendering::{
    azimuthal::{AzimuthalPlotter, AzimuthalRequest},
    primitives::DrawPrimitive,
};

pub use crate::data::{folder::MapFolder, settings::MapSettings, state::AppState, PersistError};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("render error: {0}")]
    Render(String),

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("pin error: {0}")]
    Pin(String),
}

/// Error type alias for convenience
pub type Error = MapError;
