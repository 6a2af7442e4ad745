pub mod csv;
pub mod folder;
pub mod settings;
pub mod state;

use std::path::PathBuf;

/// Errors that can occur while reading or writing map data on disk.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("no pins.csv found in {0}")]
    MissingPinsFile(PathBuf),

    #[error("map name must not be empty")]
    EmptyMapName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
