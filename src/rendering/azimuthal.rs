//! Interface to the external azimuthal-equidistant projection exporter.
//!
//! The secondary projection export is delegated entirely to a collaborating
//! geospatial plotter; this crate only assembles the request from document
//! state and defines the seam as a trait.

use crate::core::document::MapDocument;
use crate::core::geo::LatLng;
use crate::core::pins::{Pin, PinId};
use crate::{MapError, Result};
use std::path::PathBuf;

/// Everything the external plotter needs: the pins, the projection center
/// (the focal pin's position), the background raster on disk, and the
/// background alpha.
#[derive(Debug, Clone)]
pub struct AzimuthalRequest {
    pub pins: Vec<Pin>,
    pub center: LatLng,
    pub background_path: Option<PathBuf>,
    pub bg_alpha: f64,
}

impl AzimuthalRequest {
    /// Builds a request centered on the document's focal pin.
    pub fn from_document(
        doc: &MapDocument,
        background_path: Option<PathBuf>,
    ) -> std::result::Result<Self, MapError> {
        let focal = doc
            .focal()
            .and_then(|id: PinId| doc.pins().get(id))
            .ok_or_else(|| MapError::Render("azimuthal export requires a focal pin".into()))?;
        Ok(Self {
            pins: doc.pins().iter().cloned().collect(),
            center: focal.position(),
            background_path,
            bg_alpha: doc.bg_alpha(),
        })
    }
}

/// Implemented by the external geospatial-plotting collaborator. The crate
/// does not specify its rendering.
pub trait AzimuthalPlotter {
    fn render(&self, request: &AzimuthalRequest) -> Result<()>;
}
