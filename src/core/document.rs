use crate::core::constants::DEFAULT_BODY_DIAMETER_KM;
use crate::core::pins::{PinEntry, PinFields, PinId, PinStore};
use crate::core::transform::CanvasTransform;
use crate::MapError;
use image::RgbaImage;
use std::sync::Arc;

/// Export resolution multiplier, restricted to the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMultiplier {
    #[default]
    X1,
    X2,
    X3,
}

impl ExportMultiplier {
    pub fn factor(&self) -> u32 {
        match self {
            ExportMultiplier::X1 => 1,
            ExportMultiplier::X2 => 2,
            ExportMultiplier::X3 => 3,
        }
    }

    pub fn from_factor(factor: u32) -> Option<ExportMultiplier> {
        match factor {
            1 => Some(ExportMultiplier::X1),
            2 => Some(ExportMultiplier::X2),
            3 => Some(ExportMultiplier::X3),
            _ => None,
        }
    }
}

/// The in-memory model of a named map: its pins, pan state, background raster
/// and display settings. All mutation goes through this type; rendering reads
/// it and regenerates the full primitive list on every frame.
#[derive(Debug, Clone)]
pub struct MapDocument {
    /// Map name; also the filesystem folder key for persistence.
    pub name: String,
    pins: PinStore,
    pan_offset: f64,
    /// Background raster pre-scaled to the band's native pixel size.
    background: Option<Arc<RgbaImage>>,
    bg_alpha: f64,
    body_diameter_km: f64,
    pub export_multiplier: ExportMultiplier,
    focal: Option<PinId>,
    /// Whether great-circle overlays from the focal pin are drawn.
    pub show_routes: bool,
}

impl MapDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pins: PinStore::new(),
            pan_offset: 0.0,
            background: None,
            bg_alpha: 100.0,
            body_diameter_km: DEFAULT_BODY_DIAMETER_KM,
            export_multiplier: ExportMultiplier::default(),
            focal: None,
            show_routes: false,
        }
    }

    pub fn pins(&self) -> &PinStore {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut PinStore {
        &mut self.pins
    }

    pub fn add_pin(&mut self, fields: PinFields) -> Result<PinId, MapError> {
        self.pins.add(fields)
    }

    pub fn update_pin(&mut self, id: PinId, fields: PinFields) -> Result<(), MapError> {
        self.pins.update(id, fields)
    }

    /// Removes a pin. Removing the current focal pin clears the focal
    /// reference and its overlay state.
    pub fn remove_pin(&mut self, id: PinId) -> Result<(), MapError> {
        self.pins.remove(id)?;
        if self.focal == Some(id) {
            self.focal = None;
        }
        Ok(())
    }

    pub fn focal(&self) -> Option<PinId> {
        self.focal
    }

    /// Sets the focal pin; the id must reference a pin currently in the store.
    pub fn set_focal(&mut self, id: Option<PinId>) -> Result<(), MapError> {
        if let Some(id) = id {
            if !self.pins.contains(id) {
                return Err(MapError::Pin(format!("no pin with id {id}")));
            }
        }
        self.focal = id;
        Ok(())
    }

    pub fn clear_focal(&mut self) {
        self.focal = None;
    }

    /// Current horizontal pan in preview-scale pixels, always in
    /// `[0, eff_width)`.
    pub fn pan_offset(&self) -> f64 {
        self.pan_offset
    }

    /// Applies a horizontal drag delta, keeping the offset reduced modulo the
    /// wrap period. The offset is a rendering parameter only.
    pub fn pan_by(&mut self, dx: f64) {
        let period = CanvasTransform::preview().eff_width();
        self.pan_offset = (self.pan_offset + dx).rem_euclid(period);
    }

    pub fn set_pan_offset(&mut self, offset: f64) {
        let period = CanvasTransform::preview().eff_width();
        self.pan_offset = offset.rem_euclid(period);
    }

    pub fn body_diameter_km(&self) -> f64 {
        self.body_diameter_km
    }

    pub fn set_body_diameter_km(&mut self, diameter_km: f64) -> Result<(), MapError> {
        if !(diameter_km > 0.0) || !diameter_km.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "body diameter must be positive, got {diameter_km}"
            )));
        }
        self.body_diameter_km = diameter_km;
        Ok(())
    }

    pub fn bg_alpha(&self) -> f64 {
        self.bg_alpha
    }

    pub fn set_bg_alpha(&mut self, alpha: f64) {
        self.bg_alpha = alpha.clamp(0.0, 100.0);
    }

    pub fn background(&self) -> Option<&Arc<RgbaImage>> {
        self.background.as_ref()
    }

    /// Installs a background raster, rescaling it to the band's native size.
    pub fn set_background(&mut self, image: &RgbaImage) {
        let t = CanvasTransform::preview();
        let scaled = image::imageops::resize(
            image,
            t.eff_width() as u32,
            t.eff_height() as u32,
            image::imageops::FilterType::Lanczos3,
        );
        self.background = Some(Arc::new(scaled));
    }

    /// Installs an already band-sized raster without rescaling.
    pub fn set_background_prescaled(&mut self, image: RgbaImage) {
        self.background = Some(Arc::new(image));
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Name-sorted pin list with distances from the focal pin, using the
    /// document's configured body diameter.
    pub fn pin_list(&mut self) -> Vec<PinEntry> {
        let focal = self.focal;
        let diameter = self.body_diameter_km;
        self.pins.list_with_distances(focal, diameter)
    }
}

impl Default for MapDocument {
    fn default() -> Self {
        Self::new("my_map")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_two_pins() -> (MapDocument, PinId, PinId) {
        let mut doc = MapDocument::new("test");
        let a = doc.add_pin(PinFields::new(0.0, 0.0, "a")).unwrap();
        let b = doc.add_pin(PinFields::new(0.0, 90.0, "b")).unwrap();
        (doc, a, b)
    }

    #[test]
    fn test_pan_stays_in_period() {
        let mut doc = MapDocument::new("test");
        let period = CanvasTransform::preview().eff_width();
        for dx in [300.0, 900.0, -2500.0, 13.5, -0.25, 100000.0] {
            doc.pan_by(dx);
            assert!(doc.pan_offset() >= 0.0 && doc.pan_offset() < period);
        }
    }

    #[test]
    fn test_removing_focal_clears_reference() {
        let (mut doc, a, _b) = doc_with_two_pins();
        doc.set_focal(Some(a)).unwrap();
        doc.remove_pin(a).unwrap();
        assert_eq!(doc.focal(), None);
    }

    #[test]
    fn test_removing_other_pin_keeps_focal() {
        let (mut doc, a, b) = doc_with_two_pins();
        doc.set_focal(Some(a)).unwrap();
        doc.remove_pin(b).unwrap();
        assert_eq!(doc.focal(), Some(a));
    }

    #[test]
    fn test_focal_must_exist() {
        let (mut doc, _a, b) = doc_with_two_pins();
        doc.remove_pin(b).unwrap();
        assert!(doc.set_focal(Some(b)).is_err());
    }

    #[test]
    fn test_body_diameter_validation() {
        let mut doc = MapDocument::new("test");
        assert!(doc.set_body_diameter_km(0.0).is_err());
        assert!(doc.set_body_diameter_km(-1.0).is_err());
        assert!(doc.set_body_diameter_km(f64::NAN).is_err());
        doc.set_body_diameter_km(6779.0).unwrap();
        assert_eq!(doc.body_diameter_km(), 6779.0);
    }

    #[test]
    fn test_bg_alpha_clamped() {
        let mut doc = MapDocument::new("test");
        doc.set_bg_alpha(150.0);
        assert_eq!(doc.bg_alpha(), 100.0);
        doc.set_bg_alpha(-3.0);
        assert_eq!(doc.bg_alpha(), 0.0);
    }

    #[test]
    fn test_pin_list_uses_document_diameter() {
        let (mut doc, a, _b) = doc_with_two_pins();
        doc.set_focal(Some(a)).unwrap();
        doc.set_body_diameter_km(2.0 * DEFAULT_BODY_DIAMETER_KM).unwrap();
        let entries = doc.pin_list();
        let d = entries
            .iter()
            .find(|e| e.name == "b")
            .and_then(|e| e.distance_km)
            .unwrap();
        assert!((d - 2.0 * 10007.5).abs() < 2.0);
    }
}
