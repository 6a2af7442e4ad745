//! Per-map folder I/O. Each named map persists as a folder keyed by the
//! document name, holding `pins.csv`, `settings.json` and the optional
//! `map.png` background raster.

use crate::core::document::MapDocument;
use crate::core::transform::CanvasTransform;
use crate::data::csv;
use crate::data::settings::{MapSettings, SETTINGS_FILE};
use crate::data::PersistError;
use image::RgbaImage;
use std::path::{Path, PathBuf};

pub const PINS_FILE: &str = "pins.csv";
pub const BACKGROUND_FILE: &str = "map.png";

/// Handle to a map's folder on disk. All I/O is synchronous and blocking;
/// the single control thread owns both the document and its folder.
#[derive(Debug, Clone)]
pub struct MapFolder {
    path: PathBuf,
}

impl MapFolder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The folder for a document, keyed by its name under `base`.
    pub fn for_document(base: &Path, doc: &MapDocument) -> Result<Self, PersistError> {
        if doc.name.trim().is_empty() {
            return Err(PersistError::EmptyMapName);
        }
        Ok(Self::new(base.join(doc.name.trim())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pins_path(&self) -> PathBuf {
        self.path.join(PINS_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.path.join(SETTINGS_FILE)
    }

    pub fn background_path(&self) -> PathBuf {
        self.path.join(BACKGROUND_FILE)
    }

    /// Saves pins (in name-sorted order), settings, and the background
    /// raster if one is set. Creates the folder if needed.
    pub fn save(&self, doc: &mut MapDocument) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.path)?;

        doc.pins_mut().sort_by_name();
        std::fs::write(self.pins_path(), csv::encode_pins(doc.pins().iter()))?;

        MapSettings {
            star_diameter: doc.body_diameter_km(),
            bg_alpha: doc.bg_alpha(),
        }
        .save(&self.settings_path())?;

        if let Some(bg) = doc.background() {
            bg.save(self.background_path())?;
        }
        log::debug!("saved map {:?} ({} pins)", doc.name, doc.pins().len());
        Ok(())
    }

    /// Loads a complete document from the folder. Fails up front when
    /// `pins.csv` is absent; settings and background are optional.
    pub fn load(&self) -> Result<MapDocument, PersistError> {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "my_map".to_string());
        let mut doc = MapDocument::new(name);
        self.load_pins_into(&mut doc)?;

        let settings = MapSettings::load(&self.settings_path());
        if doc.set_body_diameter_km(settings.star_diameter).is_err() {
            log::warn!(
                "ignoring non-positive star diameter {} in {}",
                settings.star_diameter,
                self.settings_path().display()
            );
        }
        doc.set_bg_alpha(settings.bg_alpha);

        if let Some(bg) = self.load_background() {
            doc.set_background_prescaled(bg);
        }
        Ok(doc)
    }

    /// Replaces the document's pins from `pins.csv`. If the file is missing
    /// this is an error and the document is left untouched; malformed rows
    /// within an existing file are skipped. Returns the number of pins
    /// loaded.
    pub fn load_pins_into(&self, doc: &mut MapDocument) -> Result<usize, PersistError> {
        let path = self.pins_path();
        if !path.exists() {
            return Err(PersistError::MissingPinsFile(self.path.clone()));
        }
        let data = std::fs::read_to_string(&path)?;
        let rows = csv::decode_pins(&data);

        doc.pins_mut().clear();
        doc.clear_focal();
        let mut loaded = 0;
        for fields in rows {
            match doc.add_pin(fields) {
                Ok(_) => loaded += 1,
                Err(err) => log::warn!("dropping pin from {}: {err}", path.display()),
            }
        }
        Ok(loaded)
    }

    /// The background raster, if `map.png` exists and decodes. The file is
    /// stored pre-scaled to the band's native size; anything else is
    /// rescaled on load.
    pub fn load_background(&self) -> Option<RgbaImage> {
        let path = self.background_path();
        if !path.exists() {
            return None;
        }
        match image::open(&path) {
            Ok(img) => {
                let img = img.to_rgba8();
                let t = CanvasTransform::preview();
                let (w, h) = (t.eff_width() as u32, t.eff_height() as u32);
                if img.dimensions() == (w, h) {
                    Some(img)
                } else {
                    Some(image::imageops::resize(
                        &img,
                        w,
                        h,
                        image::imageops::FilterType::Lanczos3,
                    ))
                }
            }
            Err(err) => {
                log::warn!("failed to decode {}: {err}", path.display());
                None
            }
        }
    }

    /// Installs a background image on the document and persists it as
    /// `map.png`, rescaled to the band's native size.
    pub fn set_background(
        &self,
        doc: &mut MapDocument,
        image: &RgbaImage,
    ) -> Result<(), PersistError> {
        let t = CanvasTransform::preview();
        let scaled = image::imageops::resize(
            image,
            t.eff_width() as u32,
            t.eff_height() as u32,
            image::imageops::FilterType::Lanczos3,
        );
        std::fs::create_dir_all(&self.path)?;
        scaled.save(self.background_path())?;
        doc.set_background_prescaled(scaled);
        Ok(())
    }

    /// Removes the background from the document and deletes `map.png`. A
    /// missing file is not an error; a failing delete is reported.
    pub fn clear_background(&self, doc: &mut MapDocument) -> Result<(), PersistError> {
        doc.clear_background();
        match std::fs::remove_file(self.background_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
