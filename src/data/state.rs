//! Process-wide session snapshot (`app_state.json`): a convenience copy of
//! the last session independent of the per-map files, read once at startup
//! and rewritten on save/close.

use crate::core::constants::DEFAULT_BODY_DIAMETER_KM;
use crate::core::document::{ExportMultiplier, MapDocument};
use crate::core::pins::PinFields;
use crate::data::PersistError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const STATE_FILE: &str = "app_state.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default = "default_map_name")]
    pub map_name: String,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub pins: Vec<PinFields>,
    #[serde(default = "default_multiplier")]
    pub resolution_multiplier: u32,
    #[serde(default = "default_star_diameter")]
    pub star_diameter: f64,
    #[serde(default = "default_bg_alpha")]
    pub bg_alpha: f64,
}

fn default_map_name() -> String {
    "my_map".to_string()
}

fn default_multiplier() -> u32 {
    1
}

fn default_star_diameter() -> f64 {
    DEFAULT_BODY_DIAMETER_KM
}

fn default_bg_alpha() -> f64 {
    100.0
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            map_name: default_map_name(),
            offset_x: 0.0,
            pins: Vec::new(),
            resolution_multiplier: default_multiplier(),
            star_diameter: default_star_diameter(),
            bg_alpha: default_bg_alpha(),
        }
    }
}

impl AppState {
    /// Snapshots the parts of a document worth restoring next session.
    pub fn capture(doc: &MapDocument) -> Self {
        Self {
            map_name: doc.name.clone(),
            offset_x: doc.pan_offset(),
            pins: doc.pins().iter().map(|p| p.fields.clone()).collect(),
            resolution_multiplier: doc.export_multiplier.factor(),
            star_diameter: doc.body_diameter_km(),
            bg_alpha: doc.bg_alpha(),
        }
    }

    /// Rebuilds a document from the snapshot. Pins with out-of-range
    /// coordinates are dropped (and logged) rather than aborting the restore.
    pub fn restore(&self) -> MapDocument {
        let mut doc = MapDocument::new(self.map_name.clone());
        doc.set_pan_offset(self.offset_x);
        doc.export_multiplier =
            ExportMultiplier::from_factor(self.resolution_multiplier).unwrap_or_default();
        if doc.set_body_diameter_km(self.star_diameter).is_err() {
            log::warn!(
                "ignoring non-positive star diameter {} from saved state",
                self.star_diameter
            );
        }
        doc.set_bg_alpha(self.bg_alpha);
        for fields in &self.pins {
            if let Err(err) = doc.add_pin(fields.clone()) {
                log::warn!("dropping saved pin {:?}: {err}", fields.name);
            }
        }
        doc
    }

    /// Reads the snapshot, substituting defaults silently when it is missing
    /// or unparseable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|err| {
                log::debug!("unparseable {}: {err}, using defaults", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Removes a stale snapshot, e.g. when a new map is created. A missing
    /// file is fine.
    pub fn clear(path: &Path) -> Result<(), PersistError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
