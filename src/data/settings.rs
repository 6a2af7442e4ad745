//! Per-map display settings persisted as `settings.json`.

use crate::core::constants::DEFAULT_BODY_DIAMETER_KM;
use crate::data::PersistError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_star_diameter")]
    pub star_diameter: f64,
    #[serde(default = "default_bg_alpha")]
    pub bg_alpha: f64,
}

fn default_star_diameter() -> f64 {
    DEFAULT_BODY_DIAMETER_KM
}

fn default_bg_alpha() -> f64 {
    100.0
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            star_diameter: default_star_diameter(),
            bg_alpha: default_bg_alpha(),
        }
    }
}

impl MapSettings {
    /// Reads settings, substituting defaults silently when the file is
    /// missing or unparseable (optional fields are never fatal).
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
}
