use crate::core::constants::{DISTANCE_FIELD_WIDTH, NAME_COLUMN_WIDTH};
use crate::core::geo::LatLng;
use crate::MapError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable identifier assigned to a pin at creation. Two pins with identical
/// fields remain distinguishable by id, so focal/selection references are
/// never ambiguous.
pub type PinId = u64;

/// The fixed pin color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinColor {
    Black,
    Red,
    #[default]
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl PinColor {
    pub const ALL: [PinColor; 7] = [
        PinColor::Black,
        PinColor::Red,
        PinColor::Blue,
        PinColor::Green,
        PinColor::Yellow,
        PinColor::Purple,
        PinColor::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PinColor::Black => "black",
            PinColor::Red => "red",
            PinColor::Blue => "blue",
            PinColor::Green => "green",
            PinColor::Yellow => "yellow",
            PinColor::Purple => "purple",
            PinColor::Orange => "orange",
        }
    }

    pub fn parse(s: &str) -> Option<PinColor> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// Parses a serialized color, falling back to the default for unknown or
    /// empty values (backward compatibility with files lacking the column).
    pub fn parse_or_default(s: &str) -> PinColor {
        Self::parse(s.trim()).unwrap_or_default()
    }
}

impl Serialize for PinColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PinColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // unknown and empty values fall back, matching the CSV codec
        Ok(PinColor::parse_or_default(&s))
    }
}

/// The editable fields of a pin, without its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinFields {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub remark: String,
    #[serde(default)]
    pub color: PinColor,
}

impl PinFields {
    pub fn new(lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            name: name.into(),
            remark: String::new(),
            color: PinColor::default(),
        }
    }

    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = remark.into();
        self
    }

    pub fn with_color(mut self, color: PinColor) -> Self {
        self.color = color;
        self
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }

    fn validate(&self) -> Result<(), MapError> {
        if !self.position().is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "latitude {} / longitude {} out of range",
                self.lat, self.lon
            )));
        }
        Ok(())
    }
}

/// A named, colored point feature at a latitude/longitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    id: PinId,
    pub fields: PinFields,
}

impl Pin {
    pub fn id(&self) -> PinId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn position(&self) -> LatLng {
        self.fields.position()
    }

    pub fn color(&self) -> PinColor {
        self.fields.color
    }
}

/// A pin-list row: every pin other than the focal one carries its distance to
/// the focal pin.
#[derive(Debug, Clone, PartialEq)]
pub struct PinEntry {
    pub id: PinId,
    pub name: String,
    pub distance_km: Option<f64>,
}

impl PinEntry {
    /// Formats the row with the name padded to a fixed display-width column
    /// (wide characters count as two cells) and the distance right-aligned in
    /// a fixed-width field.
    pub fn format(&self) -> String {
        let mut row = self.name.clone();
        let width = display_width(&self.name);
        for _ in width..NAME_COLUMN_WIDTH {
            row.push(' ');
        }
        if let Some(km) = self.distance_km {
            row.push_str(&format!(
                "{:>width$} km",
                format!("{km:.1}"),
                width = DISTANCE_FIELD_WIDTH
            ));
        }
        row
    }
}

/// Display width of a string, counting East Asian wide characters as 2 cells.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    match c as u32 {
        // Hangul Jamo, CJK radicals/ideographs, Hangul syllables, compat
        // ideographs, full-width forms.
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD => 2,
        _ => 1,
    }
}

/// Owns the pins of a document: creation, mutation, removal, and the
/// canonical name-sorted ordering.
#[derive(Debug, Clone, Default)]
pub struct PinStore {
    pins: Vec<Pin>,
    next_id: PinId,
}

impl PinStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter()
    }

    pub fn get(&self, id: PinId) -> Option<&Pin> {
        self.pins.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PinId) -> bool {
        self.get(id).is_some()
    }

    /// Creates a pin from validated fields and returns its id.
    pub fn add(&mut self, fields: PinFields) -> Result<PinId, MapError> {
        fields.validate()?;
        let id = self.next_id;
        self.next_id += 1;
        self.pins.push(Pin { id, fields });
        Ok(id)
    }

    /// Replaces the fields of an existing pin in place.
    pub fn update(&mut self, id: PinId, fields: PinFields) -> Result<(), MapError> {
        fields.validate()?;
        let pin = self
            .pins
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| MapError::Pin(format!("no pin with id {id}")))?;
        pin.fields = fields;
        Ok(())
    }

    pub fn remove(&mut self, id: PinId) -> Result<Pin, MapError> {
        let index = self
            .pins
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| MapError::Pin(format!("no pin with id {id}")))?;
        Ok(self.pins.remove(index))
    }

    pub fn clear(&mut self) {
        self.pins.clear();
    }

    /// Sorts the internal order alphabetically by name. Listing and saving
    /// both go through this, so the persisted iteration order is always the
    /// sorted one.
    pub fn sort_by_name(&mut self) {
        self.pins.sort_by(|a, b| a.fields.name.cmp(&b.fields.name));
    }

    /// Name-sorted list annotated with distances from the focal pin. The
    /// focal pin itself, and every pin when no focal is set, is listed with
    /// name only.
    pub fn list_with_distances(
        &mut self,
        focal: Option<PinId>,
        diameter_km: f64,
    ) -> Vec<PinEntry> {
        self.sort_by_name();
        let focal_pos = focal.and_then(|id| self.get(id)).map(|p| p.position());
        self.pins
            .iter()
            .map(|pin| {
                let distance_km = match (focal, focal_pos) {
                    (Some(fid), Some(pos)) if pin.id != fid => {
                        Some(pos.distance_km(&pin.position(), diameter_km))
                    }
                    _ => None,
                };
                PinEntry {
                    id: pin.id,
                    name: pin.fields.name.clone(),
                    distance_km,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_BODY_DIAMETER_KM;

    fn store_with(names: &[(&str, f64, f64)]) -> PinStore {
        let mut store = PinStore::new();
        for (name, lat, lon) in names {
            store.add(PinFields::new(*lat, *lon, *name)).unwrap();
        }
        store
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let mut store = PinStore::new();
        let a = store.add(PinFields::new(0.0, 0.0, "same")).unwrap();
        let b = store.add(PinFields::new(0.0, 0.0, "same")).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut store = PinStore::new();
        assert!(store.add(PinFields::new(90.001, 0.0, "x")).is_err());
        assert!(store.add(PinFields::new(0.0, -181.0, "x")).is_err());
        assert!(store.is_empty());

        let id = store.add(PinFields::new(0.0, 0.0, "x")).unwrap();
        assert!(store.update(id, PinFields::new(120.0, 0.0, "x")).is_err());
        // pin unchanged after rejected update
        assert_eq!(store.get(id).unwrap().fields.lat, 0.0);
    }

    #[test]
    fn test_update_in_place() {
        let mut store = store_with(&[("a", 1.0, 2.0)]);
        let id = store.iter().next().unwrap().id();
        store
            .update(id, PinFields::new(3.0, 4.0, "b").with_color(PinColor::Red))
            .unwrap();
        let pin = store.get(id).unwrap();
        assert_eq!(pin.name(), "b");
        assert_eq!(pin.color(), PinColor::Red);
    }

    #[test]
    fn test_sort_by_name_mutates_order() {
        let mut store = store_with(&[("citrus", 0.0, 0.0), ("apple", 0.0, 0.0), ("beet", 0.0, 0.0)]);
        store.sort_by_name();
        let names: Vec<_> = store.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, ["apple", "beet", "citrus"]);
    }

    #[test]
    fn test_list_with_distances() {
        let mut store = store_with(&[("b", 0.0, 90.0), ("a", 0.0, 0.0)]);
        let focal = store.iter().find(|p| p.name() == "a").unwrap().id();
        let entries = store.list_with_distances(Some(focal), DEFAULT_BODY_DIAMETER_KM);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a");
        assert!(entries[0].distance_km.is_none());
        let d = entries[1].distance_km.unwrap();
        assert!((d - 10007.5).abs() < 1.0);
    }

    #[test]
    fn test_list_without_focal_has_no_distances() {
        let mut store = store_with(&[("a", 0.0, 0.0), ("b", 10.0, 10.0)]);
        let entries = store.list_with_distances(None, DEFAULT_BODY_DIAMETER_KM);
        assert!(entries.iter().all(|e| e.distance_km.is_none()));
    }

    #[test]
    fn test_entry_format_pads_display_width() {
        let narrow = PinEntry {
            id: 0,
            name: "port".into(),
            distance_km: Some(1234.56),
        };
        let row = narrow.format();
        // 4 cells of name + 12 pad = 16, then 10-wide right-aligned distance
        assert_eq!(row, "port                1234.6 km");

        // Full-width characters occupy two cells each, so fewer pad spaces.
        let wide = PinEntry {
            id: 1,
            name: "\u{6771}\u{4eac}".into(), // two CJK chars = 4 cells
            distance_km: Some(1234.56),
        };
        let wide_row = wide.format();
        assert_eq!(display_width("\u{6771}\u{4eac}"), 4);
        assert_eq!(
            wide_row.chars().filter(|c| *c == ' ').count(),
            row.chars().filter(|c| *c == ' ').count()
        );
    }

    #[test]
    fn test_entry_format_name_only() {
        let entry = PinEntry {
            id: 0,
            name: "solo".into(),
            distance_km: None,
        };
        assert_eq!(entry.format().trim_end(), "solo");
    }

    #[test]
    fn test_color_parse_or_default() {
        assert_eq!(PinColor::parse_or_default("red"), PinColor::Red);
        assert_eq!(PinColor::parse_or_default(""), PinColor::Blue);
        assert_eq!(PinColor::parse_or_default("chartreuse"), PinColor::Blue);
    }

    #[test]
    fn test_color_deserialize_unknown_defaults() {
        // serde and the CSV codec must agree on the fallback
        let fields: PinFields =
            serde_json::from_str(r#"{"lat":1.0,"lon":2.0,"name":"x","remark":"","color":"mauve"}"#)
                .unwrap();
        assert_eq!(fields.color, PinColor::Blue);
        let empty: PinColor = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(empty, PinColor::Blue);
    }
}
