//! The `pins.csv` codec: header `lat,lon,name,remark,color`, one row per
//! pin, RFC-style quoting for fields containing separators. Decoding is
//! partial-success: malformed rows are skipped (and logged), well-formed
//! rows still load.

use crate::core::pins::{Pin, PinColor, PinFields};

pub const PINS_CSV_HEADER: &str = "lat,lon,name,remark,color";

/// Serializes pins in their current store order.
pub fn encode_pins<'a>(pins: impl Iterator<Item = &'a Pin>) -> String {
    let mut out = String::from(PINS_CSV_HEADER);
    out.push('\n');
    for pin in pins {
        let f = &pin.fields;
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            f.lat,
            f.lon,
            quote_field(&f.name),
            quote_field(&f.remark),
            f.color.as_str()
        ));
    }
    out
}

/// Parses pin rows. The first line is the header and is skipped; rows with
/// missing columns or non-numeric coordinates are dropped. A missing color
/// column falls back to the default color (older files lack it).
pub fn decode_pins(data: &str) -> Vec<PinFields> {
    let mut pins = Vec::new();
    for (index, line) in data.lines().enumerate() {
        if index == 0 || line.trim().is_empty() {
            continue;
        }
        match decode_row(line) {
            Some(fields) => pins.push(fields),
            None => log::warn!("skipping malformed pins.csv row {}: {line:?}", index + 1),
        }
    }
    pins
}

fn decode_row(line: &str) -> Option<PinFields> {
    let fields = split_csv_line(line);
    if fields.len() < 4 {
        return None;
    }
    let lat: f64 = fields[0].trim().parse().ok()?;
    let lon: f64 = fields[1].trim().parse().ok()?;
    let parsed = PinFields {
        lat,
        lon,
        name: fields[2].clone(),
        remark: fields[3].clone(),
        color: fields
            .get(4)
            .map(|c| PinColor::parse_or_default(c))
            .unwrap_or_default(),
    };
    if !parsed.position().is_valid() {
        return None;
    }
    Some(parsed)
}

fn quote_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pins::PinStore;

    #[test]
    fn test_round_trip_preserves_fields() {
        let mut store = PinStore::new();
        store
            .add(
                PinFields::new(35.6762, 139.6503, "Tokyo")
                    .with_remark("capital, pop. 14M")
                    .with_color(PinColor::Red),
            )
            .unwrap();
        store
            .add(PinFields::new(-33.8688, 151.2093, "Sydney").with_remark("\"harbour\" city"))
            .unwrap();

        let encoded = encode_pins(store.iter());
        let decoded = decode_pins(&encoded);

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].name, "Tokyo");
        assert_eq!(decoded[0].remark, "capital, pop. 14M");
        assert_eq!(decoded[0].color, PinColor::Red);
        assert_eq!(decoded[1].remark, "\"harbour\" city");
        assert_eq!(decoded[1].lat, -33.8688);
    }

    #[test]
    fn test_malformed_row_skipped() {
        let data = "lat,lon,name,remark,color\n\
                    10.0,20.0,good,ok,blue\n\
                    abc,20.0,bad,not numeric,red\n";
        let decoded = decode_pins(data);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].name, "good");
    }

    #[test]
    fn test_out_of_range_row_skipped() {
        let data = "lat,lon,name,remark,color\n95.0,0.0,north of north,,blue\n";
        assert!(decode_pins(data).is_empty());
    }

    #[test]
    fn test_missing_color_column_defaults() {
        let data = "lat,lon,name,remark\n10.0,20.0,old file,legacy row\n";
        let decoded = decode_pins(data);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].color, PinColor::Blue);
    }

    #[test]
    fn test_unknown_color_defaults() {
        let data = "lat,lon,name,remark,color\n10.0,20.0,x,,chartreuse\n";
        assert_eq!(decode_pins(data)[0].color, PinColor::Blue);
    }

    #[test]
    fn test_short_row_skipped() {
        let data = "lat,lon,name,remark,color\n10.0,20.0,only-three\n";
        assert!(decode_pins(data).is_empty());
    }
}
