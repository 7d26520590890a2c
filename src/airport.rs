//! Airport domain record, creation draft, and read view.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{Feet, Icao};

/// A creation payload is missing one of `name`, `country`, or `icao`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Name, country, and ICAO code are required")]
pub struct ValidationError {
    /// Required fields that were absent, null, or empty.
    pub missing: Vec<&'static str>,
}

/// Authoritative airport record as stored and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    /// ICAO code and store key.
    pub icao: Icao,
    /// IATA code, empty when the airport has none.
    #[serde(default)]
    pub iata: String,
    /// Display name.
    pub name: String,
    /// City, possibly empty.
    #[serde(default)]
    pub city: String,
    /// State or province, possibly empty.
    #[serde(default)]
    pub state: String,
    /// Country code or name.
    pub country: String,
    /// Elevation in feet, 0 when the stored value did not parse.
    #[serde(default)]
    pub elevation: Feet,
    /// Stored elevation that did not parse as an integer, kept verbatim.
    ///
    /// Never serialized with the record; the file sink writes it back in
    /// place of `elevation`.
    #[serde(skip)]
    pub elevation_raw: Option<Value>,
    /// Latitude in degrees.
    #[serde(default)]
    pub lat: f64,
    /// Longitude in degrees.
    #[serde(default)]
    pub lon: f64,
    /// IANA-style timezone name, not validated.
    #[serde(default)]
    pub tz: String,
}

impl AirportRecord {
    /// Elevation usable by aggregates, `None` when the stored value did not parse.
    pub fn known_elevation(&self) -> Option<Feet> {
        match self.elevation_raw {
            Some(_) => None,
            None => Some(self.elevation),
        }
    }
}

/// Loosely typed creation payload.
///
/// Every field accepts arbitrary JSON so that numeric strings and other
/// client quirks normalize instead of being rejected.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AirportDraft {
    /// ICAO code (required).
    pub icao: Option<Value>,
    /// IATA code.
    pub iata: Option<Value>,
    /// Display name (required).
    pub name: Option<Value>,
    /// City.
    pub city: Option<Value>,
    /// State or province.
    pub state: Option<Value>,
    /// Country (required).
    pub country: Option<Value>,
    /// Elevation, number or numeric string.
    pub elevation: Option<Value>,
    /// Latitude, number or numeric string.
    pub lat: Option<Value>,
    /// Longitude, number or numeric string.
    pub lon: Option<Value>,
    /// Timezone name.
    pub tz: Option<Value>,
}

impl AirportDraft {
    /// Validates required fields and normalizes everything else.
    ///
    /// Malformed numbers become 0 rather than failing.
    pub fn into_record(self) -> Result<AirportRecord, ValidationError> {
        let icao = text(self.icao.as_ref());
        let name = text(self.name.as_ref());
        let country = text(self.country.as_ref());

        let missing: Vec<&'static str> = [("name", &name), ("country", &country), ("icao", &icao)]
            .into_iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(field, _)| field)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        let (elevation, elevation_raw) = match elevation_of(self.elevation.as_ref()) {
            Some(feet) => (feet, None),
            None => (0, self.elevation),
        };

        Ok(AirportRecord {
            icao,
            iata: text(self.iata.as_ref()),
            name,
            city: text(self.city.as_ref()),
            state: text(self.state.as_ref()),
            country,
            elevation,
            elevation_raw,
            lat: coordinate_of(self.lat.as_ref()),
            lon: coordinate_of(self.lon.as_ref()),
            tz: text(self.tz.as_ref()),
        })
    }
}

/// Record as returned to readers, with synthesized `id` and `region`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportView {
    /// Underlying stored attributes.
    #[serde(flatten)]
    pub record: AirportRecord,
    /// Store key, always equal to `record.icao`.
    pub id: Icao,
    /// `"{country}-{state}"` when both are non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl AirportView {
    /// Recomputes `region` from the current attributes.
    pub fn with_region(mut self) -> Self {
        self.region = region_of(&self.record);
        self
    }

    /// Looks up an attribute by its wire name.
    ///
    /// Unknown names resolve to [`FieldValue::Missing`] instead of failing.
    pub fn field(&self, name: &str) -> FieldValue<'_> {
        let rec = &self.record;
        match name {
            "icao" => FieldValue::Text(&rec.icao),
            "id" => FieldValue::Text(&self.id),
            "iata" => FieldValue::Text(&rec.iata),
            "name" => FieldValue::Text(&rec.name),
            "city" => FieldValue::Text(&rec.city),
            "state" => FieldValue::Text(&rec.state),
            "country" => FieldValue::Text(&rec.country),
            "tz" => FieldValue::Text(&rec.tz),
            "elevation" => FieldValue::Number(rec.elevation as f64),
            "lat" => FieldValue::Number(rec.lat),
            "lon" => FieldValue::Number(rec.lon),
            "region" => match &self.region {
                Some(region) => FieldValue::Text(region),
                None => FieldValue::Missing,
            },
            _ => FieldValue::Missing,
        }
    }
}

/// Attribute value used by sorting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Numeric attribute.
    Number(f64),
    /// Textual attribute.
    Text(&'a str),
    /// Attribute not present on the record.
    Missing,
}

impl FieldValue<'_> {
    /// String form used when the two sides are not both numeric.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s),
            Self::Missing => Cow::Borrowed(""),
        }
    }
}

/// Derives the display region, if both parts are present.
pub fn region_of(rec: &AirportRecord) -> Option<String> {
    if rec.country.is_empty() || rec.state.is_empty() {
        return None;
    }
    Some(format!("{}-{}", rec.country, rec.state))
}

/// Wraps a record in a read view with `region` derived.
pub fn with_region(rec: AirportRecord) -> AirportView {
    let region = region_of(&rec);
    AirportView {
        id: rec.icao.clone(),
        record: rec,
        region,
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

/// Absent, null, and empty values count as 0; anything else without a
/// leading integer is `None`.
fn elevation_of(value: Option<&Value>) -> Option<Feet> {
    match value {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as Feet)),
        Some(Value::String(s)) if s.is_empty() => Some(0),
        Some(Value::String(s)) => parse_int_prefix(s),
        Some(_) => None,
    }
}

fn coordinate_of(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_float_prefix(s),
        _ => 0.0,
    };
    if parsed.is_finite() { parsed } else { 0.0 }
}

/// Parses leading decimal digits after optional whitespace and sign.
///
/// `"12ft"` yields 12, `"3.9"` yields 3, anything without digits yields `None`.
pub fn parse_int_prefix(raw: &str) -> Option<Feet> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<Feet>().ok()?;
    Some(if negative { -value } else { value })
}

/// Parses the longest numeric prefix as a float, 0 when there is none.
pub fn parse_float_prefix(raw: &str) -> f64 {
    let s = raw.trim_start();
    let candidate = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(s.len());
    (1..=candidate)
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
