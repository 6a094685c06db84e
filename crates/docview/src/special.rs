//! The three special value types a document database stores natively.

use chrono::{DateTime, Datelike, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::value::{Number, Value};

/// Largest instant (in ms from the epoch, either direction) a date can hold.
const MAX_TIME_MS: f64 = 8.64e15;

/// Printed in place of an ISO string when the instant is not representable.
pub const INVALID_DATE: &str = "Invalid Date";

/// A point in time as whole seconds plus sub-second nanoseconds.
///
/// Components are kept as they arrived so a normalized record reports the
/// same numbers the database sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    pub seconds: Number,
    pub nanoseconds: Number,
}

impl Timestamp {
    pub fn new(seconds: i64, nanoseconds: i64) -> Self {
        Self {
            seconds: Number::I64(seconds),
            nanoseconds: Number::I64(nanoseconds),
        }
    }

    /// Milliseconds since the epoch, truncated toward zero.
    /// `None` if the instant falls outside the representable range.
    pub fn to_millis(&self) -> Option<i64> {
        let ms = self.seconds.as_f64() * 1000.0 + self.nanoseconds.as_f64() / 1_000_000.0;
        if !ms.is_finite() {
            return None;
        }
        let ms = ms.trunc();
        if ms.abs() > MAX_TIME_MS {
            return None;
        }
        Some(ms as i64)
    }

    /// UTC ISO-8601 with millisecond precision, e.g. `1970-01-01T00:16:40.000Z`.
    pub fn to_iso_string(&self) -> String {
        self.to_millis()
            .map(iso_from_millis)
            .unwrap_or_else(|| INVALID_DATE.to_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::new(dt.timestamp(), i64::from(dt.timestamp_subsec_nanos()))
    }
}

// Serialized in the admin wire shape, which input adaptation reads back.
impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Timestamp", 2)?;
        st.serialize_field("_seconds", &self.seconds)?;
        st.serialize_field("_nanoseconds", &self.nanoseconds)?;
        st.end()
    }
}

const MS_PER_DAY: i64 = 86_400_000;

fn iso_from_millis(ms: i64) -> String {
    let (year, month, day) = match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) => (i64::from(dt.year()), dt.month(), dt.day()),
        // Beyond chrono's calendar but still inside a JS Date's range.
        None => civil_from_days(ms.div_euclid(MS_PER_DAY)),
    };
    let year = if (0..=9999).contains(&year) {
        format!("{:04}", year)
    } else if year < 0 {
        format!("-{:06}", -year)
    } else {
        format!("+{:06}", year)
    };
    let t = ms.rem_euclid(MS_PER_DAY);
    format!(
        "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year,
        month,
        day,
        t / 3_600_000,
        t / 60_000 % 60,
        t / 1000 % 60,
        t % 1000
    )
}

/// Proleptic Gregorian (year, month, day) for a day count from 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month as u32, day as u32)
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub latitude: Number,
    pub longitude: Number,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Number::F64(latitude),
            longitude: Number::F64(longitude),
        }
    }
}

impl core::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

impl Serialize for GeoPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("GeoPoint", 2)?;
        st.serialize_field("_latitude", &self.latitude)?;
        st.serialize_field("_longitude", &self.longitude)?;
        st.end()
    }
}

/// A pointer to another document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub path: String,
    pub id: String,
}

impl DocumentRef {
    /// Builds a reference from a slash-separated document path; the id is the
    /// last segment.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let id = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { path, id }
    }

    /// The tagged record a reference is displayed and transported as.
    pub fn to_fields(&self) -> Vec<(String, Value)> {
        vec![
            ("type".to_string(), Value::from("reference")),
            ("path".to_string(), Value::from(self.path.as_str())),
            ("id".to_string(), Value::from(self.id.as_str())),
        ]
    }
}

impl Serialize for DocumentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("DocumentRef", 3)?;
        st.serialize_field("type", "reference")?;
        st.serialize_field("path", &self.path)?;
        st.serialize_field("id", &self.id)?;
        st.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_uses_millisecond_precision() {
        let ts = Timestamp::new(1_700_000_000, 123_456_789);
        assert_eq!(ts.to_iso_string(), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn negative_instants_truncate_toward_zero() {
        let ts = Timestamp::new(-1, 500_000_000);
        assert_eq!(ts.to_millis(), Some(-500));
        assert_eq!(ts.to_iso_string(), "1969-12-31T23:59:59.500Z");
    }

    #[test]
    fn extended_years_are_signed() {
        let ts = Timestamp::new(253_402_300_800, 0);
        assert_eq!(ts.to_iso_string(), "+010000-01-01T00:00:00.000Z");
    }

    #[test]
    fn extremes_of_the_date_range_format() {
        let max = Timestamp::new(8_640_000_000_000, 0);
        assert_eq!(max.to_iso_string(), "+275760-09-13T00:00:00.000Z");
        let min = Timestamp::new(-8_640_000_000_000, 0);
        assert_eq!(min.to_iso_string(), "-271821-04-20T00:00:00.000Z");
        let past_chrono = Timestamp::new(8_300_000_000_000, 0);
        assert_eq!(past_chrono.to_iso_string(), "+264986-07-12T19:33:20.000Z");
        let past_max = Timestamp::new(8_640_000_000_001, 0);
        assert_eq!(past_max.to_iso_string(), INVALID_DATE);
    }

    #[test]
    fn calendar_fallback_matches_chrono() {
        for days in [-719_468, -1, 0, 59, 11_016, 2_932_896] {
            let dt = DateTime::<Utc>::from_timestamp_millis(days * MS_PER_DAY).unwrap();
            assert_eq!(
                civil_from_days(days),
                (i64::from(dt.year()), dt.month(), dt.day()),
                "{days}"
            );
        }
    }

    #[test]
    fn out_of_range_is_invalid() {
        let ts = Timestamp::new(i64::MAX / 1000, 0);
        assert_eq!(ts.to_iso_string(), INVALID_DATE);
        let nan = Timestamp {
            seconds: Number::F64(f64::NAN),
            nanoseconds: Number::I64(0),
        };
        assert_eq!(nan.to_iso_string(), INVALID_DATE);
    }

    #[test]
    fn reference_id_is_last_segment() {
        let r = DocumentRef::from_path("users/alice/orders/o-1");
        assert_eq!(r.id, "o-1");
    }
}
