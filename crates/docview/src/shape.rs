//! Input adaptation: turning raw database payloads into [`Value`]s.
//!
//! Wrapper shapes are detected here, once, by field name:
//!
//! | shape     | fields                                                        |
//! |-----------|---------------------------------------------------------------|
//! | timestamp | `_seconds` + `_nanoseconds`, or `seconds` + `nanoseconds`     |
//! | geopoint  | `_latitude` + `_longitude`, or `latitude` + `longitude`       |
//! | reference | exactly `type: "reference"`, `path`, `id`                     |
//!
//! Both components of a timestamp or geopoint must be numbers. Any other keys
//! on a matching mapping are dropped. A plain user mapping that happens to use
//! these field names is therefore read as a special value; that ambiguity is
//! inherent to the wire format and is accepted.

use crate::special::{DocumentRef, GeoPoint, Timestamp};
use crate::value::{Number, Value};

const TIMESTAMP_FIELDS: [(&str, &str); 2] = [("_seconds", "_nanoseconds"), ("seconds", "nanoseconds")];
const GEOPOINT_FIELDS: [(&str, &str); 2] = [("_latitude", "_longitude"), ("latitude", "longitude")];

/// Builds the value for a mapping, recognising wrapper shapes.
/// Detection order: timestamp, geopoint, reference, plain object.
pub fn from_fields(fields: Vec<(String, Value)>) -> Value {
    if let Some((seconds, nanoseconds)) = numeric_pair(&fields, &TIMESTAMP_FIELDS) {
        return Value::Timestamp(Timestamp { seconds, nanoseconds });
    }
    if let Some((latitude, longitude)) = numeric_pair(&fields, &GEOPOINT_FIELDS) {
        return Value::GeoPoint(GeoPoint { latitude, longitude });
    }
    if let Some(reference) = reference(&fields) {
        return Value::Reference(reference);
    }
    Value::Object(fields)
}

fn lookup<'a>(fields: &'a [(String, Value)], key: &str) -> Option<&'a Value> {
    fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn numeric_pair(fields: &[(String, Value)], conventions: &[(&str, &str)]) -> Option<(Number, Number)> {
    conventions.iter().find_map(|(a, b)| {
        let a = lookup(fields, a)?.as_number()?;
        let b = lookup(fields, b)?.as_number()?;
        Some((a.clone(), b.clone()))
    })
}

fn reference(fields: &[(String, Value)]) -> Option<DocumentRef> {
    if fields.len() != 3 || lookup(fields, "type")?.as_str()? != "reference" {
        return None;
    }
    let path = lookup(fields, "path")?.as_str()?;
    let id = lookup(fields, "id")?.as_str()?;
    Some(DocumentRef {
        path: path.to_string(),
        id: id.to_string(),
    })
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(Number::from(n)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => from_fields(
                map.iter()
                    .map(|(k, vv)| (k.clone(), Value::from(vv)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => {
                from_fields(map.into_iter().map(|(k, vv)| (k, Value::from(vv))).collect())
            }
            other => Value::from(&other),
        }
    }
}
