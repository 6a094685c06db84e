use serde_json::{Map, Value as Json};

use crate::special::{DocumentRef, GeoPoint, Timestamp};
use crate::value::Value;

// Normalization to a JSON-safe tree.
// - Special values become tagged records with a `type` discriminator.
// - serde_json cannot represent NaN/±Infinity; those become null.
// - Opaque values are carried as their string form.
pub fn normalize(v: &Value) -> Json {
    match v {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => n.to_json(),
        Value::String(s) => Json::String(s.clone()),
        Value::Array(items) => Json::Array(items.iter().map(normalize).collect()),
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len());
            for (k, vv) in fields {
                out.insert(k.clone(), normalize(vv));
            }
            Json::Object(out)
        }
        Value::Timestamp(ts) => timestamp_record(ts),
        Value::GeoPoint(geo) => geopoint_record(geo),
        Value::Reference(r) => reference_record(r),
        Value::Opaque { repr, .. } => Json::String(repr.clone()),
    }
}

/// Adapts a raw JSON payload and normalizes it.
/// Applying this to its own output returns the output unchanged.
pub fn normalize_json(v: &Json) -> Json {
    normalize(&Value::from(v))
}

fn timestamp_record(ts: &Timestamp) -> Json {
    let mut out = Map::with_capacity(4);
    out.insert("type".into(), Json::from("timestamp"));
    out.insert("value".into(), Json::String(ts.to_iso_string()));
    out.insert("seconds".into(), ts.seconds.to_json());
    out.insert("nanoseconds".into(), ts.nanoseconds.to_json());
    Json::Object(out)
}

fn geopoint_record(geo: &GeoPoint) -> Json {
    let mut out = Map::with_capacity(3);
    out.insert("type".into(), Json::from("geopoint"));
    out.insert("latitude".into(), geo.latitude.to_json());
    out.insert("longitude".into(), geo.longitude.to_json());
    Json::Object(out)
}

fn reference_record(r: &DocumentRef) -> Json {
    let mut out = Map::with_capacity(3);
    out.insert("type".into(), Json::from("reference"));
    out.insert("path".into(), Json::String(r.path.clone()));
    out.insert("id".into(), Json::String(r.id.clone()));
    Json::Object(out)
}
