use crate::number::format_js_f64;
use crate::special::{DocumentRef, GeoPoint, Timestamp};

/// 2^53 - 1; integers beyond it lose precision as doubles.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::I64(i) => *i as f64,
            Number::U64(u) => *u as f64,
            Number::F64(f) => *f,
        }
    }

    /// JSON form. Non-finite floats have no JSON spelling and become `null`;
    /// integral floats in the safe range are written as integers.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Number::I64(i) => serde_json::Value::from(*i),
            Number::U64(u) => serde_json::Value::from(*u),
            Number::F64(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                serde_json::Value::from(*f as i64)
            }
            Number::F64(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }

    fn is_safe_integer(&self) -> bool {
        match self {
            Number::I64(i) => i.unsigned_abs() <= MAX_SAFE_INTEGER as u64,
            Number::U64(u) => *u <= MAX_SAFE_INTEGER as u64,
            Number::F64(_) => false,
        }
    }
}

impl serde::Serialize for Number {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::I64(i) => serializer.serialize_i64(*i),
            Number::U64(u) => serializer.serialize_u64(*u),
            Number::F64(f) => serializer.serialize_f64(*f),
        }
    }
}

impl core::fmt::Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Number::I64(i) if self.is_safe_integer() => write!(f, "{}", i),
            Number::U64(u) if self.is_safe_integer() => write!(f, "{}", u),
            // Displayed as the double a browser would hold.
            _ => f.write_str(&format_js_f64(self.as_f64())),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// A document value after input adaptation.
///
/// Special wrapper shapes are recognised once, when the value is built (see
/// [`crate::shape`]), so every consumer can match on them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
    Timestamp(Timestamp),
    GeoPoint(GeoPoint),
    Reference(DocumentRef),
    /// A foreign value the adapter could not map onto any other variant.
    Opaque { type_name: String, repr: String },
}

impl Value {
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Field lookup on an object. First match wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Type tag used when a value is shown without a dedicated rendering.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Timestamp(_) => "timestamp",
            Value::GeoPoint(_) => "geopoint",
            Value::Reference(_) => "reference",
            Value::Opaque { type_name, .. } => type_name,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::I64(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::F64(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

impl From<GeoPoint> for Value {
    fn from(g: GeoPoint) -> Self {
        Value::GeoPoint(g)
    }
}

impl From<DocumentRef> for Value {
    fn from(r: DocumentRef) -> Self {
        Value::Reference(r)
    }
}
