use docview::{DocumentRef, GeoPoint, Number, Options, Timestamp, Value, shape};
use js_sys::{Array, BigInt, Date, Function, Object, Reflect, Symbol};
use wasm_bindgen::{JsCast, JsValue};

/// Walk limit when nothing downstream cuts the tree off.
pub const MAX_WALK_DEPTH: usize = 64;

pub const TOO_DEEP: &str = "[nested too deep]";
pub const CIRCULAR: &str = "[Circular]";

/// Walks a live JS value into a [`Value`], recognising wrapper shapes on the
/// way exactly as the JSON adapter does.
///
/// SDK objects are graphs, not trees: the walk stops at `limit` levels and
/// cuts any edge back to an object on the current path.
pub struct Walker {
    limit: usize,
    ancestors: Vec<Object>,
}

impl Walker {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ancestors: Vec::new(),
        }
    }

    /// Deep enough for the renderer to reach its own ceiling, no deeper.
    pub fn for_render(opts: &Options) -> Self {
        Self::with_limit(opts.max_depth.saturating_add(1).min(MAX_WALK_DEPTH))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn to_value(&mut self, value: &JsValue) -> Result<Value, JsValue> {
        self.walk(value, 0)
    }

    /// Stand-in for a container at `depth`, if the walk stops there.
    fn cutoff(&self, depth: usize) -> Option<Value> {
        (depth >= self.limit).then(|| opaque_object(TOO_DEEP))
    }

    fn walk(&mut self, value: &JsValue, depth: usize) -> Result<Value, JsValue> {
        if value.is_undefined() || value.is_null() {
            return Ok(Value::Null);
        }
        if let Some(b) = value.as_bool() {
            return Ok(Value::Bool(b));
        }
        if let Some(n) = value.as_f64() {
            return Ok(Value::Number(number(n)));
        }
        if let Some(s) = value.as_string() {
            return Ok(Value::String(s));
        }
        if value.is_function() || value.is_symbol() || value.is_bigint() {
            return Ok(opaque(value));
        }
        if let Some(date) = value.dyn_ref::<Date>() {
            return Ok(from_date(date));
        }
        if !value.is_object() {
            return Ok(opaque(value));
        }
        if let Some(cut) = self.cutoff(depth) {
            return Ok(cut);
        }

        let obj: &Object = value.unchecked_ref();
        if self.ancestors.iter().any(|a| Object::is(a, obj)) {
            return Ok(opaque_object(CIRCULAR));
        }
        if let Some(special) = native_special(obj)? {
            return Ok(special);
        }

        self.ancestors.push(obj.clone());
        let out = if Array::is_array(value) {
            self.walk_array(value.unchecked_ref(), depth)
        } else {
            self.walk_object(obj, depth)
        };
        self.ancestors.pop();
        out
    }

    fn walk_array(&mut self, arr: &Array, depth: usize) -> Result<Value, JsValue> {
        let mut items = Vec::with_capacity(arr.length() as usize);
        for item in arr.iter() {
            items.push(self.walk(&item, depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn walk_object(&mut self, obj: &Object, depth: usize) -> Result<Value, JsValue> {
        let keys = Object::keys(obj);
        let mut fields = Vec::with_capacity(keys.length() as usize);
        for key in keys.iter() {
            let name = key
                .as_string()
                .ok_or_else(|| JsValue::from_str("Object keys must be strings"))?;
            let field = Reflect::get(obj, &key)?;
            fields.push((name, self.walk(&field, depth + 1)?));
        }
        Ok(shape::from_fields(fields))
    }
}

/// Walks a value with the default limit.
pub fn to_value(value: &JsValue) -> Result<Value, JsValue> {
    Walker::with_limit(MAX_WALK_DEPTH).to_value(value)
}

fn get_string(obj: &Object, key: &str) -> Result<Option<String>, JsValue> {
    Ok(Reflect::get(obj, &JsValue::from_str(key))?.as_string())
}

fn get_number(obj: &Object, key: &str) -> Result<Option<f64>, JsValue> {
    Ok(Reflect::get(obj, &JsValue::from_str(key))?.as_f64())
}

fn constructor_name(obj: &Object) -> Result<Option<String>, JsValue> {
    let ctor = Reflect::get(obj, &JsValue::from_str("constructor"))?;
    Ok(ctor.dyn_ref::<Function>().map(|f| String::from(f.name())))
}

// SDK classes keep reference and geopoint fields behind prototype getters,
// which own-key enumeration never sees.
fn native_special(obj: &Object) -> Result<Option<Value>, JsValue> {
    let ctor = constructor_name(obj)?;
    if ctor.as_deref() == Some("GeoPoint") {
        if let (Some(lat), Some(lon)) = (get_number(obj, "latitude")?, get_number(obj, "longitude")?) {
            return Ok(Some(Value::GeoPoint(GeoPoint {
                latitude: number(lat),
                longitude: number(lon),
            })));
        }
    }
    let reference = reference_from_parts(
        ctor.as_deref(),
        get_string(obj, "type")?.as_deref(),
        get_string(obj, "path")?,
        get_string(obj, "id")?,
    );
    Ok(reference.map(Value::Reference))
}

/// A native document reference: string `path` and `id`, plus either the
/// SDK class name or the client SDK's `type: "document"` tag.
pub fn reference_from_parts(
    constructor: Option<&str>,
    type_tag: Option<&str>,
    path: Option<String>,
    id: Option<String>,
) -> Option<DocumentRef> {
    let native = constructor == Some("DocumentReference") || type_tag == Some("document");
    match (native, path, id) {
        (true, Some(path), Some(id)) => Some(DocumentRef { path, id }),
        _ => None,
    }
}

// Integral values inside the safe range keep an integer spelling in
// normalized output.
fn number(n: f64) -> Number {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE {
        Number::I64(n as i64)
    } else {
        Number::F64(n)
    }
}

fn from_date(date: &Date) -> Value {
    let ms = date.get_time();
    if !ms.is_finite() {
        return Value::Opaque {
            type_name: "Date".to_string(),
            repr: docview::special::INVALID_DATE.to_string(),
        };
    }
    let seconds = (ms / 1000.0).floor();
    let nanos = (ms - seconds * 1000.0) * 1_000_000.0;
    Value::Timestamp(Timestamp::new(seconds as i64, nanos as i64))
}

fn opaque_object(repr: &str) -> Value {
    Value::Opaque {
        type_name: "object".to_string(),
        repr: repr.to_string(),
    }
}

fn opaque(value: &JsValue) -> Value {
    let type_name = value.js_typeof().as_string().unwrap_or_else(|| "unknown".to_string());
    let repr = if let Some(f) = value.dyn_ref::<Function>() {
        format!("[Function: {}]", String::from(f.name()))
    } else if value.is_symbol() {
        String::from(value.unchecked_ref::<Symbol>().to_string())
    } else if value.is_bigint() {
        value
            .unchecked_ref::<BigInt>()
            .to_string(10)
            .map(String::from)
            .unwrap_or_default()
    } else {
        format!("{:?}", value)
    };
    Value::Opaque { type_name, repr }
}
