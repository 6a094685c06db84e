#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::{arbitrary, fuzz_target};
use serde_json::{Number, Value, json};

const MAX_DEPTH: usize = 8;
const MAX_ARRAY_SIZE: usize = 20;
const MAX_OBJECT_SIZE: usize = 20;

// Biased toward the wrapper shapes so near-misses get explored.
const KEYS: [&str; 11] = [
    "_seconds",
    "_nanoseconds",
    "seconds",
    "nanoseconds",
    "_latitude",
    "_longitude",
    "latitude",
    "longitude",
    "type",
    "path",
    "id",
];

#[derive(Arbitrary, Debug)]
struct FuzzValue {
    choice: u8,
}

impl FuzzValue {
    fn to_json_value(&self, u: &mut arbitrary::Unstructured, depth: usize) -> arbitrary::Result<Value> {
        if depth >= MAX_DEPTH {
            return Ok(Value::Null);
        }

        Ok(match self.choice % 12 {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: i64 = u.arbitrary()?;
                Value::Number(Number::from(n))
            }
            3 => {
                let n: f64 = u.arbitrary()?;
                Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
            }
            4 => {
                let s: String = u.arbitrary()?;
                Value::String(s)
            }
            5 => json!({"_seconds": u.arbitrary::<i64>()?, "_nanoseconds": u.arbitrary::<u32>()?}),
            6 => json!({"latitude": u.arbitrary::<i32>()?, "longitude": u.arbitrary::<i16>()?}),
            7 => json!({"type": "reference", "path": u.arbitrary::<String>()?, "id": u.arbitrary::<String>()?}),
            8 | 9 => {
                let size = u.int_in_range(0..=MAX_ARRAY_SIZE)?;
                let mut arr = Vec::with_capacity(size);
                for _ in 0..size {
                    let fv: FuzzValue = u.arbitrary()?;
                    arr.push(fv.to_json_value(u, depth + 1)?);
                }
                Value::Array(arr)
            }
            _ => {
                let size = u.int_in_range(0..=MAX_OBJECT_SIZE)?;
                let mut obj = serde_json::Map::new();
                for _ in 0..size {
                    let key = if u.arbitrary()? {
                        u.choose(&KEYS)?.to_string()
                    } else {
                        u.arbitrary::<String>()?
                    };
                    let fv: FuzzValue = u.arbitrary()?;
                    obj.insert(key, fv.to_json_value(u, depth + 1)?);
                }
                Value::Object(obj)
            }
        })
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);

    if let Ok(fv) = u.arbitrary::<FuzzValue>() {
        if let Ok(value) = fv.to_json_value(&mut u, 0) {
            let once = docview::normalize_json(&value);
            let twice = docview::normalize_json(&once);
            if once != twice {
                panic!(
                    "Structured normalization mismatch!\nOriginal: {}\nOnce: {}\nTwice: {}",
                    serde_json::to_string_pretty(&value).unwrap(),
                    serde_json::to_string_pretty(&once).unwrap(),
                    serde_json::to_string_pretty(&twice).unwrap()
                );
            }
            let doc = docview::Value::from(&value);
            let _ = docview::render_document(&doc, &docview::Options::default());
        }
    }
});
