use docview::{DocumentRef, GeoPoint, Timestamp, Value, normalize, normalize_json};
use serde_json::json;

#[test]
fn timestamp_conventions_normalize_identically() {
    let underscored = normalize_json(&json!({"_seconds": 1000, "_nanoseconds": 0}));
    let bare = normalize_json(&json!({"seconds": 1000, "nanoseconds": 0}));
    assert_eq!(underscored, bare);
    assert_eq!(
        bare,
        json!({
            "type": "timestamp",
            "value": "1970-01-01T00:16:40.000Z",
            "seconds": 1000,
            "nanoseconds": 0
        })
    );
}

#[test]
fn sub_millisecond_nanoseconds_are_truncated() {
    let v = normalize_json(&json!({"_seconds": 0, "_nanoseconds": 1_999_999}));
    assert_eq!(v["value"], "1970-01-01T00:00:00.001Z");
}

#[test]
fn geopoint_conventions_normalize_identically() {
    let underscored = normalize_json(&json!({"_latitude": 12.5, "_longitude": -7.1}));
    let bare = normalize_json(&json!({"latitude": 12.5, "longitude": -7.1}));
    assert_eq!(underscored, bare);
    assert_eq!(bare, json!({"type": "geopoint", "latitude": 12.5, "longitude": -7.1}));
}

#[test]
fn native_special_values_are_tagged() {
    let doc = Value::Object(vec![
        ("at".into(), Value::from(Timestamp::new(1_700_000_000, 0))),
        ("where".into(), Value::from(GeoPoint::new(51.5, -0.12))),
        ("owner".into(), Value::from(DocumentRef::from_path("users/ada"))),
    ]);
    assert_eq!(
        normalize(&doc),
        json!({
            "at": {
                "type": "timestamp",
                "value": "2023-11-14T22:13:20.000Z",
                "seconds": 1_700_000_000,
                "nanoseconds": 0
            },
            "where": {"type": "geopoint", "latitude": 51.5, "longitude": -0.12},
            "owner": {"type": "reference", "path": "users/ada", "id": "ada"}
        })
    );
}

#[test]
fn primitives_and_null_pass_through() {
    for v in [json!(null), json!("x"), json!(3), json!(-1.25), json!(true)] {
        assert_eq!(normalize_json(&v), v);
    }
}

#[test]
fn containers_recurse_and_keep_order() {
    let raw = json!({
        "z": [1, {"_seconds": 0, "_nanoseconds": 0}, []],
        "a": {"nested": {"latitude": 1, "longitude": 2}},
        "m": {}
    });
    let v = normalize_json(&raw);
    let keys: Vec<&String> = v.as_object().map(|m| m.keys().collect()).unwrap_or_default();
    assert_eq!(keys, ["z", "a", "m"]);
    assert_eq!(v["z"][1]["type"], "timestamp");
    assert_eq!(v["z"][2], json!([]));
    assert_eq!(v["a"]["nested"], json!({"type": "geopoint", "latitude": 1, "longitude": 2}));
    assert_eq!(v["m"], json!({}));
}

#[test]
fn normalization_is_idempotent() {
    let inputs = [
        json!(null),
        json!([]),
        json!({}),
        json!({"_seconds": 12, "_nanoseconds": 345_000_000, "extra": true}),
        json!({"seconds": 1.5, "nanoseconds": 0}),
        json!({"_latitude": 0, "_longitude": 0}),
        json!({"type": "reference", "path": "a/b", "id": "b"}),
        json!({"type": "timestamp", "note": "not a wrapper"}),
        json!({"deep": [[{"seconds": 1, "nanoseconds": 2}], {"k": [null, false, "s"]}]}),
        json!({"seconds": "12", "nanoseconds": 0}),
    ];
    for x in inputs {
        let once = normalize_json(&x);
        let twice = normalize_json(&once);
        assert_eq!(once, twice, "input: {x}");
    }
}

#[test]
fn non_numeric_components_are_not_wrappers() {
    let raw = json!({"seconds": "soon", "nanoseconds": 0});
    assert_eq!(normalize_json(&raw), raw);
    let raw = json!({"latitude": null, "longitude": 3});
    assert_eq!(normalize_json(&raw), raw);
}

#[test]
fn timestamp_takes_priority_over_geopoint() {
    let v = normalize_json(&json!({
        "seconds": 0, "nanoseconds": 0, "latitude": 1, "longitude": 2
    }));
    assert_eq!(v["type"], "timestamp");
}

#[test]
fn reference_record_requires_exact_shape() {
    let extra = json!({"type": "reference", "path": "a/b", "id": "b", "more": 1});
    assert_eq!(normalize_json(&extra), extra);
    assert!(matches!(Value::from(&extra), Value::Object(_)));
    let exact = json!({"type": "reference", "path": "a/b", "id": "b"});
    assert!(matches!(Value::from(&exact), Value::Reference(_)));
}

#[test]
fn non_finite_numbers_become_null() {
    let v = Value::Array(vec![Value::from(f64::NAN), Value::from(f64::INFINITY)]);
    assert_eq!(normalize(&v), json!([null, null]));
}

#[test]
fn integral_floats_normalize_as_integers() {
    let v = normalize(&Value::from(Timestamp {
        seconds: docview::Number::F64(1.0),
        nanoseconds: docview::Number::F64(0.5),
    }));
    assert_eq!(serde_json::to_string(&v["seconds"]).unwrap(), "1");
    assert_eq!(serde_json::to_string(&v["nanoseconds"]).unwrap(), "0.5");
    assert_eq!(normalize_json(&json!([2.0, -0.0, 1e300])), json!([2, 0, 1e300]));
}

#[test]
fn opaque_values_normalize_to_their_repr() {
    let v = Value::Opaque {
        type_name: "bytes".into(),
        repr: "00ff".into(),
    };
    assert_eq!(normalize(&v), json!("00ff"));
}
