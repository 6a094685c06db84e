use docview::{DocumentRef, Kind, Options, Value, normalize_json, render, render_document, render_json, render_with};
use serde_json::json;

#[test]
fn classifies_scalars() {
    let d = render_json(&json!(null), "f", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::Null, "null"));

    let d = render_json(&json!("hello"), "f", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::String, "hello"));

    let d = render_json(&json!(42), "f", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::Number, "42"));

    let d = render_json(&json!(true), "flag", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::Boolean, "TRUE"));

    let d = render_json(&json!(false), "flag", 0);
    assert_eq!(d.display, "FALSE");
    assert!(d.children.is_empty());
}

#[test]
fn empty_containers() {
    let d = render_json(&json!([]), "f", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::EmptyArray, "[] (empty array)"));
    let d = render_json(&json!({}), "f", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::EmptyObject, "{} (empty object)"));
}

#[test]
fn arrays_render_indexed_children() {
    let d = render_json(&json!([1, 2, 3]), "f", 0);
    assert_eq!(d.kind, Kind::Array);
    assert_eq!(d.display, "[3 items]");
    assert_eq!(d.child_names(), ["[0]", "[1]", "[2]"]);
    assert!(d.children.iter().all(|c| c.kind == Kind::Number && c.depth == 1));
    assert_eq!(d.children[2].display, "3");
}

#[test]
fn objects_keep_key_order() {
    let d = render_json(&json!({"a": 1, "b": 2}), "f", 0);
    assert_eq!(d.kind, Kind::Object);
    assert_eq!(d.display, "{2 keys}");
    assert_eq!(d.child_names(), ["a", "b"]);

    let d = render_json(&json!({"zeta": 1, "alpha": 2, "mid": 3}), "f", 0);
    assert_eq!(d.child_names(), ["zeta", "alpha", "mid"]);
}

#[test]
fn geopoints_in_both_conventions() {
    let d = render_json(&json!({"latitude": 12.5, "longitude": -7.1}), "geo", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::Geopoint, "(12.5, -7.1)"));
    let d = render_json(&json!({"_latitude": 40, "_longitude": 0.5}), "geo", 0);
    assert_eq!(d.display, "(40, 0.5)");
}

#[test]
fn timestamps_in_both_conventions() {
    let d = render_json(&json!({"_seconds": 1_700_000_000, "_nanoseconds": 5_000_000}), "t", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::Timestamp, "2023-11-14T22:13:20.005Z"));
    let d = render_json(&json!({"seconds": 1_700_000_000, "nanoseconds": 5_000_000}), "t", 0);
    assert_eq!(d.display, "2023-11-14T22:13:20.005Z");
}

#[test]
fn raw_and_normalized_render_the_same() {
    let raw = json!({
        "created": {"_seconds": 86_400, "_nanoseconds": 0},
        "loc": {"_latitude": 1.5, "_longitude": 2.5},
        "tags": ["a", "b"]
    });
    let normalized = normalize_json(&raw);
    let a = render_json(&raw, "doc", 0);
    let b = render_json(&normalized, "doc", 0);
    assert_eq!(a, b);
    assert_eq!(a.children[0].display, "1970-01-02T00:00:00.000Z");
}

#[test]
fn references_render_as_their_record() {
    let d = render(&Value::from(DocumentRef::from_path("users/ada")), "owner", 0);
    assert_eq!(d.kind, Kind::Object);
    assert_eq!(d.display, "{3 keys}");
    assert_eq!(d.child_names(), ["type", "path", "id"]);
    assert_eq!(d.children[1].display, "users/ada");
}

#[test]
fn opaque_values_are_unknown() {
    let v = Value::Opaque {
        type_name: "bytes".into(),
        repr: "cafe".into(),
    };
    let d = render(&v, "blob", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::Unknown, "cafe (bytes)"));
}

#[test]
fn non_finite_numbers_display_like_javascript() {
    assert_eq!(render(&Value::from(f64::NAN), "n", 0).display, "NaN");
    assert_eq!(render(&Value::from(f64::NEG_INFINITY), "n", 0).display, "-Infinity");
    assert_eq!(render(&Value::from(1e21), "n", 0).display, "1e+21");
}

#[test]
fn large_integers_display_as_doubles() {
    let d = render_json(&json!(9_007_199_254_740_993u64), "n", 0);
    assert_eq!(d.display, "9007199254740992");
    let d = render_json(&json!(u64::MAX), "n", 0);
    assert_eq!(d.display, "18446744073709552000");
    let d = render_json(&json!(-9_007_199_254_740_991i64), "n", 0);
    assert_eq!(d.display, "-9007199254740991");
}

#[test]
fn timestamps_at_the_edge_of_the_date_range() {
    let d = render_json(&json!({"_seconds": 8_640_000_000_000i64, "_nanoseconds": 0}), "t", 0);
    assert_eq!((d.kind, d.display.as_str()), (Kind::Timestamp, "+275760-09-13T00:00:00.000Z"));
    let d = render_json(&json!({"_seconds": 8_640_000_000_001i64, "_nanoseconds": 0}), "t", 0);
    assert_eq!(d.display, "Invalid Date");
}

fn nested(levels: usize) -> serde_json::Value {
    let mut v = json!("leaf");
    for _ in 0..levels {
        v = json!({"k": v});
    }
    v
}

#[test]
fn depth_ceiling_cuts_deep_trees() {
    let d = render_json(&nested(20), "root", 0);
    let mut node = &d;
    for depth in 0..=10 {
        assert_eq!(node.depth, depth);
        assert_eq!(node.kind, Kind::Object);
        node = &node.children[0];
    }
    assert_eq!(node.depth, 11);
    assert_eq!(node.kind, Kind::DepthExceeded);
    assert_eq!(node.display, "Max depth exceeded");
    assert!(node.children.is_empty());
}

#[test]
fn depth_ceiling_applies_regardless_of_shape() {
    for v in [json!(null), json!(1), json!([]), json!({"a": 1})] {
        let d = render_json(&v, "f", 11);
        assert_eq!(d.kind, Kind::DepthExceeded);
        assert!(d.children.is_empty());
    }
    assert_eq!(render_json(&json!(1), "f", 10).kind, Kind::Number);
}

#[test]
fn depth_ceiling_is_configurable() {
    let opts = Options {
        max_depth: 1,
        ..Options::default()
    };
    let d = render_with(&Value::from(&nested(3)), "root", 0, &opts);
    assert_eq!(d.children[0].kind, Kind::Object);
    assert_eq!(d.children[0].children[0].kind, Kind::DepthExceeded);
}

#[test]
fn classification_ignores_context() {
    let inner = json!({"latitude": 3, "longitude": 4});
    let alone = render_json(&inner, "p", 2);
    let within = render_json(&json!([{"x": [inner.clone()]}]), "p", 0);
    let nested = &within.children[0].children[0].children[0];
    assert_eq!(nested.depth, 3);
    assert_eq!((nested.kind, &nested.display), (alone.kind, &alone.display));
}

#[test]
fn document_fields_render_at_depth_zero() {
    let doc = Value::from(json!({"name": "Ada", "age": 36}));
    let fields = render_document(&doc, &Options::default());
    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.depth == 0));
    assert_eq!(fields[0].field_name, "name");

    let fields = render_document(&Value::from(json!([1])), &Options::default());
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_name, "value");
}

#[test]
fn descriptors_serialize_in_camel_case() -> Result<(), Box<dyn std::error::Error>> {
    let d = render_json(&json!({"xs": []}), "doc", 0);
    let v = serde_json::to_value(&d)?;
    assert_eq!(
        v,
        json!({
            "fieldName": "doc",
            "depth": 0,
            "kind": "object",
            "display": "{1 keys}",
            "children": [{
                "fieldName": "xs",
                "depth": 1,
                "kind": "empty-array",
                "display": "[] (empty array)",
                "children": []
            }]
        })
    );
    Ok(())
}

#[test]
fn text_outline() -> Result<(), Box<dyn std::error::Error>> {
    let doc = docview::from_str(r#"{"a": {"b": [true]}, "c": null}"#)?;
    let mut out = Vec::new();
    docview::write_text(&mut out, &doc, &Options::default())?;
    assert_eq!(
        String::from_utf8(out)?,
        "a: {1 keys}\n  b: [1 items]\n    [0]: TRUE\nc: null\n"
    );
    Ok(())
}

#[test]
fn reads_documents_from_any_reader() -> Result<(), Box<dyn std::error::Error>> {
    let doc = docview::from_reader(r#"{"at": {"seconds": 0, "nanoseconds": 0}}"#.as_bytes())?;
    let fields = render_document(&doc, &Options::default());
    assert_eq!(fields[0].kind, Kind::Timestamp);
    assert!(docview::from_reader("{oops".as_bytes()).is_err());
    Ok(())
}
