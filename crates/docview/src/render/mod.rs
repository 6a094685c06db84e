//! Classification and display formatting of value trees.
//!
//! Each node becomes a [`RenderDescriptor`]: a [`Kind`], a display string and,
//! for arrays and objects, one child per element or field. Classification
//! looks only at the node itself, so any subtree can be rendered on its own.

pub mod text;

use serde::Serialize;

use crate::options::Options;
use crate::value::Value;

pub const DEPTH_EXCEEDED: &str = "Max depth exceeded";
pub const EMPTY_ARRAY: &str = "[] (empty array)";
pub const EMPTY_OBJECT: &str = "{} (empty object)";

/// Field name given to a document root that is not a mapping.
pub const ROOT_FIELD: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    Null,
    String,
    Number,
    Boolean,
    Timestamp,
    Geopoint,
    EmptyArray,
    Array,
    EmptyObject,
    Object,
    Unknown,
    DepthExceeded,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Timestamp => "timestamp",
            Kind::Geopoint => "geopoint",
            Kind::EmptyArray => "empty-array",
            Kind::Array => "array",
            Kind::EmptyObject => "empty-object",
            Kind::Object => "object",
            Kind::Unknown => "unknown",
            Kind::DepthExceeded => "depth-exceeded",
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDescriptor {
    pub field_name: String,
    pub depth: usize,
    pub kind: Kind,
    pub display: String,
    pub children: Vec<RenderDescriptor>,
}

impl RenderDescriptor {
    fn leaf(field_name: &str, depth: usize, kind: Kind, display: String) -> Self {
        Self {
            field_name: field_name.to_string(),
            depth,
            kind,
            display,
            children: Vec::new(),
        }
    }

    /// Field names of the direct children, in display order.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.field_name.as_str()).collect()
    }
}

/// Renders `value` with the default depth ceiling.
pub fn render(value: &Value, field_name: &str, depth: usize) -> RenderDescriptor {
    render_with(value, field_name, depth, &Options::default())
}

pub fn render_with(value: &Value, field_name: &str, depth: usize, opts: &Options) -> RenderDescriptor {
    if depth > opts.max_depth {
        tracing::trace!(field = field_name, depth, "render depth ceiling reached");
        return RenderDescriptor::leaf(field_name, depth, Kind::DepthExceeded, DEPTH_EXCEEDED.to_string());
    }

    match value {
        Value::Null => RenderDescriptor::leaf(field_name, depth, Kind::Null, "null".to_string()),
        Value::String(s) => RenderDescriptor::leaf(field_name, depth, Kind::String, s.clone()),
        Value::Number(n) => RenderDescriptor::leaf(field_name, depth, Kind::Number, n.to_string()),
        Value::Bool(b) => {
            let display = if *b { "TRUE" } else { "FALSE" };
            RenderDescriptor::leaf(field_name, depth, Kind::Boolean, display.to_string())
        }
        Value::Array(items) if items.is_empty() => {
            RenderDescriptor::leaf(field_name, depth, Kind::EmptyArray, EMPTY_ARRAY.to_string())
        }
        Value::Array(items) => {
            let children = items
                .iter()
                .enumerate()
                .map(|(i, item)| render_with(item, &format!("[{}]", i), depth + 1, opts))
                .collect();
            RenderDescriptor {
                field_name: field_name.to_string(),
                depth,
                kind: Kind::Array,
                display: format!("[{} items]", items.len()),
                children,
            }
        }
        Value::Object(fields) if fields.is_empty() => {
            RenderDescriptor::leaf(field_name, depth, Kind::EmptyObject, EMPTY_OBJECT.to_string())
        }
        Value::Timestamp(ts) => RenderDescriptor::leaf(field_name, depth, Kind::Timestamp, ts.to_iso_string()),
        Value::GeoPoint(geo) => RenderDescriptor::leaf(field_name, depth, Kind::Geopoint, geo.to_string()),
        Value::Object(fields) => render_object(fields, field_name, depth, opts),
        // References have no dedicated display; they show as their tagged record.
        Value::Reference(r) => render_object(&r.to_fields(), field_name, depth, opts),
        Value::Opaque { type_name, repr } => {
            RenderDescriptor::leaf(field_name, depth, Kind::Unknown, format!("{} ({})", repr, type_name))
        }
    }
}

fn render_object(fields: &[(String, Value)], field_name: &str, depth: usize, opts: &Options) -> RenderDescriptor {
    let children = fields
        .iter()
        .map(|(k, v)| render_with(v, k, depth + 1, opts))
        .collect();
    RenderDescriptor {
        field_name: field_name.to_string(),
        depth,
        kind: Kind::Object,
        display: format!("{{{} keys}}", fields.len()),
        children,
    }
}

/// Renders every top-level field of a document at depth 0.
pub fn render_document(doc: &Value, opts: &Options) -> Vec<RenderDescriptor> {
    match doc {
        Value::Object(fields) => fields
            .iter()
            .map(|(k, v)| render_with(v, k, 0, opts))
            .collect(),
        other => vec![render_with(other, ROOT_FIELD, 0, opts)],
    }
}

/// Adapts a raw JSON payload and renders it.
pub fn render_json(value: &serde_json::Value, field_name: &str, depth: usize) -> RenderDescriptor {
    render(&Value::from(value), field_name, depth)
}
