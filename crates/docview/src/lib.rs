#![doc = include_str!("../README.md")]

pub mod error;
pub mod normalize;
pub mod options;
pub mod render;
pub mod ser;
pub mod shape;
pub mod source;
pub mod special;
pub mod value;
pub mod view;

mod number;

pub use crate::error::{Error, Result};
pub use crate::normalize::{normalize, normalize_json};
pub use crate::options::{DEFAULT_MAX_DEPTH, Options};
pub use crate::render::{Kind, RenderDescriptor, render, render_document, render_json, render_with};
pub use crate::source::{DirSource, DocumentSource, MemorySource};
pub use crate::special::{DocumentRef, GeoPoint, Timestamp};
pub use crate::value::{Number, Value};
pub use crate::view::{Dashboard, DocumentView, Listing};

use std::io::{Read, Write};

/// Parses one JSON document and adapts it into a [`Value`].
pub fn from_str(s: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(s)?;
    Ok(Value::from(json))
}

/// Reads one JSON document to the end and adapts it.
pub fn from_reader<R: Read>(mut reader: R) -> Result<Value> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    from_str(&s)
}

/// Writes the plain-text outline of a document's rendered fields.
pub fn write_text<W: Write>(mut writer: W, doc: &Value, options: &Options) -> Result<()> {
    let fields = render_document(doc, options);
    writer.write_all(render::text::to_text(&fields, options).as_bytes())?;
    Ok(())
}
