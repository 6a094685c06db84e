use docview::{Options, RenderDescriptor, Value};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod js_value;

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[cfg(feature = "size_opt")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Maximum input size in bytes (10 MB)
const MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn check_size(input: &str) -> Result<(), String> {
    if input.len() > MAX_INPUT_SIZE {
        return Err(format!(
            "Input exceeds maximum size limit of {} bytes",
            MAX_INPUT_SIZE
        ));
    }
    Ok(())
}

fn parse(json_str: &str) -> Result<Value, String> {
    check_size(json_str)?;
    docview::from_str(json_str).map_err(|e| format!("Invalid JSON: {}", e))
}

fn options(max_depth: Option<u32>) -> Options {
    Options {
        max_depth: max_depth.map_or(docview::DEFAULT_MAX_DEPTH, |d| d as usize),
        ..Options::default()
    }
}

/// Normalize a JSON document into its transport-safe form
#[wasm_bindgen]
pub fn normalize_document(json_str: &str, pretty: bool) -> Result<String, String> {
    let doc = parse(json_str)?;
    let normalized = docview::normalize(&doc);
    if pretty {
        serde_json::to_string_pretty(&normalized).map_err(|e| format!("JSON encoding error: {}", e))
    } else {
        serde_json::to_string(&normalized).map_err(|e| format!("JSON encoding error: {}", e))
    }
}

/// Render the top-level fields of a JSON document as descriptor JSON
#[wasm_bindgen]
pub fn render_document(json_str: &str, max_depth: Option<u32>) -> Result<String, String> {
    let doc = parse(json_str)?;
    let fields: Vec<RenderDescriptor> = docview::render_document(&doc, &options(max_depth));
    serde_json::to_string(&fields).map_err(|e| format!("JSON encoding error: {}", e))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects rather than JS Maps.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(JsValue::from)
}

/// Render one live JS value (for example a field straight from a client SDK)
#[wasm_bindgen]
pub fn render_value(value: JsValue, field_name: &str, max_depth: Option<u32>) -> Result<JsValue, JsValue> {
    let opts = options(max_depth);
    let value = js_value::Walker::for_render(&opts).to_value(&value)?;
    let descriptor = docview::render_with(&value, field_name, 0, &opts);
    to_js(&descriptor)
}

/// Normalize one live JS value
#[wasm_bindgen]
pub fn normalize_value(value: JsValue) -> Result<JsValue, JsValue> {
    let value = js_value::to_value(&value)?;
    to_js(&docview::normalize(&value))
}

/// Get the version of the docview library
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
