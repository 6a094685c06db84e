use crate::options::Options;
use crate::render::{Kind, RenderDescriptor};

/// Accumulates indented output lines.
pub struct LineWriter {
    out: String,
    indent_cache: String,
}

impl LineWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent_cache: String::new(),
        }
    }

    fn write_indent(&mut self, indent: usize) {
        if indent == 0 {
            return;
        }
        if self.indent_cache.len() < indent {
            self.indent_cache
                .extend(core::iter::repeat_n(' ', indent - self.indent_cache.len()));
        }
        self.out.push_str(&self.indent_cache[..indent]);
    }

    pub fn line(&mut self, indent: usize, s: &str) {
        self.write_indent(indent);
        self.out.push_str(s);
        self.out.push('\n');
    }

    pub fn line_kv(&mut self, indent: usize, key: &str, value: &str) {
        self.write_indent(indent);
        self.out.push_str(key);
        self.out.push_str(": ");
        self.out.push_str(value);
        self.out.push('\n');
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl Default for LineWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain-text outline of rendered fields, one line per node.
pub fn to_text(fields: &[RenderDescriptor], opts: &Options) -> String {
    let mut w = LineWriter::new();
    for field in fields {
        write_descriptor(field, &mut w, opts);
    }
    w.into_string()
}

fn write_descriptor(d: &RenderDescriptor, w: &mut LineWriter, opts: &Options) {
    let indent = d.depth * opts.indent;
    if d.kind == Kind::DepthExceeded {
        w.line(indent, &d.display);
        return;
    }
    w.line_kv(indent, &d.field_name, &d.display);
    for child in &d.children {
        write_descriptor(child, w, opts);
    }
}
