#![no_main]
use docview::{Kind, Options, RenderDescriptor};
use libfuzzer_sys::fuzz_target;

fn check(d: &RenderDescriptor, opts: &Options) {
    assert!(d.depth <= opts.max_depth + 1, "descriptor below the depth ceiling: {:?}", d);
    if d.depth > opts.max_depth {
        assert_eq!(d.kind, Kind::DepthExceeded);
    }
    if !d.kind.is_container() {
        assert!(d.children.is_empty(), "leaf with children: {:?}", d);
    }
    for c in &d.children {
        assert_eq!(c.depth, d.depth + 1);
        check(c, opts);
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&depth, rest)) = data.split_first() else {
        return;
    };
    if let Ok(s) = std::str::from_utf8(rest) {
        if let Ok(doc) = docview::from_str(s) {
            let opts = Options {
                max_depth: usize::from(depth % 16),
                ..Options::default()
            };
            let fields = docview::render_document(&doc, &opts);
            for f in &fields {
                check(f, &opts);
            }
            let _ = docview::render::text::to_text(&fields, &opts);
        }
    }
});
