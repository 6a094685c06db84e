/// Deepest level the renderer descends to. Levels are counted from the
/// document root at 0; a node below this level renders as depth-exceeded.
pub const DEFAULT_MAX_DEPTH: usize = 10;

#[derive(Debug, Clone)]
pub struct Options {
    /// Render depth ceiling (default: 10)
    pub max_depth: usize,
    /// Indentation per depth level in text output (default: 2 spaces)
    pub indent: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            indent: 2,
        }
    }
}
