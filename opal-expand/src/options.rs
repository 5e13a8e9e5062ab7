//! Pass configuration

/// Deepest chain of nested erased types followed before giving up
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Reuse the expansion of an `(origin, index)` pair seen earlier in the
    /// same pass
    pub memoize: bool,
    /// Limit on nested expansions, catches origins whose generic arguments
    /// grow on every step
    pub max_depth: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            memoize: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExpandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
