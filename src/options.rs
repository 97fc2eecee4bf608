use crate::analyze::default_text_extensions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one snapshot generation.
///
/// Numeric limits use `0` to mean "no limit", except [`max_depth`] which is
/// `None` for unlimited. Values are immutable for the duration of one call
/// to [`generate`](crate::generate).
///
/// [`max_depth`]: GenerateOptions::max_depth
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Root directory of the snapshot (absolute path expected).
    pub root: PathBuf,
    /// Emit the `## File Contents` section with inlined file bodies.
    pub include_contents: bool,
    /// Recursion depth limit; the root is depth 0, `None` is unlimited.
    pub max_depth: Option<usize>,
    /// Files larger than this many bytes are skipped with a placeholder.
    pub max_file_size_bytes: u64,
    /// Each inlined file is trimmed to at most this many lines.
    pub max_lines_per_file: usize,
    /// Each inlined file is trimmed to roughly this many bytes.
    pub max_bytes_per_file: usize,
    /// Stop inlining once the emitted output exceeds this many bytes.
    pub max_total_bytes: usize,
    /// Lowercase dot-prefixed extensions eligible for inlining. The literal
    /// filename `Dockerfile` is always eligible regardless of this list.
    pub ext_whitelist: Vec<String>,
    /// Extra ignore globs, appended after the patterns loaded from
    /// `.mdgenignore` and `.gitignore`.
    pub exclude_globs: Vec<String>,
    /// Attach a heuristic analysis block to each inlined file.
    pub analyze: bool,
}
impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include_contents: false,
            max_depth: None,
            max_file_size_bytes: 500_000,
            max_lines_per_file: 1200,
            max_bytes_per_file: 200_000,
            max_total_bytes: 5_000_000,
            ext_whitelist: default_text_extensions(),
            exclude_globs: Vec::new(),
            analyze: false,
        }
    }
}
#[derive(Debug, Default)]
pub struct GenerateBuilder {
    options: GenerateOptions,
}
impl GenerateBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: GenerateOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn include_contents(mut self, yes: bool) -> Self {
        self.options.include_contents = yes;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn max_file_size_bytes(mut self, bytes: u64) -> Self {
        self.options.max_file_size_bytes = bytes;
        self
    }
    pub fn max_lines_per_file(mut self, lines: usize) -> Self {
        self.options.max_lines_per_file = lines;
        self
    }
    pub fn max_bytes_per_file(mut self, bytes: usize) -> Self {
        self.options.max_bytes_per_file = bytes;
        self
    }
    pub fn max_total_bytes(mut self, bytes: usize) -> Self {
        self.options.max_total_bytes = bytes;
        self
    }
    pub fn ext_whitelist(mut self, extensions: Vec<String>) -> Self {
        self.options.ext_whitelist = extensions;
        self
    }
    pub fn exclude_globs(mut self, patterns: Vec<String>) -> Self {
        self.options.exclude_globs = patterns;
        self
    }
    pub fn analyze(mut self, yes: bool) -> Self {
        self.options.analyze = yes;
        self
    }
    pub fn build(self) -> GenerateOptions {
        self.options
    }
}
