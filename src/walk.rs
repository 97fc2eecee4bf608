//! Depth-first directory traversal with ignore pruning.

use crate::filter::PathFilter;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;

/// One filesystem node discovered during traversal.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Path relative to the walk root; empty for the root itself.
    pub rel: PathBuf,
    /// Absolute path on the filesystem.
    pub abs: PathBuf,
    /// True for real directories. Symlinks are never directories here.
    pub is_dir: bool,
    /// Raw child names in filesystem read order, unfiltered and unsorted.
    /// Empty for files. Sorting is a presentation concern left to callers.
    pub children: Vec<String>,
}

impl Entry {
    /// Depth below the root: the root is 0, each path segment adds one.
    pub fn depth(&self) -> usize {
        self.rel.components().count()
    }
}

/// Lazy pre-order iterator over the tree rooted at `root`.
///
/// A directory is yielded before its children; children are visited in raw
/// read-dir order. A child whose relative path matches the filter is pruned
/// together with its entire subtree. Paths that cannot be statted or read
/// are skipped silently. Symlinks are yielded as opaque leaves and never
/// followed, which also rules out traversal loops through symlink cycles.
pub struct Walker<'a> {
    root: PathBuf,
    filter: &'a PathFilter,
    stack: Vec<PathBuf>,
}

impl<'a> Walker<'a> {
    pub fn new(root: &Path, filter: &'a PathFilter) -> Self {
        Self {
            root: root.to_path_buf(),
            filter,
            stack: vec![PathBuf::new()],
        }
    }
}

impl Iterator for Walker<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        loop {
            let rel = self.stack.pop()?;
            let abs = self.root.join(&rel);
            let meta = match fs::symlink_metadata(&abs) {
                Ok(meta) => meta,
                Err(_) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Could not stat {}, skipping", abs.display());
                    continue;
                }
            };
            if meta.file_type().is_symlink() || !meta.is_dir() {
                return Some(Entry {
                    rel,
                    abs,
                    is_dir: false,
                    children: Vec::new(),
                });
            }
            let mut children = Vec::new();
            if let Ok(read) = fs::read_dir(&abs) {
                for child in read.flatten() {
                    children.push(child.file_name().to_string_lossy().into_owned());
                }
            }
            // Reversed so the stack pops children in read order.
            for name in children.iter().rev() {
                let child_rel = rel.join(name);
                if !self.filter.is_ignored(&child_rel) {
                    self.stack.push(child_rel);
                }
            }
            return Some(Entry {
                rel,
                abs,
                is_dir: true,
                children,
            });
        }
    }
}
