//! Ignore-pattern filtering for relative paths.
//!
//! Patterns come from two optional files at the snapshot root, `.mdgenignore`
//! then `.gitignore`, followed by caller-supplied globs. The ignore files are
//! plain glob lists, one pattern per line; blank lines and `#` comments are
//! skipped. This is deliberately not full gitignore semantics (no negation,
//! no anchoring rules), just shell-style globs matched against POSIX-separator
//! relative paths.

use crate::error::GenerateError;
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::Path;

/// Decides whether a relative path is excluded from the snapshot.
#[derive(Debug)]
pub struct PathFilter {
    set: GlobSet,
    patterns: Vec<String>,
}

impl PathFilter {
    /// Loads ignore patterns from `root/.mdgenignore` and `root/.gitignore`
    /// (both optional, in that order), appends `extra`, and compiles the
    /// whole list. Unreadable ignore files are treated as absent.
    pub fn load(root: &Path, extra: &[String]) -> Result<Self, GenerateError> {
        let mut patterns = Vec::new();
        for name in [".mdgenignore", ".gitignore"] {
            let Ok(content) = fs::read_to_string(root.join(name)) else {
                continue;
            };
            for line in content.lines() {
                let s = line.trim();
                if s.is_empty() || s.starts_with('#') {
                    continue;
                }
                patterns.push(s.to_string());
            }
        }
        patterns.extend(extra.iter().cloned());
        Self::from_patterns(patterns)
    }

    /// Compiles an explicit pattern list.
    ///
    /// A pattern ending in `/**` additionally matches the bare prefix, so
    /// `build/**` prunes the `build` directory itself rather than only its
    /// contents.
    pub fn from_patterns(patterns: Vec<String>) -> Result<Self, GenerateError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            if pattern.trim().is_empty() {
                continue;
            }
            builder.add(compile(pattern)?);
            if let Some(prefix) = pattern.strip_suffix("/**") {
                if !prefix.is_empty() {
                    builder.add(compile(prefix)?);
                }
            }
        }
        let set = builder.build().map_err(GenerateError::GlobSet)?;
        Ok(Self { set, patterns })
    }

    /// Returns true when `rel` matches any loaded pattern. Matching is done
    /// against the path with `/` separators; dotfiles match like any other
    /// name. An empty pattern list ignores nothing.
    pub fn is_ignored(&self, rel: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let posix = rel
            .iter()
            .map(|c| c.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        self.set.is_match(posix.as_str())
    }

    /// The merged textual pattern list, in load order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

fn compile(pattern: &str) -> Result<Glob, GenerateError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| GenerateError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}
