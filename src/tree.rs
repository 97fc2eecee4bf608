//! Box-drawing tree rendering from a completed walk pass.

use crate::walk::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Renders the directory tree from the entry map built by one walk pass.
///
/// At each level directories come before files, and each group is sorted
/// case-insensitively ascending. A child name with no surviving entry in the
/// map (ignored, depth-limited, or unstattable) is skipped. The root line is
/// the root's base name with no prefix.
pub(crate) fn render(root: &Path, entries: &HashMap<PathBuf, Entry>) -> String {
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    let mut lines = vec![root_name];
    if let Some(root_entry) = entries.get(Path::new("")) {
        if root_entry.is_dir {
            render_children(root_entry, 0, &mut Vec::new(), entries, &mut lines);
        }
    }
    lines.join("\n")
}

fn render_children(
    dir: &Entry,
    depth: usize,
    flags: &mut Vec<bool>,
    entries: &HashMap<PathBuf, Entry>,
    lines: &mut Vec<String>,
) {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for name in &dir.children {
        let child_rel = dir.rel.join(name);
        match entries.get(&child_rel) {
            Some(child) if child.is_dir => dirs.push(name.clone()),
            Some(_) => files.push(name.clone()),
            None => {}
        }
    }
    dirs.sort_by_key(|name| name.to_lowercase());
    files.sort_by_key(|name| name.to_lowercase());
    let ordered: Vec<(String, bool)> = dirs
        .into_iter()
        .map(|name| (name, true))
        .chain(files.into_iter().map(|name| (name, false)))
        .collect();

    let count = ordered.len();
    for (i, (name, is_dir)) in ordered.into_iter().enumerate() {
        let last = i == count - 1;
        flags.push(last);
        lines.push(format!("{}{}", prefix(depth + 1, flags), name));
        if is_dir {
            let child_rel = dir.rel.join(&name);
            if let Some(child) = entries.get(&child_rel) {
                render_children(child, depth + 1, flags, entries, lines);
            }
        }
        flags.pop();
    }
}

/// Ancestors contribute `"│   "` unless they were the last sibling at their
/// level (then four spaces); the entry's own connector is `"├── "` or
/// `"└── "` depending on whether siblings follow.
fn prefix(depth: usize, flags: &[bool]) -> String {
    if depth == 0 {
        return String::new();
    }
    let mut out = String::new();
    for &last in &flags[..depth - 1] {
        out.push_str(if last { "    " } else { "│   " });
    }
    out.push_str(if flags[depth - 1] { "└── " } else { "├── " });
    out
}
