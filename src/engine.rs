use crate::error::GenerateError;
use crate::filter::PathFilter;
use crate::inline::{Budget, inline_contents};
use crate::options::GenerateOptions;
use crate::tree;
use crate::walk::{Entry, Walker};
use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
#[cfg(feature = "logging")]
use tracing;

/// Resolves `path` to an absolute path and checks that it is an existing
/// directory. Front ends call this before [`generate`]; the distinction
/// between [`GenerateError::NotFound`] and [`GenerateError::NotADirectory`]
/// matters to the HTTP layer.
pub fn validate_root(path: &Path) -> Result<PathBuf, GenerateError> {
    let abs = std::path::absolute(path).map_err(|e| GenerateError::io(path, e))?;
    match fs::symlink_metadata(&abs) {
        Err(_) => Err(GenerateError::NotFound(abs)),
        Ok(meta) if !meta.is_dir() => Err(GenerateError::NotADirectory(abs)),
        Ok(_) => Ok(abs),
    }
}

/// Generates the complete Markdown snapshot for `options.root`.
///
/// The document is assembled in order: a metadata header, the directory tree
/// (always), and the file-contents section (only when `include_contents` is
/// set; the content pass and the analyzer are never invoked otherwise).
/// Per-file problems are absorbed into the document as placeholder sections;
/// only glob compilation and serialization failures surface as `Err`.
pub fn generate(options: &GenerateOptions) -> Result<String, GenerateError> {
    let start = Instant::now();
    #[cfg(feature = "logging")]
    tracing::debug!("Generating snapshot of {}", options.root.display());

    let filter = PathFilter::load(&options.root, &options.exclude_globs)?;

    // The header reports the effective configuration, with the caller's
    // excludes replaced by the fully merged ignore-pattern list.
    let mut resolved = options.clone();
    resolved.exclude_globs = filter.patterns().to_vec();
    let options_json = serde_json::to_string_pretty(&resolved)?;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let contents_note = if options.include_contents { "" } else { " no" };
    let analyze_note = if options.analyze {
        " Analysis is enabled."
    } else {
        ""
    };
    let mut md = format!(
        "# Repository Snapshot\n\n\
         - **Root:** `{}`\n\
         - **Generated:** {timestamp}\n\
         - **Options:** {options_json}\n\n\
         > This file contains a directory tree and{contents_note} inlined file contents.{analyze_note}\n\n",
        options.root.display()
    );

    // Structure pass: one full walk feeding the tree section. Entries beyond
    // the depth limit are dropped here, which also stops the renderer from
    // descending past them.
    md.push_str("## Directory Tree\n\n");
    let mut entries: HashMap<PathBuf, Entry> = HashMap::new();
    for entry in Walker::new(&options.root, &filter) {
        if let Some(max) = options.max_depth {
            if entry.depth() > max {
                continue;
            }
        }
        entries.insert(entry.rel.clone(), entry);
    }
    let rendered = tree::render(&options.root, &entries);
    md.push_str(&format!("```text\n{rendered}\n```\n\n"));

    let mut budget = Budget::new(options.max_total_bytes);
    budget.charge(md.len());

    if !options.include_contents {
        md.push_str("_Generated by dir2md._\n");
        return Ok(md);
    }

    // Content pass: an independent second walk in natural read order.
    let heading = "## File Contents\n\n";
    md.push_str(heading);
    budget.charge(heading.len());
    inline_contents(&filter, options, &mut budget, &mut md);

    let elapsed = start.elapsed().as_secs_f64().round() as u64;
    md.push_str(&format!("_Generated by dir2md in {elapsed}s._\n"));
    Ok(md)
}
