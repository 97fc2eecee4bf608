//! The content pass: per-file inclusion, truncation, analysis, and the
//! global output-size budget.
//!
//! This pass walks the tree a second time in natural read order, which is
//! intentionally different from the alphabetical order of the tree section.
//! Collapsing the two passes would change observable output.

use crate::analyze::{Analysis, analyze, language_for};
use crate::filter::PathFilter;
use crate::options::GenerateOptions;
use crate::walk::Walker;
use std::fs;
use std::path::Path;
#[cfg(feature = "logging")]
use tracing;

/// Running total of emitted bytes, bounded by a configured cap.
///
/// The budget is an explicit value threaded through the content pass rather
/// than a shared counter. A cap of zero disables it. Invariant: the emitted
/// total never exceeds the cap by more than one stop-notice line, because
/// every section is measured before it is appended.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget {
    emitted: usize,
    cap: usize,
}

impl Budget {
    pub(crate) fn new(cap: usize) -> Self {
        Self { emitted: 0, cap }
    }

    pub(crate) fn charge(&mut self, bytes: usize) {
        self.emitted += bytes;
    }

    fn exhausted(&self) -> bool {
        self.cap != 0 && self.emitted > self.cap
    }

    fn fits(&self, extra: usize) -> bool {
        self.cap == 0 || self.emitted + extra <= self.cap
    }
}

/// Appends one `### path` section per inlinable file to `out`, stopping
/// early when the budget runs out.
pub(crate) fn inline_contents(
    filter: &PathFilter,
    options: &GenerateOptions,
    budget: &mut Budget,
    out: &mut String,
) {
    for entry in Walker::new(&options.root, filter) {
        if entry.is_dir {
            continue;
        }
        if let Some(max) = options.max_depth {
            if entry.depth() > max {
                continue;
            }
        }
        let meta = match fs::symlink_metadata(&entry.abs) {
            Ok(meta) if meta.is_file() => meta,
            _ => continue,
        };
        let rel = entry.rel.display();

        if options.max_file_size_bytes != 0 && meta.len() > options.max_file_size_bytes {
            #[cfg(feature = "logging")]
            tracing::debug!(
                "File too large ({} > {}), skipping content",
                meta.len(),
                options.max_file_size_bytes
            );
            let placeholder = format!(
                "### `{rel}`\n\n> Skipped (file size {} bytes exceeds limit of {}).\n\n",
                meta.len(),
                options.max_file_size_bytes
            );
            budget.charge(placeholder.len());
            out.push_str(&placeholder);
            continue;
        }
        if !is_whitelisted(&entry.rel, &options.ext_whitelist) {
            let placeholder =
                format!("### `{rel}`\n\n> Skipped (non-text or unsupported extension).\n\n");
            budget.charge(placeholder.len());
            out.push_str(&placeholder);
            continue;
        }
        let raw = match fs::read(&entry.abs) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Not valid UTF-8: {}", entry.abs.display());
                    let placeholder =
                        format!("### `{rel}`\n\n> Skipped (failed to read as UTF-8).\n\n");
                    budget.charge(placeholder.len());
                    out.push_str(&placeholder);
                    continue;
                }
            },
            Err(_) => {
                let placeholder =
                    format!("### `{rel}`\n\n> Skipped (failed to read as UTF-8).\n\n");
                budget.charge(placeholder.len());
                out.push_str(&placeholder);
                continue;
            }
        };

        if budget.exhausted() {
            out.push_str(&format!(
                "> Stopped inlining more files (reached max total bytes = {}).\n",
                budget.cap
            ));
            break;
        }

        let lang = language_for(&entry.rel);
        let trimmed = trim_content(&raw, options.max_lines_per_file, options.max_bytes_per_file);
        let analysis_block = if options.analyze {
            render_analysis(&analyze(&entry.rel, &raw))
        } else {
            String::new()
        };
        let section = format!("### `{rel}`\n\n{analysis_block}```{lang}\n{trimmed}\n```\n\n");

        if !budget.fits(section.len()) {
            out.push_str(&format!(
                "> Stopped before adding `{rel}` (would exceed max total bytes = {}).\n",
                budget.cap
            ));
            break;
        }
        budget.charge(section.len());
        out.push_str(&section);
    }
}

fn is_whitelisted(rel: &Path, whitelist: &[String]) -> bool {
    if let Some(name) = rel.file_name().and_then(|n| n.to_str()) {
        if name.eq_ignore_ascii_case("dockerfile") {
            return true;
        }
    }
    let Some(ext) = rel.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let dotted = format!(".{}", ext.to_ascii_lowercase());
    whitelist.iter().any(|allowed| allowed == &dotted)
}

/// Enforces the per-file byte cap, then the line cap.
///
/// The byte cap is approximate: the text is repeatedly cut to 90% of its
/// character count until its encoded size fits, so the result can undershoot
/// the cap. Cuts land on character boundaries. The line cap keeps the first
/// N lines and appends one truncation-marker line only when lines were
/// actually dropped.
fn trim_content(content: &str, max_lines: usize, max_bytes: usize) -> String {
    let mut text = content.to_string();
    if max_bytes != 0 && text.len() > max_bytes {
        while text.len() > max_bytes {
            let keep = text.chars().count() * 9 / 10;
            text = text.chars().take(keep).collect();
        }
    }
    if max_lines != 0 {
        let count = text.split('\n').count();
        if count > max_lines {
            let kept: Vec<&str> = text
                .split('\n')
                .take(max_lines)
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect();
            text = format!("{}\n…[truncated to {max_lines} lines]", kept.join("\n"));
        }
    }
    text
}

fn render_analysis(analysis: &Analysis) -> String {
    let Analysis {
        lang,
        loc,
        fn_count,
        branch_count,
        cyclomatic_proxy,
        imports,
        smells,
        has_imports,
        has_exports,
        todos,
        header_suggestion,
    } = analysis;
    let shown_lang = if lang.is_empty() { "unknown" } else { lang };
    let mut block = String::from("**Analysis**\n\n");
    block.push_str(&format!("- Language: {shown_lang}\n"));
    block.push_str(&format!("- LOC: {loc}\n"));
    block.push_str(&format!(
        "- Functions: {fn_count} · Branch points: {branch_count} · Complexity≈ {cyclomatic_proxy}\n"
    ));
    if !imports.is_empty() {
        block.push_str(&format!("- Imports: {}\n", imports.join(", ")));
    }
    block.push_str(&format!(
        "- Imports present: {} · Exports/API: {}\n",
        yes_no(*has_imports),
        yes_no(*has_exports)
    ));
    if !smells.is_empty() {
        block.push_str(&format!("- Flags: {}\n", smells.join("; ")));
    }
    if *todos > 0 {
        block.push_str(&format!("- TODO/FIXME count: {todos}\n"));
    }
    block.push_str("- Suggested header:\n\n");
    block.push_str(&format!("```{lang}\n{header_suggestion}\n```\n\n"));
    block
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
