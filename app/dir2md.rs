//! Command-line interface for dir2md.
//!
//! Parses flags into [`GenerateOptions`], validates the root directory,
//! and writes the generated snapshot to the output file.

use clap::Parser;
use dir2md::{GenerateBuilder, GenerateOptions, default_text_extensions, generate, validate_root};
use std::fs;
use std::path::PathBuf;
use std::process::exit;

/// dir2md — generate a single Markdown snapshot of a directory
#[derive(Parser)]
#[command(name = "dir2md", version, about, long_about = None)]
struct Cli {
    /// Directory to scan
    directory: PathBuf,

    /// Output Markdown file
    #[arg(short, long, default_value = "./snapshot.md")]
    output: PathBuf,

    /// Include file contents (text/code files only)
    #[arg(long)]
    contents: bool,

    /// Add per-file analysis comments
    #[arg(long)]
    analyze: bool,

    /// Limit recursion depth (0 = root only, unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Skip files larger than this many bytes
    #[arg(long, default_value_t = 500_000)]
    max_file_size: u64,

    /// Trim each file to at most N lines
    #[arg(long, default_value_t = 1200)]
    max_lines: usize,

    /// Trim each file to at most N bytes
    #[arg(long, default_value_t = 200_000)]
    max_bytes: usize,

    /// Stop inlining once total output exceeds N bytes
    #[arg(long, default_value_t = 5_000_000)]
    max_total_bytes: usize,

    /// Comma-separated whitelist of extensions (e.g. .js,.ts,.py)
    #[arg(long, value_delimiter = ',')]
    ext: Vec<String>,

    /// Comma-separated ignore globs
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,
}

impl Cli {
    fn into_options(self, root: PathBuf) -> GenerateOptions {
        let ext_whitelist = if self.ext.is_empty() {
            default_text_extensions()
        } else {
            self.ext
                .iter()
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect()
        };
        let mut builder = GenerateBuilder::new(root)
            .include_contents(self.contents)
            .analyze(self.analyze)
            .max_file_size_bytes(self.max_file_size)
            .max_lines_per_file(self.max_lines)
            .max_bytes_per_file(self.max_bytes)
            .max_total_bytes(self.max_total_bytes)
            .ext_whitelist(ext_whitelist)
            .exclude_globs(self.exclude);

        builder = if let Some(depth) = self.max_depth {
            builder.max_depth(depth)
        } else {
            builder.no_limit_depth()
        };

        builder.build()
    }
}

fn main() {
    let cli = Cli::parse();

    let root = match validate_root(&cli.directory) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: {e}");
            exit(1);
        }
    };

    let output = cli.output.clone();
    let options = cli.into_options(root);

    match generate(&options) {
        Ok(markdown) => {
            if let Err(e) = fs::write(&output, markdown) {
                eprintln!("Error: failed to write {}: {e}", output.display());
                exit(1);
            }
            println!("Wrote Markdown to {}", output.display());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit(1);
        }
    }
}
