//! # dir2md
//!
//! `dir2md` turns a filesystem directory into one self-contained Markdown
//! document: a rendered box-drawing tree plus, optionally, inlined file
//! contents and lightweight heuristic per-file analysis.
//!
//! Ignore patterns are loaded from `.mdgenignore` and `.gitignore` at the
//! root (plain glob lists, not full gitignore semantics) and merged with
//! caller-supplied globs. Inlined contents respect per-file line and byte
//! caps plus one global output-size budget; oversized, unsupported, and
//! non-UTF-8 files are replaced by placeholder sections rather than failing
//! the run.
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//! - `server`: Builds the `dir2md-serve` HTTP front end.
//!
//! # Example
//!
//! ```no_run
//! use dir2md::{GenerateBuilder, generate};
//!
//! let options = GenerateBuilder::new("/path/to/project")
//!     .include_contents(true)
//!     .analyze(true)
//!     .max_total_bytes(5_000_000)
//!     .build();
//!
//! let markdown = generate(&options).expect("failed to generate snapshot");
//! println!("{markdown}");
//! ```

mod analyze;
mod engine;
mod error;
mod filter;
mod inline;
mod options;
mod tree;
mod walk;

pub use analyze::{Analysis, analyze, default_text_extensions};
pub use engine::{generate, validate_root};
pub use error::GenerateError;
pub use filter::PathFilter;
pub use options::{GenerateBuilder, GenerateOptions};
pub use walk::{Entry, Walker};
