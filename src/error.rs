use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("failed to build glob set: {0}")]
    GlobSet(#[source] globset::Error),
    #[error("directory not found: {0}")]
    NotFound(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}
