use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rntsc resolution.
///
/// Unresolvable modules are not errors (the resolver returns `None` and the
/// wrapped compiler owns the missing-module diagnostic). Everything here is
/// fatal to the enclosing compile.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse package manifest in {dir}: {source}")]
    ManifestParse {
        dir: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read package manifest in {dir}: {source}")]
    ManifestRead {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write resolution trace to {path}: {source}")]
    TraceSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
