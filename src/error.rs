//! Error types for ils.
//!
//! Every fallible operation in the crate returns [Result], which carries an [IlsError].

use std::io;
use std::path::PathBuf;

/// All errors produced by ils.
#[derive(Debug, thiserror::Error)]
pub enum IlsError {
    /// The theme document is missing or malformed, or a catalog has no usable default icon.
    #[error("cannot load theme from {}: {reason}", path.display())]
    ThemeLoad { path: PathBuf, reason: String },

    #[error("icon '{key}' not matched")]
    IconNotFound { key: String },

    /// A catalog matched the key but the payload file could not be read.
    #[error("cannot load icon '{file}': {source}")]
    IconLoad {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot access '{}': {source}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = IlsError> = std::result::Result<T, E>;
