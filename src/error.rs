//! Error type shared by the context assembly pipeline and the selection tree.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A budget string did not match `<int>` or `<decimal>k`.
    #[error("invalid budget {input:?}: expected an integer or a number with a k suffix (e.g. 32k, 1.5k)")]
    InvalidBudget { input: String },

    /// An output format selector that is neither markdown nor xml.
    #[error("unknown output format {0:?}: expected \"markdown\" or \"xml\"")]
    UnknownFormat(String),

    /// A path that is neither on disk nor in the selection tree.
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// A directory-only operation addressed a leaf with no parent directory.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Include/exclude glob that failed to compile.
    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A command-line value that parsed but cannot be used.
    #[error("invalid option: {0}")]
    InvalidConfig(String),

    /// `--chunk-index` past the last chunk of the run.
    #[error("chunk index {index} out of range: the run has {total} chunk(s)")]
    ChunkIndexOutOfRange { index: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, Error>;
