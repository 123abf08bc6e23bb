// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {std::path::PathBuf, thiserror::Error};

/// Describes a manifest entry whose source file could not be read.
#[derive(Clone, Debug)]
pub struct MissingResource {
    /// The resource key the unreadable file was bound to.
    pub key: String,

    /// The resolved filesystem path that could not be read.
    pub path: PathBuf,

    /// Text of the underlying I/O failure.
    pub reason: String,
}

impl std::fmt::Display for MissingResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.key, self.path.display(), self.reason)
    }
}

fn summarize_missing(missing: &[MissingResource]) -> String {
    format!("{} source files could not be read", missing.len())
}

/// Unified error type for resource compilation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("manifest line {line}: {message}")]
    ManifestParse { line: usize, message: String },

    #[error("duplicate resource key: {0}")]
    DuplicateKey(String),

    /// Unreadable source files, collected across the entire manifest so a
    /// single run reports every missing file.
    #[error("{}", summarize_missing(.0))]
    ResourceNotFound(Vec<MissingResource>),

    #[error("invalid escape sequence: {0}")]
    InvalidEscape(String),

    #[error("unsupported output configuration: {0}")]
    Unsupported(String),

    #[error("unable to write output file {path:?}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
