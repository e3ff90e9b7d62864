//! Snapshot error types.

use std::io;

use thiserror::Error;

use crate::domain::CatalogueError;

/// Errors that can occur while saving or loading a snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Opening, reading or writing the snapshot file failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The snapshot could not be encoded.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),

    /// The snapshot body could not be decoded.
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),

    /// The file was written by an incompatible format version.
    #[error("unsupported snapshot version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The file decoded but does not describe a consistent dataset.
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),

    /// The stored dataset no longer forms a valid catalogue.
    #[error("snapshot does not form a valid catalogue: {0}")]
    Catalogue(#[from] CatalogueError),
}

impl PersistError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
