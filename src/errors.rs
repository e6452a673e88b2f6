//! Typed error definitions for file_mover.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, FileMoverError>;

#[derive(Debug, Error)]
pub enum FileMoverError {
    #[error("No session initialized. Run 'fm init' first.")]
    NoActiveSession,

    #[error("Session already active at '{}'. Use 'fm preview' to review or 'fm cancel' to discard.", .root.display())]
    SessionAlreadyActive { root: PathBuf },

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Source file not found: {0}")]
    SourceNotFound(String),

    #[error("Destination exists: {0}. Use --overwrite flag to replace.")]
    DestinationConflict(String),

    #[error("Path is outside initialized directory: {0}")]
    PathOutsideRoot(String),

    #[error("Source and destination are the same file: {0}")]
    SameFile(String),

    /// I/O failure while touching the filesystem or the session record.
    /// `message` already carries the operation, the path and a hint.
    #[error("{message}")]
    Io {
        op: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("Failed to serialize session: {0}")]
    Serialize(String),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl FileMoverError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            Self::NoActiveSession => 10,
            Self::SessionAlreadyActive { .. } => 11,
            Self::DirectoryNotFound(_) => 12,
            Self::SourceNotFound(_) => 20,
            Self::DestinationConflict(_) => 21,
            Self::PathOutsideRoot(_) => 22,
            Self::SameFile(_) => 23,
            Self::Io { .. } => 30,
            Self::Serialize(_) => 31,
            Self::Interrupted => 130,
        }
    }

    /// Short machine-readable kind, used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoActiveSession => "no_active_session",
            Self::SessionAlreadyActive { .. } => "session_already_active",
            Self::DirectoryNotFound(_) => "directory_not_found",
            Self::SourceNotFound(_) => "source_not_found",
            Self::DestinationConflict(_) => "destination_conflict",
            Self::PathOutsideRoot(_) => "path_outside_root",
            Self::SameFile(_) => "same_file",
            Self::Io { .. } => "io",
            Self::Serialize(_) => "serialize",
            Self::Interrupted => "interrupted",
        }
    }

    /// True for failures caused by the caller's input or session state rather than I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoActiveSession
                | Self::SessionAlreadyActive { .. }
                | Self::DirectoryNotFound(_)
                | Self::SourceNotFound(_)
                | Self::DestinationConflict(_)
                | Self::PathOutsideRoot(_)
                | Self::SameFile(_)
        )
    }
}
