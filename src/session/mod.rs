//! Session model: the staged batch of moves and its persistence/lifecycle.
//! - `MoveRecord` is one staged operation, paths relative to the session root.
//! - `Session` is the single pending batch; serialized as camelCase JSON.
//! - `store` persists at most one session; `manager` enforces the lifecycle.

pub mod manager;
pub mod store;

pub use manager::SessionManager;
pub use store::{FileSessionStore, SessionStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// One staged move. Paths are kept exactly as the caller supplied them and
/// are only checked against the filesystem when staged and when committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    source_path: String,
    destination_path: String,
    #[serde(default)]
    overwrite: bool,
}

impl MoveRecord {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, overwrite: bool) -> Self {
        Self {
            source_path: source.into(),
            destination_path: destination.into(),
            overwrite,
        }
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn destination_path(&self) -> &str {
        &self.destination_path
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source_path, self.destination_path)
    }
}

/// The single pending batch of moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "sessionId")]
    pub id: Uuid,
    /// Absolute, normalized root; fixed at creation.
    #[serde(rename = "basePath")]
    pub root_path: PathBuf,
    /// Append order is commit order.
    #[serde(rename = "stagedMoves", default)]
    pub moves: Vec<MoveRecord>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Fresh session with a new id and no moves. `root_path` must already be normalized.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            root_path,
            moves: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
