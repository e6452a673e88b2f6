//! Durable storage for the single session slot.
//!
//! The slot is one JSON document (default: `<temp dir>/fm-session.json`) shared
//! by every invocation of the tool. There is no locking: two invocations that
//! load-modify-save concurrently race and the last writer wins.
//!
//! A record that cannot be read or parsed is deleted and reported as absent,
//! with a warning event so the loss is visible in logs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::Session;
use crate::errors::{FileMoverError, Result};
use crate::platform::write_file_atomic;

/// File name of the session record inside the OS temp directory.
pub const SESSION_FILE_NAME: &str = "fm-session.json";

/// Persistence for at most one session.
pub trait SessionStore {
    /// `None` when no record exists (or the record was unreadable and removed).
    fn load(&self) -> Result<Option<Session>>;

    /// Replace any prior record with `session`.
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the record; a missing record is not an error.
    fn delete(&self) -> Result<()>;

    fn exists(&self) -> Result<bool>;
}

/// JSON-file backed store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the well-known location under the OS temp directory.
    pub fn at_default_location() -> Self {
        Self::new(default_session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, op: &'static str, e: io::Error) -> FileMoverError {
        FileMoverError::Io {
            op,
            path: self.path.clone(),
            message: format!("{} '{}': {}", op, self.path.display(), e),
        }
    }
}

/// `<temp dir>/fm-session.json`
pub fn default_session_path() -> PathBuf {
    std::env::temp_dir().join(SESSION_FILE_NAME)
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable session record; discarding it");
                self.delete()?;
                return Ok(None);
            }
        };

        match serde_json::from_str::<Session>(&content) {
            Ok(session) => {
                debug!(path = %self.path.display(), id = %session.id, moves = session.moves.len(), "session loaded");
                Ok(Some(session))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt session record; discarding it");
                self.delete()?;
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| FileMoverError::Serialize(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err("create session directory", e))?;
        }
        write_file_atomic(&self.path, json.as_bytes())
            .map_err(|e| self.io_err("write session", e))?;
        debug!(path = %self.path.display(), id = %session.id, moves = session.moves.len(), "session saved");
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session record removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err("delete session", e)),
        }
    }

    fn exists(&self) -> Result<bool> {
        self.path
            .try_exists()
            .map_err(|e| self.io_err("check session", e))
    }
}
