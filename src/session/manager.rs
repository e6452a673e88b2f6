//! Session lifecycle on top of an injected store.
//!
//! State machine (persisted, process-wide):
//!   NoSession --create--> Active --add_move*--> Active --(cancel | commit)--> NoSession
//!
//! Commit is orchestrated by `crate::commit`; it always ends with `cancel`.

use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::store::SessionStore;
use super::{MoveRecord, Session};
use crate::errors::{FileMoverError, Result};
use crate::fs_ops::normalize_absolute;
use crate::shutdown::CancelToken;

#[derive(Debug)]
pub struct SessionManager<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_active(&self, cancel: &CancelToken) -> Result<Option<Session>> {
        cancel.check()?;
        self.store.load()
    }

    /// Start a session rooted at `root`, which may be relative to the working directory.
    pub fn create(&self, root: &Path, cancel: &CancelToken) -> Result<Session> {
        cancel.check()?;
        if let Some(existing) = self.store.load()? {
            return Err(FileMoverError::SessionAlreadyActive { root: existing.root_path });
        }

        let root_path = resolve_root(root)?;
        let session = Session::new(root_path);

        cancel.check()?;
        self.store.save(&session)?;
        info!(id = %session.id, root = %session.root_path.display(), "session created");
        Ok(session)
    }

    /// Append a (previously validated) move and persist the whole session.
    pub fn add_move(&self, record: MoveRecord, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        let mut session = self.store.load()?.ok_or(FileMoverError::NoActiveSession)?;
        debug!(id = %session.id, %record, position = session.moves.len() + 1, "staging move");
        session.moves.push(record);
        cancel.check()?;
        self.store.save(&session)
    }

    /// Discard the active session and all of its staged moves.
    pub fn cancel(&self, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        if !self.store.exists()? {
            return Err(FileMoverError::NoActiveSession);
        }
        self.store.delete()?;
        info!("session cleared");
        Ok(())
    }

    pub fn has_active(&self, cancel: &CancelToken) -> Result<bool> {
        cancel.check()?;
        self.store.exists()
    }
}

/// Absolute, normalized, symlink-resolved root; must be an existing directory.
fn resolve_root(root: &Path) -> Result<PathBuf> {
    let absolute = if root.is_absolute() {
        root.to_path_buf()
    } else {
        let cwd = env::current_dir().map_err(|e| FileMoverError::Io {
            op: "read current directory",
            path: root.to_path_buf(),
            message: format!("read current directory: {e}"),
        })?;
        cwd.join(root)
    };
    let absolute = normalize_absolute(&absolute);

    if !absolute.is_dir() {
        return Err(FileMoverError::DirectoryNotFound(absolute));
    }
    // dunce keeps Windows paths free of the \\?\ prefix.
    Ok(dunce::canonicalize(&absolute).unwrap_or(absolute))
}
