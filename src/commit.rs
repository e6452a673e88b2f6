//! Batch commit of the staged moves.
//!
//! Policy: best effort per move, then always clear the session.
//! - `execute_plan` runs every move in order and never stops on a failure.
//! - `clear_session` is a separate step, invoked whatever the plan's outcome.
//! A commit therefore never leaves a half-committed session behind.

use std::path::Path;
use tracing::{error, info, warn};

use crate::errors::{FileMoverError, Result};
use crate::fs_ops::{FileSystem, LocalFileSystem, execute_move};
use crate::session::{MoveRecord, SessionManager, SessionStore};
use crate::shutdown::CancelToken;

/// Outcome of executing a list of moves.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub succeeded: Vec<MoveRecord>,
    /// Failed move with its error text.
    pub failed: Vec<(MoveRecord, String)>,
}

impl CommitReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// What a commit call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The session had no moves; it was cleared.
    Empty,
    /// The plan ran. `clear_error` is set when the session record could not
    /// be removed afterwards; the report is still authoritative.
    Executed {
        report: CommitReport,
        clear_error: Option<String>,
    },
}

/// Execute `moves` in order. Failures are collected, not propagated.
/// Once `cancel` trips, every remaining move is recorded as interrupted.
pub fn execute_plan(fs: &dyn FileSystem, moves: &[MoveRecord], cancel: &CancelToken) -> CommitReport {
    let mut report = CommitReport::default();

    for (idx, record) in moves.iter().enumerate() {
        if cancel.is_cancelled() {
            warn!(remaining = moves.len() - idx, "commit interrupted; skipping remaining moves");
            let msg = FileMoverError::Interrupted.to_string();
            report
                .failed
                .extend(moves[idx..].iter().cloned().map(|m| (m, msg.clone())));
            break;
        }

        match execute_move(fs, record, cancel) {
            Ok(()) => report.succeeded.push(record.clone()),
            Err(e) => {
                error!(code = e.code(), kind = e.kind(), %record, error = %e, "move failed");
                report.failed.push((record.clone(), e.to_string()));
            }
        }
    }

    report
}

/// Remove the session record after a commit attempt. Goes straight to the
/// store so that an interrupted commit is still cleared.
pub fn clear_session<S: SessionStore>(manager: &SessionManager<S>) -> Result<()> {
    manager.store().delete()
}

/// Load the active session, execute its moves under its root, then clear it.
pub fn commit_session<S: SessionStore>(
    manager: &SessionManager<S>,
    cancel: &CancelToken,
) -> Result<CommitOutcome> {
    commit_session_with(manager, |root: &Path| LocalFileSystem::new(root), cancel)
}

/// Same as `commit_session`, with the filesystem built by `make_fs` from the session root.
pub fn commit_session_with<S, F, M>(
    manager: &SessionManager<S>,
    make_fs: M,
    cancel: &CancelToken,
) -> Result<CommitOutcome>
where
    S: SessionStore,
    F: FileSystem,
    M: FnOnce(&Path) -> F,
{
    let session = manager.get_active(cancel)?.ok_or(FileMoverError::NoActiveSession)?;

    if session.is_empty() {
        clear_session(manager)?;
        info!(id = %session.id, "nothing to commit; session cleared");
        return Ok(CommitOutcome::Empty);
    }

    let fs = make_fs(session.root_path.as_path());
    let report = execute_plan(&fs, &session.moves, cancel);

    // Files have already moved; a failed clear must not hide the report.
    let clear_error = match clear_session(manager) {
        Ok(()) => None,
        Err(e) => {
            error!(id = %session.id, code = e.code(), error = %e, "session record not cleared after commit");
            Some(e.to_string())
        }
    };

    info!(
        id = %session.id,
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        cleared = clear_error.is_none(),
        "commit finished"
    );
    Ok(CommitOutcome::Executed { report, clear_error })
}
