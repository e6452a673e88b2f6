//! Operation surface: init, move, preview, commit, cancel.
//!
//! Each operation returns a `CommandResult` instead of an error so that any
//! host (the `fm` CLI, a tool-invocation wrapper) can present it verbatim.
//! Failure messages always start with `Error: `.

use std::fmt;
use std::path::Path;
use tracing::{debug, error};

use crate::commit::{CommitOutcome, commit_session};
use crate::errors::FileMoverError;
use crate::fs_ops::{LocalFileSystem, validate_move};
use crate::session::{MoveRecord, SessionManager, SessionStore};
use crate::shutdown::CancelToken;

/// Binary outcome of one operation plus its human-readable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CommandResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), details: None }
    }

    pub fn ok_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), details: Some(details.into()) }
    }

    pub fn failure(err: &FileMoverError) -> Self {
        Self { success: false, message: format!("Error: {err}"), details: None }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.details.as_deref().filter(|d| !d.is_empty()) {
            Some(details) => write!(f, "{}\n\n{}", self.message, details.trim_end()),
            None => f.write_str(&self.message),
        }
    }
}

/// A parsed request against the operation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `None` means the current working directory.
    Init { root: Option<String> },
    Move { source: String, destination: String, overwrite: bool },
    Preview,
    Commit,
    Cancel,
}

/// Dispatch one operation.
pub fn run<S: SessionStore>(manager: &SessionManager<S>, op: Operation, cancel: &CancelToken) -> CommandResult {
    match op {
        Operation::Init { root } => init(manager, root.as_deref().map(Path::new), cancel),
        Operation::Move { source, destination, overwrite } => {
            stage_move(manager, MoveRecord::new(source, destination, overwrite), cancel)
        }
        Operation::Preview => preview(manager, cancel),
        Operation::Commit => commit(manager, cancel),
        Operation::Cancel => cancel_session(manager, cancel),
    }
}

fn fail(op: &'static str, e: FileMoverError) -> CommandResult {
    if e.is_validation() {
        debug!(op, code = e.code(), kind = e.kind(), error = %e, "operation rejected");
    } else {
        error!(op, code = e.code(), kind = e.kind(), error = %e, "operation failed");
    }
    CommandResult::failure(&e)
}

pub fn init<S: SessionStore>(manager: &SessionManager<S>, root: Option<&Path>, cancel: &CancelToken) -> CommandResult {
    let root = root.unwrap_or_else(|| Path::new("."));
    match manager.create(root, cancel) {
        Ok(session) => CommandResult::ok(format!("Session initialized at: {}", session.root_path.display())),
        Err(e) => fail("init", e),
    }
}

/// Validate `record` against the active session's root, then append it.
pub fn stage_move<S: SessionStore>(manager: &SessionManager<S>, record: MoveRecord, cancel: &CancelToken) -> CommandResult {
    let session = match manager.get_active(cancel) {
        Ok(Some(s)) => s,
        Ok(None) => return fail("move", FileMoverError::NoActiveSession),
        Err(e) => return fail("move", e),
    };

    let fs = LocalFileSystem::new(&session.root_path);
    if let Err(e) = validate_move(&fs, &record, cancel) {
        return fail("move", e);
    }

    let message = format!("Staged move: {record}");
    match manager.add_move(record, cancel) {
        Ok(()) => CommandResult::ok(message),
        Err(e) => fail("move", e),
    }
}

pub fn preview<S: SessionStore>(manager: &SessionManager<S>, cancel: &CancelToken) -> CommandResult {
    let session = match manager.get_active(cancel) {
        Ok(Some(s)) => s,
        Ok(None) => return fail("preview", FileMoverError::NoActiveSession),
        Err(e) => return fail("preview", e),
    };

    if session.is_empty() {
        return CommandResult::ok_with_details(
            "No moves staged.",
            format!("Session initialized at: {}", session.root_path.display()),
        );
    }

    let mut details = String::new();
    details.push_str(&format!("Session: {}\n", session.root_path.display()));
    details.push_str(&format!("Created: {} UTC\n", session.created_at.format("%Y-%m-%d %H:%M:%S")));
    details.push_str("\nStaged moves:\n");
    for (i, record) in session.moves.iter().enumerate() {
        let flag = if record.overwrite() { " [OVERWRITE]" } else { "" };
        details.push_str(&format!("  {}. {}{}\n", i + 1, record, flag));
    }

    CommandResult::ok_with_details(format!("{} move(s) staged", session.moves.len()), details)
}

pub fn commit<S: SessionStore>(manager: &SessionManager<S>, cancel: &CancelToken) -> CommandResult {
    let (report, clear_error) = match commit_session(manager, cancel) {
        Ok(CommitOutcome::Empty) => return CommandResult::ok("No moves to commit. Session cleared."),
        Ok(CommitOutcome::Executed { report, clear_error }) => (report, clear_error),
        Err(e) => return fail("commit", e),
    };

    let mut details = String::new();
    if !report.succeeded.is_empty() {
        details.push_str(&format!("Successfully moved {} file(s):\n", report.succeeded.len()));
        for record in &report.succeeded {
            details.push_str(&format!("  ✓ {record}\n"));
        }
    }
    if !report.failed.is_empty() {
        if !details.is_empty() {
            details.push('\n');
        }
        details.push_str(&format!("Failed to move {} file(s):\n", report.failed.len()));
        for (record, reason) in &report.failed {
            details.push_str(&format!("  ✗ {record}: {reason}\n"));
        }
    }

    if let Some(e) = &clear_error {
        details.push_str(&format!("\nSession could not be cleared: {e}\n"));
    }

    if report.is_success() && clear_error.is_none() {
        CommandResult::ok_with_details(
            format!("Committed {} move(s) successfully", report.succeeded.len()),
            details,
        )
    } else {
        CommandResult {
            success: false,
            message: format!(
                "Completed with {} error(s)",
                report.failed.len() + usize::from(clear_error.is_some())
            ),
            details: Some(details),
        }
    }
}

pub fn cancel_session<S: SessionStore>(manager: &SessionManager<S>, cancel: &CancelToken) -> CommandResult {
    match manager.cancel(cancel) {
        Ok(()) => CommandResult::ok("Session cancelled. All staged moves discarded."),
        Err(e) => fail("cancel", e),
    }
}
