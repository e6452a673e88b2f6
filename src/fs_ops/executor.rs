//! Validation and execution of a single staged move.
//!
//! Validation runs at staging time and only reflects the filesystem at that
//! moment; execution re-checks what it needs because files may change between
//! staging and commit.
//!
//! Execution order for one move:
//!   1) create the destination's parent directories
//!   2) delete an existing destination (overwrite only)
//!   3) copy source -> destination, then delete the source
//! A failure after step 3's copy leaves both files present; there is no rollback.

use std::path::Path;
use tracing::{debug, info};

use super::FileSystem;
use super::resolve::normalize_relative;
use crate::errors::{FileMoverError, Result};
use crate::session::MoveRecord;
use crate::shutdown::CancelToken;

/// Check a proposed move against the current filesystem state.
pub fn validate_move(fs: &dyn FileSystem, record: &MoveRecord, cancel: &CancelToken) -> Result<()> {
    let src = Path::new(record.source_path());
    let dst = Path::new(record.destination_path());

    // Containment first, so an escaping destination is reported as such even
    // when the source is also missing.
    fs.resolve(src)?;
    fs.resolve(dst)?;
    ensure_distinct(record)?;

    cancel.check()?;
    if !fs.file_exists(src)? {
        return Err(FileMoverError::SourceNotFound(record.source_path().to_string()));
    }

    cancel.check()?;
    if fs.file_exists(dst)? {
        ensure_not_same_file(fs, record, src, dst)?;
        if !record.overwrite() {
            return Err(FileMoverError::DestinationConflict(
                record.destination_path().to_string(),
            ));
        }
    }

    debug!(%record, overwrite = record.overwrite(), "move validated");
    Ok(())
}

/// Perform one move under `fs.root()`.
pub fn execute_move(fs: &dyn FileSystem, record: &MoveRecord, cancel: &CancelToken) -> Result<()> {
    let src = normalize_relative(Path::new(record.source_path()))?;
    let dst = normalize_relative(Path::new(record.destination_path()))?;
    ensure_distinct(record)?;

    // The source may have vanished since staging; check before touching the destination.
    cancel.check()?;
    if !fs.file_exists(&src)? {
        return Err(FileMoverError::SourceNotFound(record.source_path().to_string()));
    }

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        cancel.check()?;
        fs.create_directory(parent)?;
    }

    cancel.check()?;
    if fs.file_exists(&dst)? {
        ensure_not_same_file(fs, record, &src, &dst)?;
        if !record.overwrite() {
            return Err(FileMoverError::DestinationConflict(
                record.destination_path().to_string(),
            ));
        }
        cancel.check()?;
        fs.delete_file(&dst)?;
        debug!(dest = %dst.display(), "removed existing destination");
    }

    cancel.check()?;
    fs.copy_file(&src, &dst)?;
    cancel.check()?;
    fs.delete_file(&src)?;

    info!(%record, "moved");
    Ok(())
}

/// Different spellings of one file (case-only renames on case-insensitive
/// volumes, hard links): deleting the destination would delete the source.
fn ensure_not_same_file(fs: &dyn FileSystem, record: &MoveRecord, src: &Path, dst: &Path) -> Result<()> {
    if fs.same_file(src, dst)? {
        return Err(FileMoverError::SameFile(record.destination_path().to_string()));
    }
    Ok(())
}

/// Moving a file onto itself with overwrite would delete it; refuse up front.
fn ensure_distinct(record: &MoveRecord) -> Result<()> {
    let src = normalize_relative(Path::new(record.source_path()))?;
    let dst = normalize_relative(Path::new(record.destination_path()))?;
    if src == dst {
        return Err(FileMoverError::SameFile(record.destination_path().to_string()));
    }
    Ok(())
}
