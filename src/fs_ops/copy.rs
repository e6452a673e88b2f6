//! Safe copy helper:
//! - Copies to a temp file in the destination directory
//! - Fsyncs the temp file so the data is durable before it becomes visible
//! - Renames temp -> dest, so readers never observe a half-written destination

use std::fs::{self, File};
use std::path::Path;
use tracing::trace;

use super::atomic::rename_into_place;
use super::helpers::io_error_with_help;
use super::util;
use crate::errors::{FileMoverError, Result};

/// Copy `src` to `dest` via a temp sibling. Replaces `dest` if present;
/// the overwrite policy is enforced by the caller.
pub fn safe_copy(src: &Path, dest: &Path) -> Result<()> {
    let dest_dir = dest.parent().ok_or_else(|| FileMoverError::Io {
        op: "copy file",
        path: dest.to_path_buf(),
        message: format!("destination has no parent: {}", dest.display()),
    })?;

    let tmp_path = util::unique_temp_path(dest_dir);

    let copied = fs::copy(src, &tmp_path)
        .map_err(io_error_with_help("copy file", src))
        .and_then(|bytes| {
            File::open(&tmp_path)
                .and_then(|f| f.sync_all())
                .map_err(io_error_with_help("sync temporary file", &tmp_path))?;
            Ok(bytes)
        });
    let bytes = match copied {
        Ok(b) => b,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
    };

    if let Err(e) = rename_into_place(&tmp_path, dest) {
        // Best-effort cleanup of the temp file on failure.
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("rename temporary file into place", dest)(e));
    }

    trace!(src = %src.display(), dest = %dest.display(), bytes, "copied");
    Ok(())
}
