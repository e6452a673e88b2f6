//! Rename helper used to publish a finished copy.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

pub(super) fn rename_into_place(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
