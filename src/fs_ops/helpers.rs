//! I/O helper utilities.
//!
//! Provides a small adapter that turns io::Error into `FileMoverError::Io`
//! with the operation, the path and a platform-aware hint in the message.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::FileMoverError;

/// Hint for a raw OS error code, if we have something useful to say.
#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
        libc::ENOENT => Some("path not found; it may have been moved or deleted since staging"),
        libc::EEXIST => Some("already exists"),
        libc::EISDIR => Some("is a directory; only regular files can be moved"),
        libc::ENOTDIR => Some("a parent component is not a directory"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EROFS => Some("read-only filesystem; cannot write here"),
        libc::EBUSY => Some("resource busy; ensure no other process is writing"),
        libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
        libc::ENAMETOOLONG => Some("filename or path too long"),
        _ => None,
    }
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),          // ERROR_ACCESS_DENIED
        2 | 3 => Some("path not found; it may have been moved or deleted since staging"),
        32 => Some("sharing violation; file is in use"),        // ERROR_SHARING_VIOLATION
        80 | 183 => Some("already exists"),
        112 => Some("insufficient disk space"),                 // ERROR_DISK_FULL
        206 => Some("filename or path too long"),               // ERROR_FILENAME_EXCED_RANGE
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted since staging"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = os_hint(code) {
                msg.push_str("; ");
                msg.push_str(hint);
            }
            msg.push_str(&format!(" [os code: {}]", code));
        }
        None => {
            if let Some(hint) = kind_hint(e.kind()) {
                msg.push_str("; ");
                msg.push_str(hint);
            }
        }
    }
    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> FileMoverError.
pub(crate) fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> FileMoverError + 'a {
    move |e: io::Error| FileMoverError::Io {
        op,
        path: path.to_path_buf(),
        message: build_message(op, path, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_gets_hint_and_path() {
        let e = io::Error::from(io::ErrorKind::NotFound);
        let err = io_error_with_help("copy file", Path::new("/r/a.txt"))(e);
        let msg = err.to_string();
        assert!(msg.starts_with("copy file '/r/a.txt'"), "{msg}");
        assert!(msg.contains("path not found"), "{msg}");
        assert!(matches!(err, FileMoverError::Io { op: "copy file", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_code_is_reported() {
        let e = io::Error::from_raw_os_error(libc::EACCES);
        let msg = io_error_with_help("delete file", Path::new("x"))(e).to_string();
        assert!(msg.contains("permission denied"), "{msg}");
        assert!(msg.contains(&format!("[os code: {}]", libc::EACCES)), "{msg}");
    }
}
