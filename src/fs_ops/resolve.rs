//! Resolving session-relative paths.
//! - Staged paths are joined onto the session root after lexical normalization.
//! - Anything that would land outside the root is refused: absolute paths,
//!   drive/UNC prefixes, and `..` segments climbing above the root.
//!
//! Notes:
//! - Purely lexical; symlinks inside the root are followed by the OS as usual.
//! - Works on paths that do not exist yet (destinations), unlike canonicalize.

use std::path::{Component, Path, PathBuf};

use crate::errors::{FileMoverError, Result};

/// Normalize `rel` and join it onto `root`, refusing escapes.
pub fn resolve_within(root: &Path, rel: &Path) -> Result<PathBuf> {
    Ok(root.join(normalize_relative(rel)?))
}

/// Lexically normalize a root-relative path; the result is non-empty and has
/// only normal components.
pub fn normalize_relative(rel: &Path) -> Result<PathBuf> {
    let outside = || FileMoverError::PathOutsideRoot(rel.display().to_string());

    if rel.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(outside());
    }

    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for comp in rel.components() {
        match comp {
            Component::Normal(seg) => parts.push(seg),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(outside());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(outside()),
        }
    }

    // "." or "a/.." name the root itself, which is never a file we move.
    if parts.is_empty() {
        return Err(outside());
    }

    Ok(parts.into_iter().collect())
}

/// Lexically normalize an absolute path: drop `.` and fold `..` without touching the disk.
pub fn normalize_absolute(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::ParentDir => {
                // Never pop past the root/prefix.
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}
