//! Real filesystem rooted at a session directory.
//!
//! Containment is checked twice: lexically (no `..` or absolute escapes) and
//! physically, by canonicalizing the deepest existing ancestor so that a
//! symlink inside the root cannot lead outside it.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::FileSystem;
use super::copy::safe_copy;
use super::helpers::io_error_with_help;
use super::resolve::resolve_within;
use crate::errors::{FileMoverError, Result};

#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Canonical form of the root; falls back to the root as given.
    fn physical_root(&self) -> PathBuf {
        dunce::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone())
    }
}

/// Canonicalize the longest existing prefix of `path` and re-append the rest.
fn physical_location(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut rest: Vec<&std::ffi::OsStr> = Vec::new();
    loop {
        if let Ok(canon) = dunce::canonicalize(existing) {
            return rest.iter().rev().fold(canon, |acc, seg| acc.join(seg));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name);
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// Two existing paths naming one file: same inode, or (off Unix) same canonical path.
/// Catches hard links and case-only differences on case-insensitive volumes.
#[cfg(unix)]
fn same_identity(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_identity(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

impl FileSystem for LocalFileSystem {
    fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, rel: &Path) -> Result<PathBuf> {
        let lexical = resolve_within(&self.root, rel)?;
        if !physical_location(&lexical).starts_with(self.physical_root()) {
            debug!(path = %lexical.display(), "path leaves the root through a link");
            return Err(FileMoverError::PathOutsideRoot(rel.display().to_string()));
        }
        Ok(lexical)
    }

    fn file_exists(&self, rel: &Path) -> Result<bool> {
        Ok(self.resolve(rel)?.is_file())
    }

    fn same_file(&self, a: &Path, b: &Path) -> Result<bool> {
        Ok(same_identity(&self.resolve(a)?, &self.resolve(b)?))
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        let src = self.resolve(src)?;
        let dst = self.resolve(dst)?;
        safe_copy(&src, &dst)
    }

    fn delete_file(&self, rel: &Path) -> Result<()> {
        let path = self.resolve(rel)?;
        fs::remove_file(&path).map_err(io_error_with_help("delete file", &path))?;
        debug!(path = %path.display(), "deleted");
        Ok(())
    }

    fn create_directory(&self, rel: &Path) -> Result<()> {
        let path = self.resolve(rel)?;
        fs::create_dir_all(&path).map_err(io_error_with_help("create directory", &path))
    }
}
