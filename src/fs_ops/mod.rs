//! Filesystem operations: modularized.
//! - `FileSystem` is the narrow, root-scoped interface the executor calls through.
//! - `LocalFileSystem` is the real implementation with containment checks.
//! - `executor` validates and performs individual staged moves.

mod atomic;
mod copy;
pub mod executor;
mod helpers;
mod local;
pub mod resolve;
mod util;

pub use copy::safe_copy;
pub use executor::{execute_move, validate_move};
pub use local::LocalFileSystem;
pub use resolve::{normalize_absolute, normalize_relative, resolve_within};

use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Root-scoped file primitives. Every `rel` argument is relative to `root()`;
/// implementations must refuse paths that escape the root.
pub trait FileSystem {
    /// Absolute root all relative paths resolve against.
    fn root(&self) -> &Path;

    /// Absolute location of `rel`, or `PathOutsideRoot`.
    fn resolve(&self, rel: &Path) -> Result<PathBuf> {
        resolve_within(self.root(), rel)
    }

    /// True when `rel` names an existing regular file.
    fn file_exists(&self, rel: &Path) -> Result<bool>;

    /// True when `a` and `b` name the same existing file, even through
    /// different spellings. The default compares resolved paths only.
    fn same_file(&self, a: &Path, b: &Path) -> Result<bool> {
        Ok(self.resolve(a)? == self.resolve(b)?)
    }

    /// Copy `src` to `dst`, replacing `dst` if it exists.
    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()>;

    fn delete_file(&self, rel: &Path) -> Result<()>;

    /// Create `rel` and any missing parents; existing directories are fine.
    fn create_directory(&self, rel: &Path) -> Result<()>;
}
