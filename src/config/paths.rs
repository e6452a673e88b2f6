//! Default path helpers and symlink checks.
//! Determines the OS-appropriate config path and detects symlinked ancestors for safety.

use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Config file location: `$FILE_MOVER_CONFIG` if set, else the OS config dir.
/// Relative env values are taken relative to the working directory.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        let p = PathBuf::from(p);
        return if p.is_absolute() {
            Some(p)
        } else {
            env::current_dir().ok().map(|cwd| cwd.join(p))
        };
    }
    if let Some(mut base) = config_dir() {
        base.push("file_mover");
        base.push("config.xml");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("file_mover")
                .join("config.xml")
        })
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn detects_symlinked_ancestor() {
        let td = tempdir().unwrap();
        // Canonicalize to avoid symlink ancestors like /var -> /private/var on macOS.
        let base = fs::canonicalize(td.path()).unwrap();
        let real = base.join("real");
        fs::create_dir_all(&real).unwrap();
        let link = base.join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert!(path_has_symlink_ancestor(&link.join("fm.log")).unwrap());
        assert!(!path_has_symlink_ancestor(&real.join("fm.log")).unwrap());
    }
}
