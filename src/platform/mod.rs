//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

mod temp;
#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

pub use temp::tmp_sibling_name;

#[cfg(unix)]
pub use unix::{open_log_file_secure_append, write_file_atomic};

#[cfg(not(unix))]
pub use windows::{open_log_file_secure_append, write_file_atomic};
