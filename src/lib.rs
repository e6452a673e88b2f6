//! Core library for `file_mover`.
//!
//! Stage a batch of file moves inside one root directory, review them, then
//! commit or discard them as a group.
//!
//! - `session`: the persisted single-session slot and its lifecycle manager.
//! - `fs_ops`: root-scoped filesystem primitives plus move validation/execution.
//! - `commit`: best-effort batch execution that always clears the session.
//! - `commands`: the init/move/preview/commit/cancel operation surface.

pub mod cli;
pub mod commands;
pub mod commit;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod session;
pub mod shutdown;

pub use commands::{CommandResult, Operation};
pub use commit::{CommitOutcome, CommitReport};
pub use config::{Config, LogLevel, default_config_path, path_has_symlink_ancestor};
pub use errors::{FileMoverError, Result};
pub use fs_ops::{FileSystem, LocalFileSystem, execute_move, validate_move};
pub use session::{FileSessionStore, MoveRecord, Session, SessionManager, SessionStore};
pub use shutdown::CancelToken;
