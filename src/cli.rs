//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Global flags (`--session-file`, `--log-level`, ...) may appear before or after the subcommand.
//! - --debug is a shorthand for --log-level debug.
//! - Path arguments are sanitized: stray surrounding quotes from Windows shells are trimmed.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::commands::Operation;
use crate::config::types::{Config, LogLevel};

/// Stage file moves, review them, then commit or discard them as one batch.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fm",
    author,
    version,
    about = "Stage and execute file moves safely",
    after_help = "WORKFLOW:\n  1. fm init [path]       Start a new session\n  2. fm mv <src> <dst>    Stage file moves\n  3. fm preview           Review staged changes\n  4. fm commit            Execute all moves (or fm cancel to discard)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Override where the session record is stored.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub session_file: Option<PathBuf>,

    /// Read configuration from this XML file instead of the default location.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where fm looks for its config and session files, then exit.
    #[arg(long, help = "Print the config and session file locations and exit")]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize a session at PATH (default: current directory).
    Init {
        #[arg(value_name = "PATH", value_hint = ValueHint::DirPath)]
        path: Option<String>,
    },

    /// Stage a file move, relative to the session root.
    #[command(visible_alias = "move")]
    Mv {
        #[arg(value_name = "SOURCE", value_hint = ValueHint::FilePath)]
        source: String,
        #[arg(value_name = "DESTINATION", value_hint = ValueHint::FilePath)]
        destination: String,
        /// Replace the destination if it already exists.
        #[arg(long)]
        overwrite: bool,
    },

    /// Show all staged moves.
    Preview,

    /// Execute all staged moves and clear the session.
    Commit,

    /// Discard the session and all staged moves.
    Cancel,
}

impl Command {
    /// Map the parsed subcommand onto the operation surface, sanitizing paths.
    pub fn into_operation(self) -> Operation {
        match self {
            Command::Init { path } => Operation::Init {
                root: path.as_deref().map(|p| sanitize_str(p, true)),
            },
            Command::Mv { source, destination, overwrite } => Operation::Move {
                source: sanitize_str(&source, false),
                destination: sanitize_str(&destination, false),
                overwrite,
            },
            Command::Preview => Operation::Preview,
            Command::Commit => Operation::Commit,
            Command::Cancel => Operation::Cancel,
        }
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(p) = &self.session_file {
            cfg.session_file = p.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

/// Strip one pair of surrounding single/double quotes left behind by
/// PowerShell or CMD. Everything else is kept verbatim: spaces and embedded
/// quotes can be part of a file name. For directories, also drop ONE trailing
/// separator, unless it is the root (`/`) or a drive root (`C:\`).
fn sanitize_str(s: &str, is_dir: bool) -> String {
    let trimmed = s.trim();
    let mut inner = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        s.to_string()
    };

    if is_dir && inner.len() > 1 && (inner.ends_with('\\') || inner.ends_with('/')) {
        let without = &inner[..inner.len() - 1];
        if !without.ends_with(':') {
            inner.pop();
        }
    }
    inner
}

pub fn parse() -> Args {
    Args::parse()
}
