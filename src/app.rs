//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler, then
//! runs one operation against the persisted session and prints its result.

use anyhow::{Context, Result};
use clap::CommandFactory;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::debug;

use file_mover::cli::Args;
use file_mover::config::{CONFIG_ENV, load_config};
use file_mover::output as out;
use file_mover::{CancelToken, FileSessionStore, SessionManager, commands, default_config_path, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        print_locations(&args)?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut cfg = load_config(args.config.as_deref()).map_err(|e| {
        out::print_error(&format!("Failed to load config: {e:#}"));
        e
    })?;
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current step...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install signal handler")?;
    }

    let Some(command) = args.command.clone() else {
        Args::command().print_help().context("print help")?;
        println!();
        return Ok(ExitCode::SUCCESS);
    };

    debug!(?command, session_file = %cfg.session_file.display(), "starting fm");

    let manager = SessionManager::new(FileSessionStore::new(cfg.session_file.clone()));
    let result = commands::run(&manager, command.into_operation(), &CancelToken::new());
    out::print_result(&result);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    Ok(if result.success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn print_locations(args: &Args) -> Result<()> {
    let config_path = match args.config.clone() {
        Some(p) => Some(p),
        None => default_config_path(),
    };
    match &config_path {
        Some(p) if std::env::var_os(CONFIG_ENV).is_some() && args.config.is_none() => {
            out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}", p.display()));
        }
        Some(p) => {
            out::print_info(&format!("Config path:\n  {}", p.display()));
            if !p.exists() {
                out::print_info("No config file exists there; built-in defaults apply.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }

    let mut cfg = load_config(config_path.as_deref())?;
    args.apply_overrides(&mut cfg);
    out::print_info(&format!("Session file:\n  {}", cfg.session_file.display()));
    Ok(())
}
