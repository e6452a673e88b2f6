use owo_colors::OwoColorize;

use crate::commands::CommandResult;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when the target stream is a TTY.
fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Print an operation result verbatim: successes to stdout, failures to
/// stderr. The text itself is never decorated so scripts and agents can
/// match on it; only the headline is colored on a TTY.
pub fn print_result(result: &CommandResult) {
    let body = result.details.as_deref().map(str::trim_end).filter(|d| !d.is_empty());
    if result.success {
        if stdout_is_tty() {
            println!("{}", result.message.green().bold());
        } else {
            println!("{}", result.message);
        }
        if let Some(d) = body {
            println!("\n{}", d);
        }
    } else {
        if stderr_is_tty() {
            eprintln!("{}", result.message.red().bold());
        } else {
            eprintln!("{}", result.message);
        }
        if let Some(d) = body {
            eprintln!("\n{}", d);
        }
    }
}
