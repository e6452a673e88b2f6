use anyhow::Result;
use std::process::ExitCode;

mod app;
mod logging;

fn main() -> Result<ExitCode> {
    let args = file_mover::cli::parse();
    app::run(args)
}
