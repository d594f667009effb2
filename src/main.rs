#![forbid(unsafe_code)]

mod cli;
mod config;
mod run;

use std::process::ExitCode;

use clap::{CommandFactory, Parser, error::ErrorKind};
use env_logger::Env;

use cli::Cli;
use config::{Config, Settings};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let mode = match cli.mode() {
        Ok(mode) => mode,
        Err(msg) => Cli::command().error(ErrorKind::ValueValidation, msg).exit(),
    };
    let file_cfg = match cli.config.as_deref().map(Config::load_from_path) {
        Some(Ok(cfg)) => cfg,
        Some(Err(e)) => return fatal(e),
        None => Config::default(),
    };
    let settings = Settings::resolve(&cli, &file_cfg);
    let palette = match run::load_palette(settings.palette.as_deref()) {
        Ok(p) => p,
        Err(e) => return fatal(e),
    };
    log::info!(
        "{:?} with {} worker(s), {:?} scan, {} palette color(s)",
        mode,
        settings.workers,
        settings.scan,
        palette.len()
    );

    let summary = match run::execute(&mode, &settings, &palette) {
        Ok(summary) => summary,
        Err(e) => return fatal(e),
    };
    println!(
        "tiles written {}, failed {}, absent chunks {}, empty columns {}, unknown blocks {}",
        summary.written,
        summary.failed,
        summary.absent_chunks,
        summary.empty_columns,
        summary.unknown_blocks
    );
    if summary.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn fatal(e: Box<dyn std::error::Error>) -> ExitCode {
    eprintln!("topview: {e}");
    ExitCode::from(2)
}
