// SPDX-License-Identifier: MIT
//
// swatchbook — theme palettes and contrast checks from the command line.
//
// This is the binary that wires the crates together:
//
//   swatch-color → color spaces, parsing, CSS variable resolution
//   swatch-theme → palette generation, contrast metrics, pass reports
//
// Startup order matters: logging first so config loading can report,
// then the config file, then command-line overrides on top of it.
//
//   args ──▶ Cli ──┐
//   swatchbook.json ──▶ AppConfig ──▶ Command::run ──▶ JSON on stdout
//
// Exit codes: 0 success, 1 a `passes` check failed, 2 an error.

mod cli;
mod config;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::AppConfig;

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    config.apply_overrides(cli.metric, &cli.vars);

    match cli.command.run(&config, &mut io::stdout().lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("swatchbook: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
