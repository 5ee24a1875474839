// chartdeps/src/main.rs
use std::process;

use chartdeps_common::config::Config;
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;

use cli::CliArgs;

fn main() {
    let cli_args = CliArgs::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            process::exit(1);
        }
    };
    cli_args.apply_overrides(&mut config);

    if config.no_colors {
        colored::control::set_override(false);
    }

    let level_filter = match (cli_args.verbose, config.debug) {
        (0, false) => LevelFilter::INFO,
        (0, true) | (1, _) => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("CHARTDEPS_LOG")
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(!config.no_colors)
        .without_time()
        .try_init();

    debug!("Effective namespace: {}", config.namespace());

    if let Err(e) = cli_args.command.run(&config) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}
