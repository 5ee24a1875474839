use chartdeps_common::config::Config;
use chartdeps_common::error::Result;
use chartdeps_core::{DependencyLister, DependencyReport};
use clap::{Args, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::cli::dependency::{report_rows, ChartListArgs};

#[derive(Args, Debug)]
pub struct SharedDependency {
    #[command(subcommand)]
    pub command: SharedDependencyCommand,
}

#[derive(Subcommand, Debug)]
pub enum SharedDependencyCommand {
    /// List the shared dependencies of a chart and whether they are satisfied
    #[command(visible_alias = "ls")]
    List(ChartListArgs),
}

impl SharedDependency {
    pub fn run(&self, config: &Config) -> Result<()> {
        match &self.command {
            SharedDependencyCommand::List(args) => list(args, config),
        }
    }
}

fn list(args: &ChartListArgs, config: &Config) -> Result<()> {
    debug!(
        "Listing shared dependencies of {} (annotation {})",
        args.chart.display(),
        config.shared_dependencies_annotation
    );
    let report = DependencyLister::new(config).list_shared(&args.chart)?;
    if report == DependencyReport::NoSharedDependencies {
        eprintln!(
            "{}",
            format!("WARNING: no shared dependencies in {}", args.chart.display()).yellow()
        );
    }
    report_rows(&report, true, args.output, config)
}
