use std::path::PathBuf;

use chartdeps_common::config::Config;
use chartdeps_common::error::Result;
use chartdeps_core::{DependencyLister, DependencyReport};
use clap::{Args, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct Dependency {
    #[command(subcommand)]
    pub command: DependencyCommand,
}

#[derive(Subcommand, Debug)]
pub enum DependencyCommand {
    /// List the dependencies of a chart and whether they are satisfied
    #[command(visible_alias = "ls")]
    List(ChartListArgs),
}

/// Arguments shared by the chart listing commands.
#[derive(Args, Debug)]
pub struct ChartListArgs {
    /// Chart directory or packaged .tgz
    pub chart: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl Dependency {
    pub fn run(&self, config: &Config) -> Result<()> {
        match &self.command {
            DependencyCommand::List(args) => list(args, config),
        }
    }
}

fn list(args: &ChartListArgs, config: &Config) -> Result<()> {
    debug!("Listing dependencies of {}", args.chart.display());
    let report = DependencyLister::new(config).list(&args.chart)?;
    match &report {
        DependencyReport::NoDependencies => {
            eprintln!(
                "{}",
                format!("WARNING: no dependencies at {}", args.chart.display()).yellow()
            );
        }
        DependencyReport::Listed { undeclared, .. } => {
            for name in undeclared {
                eprintln!(
                    "{}",
                    format!("WARNING: {name:?} is not in Chart.yaml.").yellow()
                );
            }
        }
        DependencyReport::NoSharedDependencies => {}
    }
    report_rows(&report, false, args.output, config)
}

/// Prints the rows of `report`. Table output is skipped when there is nothing
/// to show; the machine formats always print a list.
pub(crate) fn report_rows(
    report: &DependencyReport,
    with_namespace: bool,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    if format.is_table() && !matches!(report, DependencyReport::Listed { .. }) {
        return Ok(());
    }
    output::print_rows(report.rows(), with_namespace, format, crate::cli::style(config))
}
