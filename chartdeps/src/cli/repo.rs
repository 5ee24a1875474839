use chartdeps_common::config::Config;
use chartdeps_common::error::{ChartDepsError, Result};
use chartdeps_common::model::{RepositoryEntry, RepositoryFile};
use clap::{Args, Subcommand};
use tracing::debug;

use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct Repo {
    #[command(subcommand)]
    pub command: RepoCommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoCommand {
    /// List the configured chart repositories
    #[command(visible_alias = "ls")]
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
}

impl Repo {
    pub fn run(&self, config: &Config) -> Result<()> {
        match &self.command {
            RepoCommand::List { output } => {
                let entries = configured_repositories(config, *output)?;
                output::print_repositories(&entries, *output, crate::cli::style(config))
            }
        }
    }
}

/// Repositories from the local repositories file. A missing file, or an empty
/// one when rendering a table, has nothing to show.
pub fn configured_repositories(config: &Config, format: OutputFormat) -> Result<Vec<RepositoryEntry>> {
    let file = match RepositoryFile::load(config.repository_config()) {
        Ok(file) => file,
        Err(ChartDepsError::NotFound(path)) => {
            debug!("No repositories file at {}", path);
            return Err(no_repositories());
        }
        Err(e) => return Err(e),
    };
    if file.repositories.is_empty() && format.is_table() {
        return Err(no_repositories());
    }
    Ok(file.repositories)
}

fn no_repositories() -> ChartDepsError {
    ChartDepsError::Generic("no repositories to show".to_string())
}
