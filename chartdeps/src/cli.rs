// chartdeps/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::path::PathBuf;

use chartdeps_common::error::Result;
use chartdeps_common::Config;
use clap::{ArgAction, Parser, Subcommand};

pub mod dependency;
pub mod env;
pub mod repo;
pub mod shared_dependency;

use crate::cli::dependency::Dependency;
use crate::cli::env::Env;
use crate::cli::repo::Repo;
use crate::cli::shared_dependency::SharedDependency;
use crate::output::Style;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "chartdeps", bin_name = "chartdeps")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Namespace scope for this request
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_colors: bool,

    /// Disable emojis in table output
    #[arg(long, global = true)]
    pub no_emojis: bool,

    /// Path to the repositories file
    #[arg(long, global = true, value_name = "PATH")]
    pub repository_config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl CliArgs {
    /// Flags given on the command line win over the environment.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
        if let Some(path) = &self.repository_config {
            config.repository_config = path.clone();
        }
        config.debug |= self.debug;
        config.no_colors |= self.no_colors;
        config.no_emojis |= self.no_emojis;
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect the dependencies declared in a chart
    Dependency(Dependency),
    /// Inspect the shared dependencies annotated on a chart
    SharedDependency(SharedDependency),
    /// Inspect the configured chart repositories
    Repo(Repo),
    /// Print the effective configuration
    Env(Env),
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Dependency(command) => command.run(config),
            Self::SharedDependency(command) => command.run(config),
            Self::Repo(command) => command.run(config),
            Self::Env(command) => command.run(config),
        }
    }
}

pub(crate) fn style(config: &Config) -> Style {
    Style {
        colors: !config.no_colors,
        emojis: !config.no_emojis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_lookup(|name| match name {
            chartdeps_common::config::ENV_REPOSITORY_CONFIG => Some("/etc/chartdeps/repos.yaml".to_string()),
            chartdeps_common::config::ENV_REPOSITORY_CACHE => Some("/var/cache/chartdeps".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn parses_nested_list_commands() {
        let args = CliArgs::try_parse_from([
            "chartdeps",
            "shared-dependency",
            "list",
            "./mychart",
            "-o",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.command, Command::SharedDependency(_)));
    }

    #[test]
    fn flags_override_config() {
        let args = CliArgs::try_parse_from([
            "chartdeps",
            "-n",
            "kube-system",
            "--no-emojis",
            "--repository-config",
            "/tmp/repos.yaml",
            "env",
        ])
        .unwrap();
        let mut config = config();
        args.apply_overrides(&mut config);
        assert_eq!(config.namespace(), "kube-system");
        assert_eq!(config.repository_config(), std::path::Path::new("/tmp/repos.yaml"));
        assert!(config.no_emojis);
        assert!(!config.no_colors);
        assert!(!style(&config).emojis);
    }

    #[test]
    fn absent_flags_keep_config() {
        let args = CliArgs::try_parse_from(["chartdeps", "repo", "list"]).unwrap();
        let mut config = config();
        let before = config.clone();
        args.apply_overrides(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        assert!(CliArgs::try_parse_from(["chartdeps", "dependency", "list", ".", "-o", "xml"]).is_err());
    }
}
