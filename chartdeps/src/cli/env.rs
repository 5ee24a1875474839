use chartdeps_common::config::Config;
use chartdeps_common::error::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct Env {}

impl Env {
    pub fn run(&self, config: &Config) -> Result<()> {
        print!("{}", render(config));
        Ok(())
    }
}

/// `KEY="value"` lines, sorted by key.
pub fn render(config: &Config) -> String {
    config
        .env_vars()
        .iter()
        .map(|(key, value)| format!("{key}={value:?}\n"))
        .collect()
}
