// chartdeps-common/src/config.rs
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{ChartDepsError, Result};

const DEFAULT_NAMESPACE: &str = "default";
const APP_DIR_NAME: &str = "chartdeps";
pub const DEFAULT_SHARED_DEPENDENCIES_ANNOTATION: &str = "hypper.cattle.io/shared-dependencies";

pub const ENV_NAMESPACE: &str = "CHARTDEPS_NAMESPACE";
pub const ENV_DEBUG: &str = "CHARTDEPS_DEBUG";
pub const ENV_NO_COLORS: &str = "CHARTDEPS_NOCOLORS";
pub const ENV_NO_EMOJIS: &str = "CHARTDEPS_NOEMOJIS";
pub const ENV_REPOSITORY_CONFIG: &str = "CHARTDEPS_REPOSITORY_CONFIG";
pub const ENV_REPOSITORY_CACHE: &str = "CHARTDEPS_REPOSITORY_CACHE";
pub const ENV_SHARED_DEPS_ANNOTATION: &str = "CHARTDEPS_SHARED_DEPS_ANNOTATION";

/// Process-wide settings. Loaded once and passed explicitly to every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub namespace: String,
    pub debug: bool,
    pub no_colors: bool,
    pub no_emojis: bool,
    pub repository_config: PathBuf,
    pub repository_cache: PathBuf,
    pub shared_dependencies_annotation: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading chartdeps configuration from environment");
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup. `load` uses the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let namespace = non_empty(ENV_NAMESPACE).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let debug = lookup(ENV_DEBUG).as_deref().map_or(false, parse_bool);
        let no_colors = lookup(ENV_NO_COLORS).as_deref().map_or(false, parse_bool);
        let no_emojis = lookup(ENV_NO_EMOJIS).as_deref().map_or(false, parse_bool);

        let repository_config = match non_empty(ENV_REPOSITORY_CONFIG) {
            Some(path) => PathBuf::from(path),
            None => default_config_dir()?.join("repositories.yaml"),
        };
        let repository_cache = match non_empty(ENV_REPOSITORY_CACHE) {
            Some(path) => PathBuf::from(path),
            None => default_cache_dir()?.join("repository"),
        };
        let shared_dependencies_annotation = non_empty(ENV_SHARED_DEPS_ANNOTATION)
            .unwrap_or_else(|| DEFAULT_SHARED_DEPENDENCIES_ANNOTATION.to_string());

        debug!(
            "Configuration loaded: namespace={}, repository_config={}",
            namespace,
            repository_config.display()
        );
        Ok(Self {
            namespace,
            debug,
            no_colors,
            no_emojis,
            repository_config,
            repository_cache,
            shared_dependencies_annotation,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn repository_config(&self) -> &Path {
        &self.repository_config
    }

    /// Effective settings keyed by the environment variable that controls each one.
    pub fn env_vars(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            (ENV_NAMESPACE, self.namespace.clone()),
            (ENV_DEBUG, self.debug.to_string()),
            (ENV_NO_COLORS, self.no_colors.to_string()),
            (ENV_NO_EMOJIS, self.no_emojis.to_string()),
            (
                ENV_REPOSITORY_CONFIG,
                self.repository_config.display().to_string(),
            ),
            (
                ENV_REPOSITORY_CACHE,
                self.repository_cache.display().to_string(),
            ),
            (
                ENV_SHARED_DEPS_ANNOTATION,
                self.shared_dependencies_annotation.clone(),
            ),
        ])
    }
}

/// Accepts 1/t/true and 0/f/false in any case. Anything else is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "t" | "true")
}

fn default_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            ChartDepsError::Config(format!(
                "could not determine the user config directory; set {ENV_REPOSITORY_CONFIG}"
            ))
        })
}

fn default_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            ChartDepsError::Config(format!(
                "could not determine the user cache directory; set {ENV_REPOSITORY_CACHE}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned()).unwrap()
    }

    const PATHS: [(&str, &str); 2] = [
        (ENV_REPOSITORY_CONFIG, "/tmp/chartdeps/repositories.yaml"),
        (ENV_REPOSITORY_CACHE, "/tmp/chartdeps/cache"),
    ];

    #[test]
    fn defaults_when_variables_are_unset() {
        let config = config_from(&PATHS);
        assert_eq!(config.namespace(), "default");
        assert!(!config.debug);
        assert!(!config.no_colors);
        assert!(!config.no_emojis);
        assert_eq!(
            config.shared_dependencies_annotation,
            DEFAULT_SHARED_DEPENDENCIES_ANNOTATION
        );
        assert_eq!(
            config.repository_config(),
            Path::new("/tmp/chartdeps/repositories.yaml")
        );
    }

    #[test]
    fn reads_overrides_from_lookup() {
        let mut vars = PATHS.to_vec();
        vars.extend([
            (ENV_NAMESPACE, "kube-system"),
            (ENV_DEBUG, "TRUE"),
            (ENV_NO_COLORS, "1"),
            (ENV_NO_EMOJIS, "t"),
            (ENV_SHARED_DEPS_ANNOTATION, "example.com/shared"),
        ]);
        let config = config_from(&vars);
        assert_eq!(config.namespace(), "kube-system");
        assert!(config.debug);
        assert!(config.no_colors);
        assert!(config.no_emojis);
        assert_eq!(config.shared_dependencies_annotation, "example.com/shared");
    }

    #[test]
    fn empty_namespace_falls_back_to_default() {
        let mut vars = PATHS.to_vec();
        vars.push((ENV_NAMESPACE, ""));
        assert_eq!(config_from(&vars).namespace(), "default");
    }

    #[test]
    fn parse_bool_spellings() {
        for yes in ["1", "t", "T", "true", "True", "TRUE"] {
            assert!(parse_bool(yes), "{yes} should be true");
        }
        for no in ["0", "f", "false", "FALSE", "yes", ""] {
            assert!(!parse_bool(no), "{no} should be false");
        }
    }

    #[test]
    fn env_vars_are_sorted_and_complete() {
        let config = config_from(&PATHS);
        let vars = config.env_vars();
        let keys: Vec<_> = vars.keys().copied().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(vars.len(), 7);
        assert_eq!(vars[ENV_NAMESPACE], "default");
        assert_eq!(vars[ENV_REPOSITORY_CACHE], "/tmp/chartdeps/cache");
    }
}
