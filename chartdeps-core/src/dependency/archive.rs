// chartdeps-core/src/dependency/archive.rs
use std::path::{Path, PathBuf};

use chartdeps_common::loader::{ARCHIVE_EXTENSION, CHARTS_DIR};
use glob::{Pattern, PatternError};
use semver::Version;
use tracing::{debug, warn};

use super::version::{disambiguate, ArchiveOutcome};

/// A packaged dependency found under `charts/`, split into its name and
/// version tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCandidate {
    pub path: PathBuf,
    pub name_token: String,
    pub version_token: String,
    /// `Some` only when `version_token` is a strict semantic version.
    pub parsed_version: Option<Version>,
}

impl ArchiveCandidate {
    pub fn from_path(path: PathBuf, name: &str) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = format!(".{ARCHIVE_EXTENSION}");
        let stem = file_name.strip_suffix(&suffix).unwrap_or(&file_name);
        let version_token = stem
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(stem)
            .to_string();
        let parsed_version = Version::parse(&version_token).ok();
        Self {
            path,
            name_token: name.to_string(),
            version_token,
            parsed_version,
        }
    }
}

/// Glob for `<chart_root>/charts/<name>-*.tgz`. Only `name` is treated as a
/// pattern; the chart root is escaped.
pub fn archive_pattern(chart_root: &Path, name: &str) -> String {
    let charts_dir = chart_root.join(CHARTS_DIR);
    format!(
        "{}/{}-*.{}",
        Pattern::escape(&charts_dir.to_string_lossy()),
        name,
        ARCHIVE_EXTENSION
    )
}

/// Archive files for `name`, sorted by path. An empty list is not an error.
pub fn locate_archives(chart_root: &Path, name: &str) -> Result<Vec<PathBuf>, PatternError> {
    let pattern = archive_pattern(chart_root, name);
    debug!("Looking for archives matching {}", pattern);
    let mut archives = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => archives.push(path),
            Ok(path) => debug!("Ignoring non-file match {}", path.display()),
            Err(e) => warn!("Unreadable entry while matching {}: {}", pattern, e),
        }
    }
    archives.sort();
    Ok(archives)
}

/// Locates and disambiguates the archives for one dependency.
pub fn lookup(chart_root: &Path, name: &str) -> ArchiveOutcome {
    match locate_archives(chart_root, name) {
        Ok(paths) => {
            let candidates = paths
                .into_iter()
                .map(|path| ArchiveCandidate::from_path(path, name))
                .collect();
            disambiguate(candidates)
        }
        Err(e) => {
            warn!("Bad archive pattern for dependency '{}': {}", name, e);
            ArchiveOutcome::BadPattern(e.to_string())
        }
    }
}
