// chartdeps-core/src/dependency/status.rs
use std::fmt;
use std::path::Path;

use chartdeps_common::model::{Chart, ChartDependency};
use serde::{Serialize, Serializer};
use tracing::debug;

use super::archive::{self, ArchiveCandidate};
use super::constraint::VersionConstraint;
use super::version::{coerce_version, ArchiveOutcome};

/// Status of one declared dependency. The rendered strings are consumed by
/// other tools and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyStatus {
    Ok,
    Unpacked,
    Missing,
    WrongVersion,
    InvalidVersion,
    TooManyMatches,
    BadPattern,
}

impl DependencyStatus {
    pub const ALL: [DependencyStatus; 7] = [
        DependencyStatus::Ok,
        DependencyStatus::Unpacked,
        DependencyStatus::Missing,
        DependencyStatus::WrongVersion,
        DependencyStatus::InvalidVersion,
        DependencyStatus::TooManyMatches,
        DependencyStatus::BadPattern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyStatus::Ok => "ok",
            DependencyStatus::Unpacked => "unpacked",
            DependencyStatus::Missing => "missing",
            DependencyStatus::WrongVersion => "wrong version",
            DependencyStatus::InvalidVersion => "invalid version",
            DependencyStatus::TooManyMatches => "too many matches",
            DependencyStatus::BadPattern => "bad pattern",
        }
    }

    /// True for the two statuses that mean the dependency is present.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, DependencyStatus::Ok | DependencyStatus::Unpacked)
    }
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DependencyStatus {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A status plus a short human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResult {
    pub status: DependencyStatus,
    pub detail: Option<String>,
}

impl StatusResult {
    fn new(status: DependencyStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: Some(detail.into()),
        }
    }
}

/// Where a dependency was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A packaged archive under `charts/`.
    Archive(ArchiveCandidate),
    /// An expanded subchart in the loaded chart tree.
    Directory(&'a Chart),
    Unresolved,
}

/// Classifies one dependency of `parent`, whose files live at `chart_root`.
///
/// Archives are consulted first. A conclusive archive result ends the
/// decision; otherwise the loaded subcharts are searched by exact name.
pub fn classify(chart_root: &Path, dependency: &ChartDependency, parent: &Chart) -> StatusResult {
    let name = dependency.name.as_str();
    let resolution = match archive::lookup(chart_root, name) {
        ArchiveOutcome::BadPattern(e) => {
            return StatusResult::new(DependencyStatus::BadPattern, e);
        }
        ArchiveOutcome::Ambiguous(found) => {
            let tokens: Vec<&str> = found.iter().map(|c| c.version_token.as_str()).collect();
            return StatusResult::new(
                DependencyStatus::TooManyMatches,
                format!("{} versioned archives: {}", found.len(), tokens.join(", ")),
            );
        }
        ArchiveOutcome::Resolved(candidate) => Resolution::Archive(candidate),
        ArchiveOutcome::NoCandidates | ArchiveOutcome::Inconclusive(_) => {
            match parent.find_dependency(name) {
                Some(subchart) => Resolution::Directory(subchart),
                None => Resolution::Unresolved,
            }
        }
    };
    let result = classify_resolution(&resolution, dependency);
    debug!("{}: dependency '{}' is {}", parent.name(), name, result.status);
    result
}

pub fn classify_resolution(resolution: &Resolution<'_>, dependency: &ChartDependency) -> StatusResult {
    match resolution {
        // Accepted archives are not range-checked.
        Resolution::Archive(candidate) => StatusResult::new(
            DependencyStatus::Ok,
            candidate.path.display().to_string(),
        ),
        Resolution::Directory(subchart) => check_version(subchart.version(), &dependency.version),
        Resolution::Unresolved => StatusResult {
            status: DependencyStatus::Missing,
            detail: None,
        },
    }
}

fn check_version(concrete: &str, constraint: &str) -> StatusResult {
    if concrete == constraint {
        return StatusResult::new(DependencyStatus::Unpacked, concrete);
    }
    let constraint = match VersionConstraint::parse(constraint) {
        Ok(c) => c,
        Err(e) => return StatusResult::new(DependencyStatus::InvalidVersion, e.to_string()),
    };
    let version = match coerce_version(concrete) {
        Ok(v) => v,
        Err(e) => {
            return StatusResult::new(
                DependencyStatus::InvalidVersion,
                format!("subchart version '{concrete}': {e}"),
            );
        }
    };
    if constraint.matches(&version) {
        StatusResult::new(DependencyStatus::Unpacked, concrete)
    } else {
        StatusResult::new(
            DependencyStatus::WrongVersion,
            format!("found {concrete}, wanted {constraint}"),
        )
    }
}
