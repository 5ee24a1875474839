// chartdeps-core/src/dependency/version.rs
use semver::Version;
use tracing::debug;

use super::archive::ArchiveCandidate;

/// Result of looking for a packaged dependency under `charts/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// Nothing matched the name pattern.
    NoCandidates,
    /// One archive is authoritative.
    Resolved(ArchiveCandidate),
    /// More than one candidate carries a valid version.
    Ambiguous(Vec<ArchiveCandidate>),
    /// Several name matches, none with a valid version.
    Inconclusive(Vec<ArchiveCandidate>),
    /// The lookup pattern could not be built.
    BadPattern(String),
}

/// Picks the authoritative archive among the name matches for one dependency.
///
/// A lone match is accepted on its name alone, even if its version token does
/// not parse. Among several, the single one with a strict semantic version
/// wins; two or more such versions are ambiguous; none means the archives say
/// nothing about the version and the caller should look elsewhere.
pub fn disambiguate(mut candidates: Vec<ArchiveCandidate>) -> ArchiveOutcome {
    match candidates.len() {
        0 => ArchiveOutcome::NoCandidates,
        1 => ArchiveOutcome::Resolved(candidates.remove(0)),
        total => {
            let mut parsing: Vec<ArchiveCandidate> = candidates
                .iter()
                .filter(|c| c.parsed_version.is_some())
                .cloned()
                .collect();
            debug!(
                "{} archive candidates, {} with a valid version",
                total,
                parsing.len()
            );
            match parsing.len() {
                0 => ArchiveOutcome::Inconclusive(candidates),
                1 => ArchiveOutcome::Resolved(parsing.remove(0)),
                _ => ArchiveOutcome::Ambiguous(parsing),
            }
        }
    }
}

/// Parses a concrete chart version, tolerating a leading `v` and missing
/// minor/patch components (`v1.2` -> `1.2.0`).
pub fn coerce_version(raw: &str) -> Result<Version, semver::Error> {
    let strict_err = match Version::parse(raw) {
        Ok(v) => return Ok(v),
        Err(e) => e,
    };
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    let split_at = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split_at);
    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => trimmed.to_string(),
    };
    Version::parse(&padded).map_err(|_| strict_err)
}
