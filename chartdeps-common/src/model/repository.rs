// chartdeps-common/src/model/repository.rs
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartDepsError, Result};

/// One configured chart repository. Credentials in the file are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub name: String,
    pub url: String,
}

/// The local repositories file (`repositories.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryFile {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

impl RepositoryFile {
    /// Reads the repositories file. A missing file is `ChartDepsError::NotFound`.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading repositories file {}", path.display());
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ChartDepsError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: RepositoryFile = serde_yaml::from_str(&raw)?;
        debug!("Loaded {} repositories", file.repositories.len());
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_entries_and_ignores_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repositories.yaml");
        fs::write(
            &path,
            "apiVersion: v1\nrepositories:\n  - name: stable\n    url: https://charts.example.com/stable\n    password: hunter2\n",
        )
        .unwrap();
        let file = RepositoryFile::load(&path).unwrap();
        assert_eq!(file.api_version, "v1");
        assert_eq!(
            file.repositories,
            vec![RepositoryEntry {
                name: "stable".to_string(),
                url: "https://charts.example.com/stable".to_string(),
            }]
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = RepositoryFile::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ChartDepsError::NotFound(_)));
    }

    #[test]
    fn empty_file_has_no_repositories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repositories.yaml");
        fs::write(&path, "").unwrap();
        assert!(RepositoryFile::load(&path).unwrap().repositories.is_empty());
    }
}
