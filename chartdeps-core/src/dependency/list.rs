// chartdeps-core/src/dependency/list.rs
use std::path::Path;

use chartdeps_common::config::Config;
use chartdeps_common::error::Result;
use chartdeps_common::loader;
use chartdeps_common::model::{parse_shared_dependencies, Chart, ChartDependency};
use serde::Serialize;
use tracing::debug;

use super::status::{classify, DependencyStatus};

/// One row of a dependency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyStatusRow {
    pub name: String,
    pub version: String,
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub status: DependencyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyReport {
    /// One row per declared dependency, in declaration order.
    Listed {
        rows: Vec<DependencyStatusRow>,
        /// Subcharts present under `charts/` that nothing declares.
        undeclared: Vec<String>,
    },
    /// The chart declares no regular dependencies.
    NoDependencies,
    /// The chart carries no shared-dependencies annotation.
    NoSharedDependencies,
}

impl DependencyReport {
    pub fn rows(&self) -> &[DependencyStatusRow] {
        match self {
            DependencyReport::Listed { rows, .. } => rows,
            _ => &[],
        }
    }
}

/// Lists dependency statuses for charts on disk.
pub struct DependencyLister<'a> {
    config: &'a Config,
}

impl<'a> DependencyLister<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Statuses of the dependencies declared in `Chart.yaml`.
    pub fn list(&self, chart_path: &Path) -> Result<DependencyReport> {
        let chart = loader::load(chart_path)?;
        let declared = chart.declared_dependencies();
        if declared.is_empty() {
            debug!("{} declares no dependencies", chart.name());
            return Ok(DependencyReport::NoDependencies);
        }
        let rows = declared
            .iter()
            .map(|dep| status_row(chart_path, &chart, dep, None))
            .collect();
        Ok(DependencyReport::Listed {
            rows,
            undeclared: undeclared_subcharts(&chart),
        })
    }

    /// Statuses of the dependencies listed in the shared-dependencies annotation.
    pub fn list_shared(&self, chart_path: &Path) -> Result<DependencyReport> {
        let chart = loader::load(chart_path)?;
        let key = self.config.shared_dependencies_annotation.as_str();
        let Some(raw) = chart.annotation(key) else {
            debug!("{} has no '{}' annotation", chart.name(), key);
            return Ok(DependencyReport::NoSharedDependencies);
        };
        let shared = parse_shared_dependencies(raw, &chart_path.display().to_string())?;
        let rows = shared
            .iter()
            .map(|dep| status_row(chart_path, &chart, &dep.as_dependency(), dep.namespace.clone()))
            .collect();
        Ok(DependencyReport::Listed {
            rows,
            undeclared: Vec::new(),
        })
    }
}

fn status_row(
    chart_path: &Path,
    chart: &Chart,
    dependency: &ChartDependency,
    namespace: Option<String>,
) -> DependencyStatusRow {
    let result = classify(chart_path, dependency, chart);
    DependencyStatusRow {
        name: dependency.name.clone(),
        version: dependency.version.clone(),
        repository: dependency.repository.clone(),
        namespace,
        status: result.status,
        detail: result.detail,
    }
}

/// Names of loaded subcharts with no matching declaration, in load order.
pub fn undeclared_subcharts(chart: &Chart) -> Vec<String> {
    chart
        .dependencies()
        .iter()
        .filter(|sub| !chart.declared_dependencies().iter().any(|d| d.name == sub.name()))
        .map(|sub| sub.name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use chartdeps_common::model::ChartMetadata;

    use super::*;

    #[test]
    fn undeclared_lists_only_unknown_subcharts() {
        let sub = |name: &str| {
            Chart::new(ChartMetadata {
                name: name.to_string(),
                version: "1.0.0".to_string(),
                ..Default::default()
            })
        };
        let parent = Chart::new(ChartMetadata {
            name: "parent".to_string(),
            version: "1.0.0".to_string(),
            dependencies: vec![ChartDependency::new("redis", "1.x")],
            ..Default::default()
        })
        .with_dependency(sub("redis"))
        .with_dependency(sub("stray"));
        assert_eq!(undeclared_subcharts(&parent), vec!["stray".to_string()]);
    }

    #[test]
    fn rows_of_non_listed_reports_are_empty() {
        assert!(DependencyReport::NoDependencies.rows().is_empty());
        assert!(DependencyReport::NoSharedDependencies.rows().is_empty());
    }
}
