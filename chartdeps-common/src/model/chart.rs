// chartdeps-common/src/model/chart.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ChartDepsError, Result};

/// A dependency declared in the `dependencies` list of `Chart.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDependency {
    pub name: String,
    /// Version constraint in range syntax. Empty means any version.
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl ChartDependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            repository: None,
        }
    }
}

/// The contents of `Chart.yaml`. Fields the resolver does not read are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    #[serde(default)]
    pub api_version: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ChartDependency>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ChartMetadata {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ChartDepsError::ChartLoad(
                "Chart.yaml".to_string(),
                "chart.metadata.name is required".to_string(),
            ));
        }
        if let Some(index) = self.dependencies.iter().position(|d| d.name.is_empty()) {
            return Err(ChartDepsError::ChartLoad(
                self.name.clone(),
                format!("dependency #{} has an empty name", index + 1),
            ));
        }
        Ok(())
    }
}

/// A loaded chart together with the subcharts expanded or packaged under its
/// `charts/` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub metadata: ChartMetadata,
    pub dependencies: Vec<Chart>,
}

impl Chart {
    pub fn new(metadata: ChartMetadata) -> Self {
        Self {
            metadata,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, subchart: Chart) -> Self {
        self.dependencies.push(subchart);
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    /// Subcharts loaded from `charts/`, in load order.
    pub fn dependencies(&self) -> &[Chart] {
        &self.dependencies
    }

    /// Dependencies declared in `Chart.yaml`, in declaration order.
    pub fn declared_dependencies(&self) -> &[ChartDependency] {
        &self.metadata.dependencies
    }

    /// Finds the subchart whose name equals `name` exactly.
    pub fn find_dependency(&self, name: &str) -> Option<&Chart> {
        self.dependencies.iter().find(|c| c.name() == name)
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata.annotations.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(name: &str, version: &str) -> Chart {
        Chart::new(ChartMetadata {
            name: name.to_string(),
            version: version.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn find_dependency_requires_exact_name() {
        let parent = chart("parent", "1.0.0").with_dependency(chart("first-chart-second-chart", "0.1.0"));
        assert!(parent.find_dependency("first-chart").is_none());
        assert!(parent.find_dependency("first-chart-second-chart").is_some());
    }

    #[test]
    fn metadata_parses_camel_case_yaml() {
        let yaml = r#"
apiVersion: v2
name: wordpress
version: 9.0.3
dependencies:
  - name: mariadb
    version: 7.x.x
    repository: https://charts.example.com
  - name: memcached
annotations:
  example.com/owner: web
"#;
        let metadata: ChartMetadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(metadata.api_version, "v2");
        assert_eq!(metadata.dependencies.len(), 2);
        assert_eq!(
            metadata.dependencies[0].repository.as_deref(),
            Some("https://charts.example.com")
        );
        assert_eq!(metadata.dependencies[1].version, "");
        assert_eq!(metadata.annotations["example.com/owner"], "web");
        assert!(metadata.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_names() {
        let mut metadata = ChartMetadata {
            name: " ".to_string(),
            ..Default::default()
        };
        assert!(metadata.validate().is_err());

        metadata.name = "ok".to_string();
        metadata.dependencies.push(ChartDependency::new("", "1.0.0"));
        let err = metadata.validate().unwrap_err();
        assert!(err.to_string().contains("dependency #1"));
    }
}
