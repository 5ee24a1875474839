// chartdeps-common/src/model/shared.rs
//! Shared dependencies carried in a chart annotation rather than in the
//! `dependencies` list.
//!
//! The annotation value is a YAML document. Only one shape is accepted: a
//! sequence of mappings with a required `name` and optional `version`,
//! `repository` and `namespace`. Anything else, including differently cased
//! keys, is reported as malformed instead of being coerced.

use serde::{Deserialize, Serialize};

use crate::error::{ChartDepsError, Result};
use crate::model::chart::ChartDependency;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedDependency {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl SharedDependency {
    pub fn as_dependency(&self) -> ChartDependency {
        ChartDependency {
            name: self.name.clone(),
            version: self.version.clone(),
            repository: self.repository.clone(),
        }
    }
}

/// Parses the raw annotation value. `chart_ref` only names the chart in errors.
///
/// A blank value is an empty list.
pub fn parse_shared_dependencies(raw: &str, chart_ref: &str) -> Result<Vec<SharedDependency>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let deps: Vec<SharedDependency> = serde_yaml::from_str(raw)
        .map_err(|e| ChartDepsError::MalformedAnnotation(chart_ref.to_string(), e.to_string()))?;
    if let Some(index) = deps.iter().position(|d| d.name.trim().is_empty()) {
        return Err(ChartDepsError::MalformedAnnotation(
            chart_ref.to_string(),
            format!("shared dependency #{} has an empty name", index + 1),
        ));
    }
    Ok(deps)
}
