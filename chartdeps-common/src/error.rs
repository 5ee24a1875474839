use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ChartDepsError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("YAML Parsing Error: {0}")]
    Yaml(#[from] Arc<serde_yaml::Error>),

    #[error("JSON Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Failed to load chart '{0}': {1}")]
    ChartLoad(String, String),

    #[error("Chart metadata is malformed for chart {0}: {1}")]
    MalformedAnnotation(String, String),

    #[error("Resource Not Found: {0}")]
    NotFound(String),

    #[error("Rendering Error: {0}")]
    Render(String),

    #[error("Generic Error: {0}")]
    Generic(String),
}

impl From<std::io::Error> for ChartDepsError {
    fn from(err: std::io::Error) -> Self {
        ChartDepsError::Io(Arc::new(err))
    }
}

impl From<serde_yaml::Error> for ChartDepsError {
    fn from(err: serde_yaml::Error) -> Self {
        ChartDepsError::Yaml(Arc::new(err))
    }
}

impl From<serde_json::Error> for ChartDepsError {
    fn from(err: serde_json::Error) -> Self {
        ChartDepsError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ChartDepsError>;
