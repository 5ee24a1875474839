// chartdeps-common/src/lib.rs
pub mod config;
pub mod error;
pub mod loader;
pub mod model;

// Re-export key types
pub use config::Config;
pub use error::{ChartDepsError, Result};
pub use model::{Chart, ChartDependency, ChartMetadata};
