// chartdeps-core/src/lib.rs
pub mod dependency;

// Re-export key types for easier use by the CLI crate
pub use dependency::{
    DependencyLister, DependencyReport, DependencyStatus, DependencyStatusRow, StatusResult,
};
