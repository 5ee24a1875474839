// chartdeps-common/src/model/mod.rs
pub mod chart;
pub mod repository;
pub mod shared;

// Re-export
pub use chart::{Chart, ChartDependency, ChartMetadata};
pub use repository::{RepositoryEntry, RepositoryFile};
pub use shared::{parse_shared_dependencies, SharedDependency};
