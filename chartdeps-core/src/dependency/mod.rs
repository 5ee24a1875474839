// chartdeps-core/src/dependency/mod.rs
pub mod archive;
pub mod constraint;
pub mod list;
pub mod status;
pub mod version;

pub use archive::ArchiveCandidate;
pub use constraint::{ConstraintError, VersionConstraint};
pub use list::{DependencyLister, DependencyReport, DependencyStatusRow};
pub use status::{classify, DependencyStatus, Resolution, StatusResult};
pub use version::{disambiguate, ArchiveOutcome};
