//! Domain entities
//!
//! Pure domain models for repository analysis.

pub mod analysis;
pub mod repository;

pub use analysis::{AggregateStats, AnalysisResult};
pub use repository::{Contributor, RepoIdentifier, RepositorySummary, WeeklyActivity};
