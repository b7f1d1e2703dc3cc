//! Analysis result entities
//!
//! An `AnalysisResult` is a single immutable snapshot built per request.
//! Statistics are always derived from the contributor list, never from the
//! weekly activity series; the two upstream sources may disagree.

use serde::{Deserialize, Serialize};

use super::repository::{Contributor, RepositorySummary, WeeklyActivity};

/// Statistics derived from the contributor list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_contributors: usize,
    pub total_commits: u64,
    /// Unrounded ratio; 0 when there are no contributors
    pub average_commits_per_contributor: f64,
}

impl AggregateStats {
    pub fn from_contributors(contributors: &[Contributor]) -> Self {
        let total_contributors = contributors.len();
        let total_commits: u64 = contributors.iter().map(|c| c.contributions).sum();
        let average_commits_per_contributor = if total_contributors > 0 {
            total_commits as f64 / total_contributors as f64
        } else {
            0.0
        };

        Self {
            total_contributors,
            total_commits,
            average_commits_per_contributor,
        }
    }
}

/// Everything handed to the presentation layer for one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: RepositorySummary,
    pub contributors: Vec<Contributor>,
    pub weekly_activity: Vec<WeeklyActivity>,
    pub stats: AggregateStats,
}

impl AnalysisResult {
    pub fn new(
        summary: RepositorySummary,
        contributors: Vec<Contributor>,
        weekly_activity: Vec<WeeklyActivity>,
    ) -> Self {
        let stats = AggregateStats::from_contributors(&contributors);
        Self {
            summary,
            contributors,
            weekly_activity,
            stats,
        }
    }
}
