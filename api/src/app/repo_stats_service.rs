//! Repository statistics service
//!
//! Runs the three upstream lookups for one repository and reconciles them
//! into a single `AnalysisResult`. Only the metadata lookup is required;
//! contributors and commit activity degrade to empty sequences when the
//! upstream refuses them.

use std::sync::Arc;

use crate::domain::entities::{AnalysisResult, Contributor, RepoIdentifier, WeeklyActivity};
use crate::domain::ports::{CommitActivity, HostingClient};
use crate::error::{AppError, HostingError};

/// Service for repository analysis
pub struct RepoStatsService<HC>
where
    HC: HostingClient,
{
    hosting: Arc<HC>,
}

impl<HC> RepoStatsService<HC>
where
    HC: HostingClient,
{
    pub fn new(hosting: Arc<HC>) -> Self {
        Self { hosting }
    }

    /// Analyze a repository
    ///
    /// Fails only when the metadata lookup fails. The three lookups run
    /// concurrently and are all awaited before stats are derived.
    pub async fn analyze(
        &self,
        id: &RepoIdentifier,
        credential: Option<&str>,
    ) -> Result<AnalysisResult, AppError> {
        let owner = id.owner.as_str();
        let repo = id.name.as_str();

        let (summary, contributors, activity) = tokio::join!(
            self.hosting.get_repo(owner, repo, credential),
            self.hosting.list_contributors(owner, repo, credential),
            self.hosting.get_commit_activity(owner, repo, credential),
        );

        let summary = summary?;
        let contributors = contributors_or_empty(id, contributors)?;
        let weekly_activity = weekly_activity_or_empty(id, activity);

        tracing::debug!(
            repo = %id,
            contributors = contributors.len(),
            weeks = weekly_activity.len(),
            "Repository analyzed"
        );

        Ok(AnalysisResult::new(summary, contributors, weekly_activity))
    }
}

/// Only an upstream refusal degrades to an empty list; transport and decode
/// failures are internal errors, same as for the metadata.
fn contributors_or_empty(
    id: &RepoIdentifier,
    contributors: Result<Vec<Contributor>, HostingError>,
) -> Result<Vec<Contributor>, AppError> {
    match contributors {
        Ok(contributors) => Ok(contributors),
        Err(e) => match e.upstream_status() {
            Some(status) => {
                tracing::warn!(repo = %id, status, "Contributors unavailable, using empty list");
                Ok(Vec::new())
            }
            None => Err(e.into()),
        },
    }
}

/// Collapse every non-ready activity outcome into an empty series.
///
/// The distinction between pending, empty and failed only reaches the logs.
fn weekly_activity_or_empty(
    id: &RepoIdentifier,
    activity: Result<CommitActivity, HostingError>,
) -> Vec<WeeklyActivity> {
    match activity {
        Ok(CommitActivity::Ready(weeks)) => weeks,
        Ok(CommitActivity::NotASequence) => {
            tracing::info!(
                repo = %id,
                "Commit activity payload is not a weekly series yet, returning empty activity"
            );
            Vec::new()
        }
        Ok(CommitActivity::Computing) => {
            tracing::info!(
                repo = %id,
                "Commit activity is being computed by GitHub (202 Accepted), returning empty activity"
            );
            Vec::new()
        }
        Ok(CommitActivity::NoContent) => {
            tracing::info!(
                repo = %id,
                "Commit activity has no content (204 No Content), returning empty activity"
            );
            Vec::new()
        }
        Err(e) => {
            tracing::error!(repo = %id, error = %e, "GitHub API error for commit activity");
            Vec::new()
        }
    }
}
