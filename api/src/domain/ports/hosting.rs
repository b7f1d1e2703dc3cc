//! Hosting client port trait
//!
//! Defines the interface for the repository-hosting API (GitHub).

use async_trait::async_trait;

use crate::domain::entities::{Contributor, RepositorySummary, WeeklyActivity};
use crate::error::HostingError;

/// Outcome of a commit-activity lookup
///
/// The upstream computes these statistics in the background, so a nominally
/// successful response may still carry no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitActivity {
    /// Weekly series, oldest week first
    Ready(Vec<WeeklyActivity>),
    /// 202 Accepted: statistics are being computed
    Computing,
    /// 204 No Content
    NoContent,
    /// Success status, but the payload was not a sequence
    NotASequence,
}

/// Port trait for hosting API operations
///
/// Every call takes the credential explicitly; `None` means unauthenticated.
#[async_trait]
pub trait HostingClient: Send + Sync {
    /// Fetch repository metadata
    async fn get_repo(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<RepositorySummary, HostingError>;

    /// List contributors in upstream order (first page only)
    async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<Vec<Contributor>, HostingError>;

    /// Fetch the weekly commit activity for the last year
    async fn get_commit_activity(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<CommitActivity, HostingError>;
}
