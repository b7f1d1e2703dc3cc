//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing and that
//! record every call so tests can verify behavior.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Contributor, RepositorySummary};
use crate::domain::ports::{CommitActivity, HostingClient};
use crate::error::HostingError;

// ============================================================================
// Mock Hosting Client
// ============================================================================

/// A recorded call against the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub endpoint: &'static str,
    pub repo: String,
    pub token: Option<String>,
}

/// `HostingError` is not `Clone` (it wraps `reqwest::Error`), so stored
/// failures are copied variant by variant.
fn copy_error(e: &HostingError) -> HostingError {
    match e {
        HostingError::Api { status, message } => HostingError::Api {
            status: *status,
            message: message.clone(),
        },
        HostingError::RepoNotFound { owner, repo } => HostingError::RepoNotFound {
            owner: owner.clone(),
            repo: repo.clone(),
        },
        HostingError::RateLimited { status } => HostingError::RateLimited { status: *status },
        HostingError::Deserialization(msg) => HostingError::Deserialization(msg.clone()),
        HostingError::Request(e) => HostingError::Deserialization(e.to_string()),
    }
}

fn respond<T: Clone>(stored: &Result<T, HostingError>) -> Result<T, HostingError> {
    match stored {
        Ok(value) => Ok(value.clone()),
        Err(e) => Err(copy_error(e)),
    }
}

/// Mock hosting client
///
/// Defaults: metadata is missing (404), contributors are empty and the
/// activity series is ready but empty.
pub struct MockHostingClient {
    repo: Arc<RwLock<Option<Result<RepositorySummary, HostingError>>>>,
    contributors: Arc<RwLock<Result<Vec<Contributor>, HostingError>>>,
    activity: Arc<RwLock<Result<CommitActivity, HostingError>>>,
    calls: Arc<RwLock<Vec<MockCall>>>,
}

impl Default for MockHostingClient {
    fn default() -> Self {
        Self {
            repo: Arc::new(RwLock::new(None)),
            contributors: Arc::new(RwLock::new(Ok(Vec::new()))),
            activity: Arc::new(RwLock::new(Ok(CommitActivity::Ready(Vec::new())))),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl MockHostingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure repository metadata
    pub fn with_repo(self, summary: RepositorySummary) -> Self {
        *self.repo.write().unwrap() = Some(Ok(summary));
        self
    }

    /// Configure the metadata lookup to fail
    pub fn with_repo_error(self, error: HostingError) -> Self {
        *self.repo.write().unwrap() = Some(Err(error));
        self
    }

    pub fn with_contributors(self, contributors: Vec<Contributor>) -> Self {
        *self.contributors.write().unwrap() = Ok(contributors);
        self
    }

    pub fn with_contributors_error(self, error: HostingError) -> Self {
        *self.contributors.write().unwrap() = Err(error);
        self
    }

    pub fn with_activity(self, activity: CommitActivity) -> Self {
        *self.activity.write().unwrap() = Ok(activity);
        self
    }

    pub fn with_activity_error(self, error: HostingError) -> Self {
        *self.activity.write().unwrap() = Err(error);
        self
    }

    /// All calls made so far, in order of arrival
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str, owner: &str, repo: &str, token: Option<&str>) {
        self.calls.write().unwrap().push(MockCall {
            endpoint,
            repo: format!("{}/{}", owner, repo),
            token: token.map(|t| t.to_string()),
        });
    }
}

#[async_trait]
impl HostingClient for MockHostingClient {
    async fn get_repo(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<RepositorySummary, HostingError> {
        self.record("repo", owner, repo, token);

        match self.repo.read().unwrap().as_ref() {
            Some(stored) => respond(stored),
            None => Err(HostingError::RepoNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
        }
    }

    async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<Vec<Contributor>, HostingError> {
        self.record("contributors", owner, repo, token);
        respond(&*self.contributors.read().unwrap())
    }

    async fn get_commit_activity(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<CommitActivity, HostingError> {
        self.record("commit_activity", owner, repo, token);
        respond(&*self.activity.read().unwrap())
    }
}
