//! GitHub API client implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::entities::{Contributor, RepositorySummary, WeeklyActivity};
use crate::domain::ports::{CommitActivity, HostingClient};
use crate::error::HostingError;

/// Implementation of the GitHub API client
pub struct GitHubClientImpl {
    http: Client,
    base_url: String,
}

impl GitHubClientImpl {
    pub fn new(base_url: String, user_agent: &str) -> Result<Self, HostingError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let http = Client::builder()
            .user_agent(user_agent.to_string())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.base_url,
            encode(owner),
            encode(repo),
            path
        )
    }

    fn get(&self, url: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.http.get(url);
        match token {
            Some(token) => request.header(AUTHORIZATION, format!("token {}", token)),
            None => request,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, HostingError> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| HostingError::Deserialization(e.to_string()))
        } else {
            Err(self.error_from_response(response).await)
        }
    }

    async fn error_from_response(&self, response: reqwest::Response) -> HostingError {
        let status = response.status();

        if is_rate_limited(&response) {
            return HostingError::RateLimited {
                status: status.as_u16(),
            };
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GitHubErrorBody>(&body)
            .ok()
            .map(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        HostingError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// GitHub signals an exhausted quota with 429, or 403 plus a zero remaining count
fn is_rate_limited(response: &reqwest::Response) -> bool {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }

    status == StatusCode::FORBIDDEN
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim() == "0")
            .unwrap_or(false)
}

/// Response types from GitHub API
#[derive(Deserialize)]
struct GitHubErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct GitHubRepoResponse {
    name: String,
    description: Option<String>,
    stargazers_count: u64,
    forks_count: u64,
    open_issues_count: u64,
    watchers_count: u64,
    pushed_at: Option<DateTime<Utc>>,
}

impl From<GitHubRepoResponse> for RepositorySummary {
    fn from(r: GitHubRepoResponse) -> Self {
        RepositorySummary {
            name: r.name,
            description: r.description,
            stars: r.stargazers_count,
            forks: r.forks_count,
            open_issues: r.open_issues_count,
            watchers: r.watchers_count,
            last_push: r.pushed_at,
        }
    }
}

#[derive(Deserialize)]
struct GitHubContributorResponse {
    login: String,
    #[serde(default)]
    avatar_url: String,
    contributions: u64,
}

impl From<GitHubContributorResponse> for Contributor {
    fn from(r: GitHubContributorResponse) -> Self {
        Contributor {
            login: r.login,
            avatar_url: r.avatar_url,
            contributions: r.contributions,
        }
    }
}

#[derive(Deserialize)]
struct GitHubWeekResponse {
    total: u64,
    week: i64,
    days: [u64; 7],
}

impl From<GitHubWeekResponse> for WeeklyActivity {
    fn from(r: GitHubWeekResponse) -> Self {
        WeeklyActivity {
            total: r.total,
            week: r.week,
            days: r.days,
        }
    }
}

#[async_trait]
impl HostingClient for GitHubClientImpl {
    async fn get_repo(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<RepositorySummary, HostingError> {
        let resp = self
            .get(&self.repo_url(owner, repo, ""), token)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(HostingError::RepoNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        }

        let repo: GitHubRepoResponse = self.handle_response(resp).await?;
        Ok(repo.into())
    }

    async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<Vec<Contributor>, HostingError> {
        let resp = self
            .get(&self.repo_url(owner, repo, "/contributors"), token)
            .send()
            .await?;

        // Empty repositories answer 204 with no body
        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let contributors: Vec<GitHubContributorResponse> = self.handle_response(resp).await?;
        Ok(contributors.into_iter().map(|c| c.into()).collect())
    }

    async fn get_commit_activity(
        &self,
        owner: &str,
        repo: &str,
        token: Option<&str>,
    ) -> Result<CommitActivity, HostingError> {
        let url = self.repo_url(owner, repo, "/stats/commit_activity");
        tracing::debug!(%url, "Fetching commit activity");

        let resp = self.get(&url, token).send().await?;
        let status = resp.status();
        tracing::debug!(%status, "Commit activity response");

        match status {
            StatusCode::ACCEPTED => Ok(CommitActivity::Computing),
            StatusCode::NO_CONTENT => Ok(CommitActivity::NoContent),
            s if s.is_success() => {
                let payload: serde_json::Value = resp
                    .json()
                    .await
                    .map_err(|e| HostingError::Deserialization(e.to_string()))?;

                if !payload.is_array() {
                    return Ok(CommitActivity::NotASequence);
                }

                let weeks: Vec<GitHubWeekResponse> = serde_json::from_value(payload)
                    .map_err(|e| HostingError::Deserialization(e.to_string()))?;
                Ok(CommitActivity::Ready(
                    weeks.into_iter().map(|w| w.into()).collect(),
                ))
            }
            _ => Err(self.error_from_response(resp).await),
        }
    }
}
