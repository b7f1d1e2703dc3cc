//! Repository statistics handlers
//!
//! The analyze endpoint and the JSON shape handed to the browser UI.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::app::parse_repo_url;
use crate::domain::entities::{
    AggregateStats, AnalysisResult, Contributor, RepositorySummary, WeeklyActivity,
};
use crate::domain::ports::HostingClient;
use crate::error::AppError;
use crate::AppState;

/// Request to analyze a repository
#[derive(Debug, Deserialize)]
pub struct RepoStatsRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response for a repository analysis
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStatsResponse {
    pub repo: RepoSummaryResponse,
    pub contributors: Vec<ContributorResponse>,
    pub commit_activity: Vec<WeekResponse>,
    pub stats: StatsResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummaryResponse {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub watchers: u64,
    pub last_push: Option<DateTime<Utc>>,
}

/// Contributor fields keep the hosting API's names, which the UI expects
#[derive(Debug, Serialize)]
pub struct ContributorResponse {
    pub login: String,
    pub avatar_url: String,
    pub contributions: u64,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub total: u64,
    pub week: i64,
    pub days: [u64; 7],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_contributors: usize,
    pub total_commits: u64,
    /// Rendered with one decimal digit, e.g. "7.5"
    #[serde(serialize_with = "one_decimal")]
    pub average_commits: f64,
}

fn one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.1}", value))
}

impl From<RepositorySummary> for RepoSummaryResponse {
    fn from(s: RepositorySummary) -> Self {
        Self {
            name: s.name,
            description: s.description,
            stars: s.stars,
            forks: s.forks,
            open_issues: s.open_issues,
            watchers: s.watchers,
            last_push: s.last_push,
        }
    }
}

impl From<Contributor> for ContributorResponse {
    fn from(c: Contributor) -> Self {
        Self {
            login: c.login,
            avatar_url: c.avatar_url,
            contributions: c.contributions,
        }
    }
}

impl From<WeeklyActivity> for WeekResponse {
    fn from(w: WeeklyActivity) -> Self {
        Self {
            total: w.total,
            week: w.week,
            days: w.days,
        }
    }
}

impl From<AggregateStats> for StatsResponse {
    fn from(s: AggregateStats) -> Self {
        Self {
            total_contributors: s.total_contributors,
            total_commits: s.total_commits,
            average_commits: s.average_commits_per_contributor,
        }
    }
}

impl From<AnalysisResult> for RepoStatsResponse {
    fn from(r: AnalysisResult) -> Self {
        Self {
            repo: r.summary.into(),
            contributors: r.contributors.into_iter().map(|c| c.into()).collect(),
            commit_activity: r.weekly_activity.into_iter().map(|w| w.into()).collect(),
            stats: r.stats.into(),
        }
    }
}

/// POST /api/repo-stats
///
/// Analyze a GitHub repository by URL.
pub async fn analyze_repo<HC: HostingClient + 'static>(
    State(state): State<AppState<HC>>,
    payload: Result<Json<RepoStatsRequest>, JsonRejection>,
) -> Result<Json<RepoStatsResponse>, AppError> {
    let Json(request) = payload.map_err(body_error)?;

    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(AppError::MissingUrl)?;

    let id = parse_repo_url(url).ok_or_else(|| AppError::InvalidUrl(url.to_string()))?;

    tracing::info!(repo = %id, "Analyzing repository");

    let result = state
        .repo_stats_service
        .analyze(&id, state.config.github_token.as_deref())
        .await?;

    Ok(Json(result.into()))
}

/// A request without a JSON body carries no URL at all; any other
/// rejection means the body was present but unusable.
fn body_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::MissingUrl,
        other => AppError::InvalidBody(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_contributor, test_summary, test_week};

    fn stats_json(average: f64) -> serde_json::Value {
        serde_json::to_value(StatsResponse {
            total_contributors: 0,
            total_commits: 0,
            average_commits: average,
        })
        .unwrap()
    }

    #[test]
    fn average_has_one_decimal() {
        assert_eq!(stats_json(7.5)["averageCommits"], "7.5");
        assert_eq!(stats_json(13.0 / 3.0)["averageCommits"], "4.3");
        assert_eq!(stats_json(0.0)["averageCommits"], "0.0");
        assert_eq!(stats_json(12.0)["averageCommits"], "12.0");
    }

    #[test]
    fn response_uses_ui_field_names() {
        let result = AnalysisResult::new(
            test_summary("cat"),
            vec![test_contributor("a", 10), test_contributor("b", 5)],
            vec![test_week(1_700_006_400, 2)],
        );

        let json = serde_json::to_value(RepoStatsResponse::from(result)).unwrap();

        assert_eq!(json["repo"]["name"], "cat");
        assert_eq!(json["repo"]["openIssues"], 6);
        assert_eq!(json["repo"]["lastPush"], "2024-05-01T12:00:00Z");
        assert_eq!(json["contributors"][0]["login"], "a");
        assert_eq!(
            json["contributors"][0]["avatar_url"],
            "https://avatars.example.com/a.png"
        );
        assert_eq!(json["contributors"][1]["contributions"], 5);
        assert_eq!(json["commitActivity"][0]["total"], 2);
        assert_eq!(json["commitActivity"][0]["week"], 1_700_006_400i64);
        assert_eq!(
            json["commitActivity"][0]["days"],
            serde_json::json!([0, 2, 0, 0, 0, 0, 0])
        );
        assert_eq!(json["stats"]["totalContributors"], 2);
        assert_eq!(json["stats"]["totalCommits"], 15);
        assert_eq!(json["stats"]["averageCommits"], "7.5");
    }

    #[test]
    fn never_pushed_repo_has_null_last_push() {
        let mut summary = test_summary("fresh");
        summary.last_push = None;
        summary.description = None;

        let json = serde_json::to_value(RepoSummaryResponse::from(summary)).unwrap();

        assert!(json["lastPush"].is_null());
        assert!(json["description"].is_null());
    }

    #[test]
    fn request_without_url_deserializes() {
        let request: RepoStatsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.url.is_none());
    }
}
