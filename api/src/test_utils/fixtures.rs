//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{TimeZone, Utc};

use crate::config::{Config, DEFAULT_GITHUB_API_URL};
use crate::domain::entities::{Contributor, RepositorySummary, WeeklyActivity};

/// Create a config, optionally carrying a GitHub token
pub fn test_config(github_token: Option<&str>) -> Config {
    Config {
        github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
        github_token: github_token.map(|t| t.to_string()),
        user_agent: "repostats-test".to_string(),
        port: 0,
        rate_limit_period_secs: 1,
        rate_limit_burst: 10,
    }
}

/// Create repository metadata with default counts
pub fn test_summary(name: &str) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        description: Some(format!("The {} repository", name)),
        stars: 120,
        forks: 14,
        open_issues: 6,
        watchers: 120,
        last_push: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single(),
    }
}

/// Create a contributor with a given number of contributions
pub fn test_contributor(login: &str, contributions: u64) -> Contributor {
    Contributor {
        login: login.to_string(),
        avatar_url: format!("https://avatars.example.com/{}.png", login),
        contributions,
    }
}

/// Create a week whose commits all land on Monday
pub fn test_week(week: i64, total: u64) -> WeeklyActivity {
    WeeklyActivity {
        total,
        week,
        days: [0, total, 0, 0, 0, 0, 0],
    }
}
