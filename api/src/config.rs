use std::env;

/// Default upstream for repository lookups
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Clone)]
pub struct Config {
    /// Base URL of the GitHub REST API
    pub github_api_url: String,
    /// Optional token forwarded to GitHub on every request
    pub github_token: Option<String>,
    /// GitHub rejects requests without a User-Agent
    pub user_agent: String,
    pub port: u16,
    /// Seconds after which one request of a peer's quota is replenished
    pub rate_limit_period_secs: u64,
    /// Requests a peer may make back to back
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string()),
            github_token: non_empty(env::var("GITHUB_TOKEN").ok()),
            user_agent: env::var("GITHUB_USER_AGENT")
                .unwrap_or_else(|_| format!("repostats/{}", env!("CARGO_PKG_VERSION"))),
            port: parse_or(env::var("PORT").ok(), 5000),
            rate_limit_period_secs: parse_or(env::var("RATE_LIMIT_PERIOD_SECS").ok(), 1),
            rate_limit_burst: parse_or(env::var("RATE_LIMIT_BURST").ok(), 10),
        }
    }

    /// Check if a GitHub token is configured
    pub fn authenticated(&self) -> bool {
        self.github_token.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
