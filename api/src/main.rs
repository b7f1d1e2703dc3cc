//! repostats API Server
//!
//! Fetches public repository metadata from GitHub, derives a few statistics and
//! serves them as one JSON document for the browser UI.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::GitHubClientImpl;
use app::RepoStatsService;
use config::Config;
use domain::ports::HostingClient;

/// Application state shared across all handlers
pub struct AppState<HC: HostingClient> {
    pub repo_stats_service: Arc<RepoStatsService<HC>>,
    pub config: Config,
}

impl<HC: HostingClient> Clone for AppState<HC> {
    fn clone(&self) -> Self {
        Self {
            repo_stats_service: self.repo_stats_service.clone(),
            config: self.config.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router without rate limiting (which needs peer addresses)
pub fn app_router<HC: HostingClient + 'static>(state: AppState<HC>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        .route("/api/repo-stats", post(handlers::analyze_repo::<HC>))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,repostats_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting repostats API...");

    // Load configuration
    let config = Config::from_env();
    if !config.authenticated() {
        tracing::warn!("GITHUB_TOKEN not set, using unauthenticated GitHub rate limits");
    }

    // Create adapters
    let github = Arc::new(
        GitHubClientImpl::new(config.github_api_url.clone(), &config.user_agent)
            .context("Failed to build GitHub client")?,
    );

    // Create application services
    let repo_stats_service = Arc::new(RepoStatsService::new(github));

    let state = AppState {
        repo_stats_service,
        config: config.clone(),
    };

    // Uses PeerIpKeyExtractor to get client IP from socket connection
    // (SmartIpKeyExtractor requires X-Forwarded-For headers from reverse proxy)
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(config.rate_limit_period_secs)
            .burst_size(config.rate_limit_burst)
            .finish()
            .context("Failed to build governor config")?,
    );

    let app = app_router(state).layer(GovernorLayer {
        config: governor_config,
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
