//! Unified error types for the repostats API
//!
//! This module defines error types for each layer:
//! - `HostingError`: GitHub API client errors
//! - `AppError`: Application layer errors (mapped onto HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Hosting API client errors
#[derive(Debug, Error)]
pub enum HostingError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Repository not found: {owner}/{repo}")]
    RepoNotFound { owner: String, repo: String },

    #[error("Rate limited ({status})")]
    RateLimited { status: u16 },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl HostingError {
    /// Status code reported by the upstream, if the upstream answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            HostingError::Api { status, .. } | HostingError::RateLimited { status } => {
                Some(*status)
            }
            HostingError::RepoNotFound { .. } => Some(404),
            HostingError::Request(_) | HostingError::Deserialization(_) => None,
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Hosting error: {0}")]
    Hosting(#[from] HostingError),

    #[error("GitHub URL is required")]
    MissingUrl,

    #[error("Invalid GitHub repository URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Upstream statuses outside the error range become a gateway error
fn upstream_status_code(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if code.is_client_error() || code.is_server_error() => code,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::MissingUrl => (
                StatusCode::BAD_REQUEST,
                "GitHub URL is required".to_string(),
                None,
            ),
            AppError::InvalidUrl(url) => (
                StatusCode::BAD_REQUEST,
                "Invalid GitHub repository URL".to_string(),
                Some(url.clone()),
            ),
            AppError::InvalidBody(reason) => {
                tracing::debug!(%reason, "Rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid request body".to_string(),
                    None,
                )
            }
            AppError::Hosting(e) => match e {
                HostingError::RepoNotFound { owner, repo } => {
                    tracing::info!(%owner, %repo, "Repository not found upstream");
                    (
                        StatusCode::NOT_FOUND,
                        "GitHub API Error: Not Found".to_string(),
                        Some(format!("{}/{}", owner, repo)),
                    )
                }
                HostingError::RateLimited { status } => {
                    tracing::warn!(status, "GitHub API rate limit exhausted");
                    (
                        upstream_status_code(*status),
                        "GitHub API Error: rate limit exceeded".to_string(),
                        None,
                    )
                }
                HostingError::Api { status, message } => {
                    tracing::warn!(status, %message, "GitHub API error");
                    (
                        upstream_status_code(*status),
                        format!("GitHub API Error: {}", message),
                        None,
                    )
                }
                // Transport and decode failures stay in the logs
                HostingError::Request(_) | HostingError::Deserialization(_) => {
                    tracing::error!("Hosting error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                        None,
                    )
                }
            },
        };

        let body = Json(ErrorResponse { error, details });

        (status, body).into_response()
    }
}
