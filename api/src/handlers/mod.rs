//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod repo_stats;

pub use repo_stats::analyze_repo;
