//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod repo_stats_service;
pub mod url_parser;

pub use repo_stats_service::RepoStatsService;
pub use url_parser::parse_repo_url;
