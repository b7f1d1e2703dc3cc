//! GitHub adapter
//!
//! Implementation of the hosting client port against the GitHub REST API.

pub mod client;

pub use client::GitHubClientImpl;
