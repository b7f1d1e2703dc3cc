//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models for repositories and their statistics
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
