//! scoredesk-client — scoring service access.
//!
//! Implements the `ScoringService` trait over HTTP for the real remote
//! service, provides an in-memory mock implementation for tests, and
//! loads the console configuration.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{load_config, load_config_from, ConsoleConfig};
pub use http::HttpScoringService;
pub use mock::MockScoringService;
