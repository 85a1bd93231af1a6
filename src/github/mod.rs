// GitHub API module.
// Provides the HTTP client, typed endpoint wrappers, and response types.

#![allow(dead_code)]

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::GitHub;
pub use types::*;
