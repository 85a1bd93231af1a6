// GitHub API response types.
// Defines structs for deserializing GitHub REST API responses. Fields the
// API may omit default instead of failing the whole document.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// GitHub user profile.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// GitHub repository, as returned by the repos and starred listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner: Option<RepoOwner>,
}

/// Repository owner reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    #[serde(default)]
    pub html_url: String,
}

/// Public activity event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    PushEvent,
    CreateEvent,
    IssuesEvent,
    PullRequestEvent,
    WatchEvent,
    ForkEvent,
    ReleaseEvent,
    PublicEvent,
    #[serde(other)]
    Unknown,
}

/// Public activity event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub repo: Option<EventRepo>,
    pub created_at: DateTime<Utc>,
}

/// Repository reference inside an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

/// Pull request from the issue search API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PullRequest {
    pub title: String,
    pub html_url: String,
    pub repository_url: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// `owner/repo` derived from the repository API URL.
    pub fn repository(&self) -> String {
        let mut segments: Vec<&str> = self.repository_url.rsplit('/').take(2).collect();
        segments.reverse();
        segments.join("/")
    }
}

/// Search API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchResults<T> {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<T>,
}

/// Rate limit information read from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub remaining: Option<u64>,
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let reset = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Self { remaining, reset }
    }

    /// True when the server reported zero remaining requests.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_user_defaults_for_missing_fields() {
        let user: User = serde_json::from_str(r#"{"login": "octocat"}"#).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.followers, 0);
        assert!(user.name.is_none());
    }

    #[test]
    fn test_event_type_unknown_fallback() {
        let event: Event = serde_json::from_str(
            r#"{"type": "GollumEvent", "created_at": "2026-01-15T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(event.event_type, EventType::Unknown);

        let event: Event = serde_json::from_str(
            r#"{"type": "PushEvent", "repo": {"name": "octocat/hello"}, "created_at": "2026-01-15T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(event.event_type, EventType::PushEvent);
        assert_eq!(event.repo.unwrap().name, "octocat/hello");
    }

    #[test]
    fn test_pull_request_repository() {
        let pr = PullRequest {
            title: "Fix things".to_string(),
            html_url: "https://github.com/rust-lang/rust/pull/1".to_string(),
            repository_url: "https://api.github.com/repos/rust-lang/rust".to_string(),
            state: "open".to_string(),
            created_at: None,
        };
        assert_eq!(pr.repository(), "rust-lang/rust");
    }

    #[test]
    fn test_rate_limit_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1767225600"));

        let limit = RateLimit::from_headers(&headers);
        assert!(limit.is_exhausted());
        assert_eq!(limit.reset.unwrap().timestamp(), 1_767_225_600);
    }

    #[test]
    fn test_rate_limit_missing_headers() {
        let limit = RateLimit::from_headers(&HeaderMap::new());
        assert!(!limit.is_exhausted());
        assert!(limit.reset.is_none());
    }
}
