// Typed configuration loaded from a TOML file.
// Every field has a serde default so a minimal config only needs a username.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GitfolioError, Result};

/// Top-level configuration for a generation run.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub profile: ProfileConfig,
    #[serde(default)]
    pub social: SocialConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Who the profile document is about. Empty optional fields fall back to
/// values fetched from the API.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub email: String,
}

/// Optional social links rendered in the footer.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SocialConfig {
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub email: String,
}

/// Per-section item limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ContentConfig {
    pub max_repos: usize,
    pub max_working_on: usize,
    pub max_pull_requests: usize,
    pub max_starred: usize,
    pub max_languages: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_repos: 6,
            max_working_on: 5,
            max_pull_requests: 5,
            max_starred: 5,
            max_languages: 8,
        }
    }
}

/// Freeform copy used by the renderer.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MessagesConfig {
    pub tagline: String,
    pub quote: String,
    pub contact: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            tagline: "Building projects with modern technologies".to_string(),
            quote: String::new(),
            contact: "Open to collaborations and interesting projects!".to_string(),
        }
    }
}

/// Retry, backoff, cache, and timeout policy for the resilient fetcher.
///
/// One consistent policy: 3 total attempts, 1 s base backoff doubling per
/// attempt (capped at 30 s), 1 h cache TTL, 10 s request timeout.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FetchConfig {
    /// Total request attempts before falling back to the cache.
    pub retry_count: u32,
    /// Base backoff delay in milliseconds; doubles each attempt.
    pub base_backoff_ms: u64,
    /// Upper bound on a single backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Maximum age of a cache entry considered usable, in seconds.
    pub cache_max_age_secs: u64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry_count: 3,
            base_backoff_ms: 1_000,
            max_backoff_ms: 30_000,
            cache_max_age_secs: 3_600,
            timeout_secs: 10,
        }
    }
}

impl FetchConfig {
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GitfolioError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| GitfolioError::Config(format!("invalid {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a sensible run.
    pub fn validate(&self) -> Result<()> {
        if self.profile.username.trim().is_empty() {
            return Err(GitfolioError::Config(
                "profile.username must not be empty".to_string(),
            ));
        }
        if self.fetch.retry_count == 0 {
            return Err(GitfolioError::Config(
                "fetch.retry_count must be at least 1".to_string(),
            ));
        }
        if self.fetch.base_backoff_ms == 0 {
            return Err(GitfolioError::Config(
                "fetch.base_backoff_ms must be greater than 0".to_string(),
            ));
        }
        if self.fetch.max_backoff_ms < self.fetch.base_backoff_ms {
            return Err(GitfolioError::Config(
                "fetch.max_backoff_ms must be >= fetch.base_backoff_ms".to_string(),
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(GitfolioError::Config(
                "fetch.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config() {
        let config: Config = toml::from_str("[profile]\nusername = \"octocat\"").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.profile.username, "octocat");
        assert_eq!(config.fetch.retry_count, 3);
        assert_eq!(config.fetch.base_backoff_ms, 1_000);
        assert_eq!(config.fetch.cache_max_age_secs, 3_600);
        assert_eq!(config.content.max_repos, 6);
    }

    #[test]
    fn test_full_config() {
        let toml_src = r#"
            [profile]
            username = "octocat"
            display_name = "The Octocat"

            [social]
            linkedin = "https://linkedin.com/in/octocat"

            [content]
            max_repos = 3

            [messages]
            tagline = "Hello"

            [fetch]
            retry_count = 5
            base_backoff_ms = 250
        "#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.content.max_repos, 3);
        assert_eq!(config.content.max_starred, 5);
        assert_eq!(config.fetch.retry_count, 5);
        assert_eq!(config.fetch.base_backoff_ms, 250);
    }

    #[test]
    fn test_empty_username_rejected() {
        let config: Config = toml::from_str("[profile]\nusername = \"  \"").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_retry_count_rejected() {
        let config: Config =
            toml::from_str("[profile]\nusername = \"octocat\"\n[fetch]\nretry_count = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_cap_below_base_rejected() {
        let config: Config = toml::from_str(
            "[profile]\nusername = \"octocat\"\n[fetch]\nbase_backoff_ms = 5000\nmax_backoff_ms = 100",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[profile]\nusername = \"octocat\"\nfavorite_color = \"green\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/gitfolio.toml"));
        assert!(matches!(result, Err(GitfolioError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[profile]\nusername = \"octocat\"").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.profile.username, "octocat");
    }
}
