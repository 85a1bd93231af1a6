// Cache path utilities.
// Maps request URLs to files under the application cache directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sha2::{Digest, Sha256};

/// Get the base cache directory (~/.cache/gitfolio on Linux).
pub fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gitfolio").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Build a stable cache key for a request URL: SHA-256 hex digest.
/// Distinct URLs get distinct keys; identical URLs always get the same key.
pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Path of the cache entry file for a URL.
pub fn entry_path(dir: &Path, url: &str) -> PathBuf {
    dir.join(format!("{}.json", cache_key(url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_deterministic() {
        let url = "https://api.github.com/users/octocat";
        assert_eq!(cache_key(url), cache_key(url));
    }

    #[test]
    fn test_cache_key_distinct_urls() {
        let a = cache_key("https://api.github.com/users/octocat");
        let b = cache_key("https://api.github.com/users/octocat/repos");
        assert_ne!(a, b);
    }

    #[test]
    fn test_cache_key_is_hex_digest() {
        let key = cache_key("https://api.github.com/users/octocat");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_entry_path() {
        let url = "https://api.github.com/users/octocat";
        let path = entry_path(Path::new("/tmp/cache"), url);
        assert_eq!(path, Path::new("/tmp/cache").join(format!("{}.json", cache_key(url))));
    }
}
