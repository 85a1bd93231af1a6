// Cache store for persisted API responses.
// Entries are whole-file JSON documents checked against a max-age at read
// time; a malformed or unreadable file is treated as a miss.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::paths::entry_path;

/// A cached API response with its source URL and storage timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    pub payload: Value,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(url: &str, payload: Value) -> Self {
        Self {
            url: url.to_string(),
            payload,
            stored_at: Utc::now(),
        }
    }

    /// Check whether this entry is older than the given max-age.
    pub fn is_expired(&self, max_age: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.stored_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed > max_age
    }
}

/// Storage interface injected into the fetcher. Implementations must never
/// fail a fetch: `put` swallows storage errors and `get` treats any problem
/// as a miss.
pub trait Cache {
    /// Look up the payload cached for a URL, if present and younger than
    /// `max_age`.
    fn get(&self, url: &str, max_age: Duration) -> Option<Value>;

    /// Store (or overwrite) the payload cached for a URL.
    fn put(&self, url: &str, payload: &Value);
}

/// Filesystem-backed cache: one JSON file per URL under a cache directory.
pub struct FsCache {
    dir: PathBuf,
}

impl FsCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn read_entry(path: &Path) -> Option<CacheEntry> {
        if !path.exists() {
            return None;
        }
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cache file");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed cache file, treating as miss");
                None
            }
        }
    }

    fn write_entry(&self, path: &Path, entry: &CacheEntry) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(entry)?;

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

impl Cache for FsCache {
    fn get(&self, url: &str, max_age: Duration) -> Option<Value> {
        let path = entry_path(&self.dir, url);
        let entry = Self::read_entry(&path)?;
        if entry.is_expired(max_age) {
            debug!(url, "cache entry expired");
            return None;
        }
        Some(entry.payload)
    }

    fn put(&self, url: &str, payload: &Value) {
        let path = entry_path(&self.dir, url);
        let entry = CacheEntry::new(url, payload.clone());
        if let Err(e) = self.write_entry(&path, &entry) {
            warn!(url, error = %e, "failed to write cache entry");
        }
    }
}

/// In-memory cache, used as a test fake and for cache-less runs.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get(&self, url: &str, max_age: Duration) -> Option<Value> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(url)?;
        if entry.is_expired(max_age) {
            return None;
        }
        Some(entry.payload.clone())
    }

    fn put(&self, url: &str, payload: &Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(url.to_string(), CacheEntry::new(url, payload.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_fs_cache_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FsCache::new(temp_dir.path().to_path_buf());
        let url = "https://api.github.com/users/octocat";
        let payload = json!({"login": "octocat", "followers": 42});

        cache.put(url, &payload);

        let hit = cache.get(url, Duration::from_secs(3600));
        assert_eq!(hit, Some(payload));
    }

    #[test]
    fn test_fs_cache_miss_for_unknown_url() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FsCache::new(temp_dir.path().to_path_buf());

        assert!(cache.get("https://api.github.com/users/nobody", Duration::from_secs(3600)).is_none());
    }

    #[test]
    fn test_fs_cache_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FsCache::new(temp_dir.path().to_path_buf());
        let url = "https://api.github.com/users/octocat";

        cache.put(url, &json!({"followers": 1}));
        cache.put(url, &json!({"followers": 2}));

        let hit = cache.get(url, Duration::from_secs(3600));
        assert_eq!(hit, Some(json!({"followers": 2})));
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FsCache::new(temp_dir.path().to_path_buf());
        let url = "https://api.github.com/users/octocat";
        let payload = json!({"login": "octocat"});

        // Write an entry dated 10 minutes in the past.
        let entry = CacheEntry {
            url: url.to_string(),
            payload,
            stored_at: Utc::now() - chrono::Duration::seconds(600),
        };
        let path = entry_path(temp_dir.path(), url);
        fs::create_dir_all(temp_dir.path()).unwrap();
        fs::write(&path, serde_json::to_string(&entry).unwrap()).unwrap();

        assert!(cache.get(url, Duration::from_secs(300)).is_none());
        assert!(cache.get(url, Duration::from_secs(3600)).is_some());
    }

    #[test]
    fn test_malformed_file_is_a_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FsCache::new(temp_dir.path().to_path_buf());
        let url = "https://api.github.com/users/octocat";

        let path = entry_path(temp_dir.path(), url);
        fs::write(&path, "not json at all {{{").unwrap();

        assert!(cache.get(url, Duration::from_secs(3600)).is_none());
    }

    #[test]
    fn test_memory_cache_roundtrip() {
        let cache = MemoryCache::new();
        let url = "https://api.github.com/users/octocat";
        let payload = json!(["a", "b"]);

        cache.put(url, &payload);
        assert_eq!(cache.get(url, Duration::from_secs(60)), Some(payload));
    }

    #[test]
    fn test_entry_expiry_check() {
        let mut entry = CacheEntry::new("https://example.test", json!(1));
        assert!(!entry.is_expired(Duration::from_secs(300)));

        entry.stored_at = Utc::now() - chrono::Duration::seconds(600);
        assert!(entry.is_expired(Duration::from_secs(300)));
        assert!(!entry.is_expired(Duration::from_secs(3600)));
    }
}
