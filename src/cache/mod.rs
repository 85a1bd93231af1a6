// Cache module for local filesystem caching.
// Stores API responses used as fallback data when live fetches fail.

#![allow(dead_code)]

pub mod paths;
pub mod store;

pub use paths::{cache_key, default_cache_dir};
pub use store::{Cache, CacheEntry, FsCache, MemoryCache};
