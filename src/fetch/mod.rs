// Resilient fetch module.
// Retry with exponential backoff plus cache fallback for API requests.

pub mod fetcher;
pub mod retry;

pub use fetcher::{Fetched, Fetcher};
pub use retry::RetryPolicy;
