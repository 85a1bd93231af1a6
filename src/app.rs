// Generation run orchestration.
// Loads config, fans out the API fetches, degrades failed sections to
// placeholders, renders the document, and writes it out.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::cache::{FsCache, default_cache_dir};
use crate::config::Config;
use crate::error::{GitfolioError, Result};
use crate::fetch::{Fetched, Fetcher, RetryPolicy};
use crate::github::{GitHub, GitHubClient};
use crate::render::{TemplateContext, render};

/// Options resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub output: PathBuf,
    pub cache_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// Run one generation pass. Fetch failures degrade individual sections;
/// only setup problems (config, output writing) are fatal.
pub async fn run(options: RunOptions) -> Result<()> {
    let config = Config::load(&options.config_path)?;

    let cache_dir = options
        .cache_dir
        .or_else(default_cache_dir)
        .ok_or_else(|| GitfolioError::Config("cannot determine a cache directory".to_string()))?;

    let client = GitHubClient::from_env(config.fetch.timeout())?;
    let fetcher = Fetcher::new(
        client,
        FsCache::new(cache_dir),
        RetryPolicy::from_config(&config.fetch),
        config.fetch.cache_max_age(),
    );
    let github = GitHub::new(fetcher);

    let username = config.profile.username.clone();
    info!(%username, "fetching profile data");

    // Fixed fan-out: all five fetches run concurrently and all settle
    // before rendering; a failure in one never aborts the others.
    let (user, repos, events, starred, pull_requests) = tokio::join!(
        github.user(&username),
        github.repositories(&username, 50),
        github.events(&username, 30),
        github.starred(&username, config.content.max_starred),
        github.pull_requests(&username, config.content.max_pull_requests),
    );

    let user = section("profile", user);
    let repos = section("repositories", repos).unwrap_or_default();
    let events = section("activity", events).unwrap_or_default();
    let starred = section("starred", starred).unwrap_or_default();
    let pull_requests = section("pull requests", pull_requests).unwrap_or_default();

    let context = TemplateContext::build(&config, user, repos, events, starred, pull_requests);
    let document = render(&context);

    if options.dry_run {
        println!("{}", document);
        return Ok(());
    }

    std::fs::write(&options.output, &document)?;
    info!(
        path = %options.output.display(),
        projects = context.projects.len(),
        pull_requests = context.pull_requests.len(),
        starred = context.starred.len(),
        "profile document written"
    );
    Ok(())
}

/// Unwrap one fetched section, logging stale fallbacks and failures.
fn section<T>(name: &str, result: Result<Fetched<T>>) -> Option<T> {
    match result {
        Ok(fetched) => {
            if fetched.is_stale() {
                warn!(section = name, "live fetch failed, using cached data");
            }
            Some(fetched.into_inner())
        }
        Err(err) => {
            warn!(section = name, error = %err, "data unavailable, rendering placeholder");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_unwraps_fresh_and_stale() {
        assert_eq!(section("x", Ok(Fetched::Fresh(1))), Some(1));
        assert_eq!(section("x", Ok(Fetched::Stale(2))), Some(2));
    }

    #[test]
    fn test_section_swallows_errors() {
        let result: Result<Fetched<i32>> = Err(GitfolioError::CacheMiss);
        assert_eq!(section("x", result), None);
    }
}
