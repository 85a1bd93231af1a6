// Template context construction.
// Merges configuration with fetched API data into a typed record the
// Markdown renderer consumes. Config values win over API values; both fall
// back to neutral defaults so missing sections degrade gracefully.

use chrono::{DateTime, Datelike, Utc};

use crate::config::{Config, MessagesConfig, SocialConfig};
use crate::github::types::{Event, EventType, PullRequest, Repository, User};

/// Who the document is about, after merging config and API data.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub location: String,
    pub website: String,
    pub email: String,
}

impl Identity {
    /// Config value if non-empty, else API value, else fallback.
    pub fn merge(config: &Config, user: Option<&User>) -> Self {
        let username = config.profile.username.clone();
        Self {
            display_name: pick(
                &config.profile.display_name,
                user.and_then(|u| u.name.as_deref()),
                &username,
            ),
            bio: pick(
                &config.profile.bio,
                user.and_then(|u| u.bio.as_deref()),
                &config.messages.tagline,
            ),
            location: pick(
                &config.profile.location,
                user.and_then(|u| u.location.as_deref()),
                "",
            ),
            website: pick(
                &config.profile.website,
                user.and_then(|u| u.blog.as_deref()),
                "",
            ),
            email: config.profile.email.clone(),
            username,
        }
    }
}

fn pick(configured: &str, fetched: Option<&str>, fallback: &str) -> String {
    if !configured.trim().is_empty() {
        return configured.to_string();
    }
    match fetched {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => fallback.to_string(),
    }
}

/// Aggregate statistics computed from the fetched data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileStats {
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    /// Languages ordered by repository count, descending.
    pub languages: Vec<(String, usize)>,
    /// Push events observed this calendar year.
    pub pushes_this_year: usize,
}

impl ProfileStats {
    pub fn compute(user: Option<&User>, repos: &[Repository], events: &[Event]) -> Self {
        let total_stars = repos.iter().map(|r| r.stargazers_count).sum();
        let total_forks = repos.iter().map(|r| r.forks_count).sum();

        let mut languages: Vec<(String, usize)> = Vec::new();
        for repo in repos {
            if let Some(language) = repo.language.as_deref() {
                match languages.iter_mut().find(|(name, _)| name == language) {
                    Some((_, count)) => *count += 1,
                    None => languages.push((language.to_string(), 1)),
                }
            }
        }
        languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let current_year = Utc::now().year();
        let pushes_this_year = events
            .iter()
            .filter(|e| e.event_type == EventType::PushEvent && e.created_at.year() == current_year)
            .count();

        Self {
            public_repos: user.map(|u| u.public_repos).unwrap_or(repos.len() as u64),
            followers: user.map(|u| u.followers).unwrap_or_default(),
            following: user.map(|u| u.following).unwrap_or_default(),
            total_stars,
            total_forks,
            languages,
            pushes_this_year,
        }
    }
}

/// Everything the Markdown renderer needs, already filtered and limited.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub identity: Identity,
    pub stats: ProfileStats,
    /// `owner/repo` names with recent push activity.
    pub working_on: Vec<String>,
    /// Own repositories, most recently updated first.
    pub projects: Vec<Repository>,
    pub pull_requests: Vec<PullRequest>,
    pub starred: Vec<Repository>,
    pub social: SocialConfig,
    pub messages: MessagesConfig,
    pub max_languages: usize,
    pub generated_at: DateTime<Utc>,
}

impl TemplateContext {
    pub fn build(
        config: &Config,
        user: Option<User>,
        repos: Vec<Repository>,
        events: Vec<Event>,
        starred: Vec<Repository>,
        pull_requests: Vec<PullRequest>,
    ) -> Self {
        let active = active_repositories(repos);
        let stats = ProfileStats::compute(user.as_ref(), &active, &events);

        Self {
            identity: Identity::merge(config, user.as_ref()),
            stats,
            working_on: working_on(&events, config.content.max_working_on),
            projects: active.into_iter().take(config.content.max_repos).collect(),
            pull_requests: pull_requests
                .into_iter()
                .take(config.content.max_pull_requests)
                .collect(),
            starred: starred.into_iter().take(config.content.max_starred).collect(),
            social: config.social.clone(),
            messages: config.messages.clone(),
            max_languages: config.content.max_languages,
            generated_at: Utc::now(),
        }
    }
}

/// Own, visible repositories: forks, private, and archived repos are
/// excluded; newest update first.
pub fn active_repositories(mut repos: Vec<Repository>) -> Vec<Repository> {
    repos.retain(|r| !r.fork && !r.private && !r.archived);
    repos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    repos
}

/// Distinct repository names from recent push events, newest first.
pub fn working_on(events: &[Event], limit: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for event in events {
        if event.event_type != EventType::PushEvent {
            continue;
        }
        if let Some(repo) = &event.repo {
            if !names.contains(&repo.name) {
                names.push(repo.name.clone());
            }
        }
        if names.len() == limit {
            break;
        }
    }
    names
}
