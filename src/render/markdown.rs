// Markdown rendering.
// Turns the typed template context into the profile document. Each section
// renders a placeholder line when its data is missing so a partially failed
// run still produces a complete document.

use chrono::{DateTime, Utc};

use super::context::TemplateContext;
use crate::github::types::{PullRequest, Repository};

const DESCRIPTION_LIMIT: usize = 100;

/// Render the full profile document.
pub fn render(ctx: &TemplateContext) -> String {
    let mut sections = vec![
        header(ctx),
        about(ctx),
        tech_stack(ctx),
        working_on(ctx),
        projects(ctx),
        pull_requests(ctx),
        starred(ctx),
        stats_table(ctx),
        connect(ctx),
        footer(ctx),
    ];
    sections.retain(|s| !s.is_empty());
    sections.join("\n\n")
}

fn header(ctx: &TemplateContext) -> String {
    format!(
        "# Hi there 👋 I'm {}\n\n{}",
        ctx.identity.display_name, ctx.identity.bio
    )
}

fn about(ctx: &TemplateContext) -> String {
    let mut lines = vec!["## 🚀 About Me".to_string()];
    let current = ctx
        .working_on
        .first()
        .map(|name| short_repo_name(name).to_string())
        .unwrap_or_else(|| "new projects".to_string());
    lines.push(format!("- 🔭 Currently working on **{}**", current));
    if !ctx.identity.location.is_empty() {
        lines.push(format!("- 📍 Based in **{}**", ctx.identity.location));
    }
    if !ctx.identity.website.is_empty() {
        lines.push(format!("- 🌐 Website: <{}>", ctx.identity.website));
    }
    lines.join("\n")
}

fn tech_stack(ctx: &TemplateContext) -> String {
    let mut out = String::from("## 🛠️ Tech Stack\n\n");
    if ctx.stats.languages.is_empty() {
        out.push_str("*Language stats are taking a break right now.*");
        return out;
    }
    let badges: Vec<String> = ctx
        .stats
        .languages
        .iter()
        .take(ctx.max_languages)
        .map(|(language, _)| language_badge(language))
        .collect();
    out.push_str(&badges.join("\n"));
    out
}

fn working_on(ctx: &TemplateContext) -> String {
    let mut out = String::from("## 👷 What I'm working on\n\n");
    if ctx.working_on.is_empty() {
        out.push_str("*Quietly plotting the next project.* 🚀");
        return out;
    }
    let lines: Vec<String> = ctx
        .working_on
        .iter()
        .enumerate()
        .map(|(i, name)| {
            format!(
                "**{}.** [{}](https://github.com/{}) - Active development",
                i + 1,
                short_repo_name(name),
                name
            )
        })
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

fn projects(ctx: &TemplateContext) -> String {
    let mut out = String::from("## 🌱 Latest projects\n\n");
    if ctx.projects.is_empty() {
        out.push_str(&format!(
            "*See [my GitHub profile](https://github.com/{}) for all projects.*",
            ctx.identity.username
        ));
        return out;
    }
    let entries: Vec<String> = ctx.projects.iter().map(|r| project_entry(r, ctx.generated_at)).collect();
    out.push_str(&entries.join("\n\n"));
    out
}

fn project_entry(repo: &Repository, now: DateTime<Utc>) -> String {
    let language = repo.language.as_deref().unwrap_or("Misc");
    let description = repo
        .description
        .as_deref()
        .unwrap_or("No description provided");
    let updated = repo
        .updated_at
        .map(|at| format!(" · Updated {}", time_ago(at, now)))
        .unwrap_or_default();
    format!(
        "[{}]({}) {} `{}`  \n{}  \n⭐ {} · 🍴 {}{}",
        repo.name,
        repo.html_url,
        language_emoji(language),
        language,
        truncate(description, DESCRIPTION_LIMIT),
        repo.stargazers_count,
        repo.forks_count,
        updated
    )
}

fn pull_requests(ctx: &TemplateContext) -> String {
    let mut out = String::from("## 🔀 Recent pull requests\n\n");
    if ctx.pull_requests.is_empty() {
        out.push_str("*No recent pull requests - time to contribute!*");
        return out;
    }
    let lines: Vec<String> = ctx.pull_requests.iter().map(pull_request_entry).collect();
    out.push_str(&lines.join("\n"));
    out
}

fn pull_request_entry(pr: &PullRequest) -> String {
    let repo = pr.repository();
    format!(
        "- [{}]({}) on [{}](https://github.com/{})",
        truncate(&pr.title, 80),
        pr.html_url,
        repo,
        repo
    )
}

fn starred(ctx: &TemplateContext) -> String {
    let mut out = String::from("## ⭐ Recently starred\n\n");
    if ctx.starred.is_empty() {
        out.push_str("*Nothing starred lately - out discovering new repos.*");
        return out;
    }
    let lines: Vec<String> = ctx
        .starred
        .iter()
        .map(|repo| {
            let owner = repo
                .owner
                .as_ref()
                .map(|o| o.login.as_str())
                .unwrap_or_else(|| owner_from_full_name(&repo.full_name));
            let description = repo
                .description
                .as_deref()
                .unwrap_or("No description available");
            format!(
                "- [**{}/{}**]({})  \n  {}",
                owner,
                repo.name,
                repo.html_url,
                truncate(description, 80)
            )
        })
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

fn stats_table(ctx: &TemplateContext) -> String {
    let stats = &ctx.stats;
    format!(
        "## 📊 Profile stats\n\n\
         | Metric | Value | Metric | Value |\n\
         |:---|---:|:---|---:|\n\
         | 📚 Public repositories | {} | 👥 Followers | {} |\n\
         | ➡️ Following | {} | ⭐ Stars earned | {} |\n\
         | 🍴 Total forks | {} | 💻 Languages used | {} |\n\
         | 🔥 Pushes this year | {} | | |",
        stats.public_repos,
        stats.followers,
        stats.following,
        stats.total_stars,
        stats.total_forks,
        stats.languages.len(),
        stats.pushes_this_year
    )
}

fn connect(ctx: &TemplateContext) -> String {
    let mut links = vec![format!(
        "[GitHub](https://github.com/{})",
        ctx.identity.username
    )];
    if !ctx.social.linkedin.is_empty() {
        links.push(format!("[LinkedIn]({})", ctx.social.linkedin));
    }
    if !ctx.social.twitter.is_empty() {
        links.push(format!("[Twitter]({})", ctx.social.twitter));
    }
    if !ctx.social.instagram.is_empty() {
        links.push(format!("[Instagram]({})", ctx.social.instagram));
    }
    if !ctx.social.email.is_empty() {
        links.push(format!("[Email](mailto:{})", ctx.social.email));
    }
    format!(
        "## 🤝 Let's connect\n\n{}\n\n**{}**",
        links.join(" · "),
        ctx.messages.contact
    )
}

fn footer(ctx: &TemplateContext) -> String {
    let mut out = String::new();
    if !ctx.messages.quote.is_empty() {
        out.push_str(&format!("> *\"{}\"*\n\n", ctx.messages.quote));
    }
    out.push_str(&format!(
        "*🕒 Last updated: {} UTC*",
        ctx.generated_at.format("%A, %B %d, %Y %H:%M")
    ));
    out
}

/// Relative age like "3 days ago" or "Just now".
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(at);
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if days > 365 {
        plural(days / 365, "year")
    } else if days > 30 {
        plural(days / 30, "month")
    } else if days > 0 {
        plural(days, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        "Just now".to_string()
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(limit).collect();
        format!("{}...", prefix.trim_end())
    }
}

fn short_repo_name(full_name: &str) -> &str {
    full_name.rsplit('/').next().unwrap_or(full_name)
}

fn owner_from_full_name(full_name: &str) -> &str {
    full_name.split('/').next().unwrap_or(full_name)
}

fn language_badge(language: &str) -> String {
    let color = language_color(language);
    let encoded = language.replace(' ', "%20").replace('#', "%23").replace('+', "%2B");
    format!(
        "![{}](https://img.shields.io/badge/{}-{}?style=for-the-badge&logoColor=white)",
        language, encoded, color
    )
}

fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "F7DF1E",
        "TypeScript" => "3178C6",
        "Python" => "3776AB",
        "Java" => "ED8B00",
        "C++" => "00599C",
        "C" => "A8B9CC",
        "C#" => "239120",
        "PHP" => "777BB4",
        "Ruby" => "CC342D",
        "Go" => "00ADD8",
        "Rust" => "DEA584",
        "Swift" => "FA7343",
        "Kotlin" => "0095D5",
        "Dart" => "0175C2",
        "HTML" => "E34F26",
        "CSS" => "1572B6",
        "Shell" => "89E051",
        "Vue" => "4FC08D",
        "Svelte" => "FF3E00",
        _ => "666666",
    }
}

fn language_emoji(language: &str) -> &'static str {
    match language {
        "JavaScript" => "🟨",
        "TypeScript" => "🔷",
        "Python" => "🐍",
        "Java" => "☕",
        "HTML" => "🌐",
        "CSS" => "🎨",
        "PHP" => "🐘",
        "Go" => "🔵",
        "Rust" => "🦀",
        "C++" => "⚡",
        "C#" => "💜",
        "C" => "⚙️",
        "Shell" => "🐚",
        "Dockerfile" => "🐳",
        "Markdown" => "📝",
        "Svelte" => "🧡",
        "Dart" => "🎯",
        "Swift" => "🍎",
        "Kotlin" => "💎",
        _ => "📁",
    }
}
