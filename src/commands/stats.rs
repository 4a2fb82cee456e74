use anyhow::{Context, Result};

use crate::{
    browser::{RepositoryBrowser, RepositoryStats},
    github::ListRepositories,
    runtime::Runtime,
};

use super::config::Config;

/// Print aggregate statistics for the account's repositories.
#[tracing::instrument(skip(runtime, api_url))]
pub async fn stats<R: Runtime>(
    runtime: R,
    user: Option<String>,
    api_url: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::new(runtime, user, api_url)?;
    run_stats(config, json).await
}

pub(crate) async fn run_stats<R: Runtime, L: ListRepositories>(
    config: Config<R, L>,
    json: bool,
) -> Result<()> {
    let mut browser = RepositoryBrowser::new(config.user.clone())?;
    browser.load(&config.github).await?;
    let repos = browser.loaded()?;

    let Some(stats) = RepositoryStats::compute(repos) else {
        config.runtime.print("No repositories.");
        return Ok(());
    };

    if json {
        let text = serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?;
        config.runtime.print(&text);
        return Ok(());
    }

    let runtime = &config.runtime;
    runtime.print(&format!(
        "Repositories: {} ({} public, {} private)",
        stats.total_repos, stats.public_repos, stats.private_repos
    ));
    runtime.print(&format!("Total stars: {}", stats.total_stars));
    runtime.print(&format!("Total forks: {}", stats.total_forks));
    runtime.print(&format!("Most starred: {}", stats.most_starred));
    runtime.print(&format!("Most recent: {}", stats.most_recent));

    if !stats.languages.is_empty() {
        runtime.print("Languages:");
        let mut languages: Vec<_> = stats.languages.iter().collect();
        languages.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (language, count) in languages {
            runtime.print(&format!("  {} {}", language, count));
        }
    }

    Ok(())
}
