use anyhow::Result;
use log::debug;

use crate::{
    browser::{FilterState, RepositoryBrowser, render::format_updated},
    github::{ListRepositories, Repository},
    runtime::Runtime,
};

use super::config::Config;

/// One terminal line per repository: name, visibility, stars, forks, language, updated.
pub fn format_repository_line(repo: &Repository) -> String {
    format!(
        "{:<32} {:<8} {:>6} {:>6}  {:<12} {}",
        repo.name,
        repo.visibility_label(),
        format!("★{}", repo.stargazers_count),
        format!("⑂{}", repo.forks_count),
        repo.language.as_deref().unwrap_or("-"),
        format_updated(&repo.updated_at)
    )
}

/// Print the browser's visible set, or the empty-state line.
pub(crate) fn print_visible<R: Runtime>(runtime: &R, browser: &RepositoryBrowser) {
    let visible = browser.visible();
    if visible.is_empty() {
        runtime.print("No projects found.");
        return;
    }

    debug!("Listing {} repositories", visible.len());
    for repo in visible {
        runtime.print(&format_repository_line(repo));
    }
}

/// List the account's repositories in the terminal.
#[tracing::instrument(skip(runtime, api_url, filter))]
pub async fn list<R: Runtime>(
    runtime: R,
    user: Option<String>,
    api_url: Option<String>,
    filter: FilterState,
) -> Result<()> {
    let config = Config::new(runtime, user, api_url)?;
    run_list(config, filter).await
}

pub(crate) async fn run_list<R: Runtime, L: ListRepositories>(
    config: Config<R, L>,
    filter: FilterState,
) -> Result<()> {
    let mut browser = RepositoryBrowser::new(config.user.clone())?;
    browser.load(&config.github).await?;
    browser.loaded()?;
    browser.apply(filter)?;

    print_visible(&config.runtime, &browser);
    Ok(())
}
