use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::{
    browser::{FilterState, RepositoryBrowser, Visibility},
    github::ListRepositories,
    page::{GRID_ID, Page, SEARCH_INPUT_ID},
    runtime::Runtime,
};

use super::config::Config;
use super::emit;

/// Render the portfolio page with the repository grid filled in.
#[tracing::instrument(skip(runtime, api_url, filter))]
pub async fn render<R: Runtime>(
    runtime: R,
    user: Option<String>,
    api_url: Option<String>,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
    filter: FilterState,
) -> Result<()> {
    let config = Config::new(runtime, user, api_url)?;
    run_render(config, template.as_deref(), output.as_deref(), filter).await
}

pub(crate) async fn run_render<R: Runtime, L: ListRepositories>(
    config: Config<R, L>,
    template: Option<&Path>,
    output: Option<&Path>,
    filter: FilterState,
) -> Result<()> {
    let mut browser = RepositoryBrowser::new(config.user.clone())?;

    let page = match template {
        Some(path) => {
            let html = config
                .runtime
                .read_to_string(path)
                .with_context(|| format!("Failed to load page template {}", path.display()))?;
            Page::parse(html)
        }
        None => Page::builtin(browser.renderer(), &config.user, &filter)?,
    };

    // Without a render target nothing is fetched.
    if !page.has_grid() {
        warn!(
            "Page has no #{} element; skipping repository fetch",
            GRID_ID
        );
        return emit(&config.runtime, output, page.as_str());
    }

    for value in page.filter_buttons() {
        if value.parse::<Visibility>().is_err() {
            warn!("Filter button with unknown data-filter '{}'", value);
        }
    }
    if !page.has_search_input() {
        debug!("Page has no #{} element", SEARCH_INPUT_ID);
    }

    browser.load(&config.github).await?;
    browser.apply(filter)?;

    let mut page = page.with_container(browser.container());
    if let Some(list) = browser.repositories() {
        let json = serde_json::to_string(list).context("Failed to serialize repository data")?;
        page = page.with_repository_data(&json);
    }

    emit(&config.runtime, output, page.as_str())
}
