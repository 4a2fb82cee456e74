//! Repository browser: one fetch, then filter and render on every change.
//!
//! # Structure
//!
//! - `filter` - Visibility/search predicates over a loaded list
//! - `render` - Card, empty-state and error-panel HTML
//! - `stats` - Aggregate numbers over a loaded list

pub mod filter;
pub mod render;
pub mod stats;

use anyhow::{Result, anyhow};
use log::{debug, info, warn};

use crate::github::{FetchError, ListRepositories, Repository};

pub use filter::{FilterState, Visibility, filter_repositories};
pub use render::{Renderer, TemplateError};
pub use stats::RepositoryStats;

/// The full list from one fetch. Never edited after load.
pub type RepositoryList = Vec<Repository>;

/// `Loading -> Loaded | Error`. There is no way back to `Loading`, and
/// `Error` has no retry.
#[derive(Debug)]
pub enum BrowserState {
    Loading,
    Loaded(RepositoryList),
    Error(FetchError),
}

/// Owns the list, the current filter and the container it renders into.
pub struct RepositoryBrowser {
    user: String,
    state: BrowserState,
    filter: FilterState,
    container: String,
    renderer: Renderer,
}

impl RepositoryBrowser {
    pub fn new(user: impl Into<String>) -> Result<Self, TemplateError> {
        Ok(Self {
            user: user.into(),
            state: BrowserState::Loading,
            filter: FilterState::default(),
            container: String::new(),
            renderer: Renderer::new()?,
        })
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Current inner HTML of the `projectsGrid` container.
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn repositories(&self) -> Option<&[Repository]> {
        match &self.state {
            BrowserState::Loaded(list) => Some(list),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            BrowserState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// The loaded list, or the fetch failure as an error naming the user.
    pub fn loaded(&self) -> Result<&[Repository]> {
        match &self.state {
            BrowserState::Loaded(list) => Ok(list),
            BrowserState::Error(e) => Err(anyhow!(
                "Failed to load projects for '{}': {}",
                self.user,
                e
            )),
            BrowserState::Loading => Err(anyhow!("Repositories have not been loaded yet")),
        }
    }

    /// Fetch the list once and render it unfiltered.
    ///
    /// Fetch failures are absorbed here: the container receives the error
    /// panel and the browser stays in `Error` for the rest of its life. Only
    /// a template failure is returned.
    #[tracing::instrument(skip(self, source), fields(user = %self.user))]
    pub async fn load<L: ListRepositories + ?Sized>(
        &mut self,
        source: &L,
    ) -> Result<(), TemplateError> {
        if !matches!(self.state, BrowserState::Loading) {
            warn!("Repositories for {} were already loaded; ignoring", self.user);
            return Ok(());
        }

        match source.list_repositories(&self.user).await {
            Ok(list) => {
                info!("Loaded {} repositories for {}", list.len(), self.user);
                self.state = BrowserState::Loaded(list);
                self.filter = FilterState::default();
                self.refresh()
            }
            Err(e) => {
                warn!("Error fetching repositories for {}: {}", self.user, e);
                self.container = self.renderer.render_error(&self.user, &e)?;
                self.state = BrowserState::Error(e);
                Ok(())
            }
        }
    }

    /// Entry point for the filter buttons and the search box.
    pub fn on_filter_changed(
        &mut self,
        visibility: Visibility,
        query: &str,
    ) -> Result<(), TemplateError> {
        let filter = FilterState {
            visibility,
            query: query.to_string(),
            ..self.filter.clone()
        };
        self.apply(filter)
    }

    /// Replace the whole filter, refinements included, and re-render.
    pub fn apply(&mut self, filter: FilterState) -> Result<(), TemplateError> {
        match self.state {
            BrowserState::Loaded(_) => {
                self.filter = filter;
                self.refresh()
            }
            BrowserState::Loading => {
                debug!("Filter change before load; ignoring");
                Ok(())
            }
            BrowserState::Error(_) => {
                debug!("Filter change after failed load; ignoring");
                Ok(())
            }
        }
    }

    /// Records passing the current filter, in list order.
    pub fn visible(&self) -> Vec<&Repository> {
        match &self.state {
            BrowserState::Loaded(list) => filter_repositories(list, &self.filter),
            _ => Vec::new(),
        }
    }

    fn refresh(&mut self) -> Result<(), TemplateError> {
        let html = {
            let visible = self.visible();
            debug!(
                "Rendering {} of {} repositories ({} / {:?}{})",
                visible.len(),
                self.repositories().map_or(0, <[Repository]>::len),
                self.filter.visibility,
                self.filter.query,
                if self.filter.has_refinements() {
                    " + refinements"
                } else {
                    ""
                }
            );
            self.renderer.render_cards(&visible)?
        };
        self.container = html;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::MockListRepositories;
    use crate::test_utils::{failing_source, repository, source_returning};

    fn alpha_beta() -> Vec<Repository> {
        vec![
            Repository {
                description: Some("ml tool".into()),
                topics: vec!["cv".into()],
                ..repository("Alpha")
            },
            Repository {
                private: true,
                ..repository("Beta")
            },
        ]
    }

    #[tokio::test]
    async fn test_new_browser_is_loading_and_empty() {
        let browser = RepositoryBrowser::new("octocat").unwrap();
        assert!(matches!(browser.state(), BrowserState::Loading));
        assert_eq!(browser.container(), "");
        assert!(browser.visible().is_empty());
        assert!(browser.loaded().is_err());
    }

    #[tokio::test]
    async fn test_load_renders_unfiltered() {
        let mut browser = RepositoryBrowser::new("octocat").unwrap();
        browser.load(&source_returning(alpha_beta())).await.unwrap();

        assert_eq!(browser.repositories().map(<[Repository]>::len), Some(2));
        assert_eq!(browser.filter(), &FilterState::default());
        assert_eq!(browser.container().matches("project-card").count(), 2);
        assert!(browser.container().contains("Alpha"));
        assert!(browser.container().contains("Beta"));
    }

    #[tokio::test]
    async fn test_load_passes_user_to_source() {
        let mut source = MockListRepositories::new();
        source
            .expect_list_repositories()
            .with(mockall::predicate::eq("someone"))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let mut browser = RepositoryBrowser::new("someone").unwrap();
        browser.load(&source).await.unwrap();
        assert_eq!(browser.user(), "someone");
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let source = source_returning(alpha_beta());
        let mut browser = RepositoryBrowser::new("octocat").unwrap();
        browser.load(&source).await.unwrap();
        browser.load(&source).await.unwrap();
        assert_eq!(browser.repositories().map(<[Repository]>::len), Some(2));
    }

    #[tokio::test]
    async fn test_empty_list_shows_placeholder() {
        let mut browser = RepositoryBrowser::new("octocat").unwrap();
        browser.load(&source_returning(Vec::new())).await.unwrap();

        assert!(matches!(browser.state(), BrowserState::Loaded(list) if list.is_empty()));
        assert!(browser.container().contains("No projects found"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_terminal_error_panel() {
        let mut browser = RepositoryBrowser::new("octocat").unwrap();
        browser.load(&failing_source(|| FetchError::NotFound)).await.unwrap();

        assert!(matches!(browser.state(), BrowserState::Error(FetchError::NotFound)));
        assert!(browser.repositories().is_none());
        assert!(browser.container().contains("Failed to load projects"));
        assert!(browser.container().contains("octocat"));
        assert!(!browser.container().contains("project-card"));

        let panel = browser.container().to_string();
        browser.on_filter_changed(Visibility::Public, "alpha").unwrap();
        assert_eq!(browser.container(), panel);
        assert!(browser.error().is_some());

        let err = browser.loaded().unwrap_err().to_string();
        assert!(err.contains("octocat"));
    }

    #[tokio::test]
    async fn test_filter_change_rerenders() {
        let mut browser = RepositoryBrowser::new("octocat").unwrap();
        browser.load(&source_returning(alpha_beta())).await.unwrap();

        browser.on_filter_changed(Visibility::All, "alpha").unwrap();
        assert_eq!(browser.visible().len(), 1);
        assert!(browser.container().contains("Alpha"));
        assert!(!browser.container().contains("Beta"));

        browser.on_filter_changed(Visibility::All, "ml").unwrap();
        assert_eq!(browser.visible()[0].name, "Alpha");

        browser.on_filter_changed(Visibility::Private, "").unwrap();
        assert_eq!(browser.visible()[0].name, "Beta");
        assert!(!browser.container().contains("Alpha"));

        browser.on_filter_changed(Visibility::All, "zzz").unwrap();
        assert!(browser.visible().is_empty());
        assert!(browser.container().contains("No projects found"));

        browser.on_filter_changed(Visibility::All, "").unwrap();
        assert_eq!(browser.container().matches("project-card").count(), 2);
    }

    #[tokio::test]
    async fn test_filter_change_keeps_refinements() {
        let mut browser = RepositoryBrowser::new("octocat").unwrap();
        browser.load(&source_returning(alpha_beta())).await.unwrap();

        browser
            .apply(FilterState {
                has_topics: true,
                ..Default::default()
            })
            .unwrap();
        browser.on_filter_changed(Visibility::All, "").unwrap();

        assert!(browser.filter().has_topics);
        assert_eq!(browser.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_change_before_load_is_ignored() {
        let mut browser = RepositoryBrowser::new("octocat").unwrap();
        browser.on_filter_changed(Visibility::Private, "beta").unwrap();
        assert_eq!(browser.filter(), &FilterState::default());
        assert_eq!(browser.container(), "");
    }
}
