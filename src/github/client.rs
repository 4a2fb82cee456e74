use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::error::FetchError;
use super::types::Repository;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repositories requested per fetch. There is no pagination past this page.
pub const PER_PAGE: u32 = 100;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepositories: Send + Sync {
    /// Fetch up to [`PER_PAGE`] repositories of `user`, most recently updated first.
    async fn list_repositories(&self, user: &str) -> Result<Vec<Repository>, FetchError>;
    fn api_url(&self) -> &str;
}

pub struct GitHub {
    pub client: Client,
    pub api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url))]
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { client, api_url }
    }
}

#[async_trait]
impl ListRepositories for GitHub {
    #[tracing::instrument(skip(self))]
    async fn list_repositories(&self, user: &str) -> Result<Vec<Repository>, FetchError> {
        GitHub::fetch_user_repositories(user, &self.client, &self.api_url).await
    }

    fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl GitHub {
    /// Single attempt; failures are reported, never retried.
    #[tracing::instrument(skip(client, api_url))]
    pub async fn fetch_user_repositories(
        user: &str,
        client: &Client,
        api_url: &str,
    ) -> Result<Vec<Repository>, FetchError> {
        let url = format!("{}/users/{}/repos", api_url, user);

        debug!("Fetching repositories from {}...", url);

        let per_page = PER_PAGE.to_string();
        let response = client
            .get(&url)
            .query(&[("sort", "updated"), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            debug!("GitHub API responded with {}", status);
            return Err(FetchError::from_status(status, response.headers()));
        }

        let repositories = response
            .json::<Vec<Repository>>()
            .await
            .map_err(FetchError::from_reqwest)?;

        debug!("Fetched {} repositories", repositories.len());

        Ok(repositories)
    }
}
