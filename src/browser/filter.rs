//! Pure filtering over a loaded repository list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::github::Repository;

/// Visibility filter selected by a `filter-btn` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    All,
    Public,
    Private,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::All, Visibility::Public, Visibility::Private];

    pub fn admits(self, repo: &Repository) -> bool {
        match self {
            Visibility::All => true,
            Visibility::Public => !repo.private,
            Visibility::Private => repo.private,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::All => "All",
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::All => write!(f, "all"),
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

impl FromStr for Visibility {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Visibility::All),
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            _ => anyhow::bail!(
                "Unknown visibility filter: {}. Expected all, public, or private.",
                s
            ),
        }
    }
}

/// Everything that narrows the displayed set.
///
/// `visibility` and `query` are driven by the page's filter buttons and search
/// box. The remaining fields are refinements that default to "off".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub visibility: Visibility,
    pub query: String,
    /// Exact primary language, compared case-insensitively
    pub language: Option<String>,
    pub min_stars: u64,
    pub has_topics: bool,
}

impl FilterState {
    pub fn new(visibility: Visibility, query: impl Into<String>) -> Self {
        Self {
            visibility,
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn has_refinements(&self) -> bool {
        self.language.is_some() || self.min_stars > 0 || self.has_topics
    }
}

/// Case-insensitive substring match on name, description or any topic.
/// `needle` must already be lowercase.
pub fn matches_query(repo: &Repository, needle: &str) -> bool {
    repo.name.to_lowercase().contains(needle)
        || repo
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || repo
            .topics
            .iter()
            .any(|topic| topic.to_lowercase().contains(needle))
}

fn matches_refinements(repo: &Repository, state: &FilterState) -> bool {
    if let Some(language) = &state.language {
        let matches = repo
            .language
            .as_ref()
            .is_some_and(|l| l.eq_ignore_ascii_case(language));
        if !matches {
            return false;
        }
    }

    repo.stargazers_count >= state.min_stars && (!state.has_topics || !repo.topics.is_empty())
}

/// Returns the records of `repos` that pass `state`, in their original order.
pub fn filter_repositories<'a>(repos: &'a [Repository], state: &FilterState) -> Vec<&'a Repository> {
    let needle = state.query.to_lowercase();

    repos
        .iter()
        .filter(|repo| state.visibility.admits(repo))
        .filter(|repo| needle.is_empty() || matches_query(repo, &needle))
        .filter(|repo| matches_refinements(repo, state))
        .collect()
}
