//! Aggregate numbers over a repository list.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::github::Repository;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryStats {
    pub total_repos: usize,
    pub public_repos: usize,
    pub private_repos: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    /// Repository count per primary language
    pub languages: BTreeMap<String, usize>,
    pub most_starred: String,
    pub most_recent: String,
}

impl RepositoryStats {
    /// `None` for an empty list. Ties go to the earliest record, and a record
    /// whose `updated_at` does not parse is never the most recent one unless
    /// none parse.
    pub fn compute(repos: &[Repository]) -> Option<Self> {
        let first = repos.first()?;

        let mut languages = BTreeMap::new();
        let mut most_starred = first;
        let mut most_recent = first;
        let mut most_recent_at = parse_timestamp(&first.updated_at);

        for repo in repos {
            if let Some(language) = &repo.language {
                *languages.entry(language.clone()).or_insert(0) += 1;
            }
            if repo.stargazers_count > most_starred.stargazers_count {
                most_starred = repo;
            }
            let updated_at = parse_timestamp(&repo.updated_at);
            if updated_at > most_recent_at {
                most_recent = repo;
                most_recent_at = updated_at;
            }
        }

        let private_repos = repos.iter().filter(|r| r.private).count();

        Some(Self {
            total_repos: repos.len(),
            public_repos: repos.len() - private_repos,
            private_repos,
            total_stars: repos.iter().map(|r| r.stargazers_count).sum(),
            total_forks: repos.iter().map(|r| r.forks_count).sum(),
            languages,
            most_starred: most_starred.name.clone(),
            most_recent: most_recent.name.clone(),
        })
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}
