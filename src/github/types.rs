use serde::{Deserialize, Deserializer, Serialize};

/// A repository as returned by `GET /users/{user}/repos`.
///
/// Only the fields the browser works with are decoded; everything else in the
/// payload is ignored.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    /// Empty strings are normalized to `None`; the API returns `""` for
    /// repositories whose homepage was cleared.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub homepage: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub private: bool,
    pub language: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: Vec<String>,
    pub updated_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchers_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_issues_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct License {
    pub key: String,
    pub name: String,
}

impl Repository {
    pub fn visibility_label(&self) -> &'static str {
        if self.private { "private" } else { "public" }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
