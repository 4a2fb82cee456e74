use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{
    github::{GitHub, ListRepositories},
    runtime::Runtime,
};

/// Account whose repositories are shown when none is configured.
pub const DEFAULT_USER: &str = "kartikbhai23";

pub struct Config<R: Runtime, L: ListRepositories> {
    pub runtime: R,
    pub github: L,
    pub user: String,
}

impl<R: Runtime> Config<R, GitHub> {
    pub fn new(runtime: R, user: Option<String>, api_url: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(&token));
        }

        let client = Client::builder()
            .user_agent("ghfolio-cli")
            .default_headers(headers)
            .build()?;

        let github = GitHub::new(client, api_url);
        let user = user.unwrap_or_else(|| DEFAULT_USER.to_string());

        Ok(Self {
            runtime,
            github,
            user,
        })
    }
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
