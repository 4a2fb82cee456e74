//! GitHub REST API access: the repository listing and its payload types.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_API_URL, GitHub, ListRepositories, PER_PAGE};
#[cfg(test)]
pub use client::MockListRepositories;
pub use error::FetchError;
pub use types::{License, Repository};
