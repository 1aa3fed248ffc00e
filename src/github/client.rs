use anyhow::{Context, Result};
use octocrab::Octocrab;

/// Create a GitHub client, authenticated when a personal access token is
/// available. An anonymous client works for public repositories but runs
/// into much lower rate limits.
pub fn create_client(token: Option<&str>) -> Result<Octocrab> {
    let builder = Octocrab::builder();
    let builder = match token {
        Some(token) => builder.personal_token(token.to_string()),
        None => builder,
    };
    builder.build().context("Failed to create GitHub client")
}
