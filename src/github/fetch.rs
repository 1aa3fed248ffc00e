use anyhow::{anyhow, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use octocrab::models::pulls::PullRequest;
use octocrab::Octocrab;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, warn};

use crate::config::RepoConfig;
use crate::github::types::PullRequestSummary;

/// Cap on repositories fetched from GitHub at once
const MAX_CONCURRENT_FETCHES: usize = 10;

/// Fetch the open pull requests of every configured repository.
///
/// Repositories are fetched concurrently with bounded fan-out. A repository
/// that keeps failing after retries is skipped with a warning so one bad
/// entry does not blank the whole dashboard; if every repository fails, the
/// fetch as a whole fails.
pub async fn fetch_open_prs(
    client: &Octocrab,
    repos: &[RepoConfig],
) -> Result<Vec<PullRequestSummary>> {
    let mut futures = FuturesUnordered::new();
    let mut repos_iter = repos.iter();
    let mut summaries = Vec::new();
    let mut failures = 0usize;

    // Fill initial batch
    for _ in 0..MAX_CONCURRENT_FETCHES {
        if let Some(repo) = repos_iter.next() {
            futures.push(fetch_repo_or_warn(client, repo));
        }
    }

    // Process results and feed new tasks
    while let Some(result) = futures.next().await {
        match result {
            Some(mut prs) => summaries.append(&mut prs),
            None => failures += 1,
        }
        if let Some(repo) = repos_iter.next() {
            futures.push(fetch_repo_or_warn(client, repo));
        }
    }

    if !repos.is_empty() && failures == repos.len() {
        return Err(anyhow!(
            "All {} configured repositories failed to fetch",
            failures
        ));
    }

    Ok(summaries)
}

/// Fetch one repository, downgrading failure to a warning
async fn fetch_repo_or_warn(
    client: &Octocrab,
    repo: &RepoConfig,
) -> Option<Vec<PullRequestSummary>> {
    match fetch_repo(client, &repo.owner, &repo.repo).await {
        Ok(prs) => {
            debug!(owner = %repo.owner, repo = %repo.repo, open = prs.len(), "fetched repository");
            Some(prs)
        }
        Err(e) => {
            warn!(owner = %repo.owner, repo = %repo.repo, "skipping repository: {}", e);
            None
        }
    }
}

/// List all open pull requests of a single repository, following pagination.
/// Transient failures on the first page are retried with exponential backoff.
async fn fetch_repo(
    client: &Octocrab,
    owner: &str,
    repo: &str,
) -> Result<Vec<PullRequestSummary>> {
    // Retry strategy: exponential backoff with 3 attempts
    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .take(3);

    let mut page = Retry::spawn(retry_strategy, || async {
        client
            .pulls(owner, repo)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(100)
            .send()
            .await
            .map_err(|e| map_github_error(e, owner, repo))
    })
    .await?;

    let mut summaries = Vec::new();
    loop {
        for pr in page.take_items() {
            if let Some(summary) = summarize(owner, repo, pr) {
                summaries.push(summary);
            }
        }
        match client
            .get_page::<PullRequest>(&page.next)
            .await
            .map_err(|e| map_github_error(e, owner, repo))?
        {
            Some(next) => page = next,
            None => break,
        }
    }

    Ok(summaries)
}

/// Reduce an API pull request to the dashboard summary. Returns None for
/// the odd API object that carries no creation timestamp.
fn summarize(owner: &str, repo: &str, pr: PullRequest) -> Option<PullRequestSummary> {
    let opened_at = pr.created_at?;

    Some(PullRequestSummary {
        owner: owner.to_string(),
        repo: repo.to_string(),
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        author: pr
            .user
            .map(|user| user.login)
            .unwrap_or_else(|| "unknown".to_string()),
        opened_at,
    })
}

/// Turn octocrab errors into messages a user can act on
fn map_github_error(e: octocrab::Error, owner: &str, repo: &str) -> anyhow::Error {
    let error_str = format!("{:?}", e);
    if error_str.contains("404") || error_str.contains("Not Found") {
        anyhow!(
            "Repository {}/{} not found or no access. Check the repo name and token permissions (needs 'repo' scope for private repos).",
            owner,
            repo
        )
    } else if error_str.contains("401") || error_str.contains("Bad credentials") {
        anyhow!("Authentication failed. Your GitHub token may be invalid or expired.")
    } else if error_str.contains("rate limit") || error_str.contains("403") {
        anyhow!("GitHub API rate limit exceeded. Wait a few minutes and try again.")
    } else {
        anyhow!("GitHub API error for {}/{}: {}", owner, repo, e)
    }
}
