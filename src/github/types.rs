use chrono::{DateTime, Utc};

/// One open pull request, reduced to what the dashboard needs.
///
/// Identity is the (`owner`, `repo`, `number`) triple. Summaries are built
/// fresh for every request and dropped once the page is rendered; nothing
/// here is persisted.
#[derive(Debug, Clone)]
pub struct PullRequestSummary {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub title: String,
    pub author: String,
    pub opened_at: DateTime<Utc>,
}

impl PullRequestSummary {
    /// Return a short reference in the format "owner/repo#123"
    pub fn short_ref(&self) -> String {
        format!("{}/{}#{}", self.owner, self.repo, self.number)
    }

    /// Web URL of the pull request on GitHub
    pub fn url(&self) -> String {
        format!(
            "https://github.com/{}/{}/pull/{}",
            self.owner, self.repo, self.number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pr() -> PullRequestSummary {
        PullRequestSummary {
            owner: "rust-lang".to_string(),
            repo: "cargo".to_string(),
            number: 4242,
            title: "Fix workspace resolution".to_string(),
            author: "octocat".to_string(),
            opened_at: Utc::now(),
        }
    }

    #[test]
    fn test_short_ref() {
        assert_eq!(sample_pr().short_ref(), "rust-lang/cargo#4242");
    }

    #[test]
    fn test_url() {
        assert_eq!(
            sample_pr().url(),
            "https://github.com/rust-lang/cargo/pull/4242"
        );
    }
}
