use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub github: GitHubConfig,
    pub repos: Vec<RepoConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on, host:port
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Public HTTPS URL of the dashboard. When set, requests arriving over
    /// plaintext (per the X-Forwarded-Proto header) are redirected here.
    pub canonical_url: Option<String>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Single credential pair guarding the dashboard
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to the GITHUB_TOKEN env var.
    pub token: Option<String>,
}

/// One repository whose open pull requests appear on the dashboard
#[derive(Debug, Clone, Deserialize)]
pub struct RepoConfig {
    pub owner: String,
    pub repo: String,
}

impl Config {
    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to the GITHUB_TOKEN env var.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }
}
