mod schema;

pub use schema::{AuthConfig, Config, GitHubConfig, RepoConfig, ServerConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/pr-dash/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("pr-dash")
}

/// Get the default config file path (~/.config/pr-dash/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/pr-dash/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
/// - The config names no repositories or has empty credentials
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Create ~/.config/pr-dash/config.yaml",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    validate(&config)?;
    Ok(config)
}

/// Reject configs that would serve an unusable dashboard
fn validate(config: &Config) -> Result<()> {
    if config.repos.is_empty() {
        anyhow::bail!("No repositories configured. Add at least one entry under 'repos'.");
    }
    if config.auth.username.is_empty() || config.auth.password.is_empty() {
        anyhow::bail!("Basic Auth credentials must not be empty. Set 'auth.username' and 'auth.password'.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
server:
  bind: 127.0.0.1:8080
  canonical_url: https://prs.example.org/
auth:
  username: user
  password: pass
github:
  token: ghp_test
repos:
  - owner: rust-lang
    repo: cargo
  - owner: rust-lang
    repo: rustup
"#;

    #[test]
    fn test_parse_full_config() {
        let config: Config = serde_saphyr::from_str(SAMPLE).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(
            config.server.canonical_url.as_deref(),
            Some("https://prs.example.org/")
        );
        assert_eq!(config.auth.username, "user");
        assert_eq!(config.auth.password, "pass");
        assert_eq!(config.github.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.repos.len(), 2);
        assert_eq!(config.repos[1].repo, "rustup");
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let yaml = r#"
server: {}
auth:
  username: user
  password: pass
repos:
  - owner: rust-lang
    repo: cargo
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert!(config.server.canonical_url.is_none());
        assert!(config.github.token.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_repos() {
        let yaml = r#"
server: {}
auth:
  username: user
  password: pass
repos: []
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("No repositories"));
    }

    #[test]
    fn test_validate_rejects_empty_credentials() {
        let yaml = r#"
server: {}
auth:
  username: ""
  password: pass
repos:
  - owner: rust-lang
    repo: cargo
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("credentials"));
    }

    #[test]
    fn test_token_prefers_config_value() {
        let config: Config = serde_saphyr::from_str(SAMPLE).unwrap();
        assert_eq!(config.github_token().as_deref(), Some("ghp_test"));
    }
}
