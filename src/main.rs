use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pr-dash")]
#[command(about = "HTML dashboard of open pull requests, triaged by age", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (defaults to ~/.config/pr-dash/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "pr_dash=debug,info"
    } else {
        "pr_dash=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = pr_dash::config::load_config(cli.config)?;

    let token = config.github_token();
    if token.is_none() {
        info!("no GitHub token configured; using anonymous API rate limits");
    }
    let client = pr_dash::github::create_client(token.as_deref())?;

    // The serving loop is synchronous; the runtime only drives GitHub fetches.
    let runtime = tokio::runtime::Runtime::new()?;
    pr_dash::server::serve(&config, runtime.handle().clone(), client)
}
