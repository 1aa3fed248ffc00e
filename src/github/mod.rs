pub mod client;
pub mod fetch;
pub mod types;

pub use client::create_client;
pub use fetch::fetch_open_prs;
pub use types::PullRequestSummary;
