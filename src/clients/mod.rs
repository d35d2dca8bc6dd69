//! Upstream music API clients

pub mod deezer;
pub mod lastfm;

pub use deezer::{DeezerApi, DeezerClient};
pub use lastfm::LastFmClient;

use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("deezer-discovery/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client settings for upstream calls
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}
