//! Last.fm client - experimental secondary chart source

use reqwest::Client;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{LastfmArtist, LastfmChartResponse};

/// Last.fm error code for "rate limit exceeded"
const LASTFM_RATE_LIMIT_CODE: i64 = 29;

/// Last.fm client for chart lookups
pub struct LastFmClient {
    client: Client,
    api_url: String,
    api_key: String,
    pub enabled: bool,
}

impl LastFmClient {
    pub fn new(client: Client, api_url: &str, api_key: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            enabled: !api_key.trim().is_empty(),
        }
    }

    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        let client = super::build_http_client(config.request_timeout())?;
        Ok(Self::new(client, &config.lastfm_api_url, &config.lastfm_api_key))
    }

    /// `chart.gettopartists`
    pub async fn top_artists(&self, limit: usize) -> ApiResult<Vec<LastfmArtist>> {
        if !self.enabled {
            return Err(ApiError::Disabled("Last.fm API key is not configured"));
        }

        let params = [
            ("method", "chart.gettopartists".to_string()),
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("limit", limit.to_string()),
        ];

        let resp = self.client.get(&self.api_url).query(&params).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        // Last.fm reports errors in the body, sometimes with a 4xx status
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;

        if let Some(error) = json.get("error") {
            let code = error.as_i64().unwrap_or(0);
            let msg = json
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            if code == LASTFM_RATE_LIMIT_CODE {
                return Err(ApiError::RateLimited(msg));
            }
            return Err(ApiError::Upstream { code, message: msg });
        }

        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let chart: LastfmChartResponse =
            serde_json::from_value(json).map_err(|e| ApiError::Malformed(e.to_string()))?;
        let artists = chart
            .artists
            .ok_or_else(|| ApiError::Malformed("missing 'artists' object".to_string()))?
            .artist;

        debug!("Last.fm chart returned {} artists", artists.len());
        Ok(artists.into_iter().map(LastfmArtist::from).collect())
    }
}
