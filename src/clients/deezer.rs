//! Deezer public API client

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult, DEEZER_QUOTA_CODE};
use crate::models::deezer::{DeezerAlbum, DeezerArtist, DeezerErrorBody, DeezerTrack};

/// Read-only Deezer endpoints used by the artist repository
#[async_trait]
pub trait DeezerApi: Send + Sync {
    /// `/chart/0/artists`
    async fn chart_artists(&self, limit: usize) -> ApiResult<Vec<DeezerArtist>>;

    /// `/artist/{id}`
    async fn artist(&self, id: &str) -> ApiResult<DeezerArtist>;

    /// `/artist/{id}/albums`
    async fn artist_albums(&self, id: &str, limit: usize) -> ApiResult<Vec<DeezerAlbum>>;

    /// `/artist/{id}/top`
    async fn artist_top(&self, id: &str, limit: usize) -> ApiResult<Vec<DeezerTrack>>;

    /// `/search/artist`
    async fn search_artists(&self, query: &str, limit: usize) -> ApiResult<Vec<DeezerArtist>>;
}

/// reqwest-backed client; the base URL may be the real host or a proxy prefix
pub struct DeezerClient {
    client: Client,
    base_url: String,
    max_attempts: u32,
}

impl DeezerClient {
    pub fn new(client: Client, base_url: &str, max_attempts: u32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        let client = super::build_http_client(config.request_timeout())?;
        Ok(Self::new(
            client,
            &config.deezer_api_url,
            config.max_attempts,
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET with a fixed number of attempts and no delay between them
    async fn get_value(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 1;

        loop {
            match self.get_once(&url, query).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && e.is_retryable() => {
                    debug!(
                        "Deezer request {} failed (attempt {}/{}): {}",
                        path, attempt, self.max_attempts, e
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(&self, url: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = resp.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        check_envelope(value)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Vec<T>> {
        let value = self.get_value(path, query).await?;
        list_items(value)
    }
}

#[async_trait]
impl DeezerApi for DeezerClient {
    async fn chart_artists(&self, limit: usize) -> ApiResult<Vec<DeezerArtist>> {
        self.get_list("/chart/0/artists", &[("limit", limit.to_string())])
            .await
    }

    async fn artist(&self, id: &str) -> ApiResult<DeezerArtist> {
        let path = format!("/artist/{}", checked_id(id)?);
        let value = self.get_value(&path, &[]).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn artist_albums(&self, id: &str, limit: usize) -> ApiResult<Vec<DeezerAlbum>> {
        let path = format!("/artist/{}/albums", checked_id(id)?);
        self.get_list(&path, &[("limit", limit.to_string())]).await
    }

    async fn artist_top(&self, id: &str, limit: usize) -> ApiResult<Vec<DeezerTrack>> {
        let path = format!("/artist/{}/top", checked_id(id)?);
        self.get_list(&path, &[("limit", limit.to_string())]).await
    }

    async fn search_artists(&self, query: &str, limit: usize) -> ApiResult<Vec<DeezerArtist>> {
        // reqwest takes care of percent-encoding the query
        self.get_list(
            "/search/artist",
            &[("q", query.to_string()), ("limit", limit.to_string())],
        )
        .await
    }
}

/// Artist ids are numeric; anything else would change the request path
fn checked_id(id: &str) -> ApiResult<&str> {
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::InvalidRequest(format!("invalid artist id '{}'", id)));
    }
    Ok(id)
}

/// Turn an in-body `{"error": {...}}` into an error
pub(crate) fn check_envelope(value: Value) -> ApiResult<Value> {
    let Some(error) = value.get("error") else {
        return Ok(value);
    };

    let body: DeezerErrorBody = serde_json::from_value(error.clone())
        .map_err(|_| ApiError::Malformed(format!("unrecognised error object: {}", error)))?;

    if body.code == DEEZER_QUOTA_CODE {
        return Err(ApiError::RateLimited(body.message));
    }

    Err(ApiError::Upstream {
        code: body.code,
        message: if body.kind.is_empty() {
            body.message
        } else {
            format!("{}: {}", body.kind, body.message)
        },
    })
}

/// Unwrap the `data` array of a list response, skipping entries that do not
/// deserialize
pub(crate) fn list_items<T: DeserializeOwned>(mut value: Value) -> ApiResult<Vec<T>> {
    let data = match value.get_mut("data").map(Value::take) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ApiError::Malformed(format!(
                "'data' is not an array: {}",
                other
            )))
        }
        None => return Err(ApiError::Malformed("missing 'data' field".to_string())),
    };

    let total = data.len();
    let items: Vec<T> = data
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if items.len() < total {
        debug!("Skipped {} malformed list entries", total - items.len());
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse, HttpServer};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_check_envelope_quota() {
        let err = check_envelope(json!({
            "error": {"type": "Exception", "message": "Quota limit exceeded", "code": 4}
        }))
        .unwrap_err();
        assert!(matches!(err, ApiError::RateLimited(_)));
    }

    #[test]
    fn test_check_envelope_data_exception() {
        let err = check_envelope(json!({
            "error": {"type": "DataException", "message": "no data", "code": 800}
        }))
        .unwrap_err();
        match err {
            ApiError::Upstream { code, message } => {
                assert_eq!(code, 800);
                assert_eq!(message, "DataException: no data");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_list_items_skips_bad_entries() {
        let artists: Vec<DeezerArtist> = list_items(json!({
            "data": [{"id": 1, "name": "A"}, {"name": "no id"}, null, {"id": 2, "name": "B"}],
            "total": 4
        }))
        .unwrap();
        assert_eq!(artists.len(), 2);
        assert_eq!(artists[1].name, "B");
    }

    #[test]
    fn test_list_items_requires_data() {
        let err = list_items::<DeezerArtist>(json!({"total": 0})).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
        let err = list_items::<DeezerArtist>(json!({"data": {}})).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_checked_id() {
        assert_eq!(checked_id(" 27 ").unwrap(), "27");
        assert!(checked_id("../chart").is_err());
        assert!(checked_id("").is_err());
    }

    /// Serves `/chart/0/artists`, failing with 503 for the first `failures` calls
    async fn flaky_upstream(failures: usize) -> (String, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let server = HttpServer::new(move || {
            let counter = counter.clone();
            App::new().route(
                "/chart/0/artists",
                web::get().to(move || {
                    let counter = counter.clone();
                    async move {
                        let n = counter.fetch_add(1, Ordering::SeqCst);
                        if n < failures {
                            HttpResponse::ServiceUnavailable().finish()
                        } else {
                            HttpResponse::Ok().json(json!({
                                "data": [{"id": 27, "name": "Daft Punk"}],
                                "total": 1
                            }))
                        }
                    }
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        (format!("http://{}", addr), calls)
    }

    fn client_for(base: &str, attempts: u32) -> DeezerClient {
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        DeezerClient::new(http, base, attempts)
    }

    #[actix_web::test]
    async fn test_retries_server_errors() {
        let (base, calls) = flaky_upstream(2).await;
        let client = client_for(&base, 3);

        let artists = client.chart_artists(10).await.unwrap();
        assert_eq!(artists.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[actix_web::test]
    async fn test_gives_up_after_max_attempts() {
        let (base, calls) = flaky_upstream(5).await;
        let client = client_for(&format!("{}/", base), 2);

        let err = client.chart_artists(10).await.unwrap_err();
        assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 503));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
