//! Upstream API forwarding for the dev proxy
//!
//! Requests under the API prefix lose the prefix and are replayed against the
//! upstream host with the same method, query and body. The `Origin` header is
//! replaced so the upstream's cross-origin checks pass; `Host` is left to the
//! HTTP client so it names the upstream. One upstream request per inbound
//! request, no retry.

use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use reqwest::Client;
use tracing::{debug, error};

use super::AppState;

const PROXY_ERROR_BODY: &str = "Something went wrong with the proxy request.";

/// Headers that describe a single connection and must not be relayed
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Where and how to forward
#[derive(Debug, Clone)]
pub struct ProxyTarget {
    client: Client,
    upstream: String,
    prefix: String,
    origin: String,
}

impl ProxyTarget {
    pub fn new(client: Client, upstream: &str, prefix: &str, origin: &str) -> Self {
        Self {
            client,
            upstream: upstream.trim_end_matches('/').to_string(),
            prefix: prefix.trim_end_matches('/').to_string(),
            origin: origin.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `path` falls under the API prefix
    pub fn matches(&self, path: &str) -> bool {
        path == self.prefix
            || path
                .strip_prefix(&self.prefix)
                .map(|rest| rest.starts_with('/'))
                .unwrap_or(false)
    }

    /// Upstream URL for an inbound path and query string
    pub fn upstream_url(&self, path: &str, query: &str) -> String {
        let rest = path.strip_prefix(&self.prefix).unwrap_or(path);
        let rest = if rest.is_empty() { "/" } else { rest };

        let mut url = format!("{}{}", self.upstream, rest);
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
        url
    }
}

fn skip_request_header(name: &str) -> bool {
    HOP_BY_HOP.contains(&name) || matches!(name, "host" | "origin" | "content-length")
}

fn skip_response_header(name: &str) -> bool {
    HOP_BY_HOP.contains(&name) || name == "content-length"
}

/// Replay `req` against the upstream and relay the response
pub async fn forward(target: &ProxyTarget, req: &HttpRequest, body: web::Bytes) -> HttpResponse {
    let url = target.upstream_url(req.path(), req.query_string());
    debug!("Proxying {} {} -> {}", req.method(), req.path(), url);

    let method = match reqwest::Method::from_bytes(req.method().as_str().as_bytes()) {
        Ok(method) => method,
        Err(_) => return HttpResponse::MethodNotAllowed().finish(),
    };

    let mut upstream_req = target.client.request(method, &url);
    for (name, value) in req.headers() {
        if skip_request_header(name.as_str()) {
            continue;
        }
        upstream_req = upstream_req.header(name.as_str(), value.as_bytes());
    }
    upstream_req = upstream_req.header("origin", target.origin.as_str());
    if !body.is_empty() {
        upstream_req = upstream_req.body(body.to_vec());
    }

    let resp = match upstream_req.send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Proxy error for {}: {}", url, e);
            return proxy_error();
        }
    };

    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    for (name, value) in resp.headers() {
        if skip_response_header(name.as_str()) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            builder.append_header((name, value));
        }
    }

    match resp.bytes().await {
        Ok(bytes) => builder.body(bytes),
        Err(e) => {
            error!("Proxy error reading body from {}: {}", url, e);
            proxy_error()
        }
    }
}

fn proxy_error() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type("text/plain")
        .body(PROXY_ERROR_BODY)
}

/// Handler mounted under the API prefix (middleware mode)
pub async fn proxy_handler(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    forward(&state.proxy, &req, body).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> ProxyTarget {
        ProxyTarget::new(
            Client::new(),
            "https://api.deezer.com/",
            "/api/deezer",
            "http://localhost:8081",
        )
    }

    #[test]
    fn test_matches_prefix() {
        let target = target();
        assert!(target.matches("/api/deezer/chart/0/artists"));
        assert!(target.matches("/api/deezer"));
        assert!(!target.matches("/api/deezerx/chart"));
        assert!(!target.matches("/artist/27"));
    }

    #[test]
    fn test_upstream_url() {
        let target = target();
        assert_eq!(
            target.upstream_url("/api/deezer/chart/0/artists", "limit=20"),
            "https://api.deezer.com/chart/0/artists?limit=20"
        );
        assert_eq!(
            target.upstream_url("/api/deezer", ""),
            "https://api.deezer.com/"
        );
        assert_eq!(
            target.upstream_url("/api/deezer/search/artist", "q=daft%20punk"),
            "https://api.deezer.com/search/artist?q=daft%20punk"
        );
    }

    #[test]
    fn test_header_filters() {
        assert!(skip_request_header("host"));
        assert!(skip_request_header("origin"));
        assert!(skip_request_header("connection"));
        assert!(!skip_request_header("accept"));
        assert!(skip_response_header("transfer-encoding"));
        assert!(!skip_response_header("content-type"));
    }
}
