//! HTTP surface: artist JSON routes, Deezer forwarding and the static site

pub mod artist;
pub mod lastfm;
pub mod proxy;
pub mod spa;

use actix_web::{web, HttpRequest, HttpResponse};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::clients::LastFmClient;
use crate::config::AppConfig;
use crate::core::ArtistRepository;
use proxy::ProxyTarget;

/// Shared state handed to every handler
pub struct AppState {
    pub repo: ArtistRepository,
    pub lastfm: LastFmClient,
    pub proxy: ProxyTarget,
    pub dist_dir: PathBuf,
    pub top_artists_count: usize,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let repo = ArtistRepository::from_config(config)?;
        let lastfm = LastFmClient::from_config(config)?;

        // the proxy relays redirects instead of following them
        let proxy_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to build proxy HTTP client")?;

        let proxy = ProxyTarget::new(
            proxy_client,
            &config.proxy.upstream,
            &config.proxy.api_prefix,
            &config.proxy.origin(),
        );

        Ok(Self {
            repo,
            lastfm,
            proxy,
            dist_dir: config.proxy.dist_dir.clone(),
            top_artists_count: config.top_artists_count,
        })
    }
}

/// Configure the JSON API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Artist routes
        .service(web::scope("/api/artists").configure(artist::configure))
        // Last.fm routes
        .service(web::scope("/api/lastfm").configure(lastfm::configure));
}

/// Catch-all used by the manual proxy: forward API paths, serve everything
/// else from the build output
pub async fn manual_dispatch(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    debug!("Requested: {}", req.path());

    if state.proxy.matches(req.path()) {
        return proxy::forward(&state.proxy, &req, body).await;
    }

    spa::serve(&state.dist_dir, &req)
}
